use crate::types::date_window::DateWindow;
use crate::types::month::MonthOfYear;
use polars::prelude::{col, lit, DataType, Expr, LazyFrame, TimeUnit};

pub trait WindFrameFilterExt {
    /// Keeps rows whose `column` timestamp lies within `window` (both ends inclusive).
    ///
    /// # Arguments
    /// * `column`: Name of a `Datetime` column.
    /// * `window`: The closed interval to keep.
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied. Type errors surface on `collect`.
    fn filter_window(self, column: &str, window: &DateWindow) -> LazyFrame;

    /// Keeps rows whose `column` timestamp falls in one of `months`.
    ///
    /// An empty month list keeps nothing.
    fn filter_months(self, column: &str, months: &[MonthOfYear]) -> LazyFrame;
}

fn timestamp(column: &str) -> Expr {
    col(column).cast(DataType::Datetime(TimeUnit::Milliseconds, None))
}

impl WindFrameFilterExt for LazyFrame {
    fn filter_window(self, column: &str, window: &DateWindow) -> LazyFrame {
        self.filter(
            timestamp(column)
                .gt_eq(lit(window.start))
                .and(timestamp(column).lt_eq(lit(window.end))),
        )
    }

    fn filter_months(self, column: &str, months: &[MonthOfYear]) -> LazyFrame {
        let month = timestamp(column).dt().month().cast(DataType::Int32);
        let predicate = months
            .iter()
            .map(|m| month.clone().eq(lit(m.get() as i32)))
            .reduce(|acc, next| acc.or(next))
            .unwrap_or_else(|| lit(false));
        self.filter(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use polars::prelude::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn frame() -> PolarsResult<LazyFrame> {
        let stamps = Series::new(
            "ts".into(),
            vec![at(2023, 12, 31), at(2024, 1, 15), at(2024, 2, 1), at(2024, 3, 1)],
        );
        Ok(DataFrame::new(vec![stamps.into()])?.lazy())
    }

    #[test]
    fn window_keeps_both_boundaries() -> PolarsResult<()> {
        let window = DateWindow {
            start: at(2024, 1, 15),
            end: at(2024, 2, 1),
        };
        let df = frame()?.filter_window("ts", &window).collect()?;
        assert_eq!(df.height(), 2);
        Ok(())
    }

    #[test]
    fn months_filter_selects_calendar_months() -> PolarsResult<()> {
        let winter: Vec<MonthOfYear> = [12, 1, 2].into_iter().filter_map(MonthOfYear::new).collect();
        let df = frame()?.filter_months("ts", &winter).collect()?;
        assert_eq!(df.height(), 3);

        let none = frame()?.filter_months("ts", &[]).collect()?;
        assert_eq!(none.height(), 0);
        Ok(())
    }
}
