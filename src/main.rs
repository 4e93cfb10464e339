use clap::{Parser, ValueEnum};
use log::{debug, error, info};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use windrose_rs::{
    default_config_path, parse_timestamp, ConfigError, DateWindow, EmptyBucketPolicy,
    MonthOfYear, Windrose, WindroseConfig, WindroseError,
};

#[derive(Parser, Debug)]
#[command(name = "windrose")]
#[command(about = "Render monthly and seasonal windrose charts from a wind CSV", long_about = None)]
struct Cli {
    /// JSON config file. Defaults to <config dir>/windrose_rs/config.json when present
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Input CSV with timestamp, direction and speed columns
    #[arg(short, long, value_name = "CSV")]
    input: Option<PathBuf>,

    /// Existing directory to write the charts into
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// First timestamp to include (date or datetime)
    #[arg(long)]
    start: Option<String>,

    /// Last timestamp to include (date or datetime)
    #[arg(long)]
    end: Option<String>,

    /// Months to chart, e.g. 1,2,12
    #[arg(long, value_delimiter = ',')]
    months: Option<Vec<u32>>,

    #[arg(long, value_enum)]
    empty_bucket: Option<EmptyBucketArg>,

    /// Print the resolved configuration as JSON and exit
    #[arg(long, default_value_t = false)]
    print_config: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum EmptyBucketArg {
    Error,
    Blank,
}

impl From<EmptyBucketArg> for EmptyBucketPolicy {
    fn from(arg: EmptyBucketArg) -> Self {
        match arg {
            EmptyBucketArg::Error => EmptyBucketPolicy::Error,
            EmptyBucketArg::Blank => EmptyBucketPolicy::Blank,
        }
    }
}

fn base_config(cli: &Cli) -> Result<WindroseConfig, WindroseError> {
    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => match default_config_path() {
            Ok(path) if path.is_file() => Some(path),
            Ok(_) => None,
            Err(e) => {
                debug!("No default config file: {}", e);
                None
            }
        },
    };

    match path {
        Some(path) => {
            info!("Reading config from {}", path.display());
            Ok(WindroseConfig::from_json_file(&path)?)
        }
        None => Ok(WindroseConfig::builder()
            .input_path(PathBuf::new())
            .output_dir(PathBuf::new())
            .build()),
    }
}

fn bound(raw: &str) -> Result<chrono::NaiveDateTime, ConfigError> {
    parse_timestamp(raw).ok_or_else(|| ConfigError::InvalidTimestamp(raw.to_string()))
}

/// Command-line flags take precedence over the config file.
fn apply_overrides(cli: &Cli, mut config: WindroseConfig) -> Result<WindroseConfig, WindroseError> {
    if let Some(input) = &cli.input {
        config.input_path = input.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }
    if cli.start.is_some() || cli.end.is_some() {
        let start = cli.start.as_deref().map(bound).transpose()?;
        let end = cli.end.as_deref().map(bound).transpose()?;
        config.date_window = DateWindow::new(
            start.unwrap_or(config.date_window.start),
            end.unwrap_or(config.date_window.end),
        )?;
    }
    if let Some(months) = &cli.months {
        config.months = months
            .iter()
            .map(|&m| MonthOfYear::try_from(m))
            .collect::<Result<_, _>>()?;
    }
    if let Some(policy) = cli.empty_bucket {
        config.empty_bucket = policy.into();
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), WindroseError> {
    let config = apply_overrides(&cli, base_config(&cli)?)?;
    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let summary = Windrose::with_default_renderer(config).run()?;
    info!(
        "Done: {} rows loaded, {} complete, {} in window, {} charts",
        summary.loaded_rows,
        summary.cleaned_rows,
        summary.filtered_rows,
        summary.charts.len()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
