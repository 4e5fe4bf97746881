use std::{path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use clap::Parser;
use cup_core::{CupSettings, Vector2};
use cup_executor::Executor;
use cup_simulator::{SimulationBuilder, SimulationConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod modes;

#[derive(Debug, Parser)]
#[command(name = "cup-cli")]
pub(crate) struct Args {
    #[clap(long, short, value_enum, default_value = "headless")]
    mode: modes::Mode,

    /// Number of ticks to run in headless mode
    #[clap(long, default_value = "3600")]
    ticks: u64,

    /// Settings file, created with the defaults if it does not exist
    #[clap(long, default_value = "cup-settings.json")]
    settings: PathBuf,

    /// Initial ball x, defaults to the field centre
    #[clap(long)]
    ball_x: Option<f64>,

    /// Initial ball y, defaults to the field centre
    #[clap(long)]
    ball_y: Option<f64>,

    /// Log the state of the robots every this many ticks
    #[clap(long, default_value = "600")]
    report_every: u64,

    #[clap(long, default_value = "info")]
    log_level: String,

    #[clap(long, default_value = "auto")]
    log_file: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up log file
    let log_file_path = if args.log_file != "auto" {
        let path = PathBuf::from(args.log_file.clone());
        if path.exists() {
            eprintln!("Log file already exists: {}", path.display());
            std::process::exit(1);
        }
        path
    } else {
        let time = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        let filename = format!("cup-{time}.log");
        dirs::data_local_dir()
            .map(|p| p.join("cup").join(&filename))
            .unwrap_or_else(|| PathBuf::from(&filename))
    };
    let log_dir = match log_file_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    let log_file_name = log_file_path
        .file_name()
        .context("Log file path has no file name")?;

    // Create log file appender
    let appender = tracing_appender::rolling::never(&log_dir, log_file_name);
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);

    // Set up tracing. `log` records from the library crates are forwarded.
    let log_level = match tracing::Level::from_str(&args.log_level) {
        Ok(level) => level,
        Err(_) => {
            eprintln!("Invalid log level: {}", args.log_level);
            std::process::exit(1);
        }
    };
    let stdout_layer = fmt::Subscriber::builder()
        .with_max_level(log_level)
        .without_time()
        .finish();
    let logfile_layer = fmt::Layer::default()
        .json()
        .with_ansi(false)
        .with_writer(non_blocking_appender);
    stdout_layer
        .with(logfile_layer)
        .try_init()
        .context("Unable to set global tracing subscriber")?;

    tracing::info!("Saving logs to {}", log_file_path.display());

    let settings = CupSettings::load_or_insert(&args.settings)?;
    let field = settings.field.clone();
    let ball = Vector2::new(
        args.ball_x.unwrap_or(field.width / 2.0),
        args.ball_y.unwrap_or(field.height / 2.0),
    );
    let simulation = SimulationBuilder::new(SimulationConfig::from_settings(&settings))
        .add_start_robots()
        .add_ball(ball)
        .build();
    let executor = Executor::new(settings.program.clone(), field);
    let game = modes::Match::new(simulation, executor, args.report_every);

    match args.mode {
        modes::Mode::Headless => modes::headless::run(game, args.ticks),
        modes::Mode::RealTime => modes::real_time::run(game).await,
    }
}
