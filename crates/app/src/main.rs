use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use training_api::{ApiConfig, DEFAULT_BASE_URL, FileSessionVault};
use training_services::AppServices;
use training_ui::{App, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    api_url: String,
    session_file: PathBuf,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  training-app [--api-url <url>] [--session-file <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {DEFAULT_BASE_URL}");
    eprintln!("  --session-file training-session.json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRAINING_API_URL, TRAINING_SESSION_FILE, RUST_LOG");
}

fn default_session_file() -> PathBuf {
    std::env::var_os("TRAINING_SESSION_FILE")
        .map_or_else(|| PathBuf::from("training-session.json"), PathBuf::from)
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url =
            std::env::var("TRAINING_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let mut session_file = default_session_file();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api_url = value;
                }
                "--session-file" => {
                    session_file = PathBuf::from(require_value(args, "--session-file")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api_url,
            session_file,
        })
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let config = ApiConfig::new(&args.api_url)?;
    tracing::info!(api_url = %config.base_url(), session_file = %args.session_file.display(), "starting");

    let vault = Arc::new(FileSessionVault::new(args.session_file));
    let services = AppServices::new_rest(config, vault);

    // Rehydrate before the first frame so the router guard sees the
    // persisted session instead of flashing the login screen.
    services.session().load_session();

    let context = build_app_context(services);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Training")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
