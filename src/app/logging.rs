//! Usage: Tracing bootstrap (stderr + daily rolling file under the app data dir, `log` bridge).

use crate::app_paths;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";
const LOG_FILE_PREFIX: &str = "ticker-widget.log";

// Keeps the background writer flushing for the lifetime of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub(crate) fn init(app: &tauri::AppHandle) {
    // Tauri and its plugins log through the `log` facade.
    if let Err(err) = tracing_log::LogTracer::init() {
        eprintln!("log bridge already installed: {err}");
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = match app_paths::logs_dir(app) {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().with_ansi(false).with_writer(writer))
        }
        Err(err) => {
            eprintln!("file logging disabled: {err}");
            None
        }
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer);

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("tracing subscriber already installed: {err}");
        return;
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ticker widget starting");
}
