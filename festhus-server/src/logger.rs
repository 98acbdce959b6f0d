//! Logging setup
//!
//! `RUST_LOG` wins when set. Output goes to stdout, or to a daily rolling
//! file when the configured log directory exists.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

const DEFAULT_FILTER: &str = "festhus_server=info,tower_http=info";

pub fn init_logger(format: LogFormat, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_ids(false);

    let log_dir = log_dir.map(Path::new).filter(|p| p.is_dir());

    match (format, log_dir) {
        (LogFormat::Json, Some(dir)) => {
            let appender = tracing_appender::rolling::daily(dir, "festhus-server.log");
            builder.json().with_writer(appender).init();
        }
        (LogFormat::Json, None) => builder.json().init(),
        (LogFormat::Pretty, Some(dir)) => {
            let appender = tracing_appender::rolling::daily(dir, "festhus-server.log");
            builder.with_ansi(false).with_writer(appender).init();
        }
        (LogFormat::Pretty, None) => builder.init(),
    }
}
