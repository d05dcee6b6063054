//! Logging Infrastructure

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber.
///
/// `RUST_LOG` wins when set, otherwise `default_filter` applies. With `log_dir`
/// set, output goes to a daily rolling file named after `file_prefix`.
pub fn init_logger(default_filter: &str, log_dir: Option<&str>, file_prefix: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if let Some(dir) = log_dir {
        let path = std::path::Path::new(dir);
        if path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(path, file_prefix);
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
        eprintln!("LOG_DIR {dir} is not a directory, logging to stdout");
    }

    subscriber.init();
}
