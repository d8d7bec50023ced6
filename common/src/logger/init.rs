use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Installs the global subscriber once per process.
///
/// `json` switches to machine-readable output for hosted deployments;
/// otherwise a human-oriented compact format is used. The filter comes from
/// `RUST_LOG` and falls back to `info`.
pub fn init_logger(service_name: &'static str, json: bool) {
    LOGGER_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let builder = fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_span_events(fmt::format::FmtSpan::CLOSE);

        // try_init: a test harness may already own the global dispatcher.
        let installed = if json {
            builder.json().try_init().is_ok()
        } else {
            builder.compact().try_init().is_ok()
        };

        if installed {
            tracing::info!(service = service_name, json, "logger initialized");
        }
    });
}
