use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{Span, field};

use super::TraceId;

/// Root span for a scan pass or an inbound request.
///
/// `instrument` is left empty so the caller can record it once known.
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "root",
        name = %name,
        trace_id = %trace_id,
        instrument = field::Empty
    )
}

/// Child span; inherits the trace id from the current root.
pub fn child_span(name: &'static str) -> Span {
    tracing::info_span!("child", name = %name, instrument = field::Empty)
}

/// Awaits `fut` and emits a warning under the `performance` target when it
/// takes longer than `max`.
pub async fn warn_if_slow<F, T>(label: &'static str, max: Duration, fut: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    let elapsed = start.elapsed();
    if elapsed > max {
        tracing::warn!(
            target: "performance",
            label = label,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow operation detected"
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_carry_their_name() {
        let id = TraceId::new();
        let root = root_span("scan_pass", &id);
        let _g = root.enter();
        let child = child_span("fetch");
        child.record("instrument", field::display("USDJPY"));
    }
}
