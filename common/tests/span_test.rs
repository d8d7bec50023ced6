//! Runs in its own test binary: `#[traced_test]` needs to own the global
//! subscriber, which the logger init unit test would otherwise claim first.

use std::time::Duration;

use common::logger::warn_if_slow;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn fast_future_passes_value_through_silently() {
    let v = warn_if_slow("fast", Duration::from_secs(5), async { 7 }).await;

    assert_eq!(v, 7);
    assert!(!logs_contain("slow operation detected"));
}

#[tokio::test]
#[traced_test]
async fn slow_future_is_reported() {
    let v = warn_if_slow("slow", Duration::from_millis(1), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        "done"
    })
    .await;

    assert_eq!(v, "done");
    assert!(logs_contain("slow operation detected"));
}
