
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mock_collaborators::*;
use scheduler::bootstrap::BootstrapTrigger;
use scheduler::engine::Scheduler;
use scheduler::scan::Scanner;
use scheduler::types::ScheduleMode;
use tracing_test::traced_test;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_events_launch_exactly_once() {
    let launches = Arc::new(AtomicUsize::new(0));

    let counter = launches.clone();
    let trigger = Arc::new(BootstrapTrigger::from_job(async move {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let mut calls = Vec::new();
    for _ in 0..64 {
        let t = trigger.clone();
        calls.push(tokio::spawn(async move { t.on_first_event() }));
    }

    let mut winners = 0;
    for c in calls {
        if c.await.unwrap() {
            winners += 1;
        }
    }

    // Give the launched job a chance to run.
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(winners, 1);
    assert_eq!(launches.load(Ordering::SeqCst), 1);
    assert!(trigger.has_started());
}

#[tokio::test]
async fn later_events_are_noops() {
    let trigger = BootstrapTrigger::from_job(async {});

    assert!(!trigger.has_started());
    assert!(trigger.on_first_event());
    assert!(!trigger.on_first_event());
    assert!(!trigger.on_first_event());
    assert!(trigger.has_started());
}

#[tokio::test(start_paused = true)]
async fn launched_scheduler_runs_in_background() {
    let source = Arc::new(MockSource::new().with_closes("A=X", sell_closes()));
    let notifier = Arc::new(MockNotifier::ok());
    let scanner = Scanner::new(scan_config(&[("A", "A=X")]), source.clone(), notifier.clone());
    let trigger = BootstrapTrigger::new(Scheduler::new(scanner, ScheduleMode::Continuous));

    // Nothing runs until the first event.
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert!(source.fetched().is_empty());

    assert!(trigger.on_first_event());
    tokio::time::sleep(Duration::from_secs(61)).await;

    assert_eq!(source.fetched().len(), 2);
    assert_eq!(notifier.attempts(), 2);
}

#[tokio::test]
#[traced_test]
async fn panicking_job_does_not_reach_the_caller() {
    let trigger = BootstrapTrigger::from_job(async {
        panic!("price feed exploded");
    });

    assert!(trigger.on_first_event());
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(logs_contain("background scheduler panicked"));
    assert!(!trigger.on_first_event());
}
