
use std::sync::Arc;
use std::time::Duration;

use mock_collaborators::*;
use scheduler::engine::Scheduler;
use scheduler::scan::Scanner;
use scheduler::state::SchedulerPhase;
use scheduler::types::ScheduleMode;
use tokio::time::Instant;

fn build(mode: ScheduleMode) -> (Scheduler, Arc<MockSource>, Arc<MockNotifier>) {
    let source = Arc::new(MockSource::new().with_closes("A=X", sell_closes()));
    let notifier = Arc::new(MockNotifier::ok());
    let scanner = Scanner::new(
        scan_config(&[("A", "A=X"), ("B", "B=X")]),
        source.clone(),
        notifier.clone(),
    );
    (Scheduler::new(scanner, mode), source, notifier)
}

#[tokio::test(start_paused = true)]
async fn one_shot_scans_once_and_finishes_without_sleeping() {
    let (scheduler, source, notifier) = build(ScheduleMode::OneShot);
    let phase = scheduler.subscribe();
    assert_eq!(*phase.borrow(), SchedulerPhase::Idle);

    let started = Instant::now();
    let passes = scheduler.run().await;

    assert_eq!(passes, 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(source.fetched(), vec!["A=X", "B=X"]);
    assert_eq!(notifier.attempts(), 1);
    assert_eq!(*phase.borrow(), SchedulerPhase::Done);
    assert!(phase.borrow().is_terminal());
}

#[tokio::test(start_paused = true)]
async fn continuous_mode_scans_once_per_interval() {
    let (scheduler, source, notifier) = build(ScheduleMode::Continuous);
    let mut phase = scheduler.subscribe();

    let handle = tokio::spawn(scheduler.run());

    // First pass runs immediately, then the scheduler parks.
    phase
        .wait_for(|p| *p == SchedulerPhase::Sleeping)
        .await
        .unwrap();
    assert_eq!(source.fetched().len(), 2);

    // Passes at t = 60, 120 and 180 seconds.
    tokio::time::sleep(Duration::from_secs(181)).await;
    assert_eq!(source.fetched().len(), 8);
    assert_eq!(notifier.attempts(), 4);
    assert!(!handle.is_finished());

    // Only external cancellation stops it.
    handle.abort();
    let err = handle.await.unwrap_err();
    assert!(err.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn continuous_mode_survives_a_persistent_outage() {
    let source = Arc::new(MockSource::new().with_failure("A=X", "503"));
    let notifier = Arc::new(MockNotifier::ok());
    let scanner = Scanner::new(scan_config(&[("A", "A=X")]), source.clone(), notifier.clone());
    let scheduler = Scheduler::new(scanner, ScheduleMode::Continuous);

    let handle = tokio::spawn(scheduler.run());

    tokio::time::sleep(Duration::from_secs(60 * 10 + 1)).await;

    assert_eq!(source.fetched().len(), 11);
    assert_eq!(notifier.attempts(), 0);
    assert!(!handle.is_finished());
    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn interval_comes_from_config() {
    let source = Arc::new(MockSource::new());
    let mut cfg = (*scan_config(&[("A", "A=X")])).clone();
    cfg.poll_interval = Duration::from_secs(5);

    let scanner = Scanner::new(Arc::new(cfg), source.clone(), Arc::new(MockNotifier::ok()));
    let handle = tokio::spawn(Scheduler::new(scanner, ScheduleMode::Continuous).run());

    tokio::time::sleep(Duration::from_secs(21)).await;

    // t = 0, 5, 10, 15, 20
    assert_eq!(source.fetched().len(), 5);
    handle.abort();
}
