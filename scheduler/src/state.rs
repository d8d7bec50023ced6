//! Scheduler lifecycle state.

use std::fmt;

/// Where the scheduler is in its cycle.
///
/// OneShot:    Idle -> Running -> Done
/// Continuous: Idle -> Running -> Sleeping -> Running -> ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerPhase {
    #[default]
    Idle,
    Running,
    Sleeping,
    Done,
}

impl SchedulerPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for SchedulerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Sleeping => "sleeping",
            Self::Done => "done",
        })
    }
}
