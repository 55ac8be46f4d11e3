//! Outcome counters for `rescuing_from`.
//!
//! Enabled with `feature = "metrics"`. Cost per adapter call: one
//! `AtomicU64::fetch_add(1, Relaxed)`.
//!
//! ```text
//! rescuing_from(..)
//!       │
//!       ▼  outcome as index
//! COUNTERS[Completed | Rescued | Reraised].fetch_add(1, Relaxed)
//!       │
//!       ▼  scrape
//! dump_prometheus()
//! ```

use core::sync::atomic::{AtomicU64, Ordering};

use crate::rescue::RescueOutcome;

const OUTCOMES: [RescueOutcome; 3] = [
    RescueOutcome::Completed,
    RescueOutcome::Rescued,
    RescueOutcome::Reraised,
];

static COUNTERS: [AtomicU64; 3] = [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)];

#[inline(always)]
fn index(outcome: RescueOutcome) -> usize {
    match outcome {
        RescueOutcome::Completed => 0,
        RescueOutcome::Rescued => 1,
        RescueOutcome::Reraised => 2,
    }
}

fn label(outcome: RescueOutcome) -> &'static str {
    match outcome {
        RescueOutcome::Completed => "completed",
        RescueOutcome::Rescued => "rescued",
        RescueOutcome::Reraised => "reraised",
    }
}

/// Count one adapter outcome. Returns the previous count.
#[inline(always)]
pub fn record(outcome: RescueOutcome) -> u64 {
    COUNTERS[index(outcome)].fetch_add(1, Ordering::Relaxed)
}

#[inline]
pub fn count(outcome: RescueOutcome) -> u64 {
    COUNTERS[index(outcome)].load(Ordering::Relaxed)
}

/// Reset one counter. Returns the old value.
#[inline]
pub fn reset(outcome: RescueOutcome) -> u64 {
    COUNTERS[index(outcome)].swap(0, Ordering::Relaxed)
}

pub fn reset_all() {
    for counter in COUNTERS.iter() {
        counter.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time copy of all counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RescueStats {
    pub completed: u64,
    pub rescued: u64,
    pub reraised: u64,
}

impl RescueStats {
    pub fn total(&self) -> u64 {
        self.completed + self.rescued + self.reraised
    }
}

pub fn snapshot() -> RescueStats {
    RescueStats {
        completed: count(RescueOutcome::Completed),
        rescued: count(RescueOutcome::Rescued),
        reraised: count(RescueOutcome::Reraised),
    }
}

/// One line per outcome, for logs and bench output.
pub fn dump_string() -> String {
    let mut out = String::new();
    for outcome in OUTCOMES {
        out.push_str(&format!("{:<10} count={}\n", label(outcome), count(outcome)));
    }
    out
}

/// Counters in OpenMetrics/Prometheus exposition format.
pub fn dump_prometheus() -> String {
    let mut out = String::from(
        "# HELP resonad_rescue_total rescuing_from outcomes\n\
         # TYPE resonad_rescue_total counter\n",
    );
    for outcome in OUTCOMES {
        out.push_str(&format!(
            "resonad_rescue_total{{outcome=\"{}\"}} {}\n",
            label(outcome),
            count(outcome)
        ));
    }
    out
}
