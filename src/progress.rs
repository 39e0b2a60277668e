use std::io::{self, Write};
use std::sync::{Condvar, Mutex};

/// Immutable view of the tracker taken at one update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub remaining: usize,
    pub total: usize,
}

impl ProgressSnapshot {
    pub fn fraction(&self) -> f64 {
        (self.total - self.remaining) as f64 / self.total as f64
    }
}

struct TrackerState {
    remaining: usize,
    ready: bool,
}

/// Shared completion counter for the band workers, observed by a single
/// reporter. The mutex guards the counter and the ready flag together; the
/// flag is what makes the condvar wait immune to lost signals — a completion
/// that fires before the reporter re-enters the wait leaves the flag set,
/// and the wait predicate sees it immediately.
pub struct ProgressTracker {
    total: usize,
    state: Mutex<TrackerState>,
    updated: Condvar,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        assert!(total > 0, "tracker needs at least one worker");
        Self {
            total,
            state: Mutex::new(TrackerState {
                remaining: total,
                ready: false,
            }),
            updated: Condvar::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Momentary read of the remaining count, for the reporter's loop
    /// condition.
    pub fn remaining(&self) -> usize {
        self.state.lock().unwrap().remaining
    }

    /// Records one worker's completion: decrement, flag, notify. Called
    /// exactly once per worker, from any thread.
    pub fn complete_one(&self) {
        let mut state = self.state.lock().unwrap();
        assert!(state.remaining > 0, "more completions than workers");
        state.remaining -= 1;
        state.ready = true;
        drop(state);
        self.updated.notify_one();
    }

    /// Blocks the observer until an unconsumed update exists, consumes it,
    /// and returns the counts. The predicate loop tolerates spurious
    /// wakeups.
    pub fn wait_for_update(&self) -> ProgressSnapshot {
        let mut state = self.state.lock().unwrap();
        while !state.ready {
            state = self.updated.wait(state).unwrap();
        }
        state.ready = false;
        ProgressSnapshot {
            remaining: state.remaining,
            total: self.total,
        }
    }
}

const BAR_WIDTH: usize = 50;

/// Consumer loop that turns tracker updates into progress-bar lines.
pub struct ProgressReporter;

impl ProgressReporter {
    /// Fixed-width bar for one snapshot: filled cells, a cursor, blanks,
    /// then the truncated percentage.
    pub fn render_bar(snapshot: ProgressSnapshot) -> String {
        let fraction = snapshot.fraction();
        let pos = (BAR_WIDTH as f64 * fraction) as usize;
        let mut bar = String::with_capacity(BAR_WIDTH + 10);
        bar.push('[');
        for i in 0..BAR_WIDTH {
            bar.push(if i < pos {
                '='
            } else if i == pos {
                '>'
            } else {
                ' '
            });
        }
        bar.push_str(&format!("] {} %", (fraction * 100.0) as u32));
        bar
    }

    /// Runs until every worker has reported. A final 100% frame is never
    /// written; the last completion only terminates the loop.
    pub fn run<W: Write>(tracker: &ProgressTracker, out: &mut W) -> io::Result<()> {
        while tracker.remaining() > 0 {
            let snapshot = tracker.wait_for_update();
            if snapshot.fraction() < 1.0 {
                writeln!(out, "{}", Self::render_bar(snapshot))?;
                out.flush()?;
            }
        }
        Ok(())
    }
}
