use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityState {
    Available,
    Unavailable,
}

impl From<bool> for AvailabilityState {
    fn from(ok: bool) -> Self {
        if ok {
            AvailabilityState::Available
        } else {
            AvailabilityState::Unavailable
        }
    }
}

impl fmt::Display for AvailabilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityState::Available => write!(f, "available"),
            AvailabilityState::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// A target changed state between two consecutive observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    pub target: String,
    pub from: AvailabilityState,
    pub to: AvailabilityState,
    pub at: DateTime<Utc>,
    /// How long the target had been in `from`.
    pub previous_duration: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    state: AvailabilityState,
    since: DateTime<Utc>,
}

/// Last known availability per target, keyed by URL.
///
/// The first observation of a target only records a baseline. After that an event is
/// produced exactly when the observed state differs from the stored one.
#[derive(Debug, Default)]
pub struct StateTracker {
    states: HashMap<String, Entry>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, target: &str, ok: bool) -> Option<TransitionEvent> {
        self.observe_at(target, ok, Utc::now())
    }

    pub fn observe_at(
        &mut self,
        target: &str,
        ok: bool,
        now: DateTime<Utc>,
    ) -> Option<TransitionEvent> {
        let observed = AvailabilityState::from(ok);

        let Some(entry) = self.states.get_mut(target) else {
            self.states.insert(
                target.to_string(),
                Entry {
                    state: observed,
                    since: now,
                },
            );
            return None;
        };

        if entry.state == observed {
            return None;
        }

        let event = TransitionEvent {
            target: target.to_string(),
            from: entry.state,
            to: observed,
            at: now,
            previous_duration: now - entry.since,
        };
        *entry = Entry {
            state: observed,
            since: now,
        };
        Some(event)
    }

    pub fn state(&self, target: &str) -> Option<AvailabilityState> {
        self.states.get(target).map(|entry| entry.state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
