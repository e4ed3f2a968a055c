pub mod tracker;

pub use tracker::{AvailabilityState, StateTracker, TransitionEvent};
