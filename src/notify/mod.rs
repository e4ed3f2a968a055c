pub mod telegram;

use async_trait::async_trait;
use chrono::Duration;

use crate::error::NotificationError;
use crate::state::{AvailabilityState, TransitionEvent};

pub use telegram::TelegramNotifier;

/// Delivers transition messages to a single fixed destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &TransitionEvent) -> Result<(), NotificationError>;
}

/// Builds the human readable message for a transition.
pub fn format_message(event: &TransitionEvent) -> String {
    match event.to {
        AvailabilityState::Unavailable => format!("Resource is down! URL: {}", event.target),
        AvailabilityState::Available => format!(
            "Resource is up! URL: {}\nDown for {}",
            event.target,
            format_duration(event.previous_duration)
        ),
    }
}

fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let (days, hours, minutes, seconds) = (
        total / 86400,
        total % 86400 / 3600,
        total % 3600 / 60,
        total % 60,
    );

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m"), (seconds, "s")]
        .into_iter()
        .skip_while(|(value, _)| *value == 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}
