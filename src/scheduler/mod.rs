pub mod signal;

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;

use crate::http_probe::prelude::*;
use crate::notify::Notifier;
use crate::state::{StateTracker, TransitionEvent};

fn to_fixed_width(input: &str, width: usize) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

const MAX_URL_WIDTH: usize = 60;

/// What happened during one pass over all targets.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub available: usize,
    pub unavailable: usize,
    pub transitions: Vec<TransitionEvent>,
    pub failed_notifications: usize,
}

/// Owns the targets and their availability state and drives the probe loop.
///
/// Targets are checked one after another in configuration order. The next pass starts
/// `interval` after the previous one finished.
pub struct Monitor<P, N> {
    targets: Vec<String>,
    interval: Duration,
    prober: P,
    notifier: N,
    tracker: StateTracker,
    url_width: usize,
}

impl<P: Prober, N: Notifier> Monitor<P, N> {
    pub fn new(targets: Vec<String>, interval: Duration, prober: P, notifier: N) -> Self {
        let url_width = targets
            .iter()
            .map(|url| url.len())
            .max()
            .unwrap_or(10)
            .min(MAX_URL_WIDTH);

        Monitor {
            targets,
            interval,
            prober,
            notifier,
            tracker: StateTracker::new(),
            url_width,
        }
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    /// Probe every target once, record the results and send a message for each transition.
    /// Neither a failed probe nor a failed message stops the pass.
    pub async fn tick(&mut self) -> PassSummary {
        let mut summary = PassSummary::default();

        for target in &self.targets {
            let result = self.prober.probe(target).await;
            let url = to_fixed_width(target, self.url_width);

            if result.ok {
                summary.available += 1;
                log::info!(
                    "✅ {url} Status: {:?}, Elapsed: {:.2}ms",
                    result.http_status,
                    result.http_time * 1000.0
                );
            } else {
                summary.unavailable += 1;
                let reason = result
                    .error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "unknown error".to_string());
                log::warn!("❌ {url} {reason}");
            }

            let Some(event) = self.tracker.observe(target, result.ok) else {
                continue;
            };

            log::info!("{} went from {} to {}", event.target, event.from, event.to);
            if let Err(e) = self.notifier.notify(&event).await {
                summary.failed_notifications += 1;
                log::error!("Failed to send notification for {}: {e}", event.target);
            }
            summary.transitions.push(event);
        }

        log::info!(
            "Checked {} target(s): {} available, {} unavailable",
            self.targets.len(),
            summary.available,
            summary.unavailable
        );
        summary
    }

    /// Run passes until `shutdown` turns true.
    /// The flag is only looked at between passes, a running pass always completes.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            self.tick().await;

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = signal::requested(&mut shutdown) => break,
            }
        }
        log::info!("Monitor stopped.");
    }
}
