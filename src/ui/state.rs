//! Transient page state for one query/render cycle.

use std::time::{Duration, Instant};

use crate::events::RatedEvent;
use crate::ui::api::FetchError;
use crate::ui::rating::PageBucket;

/// How long the "That's INSANE!" overlay stays up.
pub const OVERLAY_DURATION: Duration = Duration::from_secs(3);
/// The overlay shows when the derived level is strictly above this.
pub const OVERLAY_THRESHOLD: i64 = 7;

#[derive(Debug, Default)]
pub struct MeterState {
    pub query: String,
    loading: bool,
    events: Vec<RatedEvent>,
    last_error: Option<String>,
    overlay_until: Option<Instant>,
}

impl MeterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn events(&self) -> &[RatedEvent] {
        &self.events
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Rating of the first event, or 0 when there is nothing to show.
    pub fn insanity_level(&self) -> i64 {
        self.events.first().map(|e| e.insanity_rating).unwrap_or(0)
    }

    /// Start a submission and hand back the query to send.
    ///
    /// Returns `None` while a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.events.clear();
        self.last_error = None;
        Some(self.query.clone())
    }

    /// Apply the outcome of the request started by `begin_submit`.
    pub fn finish(&mut self, outcome: Result<Vec<RatedEvent>, FetchError>, now: Instant) {
        match outcome {
            Ok(events) => {
                self.events = events;
            }
            Err(e) => {
                tracing::warn!("compare request failed: {}", e);
                self.events.clear();
                self.last_error = Some(e.to_string());
            }
        }
        self.loading = false;

        let level = self.insanity_level();
        tracing::info!(
            level,
            page = PageBucket::for_rating(level).name(),
            count = self.events.len(),
            "results applied"
        );
        if level > OVERLAY_THRESHOLD {
            self.overlay_until = Some(now + OVERLAY_DURATION);
        }
    }

    pub fn overlay_visible(&self, now: Instant) -> bool {
        self.overlay_until.is_some_and(|until| now < until)
    }
}
