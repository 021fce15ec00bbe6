use std::time::{Duration, Instant};

use super::span::ScopeLabel;

/// Default wait threshold between a cursor event and a deferred
/// resolution.
pub const DEBOUNCE_WAIT: Duration = Duration::from_millis(120);

/// What the caller should do with a cursor event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceDecision {
    /// Enough quiet time has passed; resolve right away.
    Immediate,
    /// Still inside a burst; resolve after the wait, then re-check
    /// [`DebouncePolicy::is_quiescent`] in case a newer event superseded
    /// this one.
    Deferred(Duration),
}

/// Debounce state machine over caller-supplied timestamps.
///
/// Timers are never cancelled by identity: a superseded deferred
/// resolution simply fails the quiescence guard when it fires and becomes
/// a no-op.
#[derive(Debug, Clone)]
pub struct DebouncePolicy {
    wait: Duration,
    last_event: Option<Instant>,
}

impl DebouncePolicy {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            last_event: None,
        }
    }

    /// Record a cursor event and decide how to schedule its resolution.
    pub fn on_event(&mut self, now: Instant) -> DebounceDecision {
        let decision = match self.last_event {
            Some(prev) if now.duration_since(prev) <= self.wait => {
                DebounceDecision::Deferred(self.wait)
            }
            _ => DebounceDecision::Immediate,
        };
        self.last_event = Some(now);
        decision
    }

    /// Record activity (e.g. a buffer edit) that postpones deferred
    /// resolutions without requesting one.
    pub fn note_activity(&mut self, now: Instant) {
        self.last_event = Some(now);
    }

    /// Guard for a deferred resolution at fire time: true when no newer
    /// event has arrived inside the wait window.
    pub fn is_quiescent(&self, now: Instant) -> bool {
        self.last_event
            .map_or(true, |prev| now.duration_since(prev) >= self.wait)
    }
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        Self::new(DEBOUNCE_WAIT)
    }
}

/// Per-view resolution state: the last-resolved-row fast path and the
/// last computed label.
///
/// Created when a view opens, reset on activation, dropped when the view
/// closes.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    last_row: Option<usize>,
    last_label: ScopeLabel,
    debounce: DebouncePolicy,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last-resolved row so the next event recomputes even if
    /// the cursor has not moved to a new line.
    pub fn activate(&mut self) {
        self.last_row = None;
    }

    /// Accept a target row. Returns false when it matches the
    /// last-resolved row, in which case resolution is skipped entirely.
    pub fn note_row(&mut self, row: usize) -> bool {
        if self.last_row == Some(row) {
            return false;
        }
        self.last_row = Some(row);
        true
    }

    pub fn record_label(&mut self, label: ScopeLabel) {
        self.last_label = label;
    }

    pub fn last_label(&self) -> &ScopeLabel {
        &self.last_label
    }

    pub fn debounce_mut(&mut self) -> &mut DebouncePolicy {
        &mut self.debounce
    }

    pub fn debounce(&self) -> &DebouncePolicy {
        &self.debounce
    }
}
