use std::cell::Cell;
use std::path::Path;
use std::time::{Duration, Instant};

use scope_status_mcp::config::DisplayConfig;
use scope_status_mcp::engine::state::{DebounceDecision, DebouncePolicy, ViewState, DEBOUNCE_WAIT};
use scope_status_mcp::engine::{self, ClassSpan, ScopeLabel, Span, SpanCategory, SpanOracle};

/// Oracle double that counts every category query.
struct CountingOracle {
    calls: Cell<usize>,
    spans: Vec<Span>,
}

impl CountingOracle {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
            spans: vec![Span {
                start: 10,
                end: 60,
                start_row: 1,
                category: SpanCategory::StandaloneFunction,
                text: "function inspect(target)".to_string(),
            }],
        }
    }
}

impl SpanOracle for CountingOracle {
    fn find_spans(&self, category: SpanCategory) -> Vec<Span> {
        self.calls.set(self.calls.get() + 1);
        self.spans
            .iter()
            .filter(|s| s.category == category)
            .cloned()
            .collect()
    }

    fn class_spans(&self) -> Vec<ClassSpan> {
        vec![]
    }

    fn row_of(&self, _offset: usize) -> usize {
        1
    }

    fn syntax_name(&self) -> &str {
        "TypeScript"
    }

    fn file_path(&self) -> Option<&Path> {
        None
    }
}

/// Resolve the way the server does: through the per-view row cache.
fn resolve_cached(
    state: &mut ViewState,
    oracle: &CountingOracle,
    row: usize,
    config: &DisplayConfig,
) -> ScopeLabel {
    if !state.note_row(row) {
        return state.last_label().clone();
    }
    let label = engine::resolve_scope(oracle, row, config);
    state.record_label(label.clone());
    label
}

#[test]
fn test_same_row_skips_recomputation() {
    let oracle = CountingOracle::new();
    let config = DisplayConfig::default();
    let mut state = ViewState::new();

    let first = resolve_cached(&mut state, &oracle, 3, &config);
    let queries_after_first = oracle.calls.get();
    assert_eq!(first.text, "inspect");
    assert_eq!(
        queries_after_first,
        SpanCategory::ALL.len(),
        "one oracle query per category"
    );

    let second = resolve_cached(&mut state, &oracle, 3, &config);
    assert_eq!(
        oracle.calls.get(),
        queries_after_first,
        "same row must not touch the oracle"
    );
    assert_eq!(second, first);
}

#[test]
fn test_new_row_recomputes() {
    let oracle = CountingOracle::new();
    let config = DisplayConfig::default();
    let mut state = ViewState::new();

    resolve_cached(&mut state, &oracle, 3, &config);
    let queries_after_first = oracle.calls.get();

    resolve_cached(&mut state, &oracle, 4, &config);
    assert!(oracle.calls.get() > queries_after_first);
}

#[test]
fn test_activation_forces_recomputation() {
    let oracle = CountingOracle::new();
    let config = DisplayConfig::default();
    let mut state = ViewState::new();

    resolve_cached(&mut state, &oracle, 3, &config);
    let queries_after_first = oracle.calls.get();

    state.activate();
    resolve_cached(&mut state, &oracle, 3, &config);
    assert!(
        oracle.calls.get() > queries_after_first,
        "activation must drop the row marker"
    );
}

#[test]
fn test_burst_yields_exactly_one_resolution() {
    // Two events inside the wait window: the first one's deferred timer
    // is superseded, the second one's fires.
    let oracle = CountingOracle::new();
    let config = DisplayConfig::default();
    let mut state = ViewState::new();
    let mut policy = DebouncePolicy::default();

    let t0 = Instant::now();
    let gap = Duration::from_millis(40);

    assert_eq!(policy.on_event(t0), DebounceDecision::Immediate);
    resolve_cached(&mut state, &oracle, 5, &config);
    let baseline = oracle.calls.get();

    let DebounceDecision::Deferred(wait) = policy.on_event(t0 + gap) else {
        panic!("second event inside the window must be deferred");
    };
    assert_eq!(wait, DEBOUNCE_WAIT);

    // The deferred callback fires at least `wait` after the second
    // event; the guard passes and resolution runs for the new row.
    let fire = t0 + gap + wait;
    assert!(policy.is_quiescent(fire));
    resolve_cached(&mut state, &oracle, 6, &config);
    let after_burst = oracle.calls.get();
    assert_eq!(
        after_burst - baseline,
        SpanCategory::ALL.len(),
        "exactly one resolution for the burst"
    );

    // A timer scheduled by the first event would have fired earlier and
    // found itself superseded.
    assert!(!policy.is_quiescent(t0 + wait));
}

#[test]
fn test_superseded_resolution_is_idempotent() {
    let oracle = CountingOracle::new();
    let config = DisplayConfig::default();
    let mut state = ViewState::new();

    let fresh = resolve_cached(&mut state, &oracle, 5, &config);
    // An out-of-order late resolution for the same row is a no-op with
    // an identical answer.
    let late = resolve_cached(&mut state, &oracle, 5, &config);
    assert_eq!(late, fresh);
}
