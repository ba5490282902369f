//! Navigation state owned by the viewport controller.

/// Whether a page transition is in flight.
///
/// While `Scrolling` the programmatic target is authoritative; native
/// scroll positions are ignored until the transition settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    #[default]
    Idle,
    Scrolling,
}

/// Pagination side of the state machine. At most one fetch in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Ready,
    FetchingMore,
}

/// Pull-to-refresh side of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPhase {
    #[default]
    AtRest,
    Pulling,
    Refreshing,
}

/// The controller's mutable navigation state.
#[derive(Debug, Clone, Default)]
pub struct ViewportState {
    /// Index of the active entry. Always within `[0, entry_count)` for a
    /// non-empty stream; 0 when empty.
    pub current_index: usize,
    pub scroll: ScrollPhase,
    pub fetch: FetchPhase,
    pub refresh: RefreshPhase,
    /// Accumulated pull distance in pixels, capped by configuration and
    /// reset to zero once a refresh decision is made.
    pub pull_delta: f32,
}
