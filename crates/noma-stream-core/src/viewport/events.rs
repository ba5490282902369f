//! Outbound events and requested source work.

/// Events the controller pushes onto its queue for the host to drain
/// each frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A new entry settled as the active one
    ActiveIndexChanged { index: usize },
    /// An interstitial was spliced into the stream
    InterruptionShown { id: String },
    /// The active moment's heart state was toggled
    Hearted { id: String, hearted: bool },
    /// The active moment's saved state was toggled
    Saved { id: String, saved: bool },
    /// The host should open the comment sheet for the active moment
    CommentsOpened { id: String },
    /// The active moment was reported
    Reported { id: String },
    /// A pagination request was issued at this moment offset
    MoreRequested { offset: usize },
    /// A pagination request completed and appended this many entries
    MoreLoaded { appended: usize },
    /// A pagination request failed; the stream is unchanged
    MoreFailed,
    RefreshStarted,
    /// A refresh completed and replaced the pool with this many moments
    RefreshCompleted { count: usize },
    /// A refresh failed; the pool is unchanged
    RefreshFailed,
}

/// Asynchronous work the controller wants performed on its behalf.
///
/// The controller never does I/O itself; it queues a request and the
/// session executes it against the content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRequest {
    /// Fetch the next page, `offset` counting moments already loaded
    FetchMore { offset: usize },
    /// Replace the entire pool
    Refresh,
}
