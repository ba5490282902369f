//! Paged viewport: one entry per screen, gesture-driven navigation.
//!
//! The controller is the stateful piece; everything around it is pure
//! helpers (easing, timing, gesture classification) so each transition
//! rule can be tested on its own.

mod animation;
mod controller;
mod events;
mod gesture;
mod interruption;
mod state;

pub mod easing;
pub mod timing;

pub use animation::PageAnimator;
pub use controller::ViewportController;
pub use events::{SourceRequest, StreamEvent};
pub use gesture::{classify_release, should_accept, DragOutcome, TouchTracker, WheelGate};
pub use interruption::InterruptionSchedule;
pub use state::{FetchPhase, RefreshPhase, ScrollPhase, ViewportState};
