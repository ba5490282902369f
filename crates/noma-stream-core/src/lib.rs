pub mod config;
pub mod error;
pub mod moment;
pub mod scheduler;
pub mod session;
pub mod source;
pub mod viewport;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use moment::{Category, Interruption, Moment, StreamEntry};
pub use session::{StreamMode, StreamSession};
pub use source::{ContentSource, FixtureSource, HttpSource};
pub use viewport::{StreamEvent, ViewportController};
