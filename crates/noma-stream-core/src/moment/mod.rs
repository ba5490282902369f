mod models;

pub use models::{Category, Interruption, Moment, StreamEntry};
