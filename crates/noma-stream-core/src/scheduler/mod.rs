mod sequencer;
mod template;

pub use sequencer::{arrange, arrange_with_rng};
pub use template::PacingTemplate;
