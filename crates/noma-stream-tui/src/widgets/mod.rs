mod interruption_card;
mod moment_card;
mod popup;
mod status_bar;
mod stream;

pub use interruption_card::InterruptionCardWidget;
pub use moment_card::MomentCardWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
pub use stream::StreamWidget;
