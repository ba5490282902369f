use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use noma_stream_core::viewport::StreamEvent;
use noma_stream_core::{AppConfig, StreamSession};

use crate::input::Action;
use crate::theme::Theme;

/// Terminal rows mapped to nominal pixels, so the gesture thresholds
/// (tuned in pixels) keep their feel at cell granularity.
pub const ROW_PIXELS: u32 = 16;

/// Modal overlay drawn on top of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    Comments,
}

/// Application state
pub struct App {
    /// The stream session this UI fronts
    pub session: StreamSession,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Active color theme
    pub theme: Theme,
    /// Current overlay, if any
    pub overlay: Overlay,
    /// Status message shown in the bar
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g. 'gg')
    pub pending_key: Option<char>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Arc<AppConfig>, session: StreamSession, theme: Theme) -> Self {
        Self {
            session,
            config,
            theme,
            overlay: Overlay::None,
            status_message: None,
            pending_key: None,
            should_quit: false,
        }
    }

    /// Apply a resolved input action.
    pub fn handle_action(&mut self, action: Action, now: Instant) {
        // Clear pending key on any action except the sequence itself
        if action != Action::PendingG && action != Action::JumpToTop {
            self.pending_key = None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::NextMoment => self.session.advance(1, now),
            Action::PrevMoment => self.session.advance(-1, now),
            Action::JumpToTop => {
                self.pending_key = None;
                self.session.jump_to(0, now);
            }
            Action::JumpToBottom => {
                let last = self.session.controller().entry_count().saturating_sub(1);
                self.session.jump_to(last, now);
            }
            Action::PendingG => self.pending_key = Some('g'),
            Action::Heart => self.session.heart_active(),
            Action::Save => self.session.save_active(),
            Action::Comments => self.session.open_comments(),
            Action::Report => self.session.report_active(),
            Action::Refresh => self.session.request_refresh(),
            Action::Help => self.overlay = Overlay::Help,
            Action::Cancel => {
                self.overlay = Overlay::None;
                self.status_message = None;
            }
            Action::None => {}
        }
    }

    /// Mouse input: the wheel pages, a left-button drag emulates touch.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.session.on_wheel(1.0, now),
            MouseEventKind::ScrollUp => self.session.on_wheel(-1.0, now),
            MouseEventKind::Down(MouseButton::Left) => {
                self.session.on_touch_start(row_to_px(mouse.row));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.session.on_touch_move(row_to_px(mouse.row));
            }
            MouseEventKind::Up(MouseButton::Left) => self.session.on_touch_end(now),
            _ => {}
        }
    }

    /// Fold pumped stream events into UI state.
    pub fn apply_stream_events(&mut self, events: Vec<StreamEvent>) {
        for event in events {
            match event {
                StreamEvent::Hearted { hearted, .. } => {
                    self.set_status(if hearted { "Hearted" } else { "Heart removed" });
                }
                StreamEvent::Saved { saved, .. } => {
                    self.set_status(if saved {
                        "Saved for later"
                    } else {
                        "Removed from saved"
                    });
                }
                StreamEvent::CommentsOpened { .. } => self.overlay = Overlay::Comments,
                StreamEvent::Reported { .. } => {
                    self.set_status("Reported. A moderator will take a look.");
                }
                StreamEvent::RefreshCompleted { count } => {
                    self.set_status(format!("Refreshed: {} moments", count));
                }
                // Moving on clears a stale status line
                StreamEvent::ActiveIndexChanged { .. } => self.status_message = None,
                _ => {}
            }
        }
    }

    /// Keep the controller's viewport height in sync with the drawable
    /// area.
    pub fn sync_viewport(&mut self, rows: u16) {
        let height = rows as u32 * ROW_PIXELS;
        if height != self.session.controller().viewport_height() {
            self.session.set_viewport_height(height);
        }
    }

    /// Whether the next poll should run at the animation frame rate.
    pub fn needs_fast_update(&self) -> bool {
        self.session.controller().is_scrolling()
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}

fn row_to_px(row: u16) -> f32 {
    (row as u32 * ROW_PIXELS) as f32
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crossterm::event::KeyModifiers;
    use noma_stream_core::moment::{Category, Moment};
    use noma_stream_core::source::FixtureSource;
    use noma_stream_core::StreamMode;

    use super::*;

    fn pool(n: usize) -> Vec<Moment> {
        (0..n)
            .map(|i| Moment {
                id: format!("m{}", i),
                category: Category::Validation,
                body: format!("moment {}", i),
                alias: "a quiet fox".to_string(),
                heart_count: 0,
                reply_count: 0,
                hearted: false,
                saved: false,
                created_at: Utc::now(),
            })
            .collect()
    }

    async fn seeded_app() -> App {
        let mut config = AppConfig::default();
        config.scroll.smooth_enabled = false;
        config.stream.interruptions.clear();
        let config = Arc::new(config);

        let source = Arc::new(FixtureSource::new(pool(10), 10));
        let mut session =
            StreamSession::new(&config, source, StreamMode::Chronological, 40 * ROW_PIXELS)
                .unwrap();
        session.start().await;

        App::new(config, session, Theme::default())
    }

    fn mouse(kind: MouseEventKind, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[tokio::test]
    async fn test_drag_up_swipes_to_next_moment() {
        let mut app = seeded_app().await;
        let now = Instant::now();

        // 5 rows upward is 80 nominal px, past the 50 px swipe threshold
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 20), now);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 15), now);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 15), now);
        app.session.pump(now);

        assert_eq!(app.session.controller().current_index(), 1);
    }

    #[tokio::test]
    async fn test_jump_to_bottom_action() {
        let mut app = seeded_app().await;
        app.handle_action(Action::JumpToBottom, Instant::now());
        assert_eq!(app.session.controller().current_index(), 9);
    }

    #[tokio::test]
    async fn test_comments_event_opens_overlay() {
        let mut app = seeded_app().await;
        let now = Instant::now();

        app.handle_action(Action::Comments, now);
        let events = app.session.pump(now);
        app.apply_stream_events(events);

        assert_eq!(app.overlay, Overlay::Comments);
    }
}
