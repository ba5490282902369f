use noma_stream_core::moment::StreamEntry;
use noma_stream_core::viewport::RefreshPhase;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, ROW_PIXELS};

use super::{InterruptionCardWidget, MomentCardWidget};

/// The main content area: one card per viewport, split across two cards
/// mid-transition, with the pull-to-refresh banner above.
pub struct StreamWidget;

impl StreamWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let controller = app.session.controller();
        if controller.entry_count() == 0 {
            Self::render_empty(frame, area, app);
            return;
        }

        let mut card_area = area;
        let banner_rows = Self::banner_rows(app).min(area.height.saturating_sub(1));
        if banner_rows > 0 {
            let banner_area = Rect {
                height: banner_rows,
                ..area
            };
            Self::render_banner(frame, banner_area, app);
            card_area = Rect {
                y: area.y + banner_rows,
                height: area.height - banner_rows,
                ..area
            };
        }

        let vh = controller.viewport_height().max(1);
        let offset = controller.scroll_offset();
        let page = ((offset / vh) as usize).min(controller.entry_count() - 1);
        let within = offset % vh;

        // Mid-transition the outgoing card keeps the top slice of the area
        // and the incoming card takes the rest.
        let height = card_area.height as u32;
        let top_rows = ((vh - within) * height / vh) as u16;

        if within == 0 || top_rows >= card_area.height || page + 1 >= controller.entry_count() {
            Self::render_card(frame, card_area, app, page);
        } else {
            let top_area = Rect {
                height: top_rows,
                ..card_area
            };
            let bottom_area = Rect {
                y: card_area.y + top_rows,
                height: card_area.height - top_rows,
                ..card_area
            };
            Self::render_card(frame, top_area, app, page);
            Self::render_card(frame, bottom_area, app, page + 1);
        }
    }

    fn render_card(frame: &mut Frame, area: Rect, app: &App, index: usize) {
        if area.height == 0 {
            return;
        }
        match app.session.controller().entries().get(index) {
            Some(StreamEntry::Moment(moment)) => {
                MomentCardWidget::render(frame, area, app, moment, index);
            }
            Some(StreamEntry::Interruption(interruption)) => {
                InterruptionCardWidget::render(frame, area, app, interruption);
            }
            None => {}
        }
    }

    /// Rows claimed by the refresh banner. Grows with the pull distance so
    /// the cards visibly slide down under the finger.
    fn banner_rows(app: &App) -> u16 {
        let controller = app.session.controller();
        match controller.refresh_phase() {
            RefreshPhase::Pulling => {
                let rows = (controller.pull_delta() as u32).div_ceil(ROW_PIXELS) as u16;
                rows.clamp(1, 4)
            }
            RefreshPhase::Refreshing => 1,
            RefreshPhase::AtRest => 0,
        }
    }

    fn render_banner(frame: &mut Frame, area: Rect, app: &App) {
        let controller = app.session.controller();
        let theme = &app.theme;

        let text = match controller.refresh_phase() {
            RefreshPhase::Refreshing => "Refreshing the stream...",
            _ if controller.pull_delta() > app.config.gestures.pull_commit_px => {
                "Release to refresh"
            }
            _ => "Pull to refresh",
        };

        let banner = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.bg1));
        frame.render_widget(banner, area);
    }

    fn render_empty(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let lines = vec![
            Line::from(Span::styled(
                "The stream is quiet right now.",
                Style::default().fg(theme.fg1),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press r to refresh.",
                Style::default().fg(theme.grey1),
            )),
        ];

        let height = (lines.len() as u16).min(area.height);
        let pad = (area.height - height) / 2;
        let centered = Rect {
            y: area.y + pad,
            height,
            ..area
        };
        let empty = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(empty, centered);
    }
}
