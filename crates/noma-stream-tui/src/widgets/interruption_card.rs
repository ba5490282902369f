use noma_stream_core::moment::Interruption;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

/// A full-viewport supportive note spliced between moments.
pub struct InterruptionCardWidget;

impl InterruptionCardWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, interruption: &Interruption) {
        let theme = &app.theme;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut lines = vec![
            Line::from(Span::styled(
                interruption.heading.clone(),
                Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for line in interruption.body.lines() {
            lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(theme.fg0),
            )));
        }
        if inner.height >= lines.len() as u16 + 2 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "j to keep going",
                Style::default().fg(theme.grey1),
            )));
        }

        let height = (lines.len() as u16).min(inner.height);
        let pad = (inner.height - height) / 2;
        let centered = Rect {
            y: inner.y + pad,
            height,
            ..inner
        };

        let card = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);
        frame.render_widget(card, centered);
    }
}
