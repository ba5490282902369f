use chrono::{DateTime, Utc};
use noma_stream_core::moment::Moment;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

/// A single anonymous moment, rendered as a full-viewport card.
pub struct MomentCardWidget;

impl MomentCardWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, moment: &Moment, index: usize) {
        let theme = &app.theme;
        let is_active = index == app.session.controller().current_index();

        let border_style = if is_active {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let block = Block::default()
            .title(Line::from(Span::styled(
                format!(" {} ", moment.category.as_str()),
                Style::default()
                    .fg(theme.category_color(moment.category))
                    .add_modifier(Modifier::BOLD),
            )))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        // Too short for the meta and footer lines, keep the body only
        if inner.height < 3 {
            Self::render_body(frame, inner, app, moment);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        Self::render_meta(frame, chunks[0], app, moment);
        Self::render_body(frame, chunks[1], app, moment);
        Self::render_footer(frame, chunks[2], app, moment);
    }

    fn render_meta(frame: &mut Frame, area: Rect, app: &App, moment: &Moment) {
        let theme = &app.theme;
        let mut spans = vec![Span::raw(" ")];

        if app.config.ui.show_alias {
            spans.push(Span::styled(
                moment.alias.clone(),
                Style::default()
                    .fg(theme.grey1)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        if app.config.ui.show_timestamps {
            if spans.len() > 1 {
                spans.push(Span::styled(" · ", Style::default().fg(theme.grey0)));
            }
            spans.push(Span::styled(
                relative_time(moment.created_at, Utc::now()),
                Style::default().fg(theme.grey0),
            ));
        }
        if spans.len() == 1 {
            return;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_body(frame: &mut Frame, area: Rect, app: &App, moment: &Moment) {
        let theme = &app.theme;

        let margin = 2u16.min(area.width / 4);
        let body_area = Rect {
            x: area.x + margin,
            width: area.width - margin * 2,
            ..area
        };

        let height = wrapped_height(&moment.body, body_area.width).min(body_area.height);
        let pad = (body_area.height - height) / 2;
        let centered = Rect {
            y: body_area.y + pad,
            height,
            ..body_area
        };

        let body = Paragraph::new(moment.body.as_str())
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.fg0));
        frame.render_widget(body, centered);
    }

    fn render_footer(frame: &mut Frame, area: Rect, app: &App, moment: &Moment) {
        let theme = &app.theme;

        let heart_style = if moment.hearted {
            Style::default().fg(theme.heart).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.grey1)
        };

        let mut spans = vec![
            Span::styled(format!("♥ {}", moment.heart_count), heart_style),
            Span::styled(
                format!("   {} replies", moment.reply_count),
                Style::default().fg(theme.grey1),
            ),
        ];
        if moment.saved {
            spans.push(Span::styled(
                "   ★ saved",
                Style::default().fg(theme.saved),
            ));
        }

        let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(footer, area);
    }
}

/// Rows the text occupies once wrapped at `width` columns, display-width aware.
fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let width = width as usize;
    let mut rows: u16 = 0;
    for line in text.lines() {
        let cols = UnicodeWidthStr::width(line);
        rows = rows.saturating_add(cols.div_ceil(width).max(1) as u16);
    }
    rows.max(1)
}

/// Compact age label for the meta line.
fn relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(created_at);
    let minutes = delta.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = delta.num_hours();
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    let days = delta.num_days();
    if days < 7 {
        return format!("{}d ago", days);
    }
    created_at.format("%b %-d").to_string()
}
