use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

pub struct PopupWidget;

impl PopupWidget {
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keymap = &app.config.keymap;

        let bindings = [
            (keymap.next.as_str(), "next moment"),
            (keymap.prev.as_str(), "previous moment"),
            (keymap.jump_to_top.as_str(), "jump to the top"),
            (keymap.jump_to_bottom.as_str(), "jump to the end"),
            (keymap.heart.as_str(), "heart"),
            (keymap.save.as_str(), "save for later"),
            (keymap.comment.as_str(), "open replies"),
            (keymap.report.as_str(), "report"),
            (keymap.refresh.as_str(), "refresh the stream"),
            (keymap.quit.as_str(), "quit"),
        ];

        let mut lines: Vec<Line> = bindings
            .iter()
            .map(|(key, action)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:<6}", key),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*action, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " drag down from the top to refresh",
            Style::default().fg(theme.grey1),
        )));

        let height = lines.len() as u16 + 2;
        let area = centered_rect(40, height, frame.area());

        let popup = Paragraph::new(lines).block(
            Block::default()
                .title(" Keys ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .style(Style::default().bg(theme.bg2).fg(theme.fg0)),
        );

        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }

    pub fn render_comments(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let controller = app.session.controller();

        let mut lines = Vec::new();
        if let Some(moment) = controller.active_entry().and_then(|entry| entry.as_moment()) {
            lines.push(Line::from(Span::styled(
                moment.body_preview(80),
                Style::default()
                    .fg(theme.grey1)
                    .add_modifier(Modifier::ITALIC),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("{} anonymous replies", moment.reply_count),
                Style::default().fg(theme.fg0),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Nothing to reply to here.",
                Style::default().fg(theme.fg0),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Replies stay anonymous. Esc to close.",
            Style::default().fg(theme.grey1),
        )));

        let area = centered_rect(50, lines.len() as u16 + 2, frame.area());

        let popup = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(" Replies ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent))
                    .style(Style::default().bg(theme.bg2).fg(theme.fg0)),
            );

        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
