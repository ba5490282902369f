use noma_stream_core::session::StreamMode;
use noma_stream_core::viewport::RefreshPhase;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

/// Bottom line: mode, position in the stream, background activity, and a
/// short key hint. Transient feedback replaces the left side.
pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let controller = app.session.controller();

        let mode = match app.session.mode() {
            StreamMode::Paced => "PACED",
            StreamMode::Chronological => "LATEST",
        };

        let position = if controller.entry_count() == 0 {
            "0/0".to_string()
        } else {
            format!(
                "{}/{}",
                controller.current_index() + 1,
                controller.entry_count()
            )
        };

        let activity = if controller.refresh_phase() == RefreshPhase::Refreshing {
            " | refreshing"
        } else if controller.is_loading_more() {
            " | loading more"
        } else {
            ""
        };

        let left = match &app.status_message {
            Some(message) => format!(" {}", message),
            None => format!(" {} | {}{}", mode, position, activity),
        };
        let hint = " j/k:flow h:heart s:save r:refresh ?:help ";

        let padding = padding_columns(area.width, &left, hint);

        let line = Line::from(vec![
            Span::styled(left, Style::default().fg(theme.fg0).bg(theme.bg1)),
            Span::styled(" ".repeat(padding), Style::default().bg(theme.bg1)),
            Span::styled(hint, Style::default().fg(theme.grey1).bg(theme.bg1)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Columns of padding between the left text and the right-aligned hint.
/// Counts display columns rather than bytes so accented or wide status
/// text keeps the hint flush with the edge.
fn padding_columns(width: u16, left: &str, hint: &str) -> usize {
    (width as usize)
        .saturating_sub(UnicodeWidthStr::width(left))
        .saturating_sub(UnicodeWidthStr::width(hint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_counts_display_columns() {
        // 8 columns as 8 bytes, and 8 columns as 12 bytes
        assert_eq!(padding_columns(20, "deja vu.", " ?:help "), 4);
        assert_eq!(padding_columns(20, "déjà vu…", " ?:help "), 4);
    }

    #[test]
    fn test_padding_saturates_when_cramped() {
        assert_eq!(padding_columns(10, " a long status line", " ?:help "), 0);
    }
}
