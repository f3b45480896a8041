use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use tourline_core::RunStatus;

use crate::app::App;
use crate::theme::GruvboxMaterial;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let presentation = app.presentation();
        let status = presentation.status;

        let status_color = match status {
            RunStatus::Running => GruvboxMaterial::ACCENT,
            RunStatus::WaitingForUser => GruvboxMaterial::WAITING,
            RunStatus::Completed => GruvboxMaterial::DONE,
            RunStatus::Cancelled => GruvboxMaterial::RED,
            RunStatus::Idle => GruvboxMaterial::GREY1,
        };
        let status_label = format!(" {} ", status.label());

        let status_text = if let Some(msg) = &app.status_message {
            msg.clone()
        } else {
            let stage = app
                .stage
                .as_deref()
                .filter(|_| app.config.ui.show_stage)
                .map(|s| format!(" {} |", s))
                .unwrap_or_default();
            let step = if presentation.total == 0 {
                String::new()
            } else {
                format!(
                    " Step {}/{}",
                    (presentation.index + 1).min(presentation.total),
                    presentation.total
                )
            };
            format!("{}{}", stage, step)
        };

        let help_hint = if status == RunStatus::WaitingForUser {
            " space/click:continue s:stop q:quit "
        } else {
            " r:restart s:stop q:quit "
        };
        let used = status_label.width() + status_text.width() + help_hint.width();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(
                status_label,
                Style::default()
                    .fg(GruvboxMaterial::BG0)
                    .bg(status_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                status_text,
                Style::default()
                    .fg(GruvboxMaterial::FG0)
                    .bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                help_hint,
                Style::default()
                    .fg(GruvboxMaterial::GREY2)
                    .bg(GruvboxMaterial::BG2),
            ),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}
