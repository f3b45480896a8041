use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use tourline_core::Presentation;

use crate::theme::GruvboxMaterial;
use crate::widgets::cursor::cell_at;

/// Widest a caption bubble may grow, borders included
const MAX_WIDTH: u16 = 48;

pub struct CaptionWidget;

impl CaptionWidget {
    /// Render the caption bubble next to the pointer (nothing when hidden)
    pub fn render(frame: &mut Frame, area: Rect, presentation: &Presentation) {
        let Some(text) = presentation.visible_caption() else {
            return;
        };
        let Some(cursor) = cell_at(presentation.cursor, area) else {
            return;
        };

        let max_inner = MAX_WIDTH.min(area.width.saturating_sub(2)).saturating_sub(4) as usize;
        if max_inner == 0 {
            return;
        }
        let lines = wrap_text(text, max_inner);
        let inner_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let width = inner_width + 4;
        let height = (lines.len() as u16 + 2).min(area.height);

        let bubble = place_bubble(cursor.x, cursor.y, width, height, area);

        let border = if presentation.waiting_for_user {
            GruvboxMaterial::WAITING
        } else {
            GruvboxMaterial::CAPTION_BORDER
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(GruvboxMaterial::BG2));

        let text_style = Style::default()
            .fg(GruvboxMaterial::FG1)
            .add_modifier(Modifier::BOLD);
        let body: Vec<Line> = lines
            .into_iter()
            .map(|l| Line::styled(format!(" {} ", l), text_style))
            .collect();

        frame.render_widget(Clear, bubble);
        frame.render_widget(Paragraph::new(body).block(block), bubble);
    }
}

/// Position a bubble below-right of the pointer, flipping at the edges
fn place_bubble(x: u16, y: u16, width: u16, height: u16, area: Rect) -> Rect {
    let right = area.x + area.width;
    let bottom = area.y + area.height;

    let bx = if x + 2 + width <= right {
        x + 2
    } else {
        right.saturating_sub(width).max(area.x)
    };
    let by = if y + 1 + height <= bottom {
        y + 1
    } else if y >= area.y + height {
        y - height
    } else {
        bottom.saturating_sub(height).max(area.y)
    };

    Rect::new(bx, by, width.min(area.width), height).intersection(area)
}

/// Greedy word wrap by display width; words longer than `width` are split
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.width()
            } else {
                current.width() + 1 + word.width()
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if word.width() > width {
                for ch in word.chars() {
                    let ch_width = ch.to_string().width();
                    if current.width() + ch_width > width && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                    current.push(ch);
                }
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tourline_core::{Point, RunStatus};

    #[test]
    fn test_wrap_text_by_width() {
        assert_eq!(
            wrap_text("Welcome to the guided tour", 10),
            vec!["Welcome to", "the guided", "tour"]
        );
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_bubble_flips_at_edges() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(place_bubble(10, 5, 20, 4, area), Rect::new(12, 6, 20, 4));
        // Right edge
        assert_eq!(place_bubble(75, 5, 20, 4, area), Rect::new(60, 6, 20, 4));
        // Bottom edge
        assert_eq!(place_bubble(10, 22, 20, 4, area), Rect::new(12, 18, 20, 4));
    }

    fn render(presentation: &Presentation) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| CaptionWidget::render(frame, frame.area(), presentation))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_hidden_caption_draws_nothing() {
        let presentation = Presentation {
            status: RunStatus::Running,
            cursor: Point::new(10.0, 5.0),
            caption: "Faded out".to_string(),
            caption_visible: false,
            ..Presentation::default()
        };
        assert!(!render(&presentation).contains("Faded"));

        let visible = Presentation {
            caption_visible: true,
            ..presentation
        };
        assert!(render(&visible).contains("Faded out"));
    }
}
