use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    Frame,
};

use tourline_core::{Point, Presentation};

use crate::theme::GruvboxMaterial;

pub struct CursorWidget;

impl CursorWidget {
    const POINTER: &'static str = "▶";
    const CLICKING: &'static str = "◉";

    /// Draw the simulated pointer at the presentation cursor
    pub fn render(frame: &mut Frame, area: Rect, presentation: &Presentation) {
        let Some(position) = cell_at(presentation.cursor, area) else {
            return;
        };

        let (symbol, color) = if presentation.clicking {
            (Self::CLICKING, GruvboxMaterial::CLICK)
        } else {
            (Self::POINTER, GruvboxMaterial::CURSOR)
        };

        if let Some(cell) = frame.buffer_mut().cell_mut(position) {
            cell.set_symbol(symbol)
                .set_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        }
    }
}

/// Terminal cell for a viewport point, clamped into `area`
pub fn cell_at(point: Point, area: Rect) -> Option<Position> {
    if area.is_empty() {
        return None;
    }
    let max_x = area.width.saturating_sub(1) as f64;
    let max_y = area.height.saturating_sub(1) as f64;
    let x = point.x.round().clamp(0.0, max_x) as u16;
    let y = point.y.round().clamp(0.0, max_y) as u16;
    Some(Position::new(area.x + x, area.y + y))
}
