use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use tourline_core::TourHost;

use crate::page::{DemoPage, ItemKind, PageItem};
use crate::theme::GruvboxMaterial;

pub struct PageWidget;

impl PageWidget {
    /// Render the page scrolled by its live offset
    ///
    /// `hovered` is the id of the element under the tour pointer.
    pub fn render(frame: &mut Frame, area: Rect, page: &DemoPage, hovered: Option<&str>) {
        frame.render_widget(
            Block::default().style(Style::default().bg(GruvboxMaterial::BG0)),
            area,
        );

        let scroll = page.scroll_offset().round();

        // Header bar background scrolls with the page
        if scroll < 1.0 {
            let header = Rect::new(area.x, area.y, area.width, area.height.min(1));
            frame.render_widget(
                Block::default().style(Style::default().bg(GruvboxMaterial::BG1)),
                header,
            );
        }

        for item in page.items() {
            let Some(rect) = screen_rect(item, scroll, area) else {
                continue;
            };
            let is_hovered = hovered.is_some() && item.id.as_deref() == hovered;
            render_item(frame, rect, page, item, is_hovered);
        }
    }
}

/// Screen rect of an item, or `None` when it is scrolled out of view
///
/// Bordered items clipped at the top are skipped rather than drawn without
/// their top edge.
fn screen_rect(item: &PageItem, scroll: f64, area: Rect) -> Option<Rect> {
    let top = item.bounds.y - scroll;
    let bottom = top + item.bounds.height;
    if bottom <= 0.0 || top >= area.height as f64 || top < 0.0 {
        return None;
    }

    let x = item.bounds.x.max(0.0) as u16;
    let y = top as u16;
    let rect = Rect::new(
        area.x.saturating_add(x),
        area.y.saturating_add(y),
        item.bounds.width.max(0.0) as u16,
        item.bounds.height.max(0.0) as u16,
    );
    let clipped = rect.intersection(area);
    (!clipped.is_empty()).then_some(clipped)
}

fn render_item(frame: &mut Frame, rect: Rect, page: &DemoPage, item: &PageItem, hovered: bool) {
    let label = page.label(item);
    let hover_style = |style: Style| {
        if hovered {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    };

    match item.kind {
        ItemKind::Brand => {
            let line = Line::from(Span::styled(
                label,
                Style::default()
                    .fg(GruvboxMaterial::AQUA)
                    .bg(GruvboxMaterial::BG1)
                    .add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(Paragraph::new(line), rect);
        }
        ItemKind::NavLink => {
            let style = Style::default()
                .fg(GruvboxMaterial::BLUE)
                .bg(GruvboxMaterial::BG1)
                .add_modifier(Modifier::UNDERLINED);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(label, hover_style(style)))).alignment(Alignment::Center),
                rect,
            );
        }
        ItemKind::Heading => {
            let style = Style::default()
                .fg(GruvboxMaterial::YELLOW)
                .add_modifier(Modifier::BOLD);
            frame.render_widget(Paragraph::new(Span::styled(label, style)), rect);
        }
        ItemKind::Text => {
            frame.render_widget(
                Paragraph::new(Span::styled(label, Style::default().fg(GruvboxMaterial::FG0))),
                rect,
            );
        }
        ItemKind::Footer => {
            frame.render_widget(
                Paragraph::new(Span::styled(label, Style::default().fg(GruvboxMaterial::GREY0)))
                    .alignment(Alignment::Center),
                rect,
            );
        }
        ItemKind::Button => {
            let (fg, bg) = if page.is_started() {
                (GruvboxMaterial::BG0, GruvboxMaterial::GREEN)
            } else {
                (GruvboxMaterial::FG1, GruvboxMaterial::BG2)
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(hover_style(Style::default().fg(GruvboxMaterial::GREEN)))
                .style(Style::default().bg(bg));
            let text = Paragraph::new(Span::styled(
                label,
                Style::default().fg(fg).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(text, rect);
        }
        ItemKind::Card | ItemKind::Faq => {
            let accent = if item.kind == ItemKind::Card {
                GruvboxMaterial::ACCENT
            } else {
                GruvboxMaterial::PURPLE
            };
            let block = Block::default()
                .title(format!(" {} ", label))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(hover_style(Style::default().fg(accent)))
                .style(Style::default().bg(GruvboxMaterial::BG1));
            let body = item.body.as_deref().unwrap_or_default();
            let text = Paragraph::new(Span::styled(body, Style::default().fg(GruvboxMaterial::FG0)))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(text, rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tourline_core::Viewport;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_first_screen() {
        let page = DemoPage::new(Viewport::new(80.0, 24.0));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|frame| PageWidget::render(frame, frame.area(), &page, None))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Pricing"));
        assert!(text.contains("Start free"));
        assert!(!text.contains("Frequently asked questions"));
    }

    #[test]
    fn test_scrolled_page_shows_faq() {
        let mut page = DemoPage::new(Viewport::new(80.0, 24.0));
        page.set_scroll_offset(36.0);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|frame| PageWidget::render(frame, frame.area(), &page, Some("faq-1")))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Frequently asked questions"));
        assert!(!text.contains("Start free"));
    }
}
