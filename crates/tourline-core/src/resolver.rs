//! Target resolution against the live host layout

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::script::TargetDescriptor;

/// Resolved screen-space point for a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub point: Point,
    /// Identity of the element the descriptor matched
    pub element_id: String,
}

/// Maps a [`TargetDescriptor`] to a live anchor
///
/// Resolution happens every time an action needs it; implementations must
/// not cache across calls because layout may change between actions.
pub trait TargetResolver {
    /// `None` means not found, which callers treat as a soft miss
    fn resolve(&self, target: &TargetDescriptor) -> Option<Anchor>;
}

/// An element the host exposes for targeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiElement {
    pub id: String,
    pub text: String,
    pub role: String,
    /// Bounds in document coordinates (before scrolling)
    pub bounds: Rect,
}

impl UiElement {
    pub fn new(id: impl Into<String>, role: impl Into<String>, text: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            role: role.into(),
            bounds,
        }
    }
}

/// Parsed form of a descriptor string
#[derive(Debug, Clone, PartialEq, Eq)]
enum Query<'a> {
    Id(&'a str),
    Text(&'a str),
    Role(&'a str),
    /// Bare string: id, then text, then role
    Any(&'a str),
}

impl<'a> Query<'a> {
    fn parse(descriptor: &'a str) -> Self {
        let descriptor = descriptor.trim();
        if let Some(id) = descriptor.strip_prefix('#') {
            Query::Id(id)
        } else if let Some(text) = descriptor.strip_prefix("text:") {
            Query::Text(text.trim())
        } else if let Some(role) = descriptor.strip_prefix("role:") {
            Query::Role(role.trim())
        } else {
            Query::Any(descriptor)
        }
    }
}

/// Resolver over a flat list of host elements
#[derive(Debug, Clone, Default)]
pub struct ElementIndex {
    elements: Vec<UiElement>,
    scroll_offset: f64,
}

impl ElementIndex {
    pub fn new(elements: Vec<UiElement>) -> Self {
        Self {
            elements,
            scroll_offset: 0.0,
        }
    }

    pub fn elements(&self) -> &[UiElement] {
        &self.elements
    }

    pub fn set_elements(&mut self, elements: Vec<UiElement>) {
        self.elements = elements;
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    /// Find the element a descriptor names, in document coordinates
    pub fn find(&self, target: &TargetDescriptor) -> Option<&UiElement> {
        match Query::parse(target.as_str()) {
            Query::Id(id) => self.by_id(id),
            Query::Text(text) => self.by_text(text),
            Query::Role(role) => self.by_role(role),
            Query::Any(any) => self
                .by_id(any)
                .or_else(|| self.by_text(any))
                .or_else(|| self.by_role(any)),
        }
    }

    /// Topmost element under a screen-space point
    pub fn hit_test(&self, point: Point) -> Option<&UiElement> {
        let doc = Point::new(point.x, point.y + self.scroll_offset);
        self.elements.iter().rev().find(|e| e.bounds.contains(doc))
    }

    fn by_id(&self, id: &str) -> Option<&UiElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn by_text(&self, text: &str) -> Option<&UiElement> {
        if text.is_empty() {
            return None;
        }
        let needle = text.to_lowercase();
        self.elements
            .iter()
            .find(|e| e.text.to_lowercase().contains(&needle))
    }

    fn by_role(&self, role: &str) -> Option<&UiElement> {
        self.elements
            .iter()
            .find(|e| e.role.eq_ignore_ascii_case(role))
    }
}

impl TargetResolver for ElementIndex {
    fn resolve(&self, target: &TargetDescriptor) -> Option<Anchor> {
        self.find(target).map(|element| {
            let center = element.bounds.center();
            Anchor {
                point: Point::new(center.x, center.y - self.scroll_offset),
                element_id: element.id.clone(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> ElementIndex {
        ElementIndex::new(vec![
            UiElement::new("nav-pricing", "link", "Pricing", Rect::new(30.0, 0.0, 10.0, 1.0)),
            UiElement::new("start-button", "button", "Start free", Rect::new(10.0, 10.0, 20.0, 3.0)),
            UiElement::new("faq-1", "faq", "How does it work?", Rect::new(0.0, 40.0, 80.0, 4.0)),
        ])
    }

    #[test]
    fn test_resolve_by_id_text_and_role() {
        let index = index();

        let by_id = index.resolve(&"#start-button".into()).unwrap();
        assert_eq!(by_id.element_id, "start-button");
        assert_eq!(by_id.point, Point::new(20.0, 11.5));

        let by_text = index.resolve(&"text:pricing".into()).unwrap();
        assert_eq!(by_text.element_id, "nav-pricing");

        let by_role = index.resolve(&"role:FAQ".into()).unwrap();
        assert_eq!(by_role.element_id, "faq-1");
    }

    #[test]
    fn test_bare_descriptor_falls_through() {
        let index = index();
        assert_eq!(index.resolve(&"faq-1".into()).unwrap().element_id, "faq-1");
        assert_eq!(index.resolve(&"Start free".into()).unwrap().element_id, "start-button");
        assert_eq!(index.resolve(&"button".into()).unwrap().element_id, "start-button");
    }

    #[test]
    fn test_miss_is_none() {
        let index = index();
        assert!(index.resolve(&"#nope".into()).is_none());
        assert!(index.resolve(&"text:".into()).is_none());
    }

    #[test]
    fn test_anchor_follows_scroll_offset() {
        let mut index = index();
        index.set_scroll_offset(30.0);
        let anchor = index.resolve(&"#faq-1".into()).unwrap();
        assert_eq!(anchor.point, Point::new(40.0, 12.0));

        let hit = index.hit_test(Point::new(5.0, 11.0)).unwrap();
        assert_eq!(hit.id, "faq-1");
    }

    #[test]
    fn test_closure_resolver() {
        let fixed = |_: &TargetDescriptor| {
            Some(Anchor {
                point: Point::new(1.0, 2.0),
                element_id: "fixed".to_string(),
            })
        };
        assert_eq!(fixed.resolve(&"anything".into()).unwrap().point, Point::new(1.0, 2.0));
    }
}
