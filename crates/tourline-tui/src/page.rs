//! Demo page narrated by the built-in tour
//!
//! The page is laid out in document coordinates (terminal cells) and
//! re-laid out on resize. Every targetable item is mirrored into an
//! [`ElementIndex`] so the sequencer resolves against the live layout.

use std::collections::HashMap;

use tracing::info;

use tourline_core::{
    Anchor, ElementIndex, Point, Rect, TargetDescriptor, TargetResolver, TourHost, UiElement, Viewport,
};

/// Visual treatment of a page item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Brand,
    NavLink,
    Heading,
    Text,
    Button,
    Card,
    Faq,
    Footer,
}

/// One laid-out piece of the page
#[derive(Debug, Clone, PartialEq)]
pub struct PageItem {
    pub kind: ItemKind,
    /// Element id when the item is targetable
    pub id: Option<String>,
    pub title: String,
    pub body: Option<String>,
    pub bounds: Rect,
}

impl PageItem {
    fn new(kind: ItemKind, title: &str, bounds: Rect) -> Self {
        Self {
            kind,
            id: None,
            title: title.to_string(),
            body: None,
            bounds,
        }
    }

    fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    fn role(&self) -> &'static str {
        match self.kind {
            ItemKind::NavLink => "link",
            ItemKind::Button => "button",
            ItemKind::Card => "card",
            ItemKind::Faq => "faq",
            ItemKind::Heading => "heading",
            ItemKind::Brand | ItemKind::Text | ItemKind::Footer => "text",
        }
    }
}

const FAQ: [(&str, &str); 6] = [
    ("How is a tour written?", "As an ordered list of speak, move, click, scroll, hover and pause actions."),
    ("What if an element is missing?", "The pointer heads for the middle of the screen and the tour carries on."),
    ("Can I interrupt a tour?", "Press s to stop it or r to start over."),
    ("Does the tour wait for me?", "Pauses marked for the user wait for Space, Enter or a click."),
    ("Is the motion eased?", "Pointer and scroll motion are sampled every frame through an easing curve."),
    ("Where are the settings?", "In config.toml under your config directory."),
];

/// The host UI the built-in tour walks through
#[derive(Debug, Clone)]
pub struct DemoPage {
    viewport: Viewport,
    items: Vec<PageItem>,
    index: ElementIndex,
    document_height: f64,
    /// Activation count per element id
    activations: HashMap<String, u32>,
}

impl DemoPage {
    pub fn new(viewport: Viewport) -> Self {
        let mut page = Self {
            viewport,
            items: Vec::new(),
            index: ElementIndex::default(),
            document_height: 0.0,
            activations: HashMap::new(),
        };
        page.layout();
        page
    }

    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    /// Targetable elements in document coordinates
    pub fn elements(&self) -> &[UiElement] {
        self.index.elements()
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    /// Number of times an element has been activated
    pub fn activation_count(&self, id: &str) -> u32 {
        self.activations.get(id).copied().unwrap_or(0)
    }

    /// The start button has been pressed an odd number of times
    pub fn is_started(&self) -> bool {
        self.activation_count("start-button") % 2 == 1
    }

    /// Re-lay out the page for a new viewport, keeping the scroll in range
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.layout();
        let offset = self.index.scroll_offset().clamp(0.0, self.max_scroll());
        self.index.set_scroll_offset(offset);
    }

    /// Id of the targetable element under a viewport point
    pub fn element_at(&self, point: Point) -> Option<&str> {
        self.index.hit_test(point).map(|e| e.id.as_str())
    }

    /// Label shown on an item, reflecting page state
    pub fn label(&self, item: &PageItem) -> String {
        match item.id.as_deref() {
            Some("start-button") if self.is_started() => "Started ✓".to_string(),
            _ => item.title.clone(),
        }
    }

    fn layout(&mut self) {
        let width = self.viewport.width.max(20.0);
        let height = self.viewport.height.max(10.0);
        let mut items = Vec::new();

        // Header bar
        items.push(PageItem::new(ItemKind::Brand, "◆ Tourline", Rect::new(1.0, 0.0, 12.0, 1.0)));
        let links = [("nav-features", "Features"), ("nav-pricing", "Pricing"), ("nav-docs", "Docs")];
        let mut x = (width - 32.0).max(14.0);
        for (id, title) in links {
            let w = title.chars().count() as f64 + 2.0;
            items.push(PageItem::new(ItemKind::NavLink, title, Rect::new(x, 0.0, w, 1.0)).with_id(id));
            x += w + 1.0;
        }

        // Hero
        items.push(PageItem::new(ItemKind::Heading, "Guided tours for your terminal", Rect::new(2.0, 2.0, width - 4.0, 1.0)));
        items.push(PageItem::new(
            ItemKind::Text,
            "Script the pointer, narrate each step, and let the page explain itself.",
            Rect::new(2.0, 4.0, width - 4.0, 1.0),
        ));
        items.push(PageItem::new(ItemKind::Button, "Start free", Rect::new(2.0, 6.0, 16.0, 3.0)).with_id("start-button"));

        // Feature cards
        let card_width = ((width - 6.0) / 2.0).floor().max(10.0);
        items.push(
            PageItem::new(ItemKind::Card, "Sequencer", Rect::new(2.0, 10.0, card_width, 5.0))
                .with_id("card-sequencer")
                .with_body("One action at a time, on a deterministic clock."),
        );
        items.push(
            PageItem::new(ItemKind::Card, "Drivers", Rect::new(4.0 + card_width, 10.0, card_width, 5.0))
                .with_id("card-drivers")
                .with_body("Eased pointer and scroll motion."),
        );

        // FAQ sits below the first screen so the tour has to scroll to it
        let faq_top = (height * 1.5).round().max(17.0);
        items.push(
            PageItem::new(ItemKind::Heading, "Frequently asked questions", Rect::new(2.0, faq_top, width - 4.0, 1.0))
                .with_id("faq"),
        );
        let mut y = faq_top + 2.0;
        for (i, (question, answer)) in FAQ.iter().enumerate() {
            let id = format!("faq-{}", i + 1);
            items.push(
                PageItem::new(ItemKind::Faq, question, Rect::new(2.0, y, width - 4.0, 4.0))
                    .with_id(&id)
                    .with_body(answer),
            );
            y += 5.0;
        }

        // Tall enough that scrolling to the FAQ heading is always possible
        let footer_y = y.max((height * 2.5).ceil() - 1.0);
        items.push(PageItem::new(ItemKind::Footer, "Made with Tourline", Rect::new(2.0, footer_y, width - 4.0, 1.0)));

        self.document_height = footer_y + 1.0;
        self.index.set_elements(
            items
                .iter()
                .filter_map(|item| {
                    item.id
                        .as_ref()
                        .map(|id| UiElement::new(id.clone(), item.role(), item.title.clone(), item.bounds))
                })
                .collect(),
        );
        self.items = items;
    }
}

impl TargetResolver for DemoPage {
    fn resolve(&self, target: &TargetDescriptor) -> Option<Anchor> {
        self.index.resolve(target)
    }
}

impl TourHost for DemoPage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_offset(&self) -> f64 {
        self.index.scroll_offset()
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.index.set_scroll_offset(offset.clamp(0.0, self.max_scroll()));
    }

    fn activate(&mut self, target: &TargetDescriptor, anchor: &Anchor) {
        let count = self.activations.entry(anchor.element_id.clone()).or_insert(0);
        *count += 1;
        info!(%target, element = %anchor.element_id, count = *count, "Element activated");
    }
}
