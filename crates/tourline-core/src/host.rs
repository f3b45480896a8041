//! The host application a tour narrates

use crate::geometry::Viewport;
use crate::resolver::{Anchor, ElementIndex, TargetResolver, UiElement};
use crate::script::TargetDescriptor;

/// Capabilities the sequencer consumes from the host UI
pub trait TourHost: TargetResolver {
    /// Visible area, measured fresh on every call
    fn viewport(&self) -> Viewport;

    /// Document scroll offset as it is right now
    fn scroll_offset(&self) -> f64;

    /// Apply a sampled scroll offset to the document
    fn set_scroll_offset(&mut self, offset: f64);

    /// Synthesize a primary activation on a resolved element
    fn activate(&mut self, target: &TargetDescriptor, anchor: &Anchor);
}

/// Headless host that records every side effect
///
/// Used by the `headless` command and by tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub viewport: Viewport,
    pub index: ElementIndex,
    /// Element ids in the order they were activated
    pub activations: Vec<String>,
    /// Every scroll offset written by the sequencer
    pub scroll_writes: Vec<f64>,
}

impl RecordingHost {
    pub fn new(viewport: Viewport, elements: Vec<UiElement>) -> Self {
        Self {
            viewport,
            index: ElementIndex::new(elements),
            activations: Vec::new(),
            scroll_writes: Vec::new(),
        }
    }

    /// Host with no targetable elements
    pub fn empty(viewport: Viewport) -> Self {
        Self::new(viewport, Vec::new())
    }

    pub fn last_scroll(&self) -> Option<f64> {
        self.scroll_writes.last().copied()
    }
}

impl TargetResolver for RecordingHost {
    fn resolve(&self, target: &TargetDescriptor) -> Option<Anchor> {
        self.index.resolve(target)
    }
}

impl TourHost for RecordingHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_offset(&self) -> f64 {
        self.index.scroll_offset()
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.index.set_scroll_offset(offset);
        self.scroll_writes.push(offset);
    }

    fn activate(&mut self, _target: &TargetDescriptor, anchor: &Anchor) {
        self.activations.push(anchor.element_id.clone());
    }
}
