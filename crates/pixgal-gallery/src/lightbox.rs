//! Click-to-enlarge viewer over the gallery's cards

use crate::render::Gallery;
use std::time::Duration;

/// Where the viewer reads its caption and full-size source from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxOptions {
    /// Card attribute used as caption
    pub captions_data: &'static str,
    /// Card attribute holding the full-resolution URL
    pub source_attr: &'static str,
    /// Delay before the caption appears
    pub caption_delay: Duration,
}

impl Default for LightboxOptions {
    fn default() -> Self {
        Self {
            captions_data: "alt",
            source_attr: "data-image",
            caption_delay: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    source: String,
    caption: String,
}

/// What the viewer shows for the open card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxView<'a> {
    pub index: usize,
    pub total: usize,
    pub source: &'a str,
    pub caption: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    options: LightboxOptions,
    bindings: Vec<Binding>,
    open: Option<usize>,
    /// Gallery generation the bindings belong to
    generation: u64,
}

impl Lightbox {
    pub fn new(options: LightboxOptions) -> Self {
        Self {
            options,
            bindings: Vec::new(),
            open: None,
            generation: 0,
        }
    }

    pub fn options(&self) -> &LightboxOptions {
        &self.options
    }

    /// Bind every card that is not bound yet. Calling this again without new
    /// cards changes nothing.
    pub fn refresh(&mut self, gallery: &Gallery) {
        if gallery.generation() != self.generation || gallery.len() < self.bindings.len() {
            // The gallery was cleared since the last refresh
            self.reset();
            self.generation = gallery.generation();
        }

        let already = self.bindings.len();
        self.bindings
            .extend(gallery.cards()[already..].iter().map(|card| Binding {
                source: card.full_url.clone(),
                caption: card.alt.clone(),
            }));

        if self.bindings.len() > already {
            log::debug!(
                "lightbox bound {} new cards ({} total)",
                self.bindings.len() - already,
                self.bindings.len()
            );
        }
    }

    /// Drop all bindings and close the viewer
    pub fn reset(&mut self) {
        self.bindings.clear();
        self.open = None;
    }

    pub fn bound(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open the viewer on a bound card. Unbound indices leave it closed.
    pub fn open(&mut self, index: usize) -> Option<LightboxView<'_>> {
        if index >= self.bindings.len() {
            return None;
        }
        self.open = Some(index);
        self.current()
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Step forward, wrapping to the first card
    pub fn next(&mut self) -> Option<LightboxView<'_>> {
        let index = self.open?;
        self.open = Some((index + 1) % self.bindings.len());
        self.current()
    }

    /// Step back, wrapping to the last card
    pub fn prev(&mut self) -> Option<LightboxView<'_>> {
        let index = self.open?;
        let total = self.bindings.len();
        self.open = Some((index + total - 1) % total);
        self.current()
    }

    pub fn current(&self) -> Option<LightboxView<'_>> {
        let index = self.open?;
        let binding = self.bindings.get(index)?;
        Some(LightboxView {
            index,
            total: self.bindings.len(),
            source: &binding.source,
            caption: &binding.caption,
        })
    }
}
