//! Turning image records into gallery cards.
//!
//! Cards are plain data; [`Card::to_markup`] and [`Gallery::to_markup`]
//! produce the HTML blocks for a page. Rendering never touches any output
//! surface, so it can be checked directly in tests.

use minijinja::Environment;
use pixgal_api::ImageRecord;
use serde::Serialize;

const CARD_TEMPLATE: &str = r#"<div class="photo-card" data-image="{{ card.full_url }}">
  <img class="photo-card-image" src="{{ card.preview_url }}" alt="{{ card.alt }}" loading="lazy" />
  <div class="info">
    {%- for stat in stats %}
    <p class="info-item"><b>{{ stat[0] }}</b><br>{{ stat[1] }}</p>
    {%- endfor %}
  </div>
</div>"#;

/// A rendered image card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub preview_url: String,
    pub full_url: String,
    /// Caption, taken from the record's tags
    pub alt: String,
    pub likes: u64,
    pub views: u64,
    pub comments: u64,
    pub downloads: u64,
}

impl Card {
    /// Metadata fields in display order
    pub fn stats(&self) -> [(&'static str, u64); 4] {
        [
            ("Likes", self.likes),
            ("Views", self.views),
            ("Comments", self.comments),
            ("Downloads", self.downloads),
        ]
    }

    pub fn to_markup(&self) -> Result<String, minijinja::Error> {
        let env = templates()?;
        render_with(&env, self)
    }
}

fn templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    // The `.html` suffix turns on HTML auto-escaping
    env.add_template("card.html", CARD_TEMPLATE)?;
    Ok(env)
}

fn render_with(env: &Environment<'_>, card: &Card) -> Result<String, minijinja::Error> {
    env.get_template("card.html")?
        .render(minijinja::context! { card, stats => card.stats() })
}

pub fn render_card(record: &ImageRecord) -> Card {
    Card {
        preview_url: record.preview_url.clone(),
        full_url: record.full_url.clone(),
        alt: record.tags.clone(),
        likes: record.likes,
        views: record.views,
        comments: record.comments,
        downloads: record.downloads,
    }
}

pub fn render_cards(records: &[ImageRecord]) -> Vec<Card> {
    records.iter().map(render_card).collect()
}

/// Append-only container of rendered cards
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    cards: Vec<Card>,
    /// Bumped on every clear
    generation: u64,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one card per record, in input order. Returns how many were added.
    pub fn append(&mut self, records: &[ImageRecord]) -> usize {
        self.cards.extend(render_cards(records));
        records.len()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Markup for every card, in order
    pub fn to_markup(&self) -> Result<String, minijinja::Error> {
        let env = templates()?;
        let blocks = self
            .cards
            .iter()
            .map(|card| render_with(&env, card))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(blocks.join("\n"))
    }
}
