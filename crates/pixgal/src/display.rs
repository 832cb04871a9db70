//! Card presentation shared by the CLI and the terminal gallery

use colored::Colorize;
use pixgal_gallery::Card;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

pub fn truncate_text(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut result = String::new();
    let mut width = 0;

    for ch in text.chars() {
        let char_width = ch.width().unwrap_or(0);
        if width + char_width + 3 > max_width {
            break;
        }
        result.push(ch);
        width += char_width;
    }

    result.push_str("...");
    result
}

/// 1234 -> "1.2k", 5_600_000 -> "5.6M"
pub fn compact_count(n: u64) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => format!("{:.1}k", n as f64 / 1_000.0),
        _ => format!("{:.1}M", n as f64 / 1_000_000.0),
    }
}

/// One card laid out as three lines: caption, stats, full-size URL
pub struct CardDisplay {
    pub index: usize,
    pub caption: String,
    pub stats: Vec<(&'static str, String)>,
    pub url: String,
}

impl CardDisplay {
    pub fn from_card(index: usize, card: &Card) -> Self {
        let caption = if card.alt.trim().is_empty() {
            "(untagged)".to_string()
        } else {
            card.alt.clone()
        };

        Self {
            index,
            caption,
            stats: card
                .stats()
                .iter()
                .map(|(label, value)| (*label, compact_count(*value)))
                .collect(),
            url: card.full_url.clone(),
        }
    }

    fn stats_text(&self) -> String {
        self.stats
            .iter()
            .map(|(label, value)| format!("{} {}", label, value))
            .collect::<Vec<_>>()
            .join(" · ")
    }

    /// Render to CLI output using colored crate
    pub fn to_cli_lines(&self, width: usize) -> Vec<String> {
        let number = format!("{:>3}.", self.index + 1).dimmed();
        let caption = truncate_text(&self.caption, width.saturating_sub(6));
        let line1 = format!("{} {}", number, caption.green().bold());

        let separator = " · ".dimmed().to_string();
        let stats = self
            .stats
            .iter()
            .map(|(label, value)| format!("{} {}", label.dimmed(), value.yellow()))
            .collect::<Vec<_>>()
            .join(separator.as_str());
        let line2 = format!("     {}", stats);

        let line3 = format!("     {}", self.url.cyan().dimmed());

        vec![line1, line2, line3]
    }

    /// Render to ratatui Lines for TUI
    pub fn to_tui_lines(
        &self,
        is_selected: bool,
        base_style: ratatui::style::Style,
        prefix_style: ratatui::style::Style,
        width: usize,
    ) -> Vec<ratatui::text::Line<'static>> {
        use ratatui::style::{Color, Modifier};
        use ratatui::text::{Line, Span};

        let prefix = if is_selected { "▌" } else { " " };

        // Line 1: number + caption
        let caption_style = if is_selected {
            base_style.fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            base_style.fg(Color::Green)
        };
        let number = format!(" {:>3}. ", self.index + 1);
        let line1 = Line::from(vec![
            Span::styled(prefix.to_string(), prefix_style),
            Span::styled(number, base_style.fg(Color::DarkGray)),
            Span::styled(
                truncate_text(&self.caption, width.saturating_sub(7)),
                caption_style,
            ),
        ]);

        // Line 2: Likes 12 · Views 3.4k · ...
        let line2 = Line::from(vec![
            Span::styled(prefix.to_string(), prefix_style),
            Span::styled("      ".to_string(), base_style),
            Span::styled(
                truncate_text(&self.stats_text(), width.saturating_sub(7)),
                base_style.fg(Color::Gray),
            ),
        ]);

        let line3 = Line::from(vec![
            Span::styled(prefix.to_string(), prefix_style),
            Span::styled("      ".to_string(), base_style),
            Span::styled(
                truncate_text(&self.url, width.saturating_sub(7)),
                base_style.fg(Color::DarkGray).add_modifier(Modifier::DIM),
            ),
        ]);

        vec![line1, line2, line3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(alt: &str) -> Card {
        Card {
            preview_url: "https://cdn.example/a_640.jpg".into(),
            full_url: "https://cdn.example/a_1280.jpg".into(),
            alt: alt.into(),
            likes: 12,
            views: 3_456,
            comments: 0,
            downloads: 2_500_000,
        }
    }

    #[test]
    fn counts_are_compacted() {
        assert_eq!(compact_count(0), "0");
        assert_eq!(compact_count(999), "999");
        assert_eq!(compact_count(3_456), "3.5k");
        assert_eq!(compact_count(2_500_000), "2.5M");
    }

    #[test]
    fn truncation_respects_width() {
        assert_eq!(truncate_text("sunset", 10), "sunset");
        assert_eq!(truncate_text("sunset over the sea", 10), "sunset ...");
    }

    #[test]
    fn display_fields() {
        let display = CardDisplay::from_card(4, &card("sea, beach"));
        assert_eq!(display.caption, "sea, beach");
        assert_eq!(
            display.stats_text(),
            "Likes 12 · Views 3.5k · Comments 0 · Downloads 2.5M"
        );
        assert_eq!(display.url, "https://cdn.example/a_1280.jpg");

        colored::control::set_override(false);
        let lines = display.to_cli_lines(80);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "  5. sea, beach");
    }

    #[test]
    fn untagged_cards_get_a_placeholder() {
        assert_eq!(CardDisplay::from_card(0, &card(" ")).caption, "(untagged)");
    }

    #[test]
    fn tui_lines_mark_selection() {
        use ratatui::style::Style;

        let display = CardDisplay::from_card(0, &card("fox"));
        let selected = display.to_tui_lines(true, Style::default(), Style::default(), 60);
        let plain = display.to_tui_lines(false, Style::default(), Style::default(), 60);

        assert_eq!(selected.len(), 3);
        assert_eq!(selected[0].spans[0].content, "▌");
        assert_eq!(plain[0].spans[0].content, " ");
        assert_eq!(plain[0].spans[2].content, "fox");
    }
}
