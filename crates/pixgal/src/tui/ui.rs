//! UI rendering

use super::app::{App, Focus};
use crate::display::{truncate_text, CardDisplay};
use pixgal_api::ImageSearch;
use pixgal_gallery::Level;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

/// Render the entire UI
pub fn render<C: ImageSearch>(frame: &mut Frame, app: &mut App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(6),    // Gallery
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_search_input(frame, app, chunks[0]);
    render_gallery(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Overlays, drawn last
    if app.controller.lightbox().is_open() {
        render_lightbox(frame, app);
    }
    render_toast(frame, app);
}

fn focus_color(focused: bool) -> Color {
    if focused { Color::Cyan } else { Color::DarkGray }
}

/// Render the search input box
fn render_search_input<C: ImageSearch>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let focused = app.focus == Focus::Search;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(focus_color(focused)))
        .title(" Search images ");

    let cursor_style = Style::default().fg(Color::White).bg(Color::DarkGray);
    let text_style = Style::default().fg(Color::White);

    // Split the input at cursor position
    let (before, after) = app.input.text.split_at(app.input.cursor);
    let cursor_char = after.chars().next();
    let after_cursor = cursor_char.map(|c| &after[c.len_utf8()..]).unwrap_or("");

    let mut spans = vec![Span::styled(before, text_style)];
    if focused {
        match cursor_char {
            Some(c) => spans.push(Span::styled(c.to_string(), cursor_style)),
            None => spans.push(Span::styled("█", Style::default().fg(Color::White))),
        }
    } else if let Some(c) = cursor_char {
        spans.push(Span::styled(c.to_string(), text_style));
    }
    spans.push(Span::styled(after_cursor, text_style));

    if app.input.text.is_empty() && !focused {
        spans = vec![Span::styled(
            "press / to search",
            Style::default().fg(Color::DarkGray),
        )];
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_gallery<C: ImageSearch>(frame: &mut Frame, app: &mut App<C>, area: Rect) {
    let selection_bg = Color::Rgb(38, 38, 38);
    let focused = app.focus == Focus::Gallery;
    let selected_index = app.list_state.selected();
    let gallery = app.controller.gallery();

    let title = match app.controller.query_text() {
        Some(query) => format!(" {} · {} images ", query, gallery.len()),
        None => " Gallery ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(focus_color(focused)))
        .title(title);

    if gallery.is_empty() {
        let hint = if app.controller.is_loading() {
            "Searching..."
        } else {
            "Type a query and press Enter"
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let mut items: Vec<ListItem> = gallery
        .cards()
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let is_selected = selected_index == Some(i);

            let base_style = if is_selected {
                Style::default().bg(selection_bg)
            } else {
                Style::default()
            };
            let prefix_style = if is_selected {
                Style::default().fg(Color::LightRed).bg(selection_bg)
            } else {
                Style::default()
            };

            let lines = CardDisplay::from_card(i, card).to_tui_lines(
                is_selected,
                base_style,
                prefix_style,
                width,
            );
            let item = ListItem::new(lines);
            if is_selected {
                item.style(Style::default().bg(selection_bg))
            } else {
                item
            }
        })
        .collect();

    // The sentinel row below the last card
    let sentinel_line = if app.controller.is_loading() {
        Span::styled(
            format!("  {} loading more...", spinner_frame(app.loading_since)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM),
        )
    } else if app.controller.sentinel().is_armed() {
        Span::styled("  ↓ more below", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled("  end of results", Style::default().fg(Color::DarkGray))
    };
    items.push(ListItem::new(Line::from(sentinel_line)));

    let list = List::new(items).block(block);
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status_bar<C: ImageSearch>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let bracket = Style::default().fg(Color::DarkGray);

    let hints: &[&str] = if app.controller.lightbox().is_open() {
        &["←→ browse", "o open", "y copy url", "Esc close"]
    } else if app.focus == Focus::Gallery {
        &["↑↓ select", "Enter view", "o open", "/ search", "Esc quit"]
    } else {
        &["Enter search", "Tab gallery", "Esc quit"]
    };

    let mut spans = vec![Span::styled(" ", dim)];
    for hint in hints {
        spans.push(Span::styled("[", bracket));
        spans.push(Span::styled(*hint, dim));
        spans.push(Span::styled("] ", bracket));
    }

    let pagination = app.controller.pagination();
    if app.controller.query_text().is_some() {
        spans.push(Span::styled(
            format!("page {} ", pagination.current_page),
            Style::default().fg(Color::Gray),
        ));
    }
    if let Some(d) = app.last_fetch {
        spans.push(Span::styled(format!("· {} ", format_duration(d)), dim));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Toast in the top-right corner
fn render_toast<C: ImageSearch>(frame: &mut Frame, app: &App<C>) {
    let Some(ref toast) = app.toast else {
        return;
    };
    let area = frame.area();

    let color = match toast.level {
        Level::Success => Color::Green,
        Level::Info => Color::Blue,
        Level::Error => Color::Red,
    };

    let width = 48.min(area.width.saturating_sub(2));
    let text_width = width.saturating_sub(2) as usize;
    let mut lines = vec![Line::from(Span::styled(
        truncate_text(&toast.message, text_width * 3),
        Style::default().fg(Color::White),
    ))];
    let queue = app.controller.notifier();
    if !queue.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("+{} more", queue.len()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let text_rows = (toast.message.chars().count() / text_width.max(1) + 1) as u16;
    let height = (text_rows + lines.len() as u16 + 1).min(area.height);
    let toast_area = Rect::new(area.width.saturating_sub(width + 1), 0, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", toast.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(Clear, toast_area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        toast_area,
    );
}

/// Enlarged view of the open card
fn render_lightbox<C: ImageSearch>(frame: &mut Frame, app: &App<C>) {
    let Some(view) = app.controller.lightbox().current() else {
        return;
    };
    let area = frame.area();

    let width = (area.width / 10 * 7).max(40).min(area.width);
    let height = 12.min(area.height);
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    let popup = Rect::new(x, y, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" {} / {} ", view.index + 1, view.total));

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    let caption_delay = app.controller.lightbox().options().caption_delay;
    if app.lightbox_changed_at.elapsed() >= caption_delay {
        lines.push(Line::from(Span::styled(
            view.caption.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));

    if let Some(card) = app.controller.gallery().get(view.index) {
        for (name, value) in card.stats() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<10}", name), label),
                Span::styled(value.to_string(), Style::default().fg(Color::White)),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        view.source.to_string(),
        Style::default().fg(Color::Cyan),
    )));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        popup,
    );
}

fn spinner_frame(started_at: Option<Instant>) -> &'static str {
    const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let elapsed = started_at.map(|t| t.elapsed().as_millis() / 80).unwrap_or(0);
    FRAMES[(elapsed as usize) % FRAMES.len()]
}

fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}
