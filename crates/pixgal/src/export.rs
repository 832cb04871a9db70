use anyhow::{Context, Result};
use clap::Args;
use minijinja::{context, Environment};
use pixgal_api::ImageSearch;
use pixgal_gallery::{Controller, Notifications, Notifier};
use std::path::PathBuf;

use crate::config::Config;
use crate::console::ConsoleNotifier;
use crate::search::{exit_after_reported_failure, load_pages, LoadStatus};

const PAGE_TEMPLATE: &str = include_str!("templates/gallery.html.jinja");

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Search terms
    pub query: String,

    /// Output HTML file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Pages to include
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,
}

pub fn execute(args: ExportArgs, config: &Config) -> Result<()> {
    let client = config.client()?;
    let mut controller = Controller::new(client, Notifications::new(), config.scroll_margin);

    let status = load_pages(&mut controller, &args.query, args.pages);

    // Echo what the page will show
    let mut console = ConsoleNotifier;
    for notification in controller.notifier().entries() {
        console.notify(notification.clone());
    }
    if status == LoadStatus::NotStarted {
        exit_after_reported_failure();
    }

    let html = generate_html(&controller)?;
    std::fs::write(&args.output, html)
        .with_context(|| format!("Failed to write HTML to {}", args.output.display()))?;

    println!("✓ Gallery exported to {}", args.output.display());

    if status.is_failure() {
        exit_after_reported_failure();
    }
    Ok(())
}

pub fn generate_html<C: ImageSearch>(controller: &Controller<C, Notifications>) -> Result<String> {
    let mut env = Environment::new();
    // `.html` name keeps auto-escaping on
    env.add_template("gallery.html", PAGE_TEMPLATE)
        .context("Failed to add gallery template")?;
    let template = env.get_template("gallery.html")?;

    let gallery = controller
        .gallery()
        .to_markup()
        .context("Failed to render gallery cards")?;
    let options = controller.lightbox().options();

    let html = template
        .render(context! {
            query => controller.query_text().unwrap_or_default(),
            gallery,
            notifications => controller.notifier().entries(),
            cards => controller.gallery().len(),
            pages => controller.pagination().current_page,
            more_available => controller.sentinel().is_armed(),
            lightbox => context! {
                source_attr => options.source_attr,
                captions_data => options.captions_data,
                caption_delay_ms => options.caption_delay.as_millis() as u64,
            },
            version => env!("CARGO_PKG_VERSION"),
        })
        .context("Failed to render gallery page")?;

    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixgal_api::{ImageRecord, SearchError, SearchQuery, SearchResult};

    struct OnePage(u64, usize);

    impl ImageSearch for OnePage {
        fn search(&self, _query: &SearchQuery) -> Result<SearchResult, SearchError> {
            Ok(SearchResult {
                total_hits: self.0,
                total: self.0,
                items: (0..self.1)
                    .map(|i| ImageRecord {
                        preview_url: format!("https://cdn.example/{i}_640.jpg"),
                        full_url: format!("https://cdn.example/{i}_1280.jpg"),
                        tags: format!("tag{i}"),
                        likes: 1,
                        views: 2,
                        comments: 3,
                        downloads: 4,
                    })
                    .collect(),
            })
        }
    }

    #[test]
    fn page_contains_form_cards_and_sentinel() {
        let mut controller = Controller::new(OnePage(100, 2), Notifications::new(), 3);
        controller.submit("red fox");

        let html = generate_html(&controller).unwrap();

        assert!(html.contains("id=\"search-form\""));
        assert!(html.contains("name=\"searchQuery\" value=\"red fox\""));
        assert!(html.contains("id=\"gallery\""));
        assert_eq!(html.matches("class=\"photo-card\"").count(), 2);
        assert!(html.contains("id=\"gallery-end\" data-armed=\"true\""));
        assert!(html.contains("Hooray! We found 100 images."));
        assert!(html.contains("notification-success"));

        // Nothing on the page points at a live search endpoint
        assert!(!html.contains("action="));
        assert!(!html.contains("data-root-margin"));
    }

    #[test]
    fn exhausted_results_disarm_the_page_sentinel() {
        let mut controller = Controller::new(OnePage(2, 2), Notifications::new(), 3);
        controller.submit("owl");

        let html = generate_html(&controller).unwrap();

        assert!(html.contains("data-armed=\"false\""));
        assert!(html.contains("reached the end of search results"));
    }

    #[test]
    fn query_text_is_escaped() {
        let mut controller = Controller::new(OnePage(1, 1), Notifications::new(), 3);
        controller.submit("<b>cats</b>");

        let html = generate_html(&controller).unwrap();

        assert!(!html.contains("<b>cats</b>"));
        assert!(html.contains("&lt;b&gt;cats"));
    }
}
