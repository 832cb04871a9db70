use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pixgal_api::ImageSearch;
use pixgal_gallery::{Controller, Notifier, Outcome};

use crate::config::Config;
use crate::console::ConsoleNotifier;
use crate::display::{terminal_width, CardDisplay};
use std::io::Write;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search terms
    pub query: String,

    /// Pages to load; each extra page is what scrolling to the bottom would fetch
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Print the cards as JSON
    #[arg(long)]
    pub json: bool,
}

/// How a multi-page load ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadStatus {
    Complete,
    /// The first page was rejected or failed; the gallery is empty
    NotStarted,
    /// A later page failed; the pages before it stay in the gallery
    Interrupted,
}

impl LoadStatus {
    pub(crate) fn is_failure(self) -> bool {
        self != LoadStatus::Complete
    }
}

/// Submit `query`, then keep hitting the sentinel until `pages` pages are in
/// or the results run out.
///
/// Failures have already been reported through the controller's notifier, so
/// the status only decides what to output and the exit code.
pub(crate) fn load_pages<C: ImageSearch, N: Notifier>(
    controller: &mut Controller<C, N>,
    query: &str,
    pages: u32,
) -> LoadStatus {
    match controller.submit(query) {
        Outcome::Rejected | Outcome::Failed => return LoadStatus::NotStarted,
        _ => {}
    }

    let mut loaded = 1;
    let mut status = LoadStatus::Complete;
    while loaded < pages && controller.sentinel().is_armed() {
        match controller.on_intersect() {
            Outcome::Rendered { .. } => loaded += 1,
            Outcome::Failed => {
                log::debug!(
                    "stopping at page {}",
                    controller.pagination().current_page + 1
                );
                status = LoadStatus::Interrupted;
                break;
            }
            _ => break,
        }
    }

    log::debug!(
        "loaded {} page(s), {} cards",
        loaded,
        controller.gallery().len()
    );
    status
}

/// Exit non-zero without another message; the notifier already said why
pub(crate) fn exit_after_reported_failure() -> ! {
    let _ = std::io::stdout().flush();
    std::process::exit(1);
}

pub fn execute(args: SearchArgs, config: &Config) -> Result<()> {
    let client = config.client()?;
    let mut controller = Controller::new(client, ConsoleNotifier, config.scroll_margin);

    let status = load_pages(&mut controller, &args.query, args.pages);
    if status == LoadStatus::NotStarted {
        exit_after_reported_failure();
    }

    let cards = controller.gallery().cards();
    if args.json {
        println!("{}", serde_json::to_string_pretty(cards)?);
        if status.is_failure() {
            exit_after_reported_failure();
        }
        return Ok(());
    }

    let width = terminal_width();
    for (index, card) in cards.iter().enumerate() {
        for line in CardDisplay::from_card(index, card).to_cli_lines(width) {
            println!("{}", line);
        }
    }

    if controller.sentinel().is_armed() {
        println!();
        println!(
            "{}",
            format!(
                "More results available. Use --pages {} to load the next page.",
                controller.pagination().current_page + 1
            )
            .dimmed()
        );
    }

    if status.is_failure() {
        exit_after_reported_failure();
    }
    Ok(())
}
