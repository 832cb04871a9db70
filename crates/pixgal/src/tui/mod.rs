//! Interactive terminal gallery
//!
//! Architecture:
//! - Main thread: owns the gallery controller, renders the UI and handles input
//! - Worker thread: runs one page fetch at a time against the search API
//! - Communication via mpsc channels (PageRequest -> worker, PageResponse <- worker);
//!   the controller drops responses for anything but the request it is waiting on
//!
//! Layout:
//! ```text
//! ┌─ Search images ─────────────────────────────────────────────┐
//! │ red fox█                                     ┌─ Success ───┐│
//! ├─ red fox · 80 images ────────────────────────│ Hooray! ... ││
//! │▌  1. fox, animal, wildlife                   └─────────────┘│
//! │▌     Likes 1.2k · Views 45.3k · Comments 80 · Downloads 30k │
//! │▌     https://pixabay.com/get/..._1280.jpg                   │
//! │   2. fox, red fox, mammal                                   │
//! │  ...                                                        │
//! │  ⠹ loading more...                                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │ [↑↓ select] [Enter view] [o open] [/ search] page 2 · 180ms │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod ui;
mod worker;

use anyhow::Result;
use clap::Args;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Search to run on startup
    pub query: Option<String>,
}

pub fn execute(args: BrowseArgs, config: &Config) -> Result<()> {
    let client = config.client()?;
    app::run(client, config.scroll_margin, args.query)
}
