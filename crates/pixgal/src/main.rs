use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;
use std::path::PathBuf;

mod config;
mod console;
mod display;
mod export;
mod search;
mod tui;

#[derive(Parser)]
#[command(name = "pixgal")]
#[command(about = "Search Pixabay and browse the results as an image gallery", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for images and print the cards
    #[command(alias = "s")]
    Search(search::SearchArgs),

    /// Write the gallery for a search as a standalone HTML page
    #[command(alias = "e")]
    Export(export::ExportArgs),

    /// Browse results interactively with infinite scroll
    #[command(alias = "b")]
    Browse(tui::BrowseArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug, RUST_LOG still wins
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    let config = config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Search(args) => search::execute(args, &config),
        Commands::Export(args) => export::execute(args, &config),
        Commands::Browse(args) => tui::execute(args, &config),
    }
}
