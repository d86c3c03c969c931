//! Lens - Entry Point
//!
//! Opens a popup session in the terminal: loads the deck, restores the
//! draft, shows a lens, then reads commands until the user quits.

use clap::Parser;
use lens::core::config::PopupConfig;
use lens::core::error::{LensError, Result};
use lens::deck::load_deck;
use lens::popup::{render_card, LensSession, RefreshOutcome, EMPTY_STATE};
use lens::storage::{JsonFileStore, KeyValueStore, SettingsStore};

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Lens - one perspective at a time
#[derive(Parser, Debug)]
#[command(name = "lens")]
#[command(about = "Show rotating perspective lenses without recent repeats")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Deck JSON file (overrides config)
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Store JSON file (overrides config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Random seed for reproducible picks
    #[arg(long)]
    seed: Option<u64>,

    /// Save a new anti-repeat window before starting
    #[arg(long)]
    anti_repeat: Option<usize>,

    /// Save whether the draft input is shown before starting
    #[arg(long)]
    show_input: Option<bool>,

    /// Print one lens and exit
    #[arg(long)]
    once: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PopupConfig::load(path)?,
        None => PopupConfig::default(),
    };
    if let Some(deck) = args.deck.clone() {
        config.deck_path = deck;
    }
    if let Some(store) = args.store.clone() {
        config.store_path = store;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate().map_err(LensError::Config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let rt = Runtime::new()?;
    rt.block_on(run(args, config))
}

async fn run(args: Args, config: PopupConfig) -> Result<()> {
    tracing::info!(deck = %config.deck_path.display(), store = %config.store_path.display(), "Lens starting...");

    let deck = match load_deck(&config.deck_path).await {
        Ok(deck) => deck,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load lenses");
            println!("Error loading content.");
            return Err(e);
        }
    };

    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&config.store_path));
    let settings = SettingsStore::with_defaults(store.clone(), config.first_run_settings());
    let defaults = settings
        .apply_overrides(args.anti_repeat, args.show_input)
        .await;

    let mut session = LensSession::new(deck, store, defaults, config.seed);
    let outcome = session.start().await;
    display(&session, &outcome);

    if args.once {
        return Ok(());
    }

    if session.show_input() && !session.draft().is_empty() {
        println!("Draft: {}", session.draft());
    }
    print_help();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "new" || input == "n" {
            let outcome = session.refresh().await;
            display(&session, &outcome);
            continue;
        }

        if input == "reflect" || input == "r" {
            session.toggle_reflect(None);
            display_current(&session);
            continue;
        }

        if input == "copy" || input == "c" {
            match session.copy_text() {
                Some(text) => println!("{}", text),
                None => println!("{}", EMPTY_STATE),
            }
            continue;
        }

        if input == "draft" || input.starts_with("draft ") {
            if !session.show_input() {
                println!("Draft input is hidden (enable with --show-input true).");
                continue;
            }
            let text = input.strip_prefix("draft").unwrap_or_default().trim();
            if let Err(e) = session.set_draft(text).await {
                tracing::warn!(error = %e, "Draft not saved");
            }
            continue;
        }

        if input == "history" || input == "h" {
            match session.history().await {
                Ok(history) if history.is_empty() => println!("No lenses recorded yet."),
                Ok(history) => {
                    for (i, id) in history.iter().enumerate() {
                        println!("  {}. {}", i + 1, id);
                    }
                }
                Err(e) => println!("History unavailable: {}", e),
            }
            continue;
        }

        if input == "reset" {
            match session.reset_history().await {
                Ok(()) => println!("History cleared."),
                Err(e) => println!("Could not clear history: {}", e),
            }
            continue;
        }

        if input == "help" || input == "?" {
            print_help();
            continue;
        }

        println!("Unknown command: {}", input);
    }

    tracing::info!("Lens closed");
    Ok(())
}

fn display(session: &LensSession, outcome: &RefreshOutcome) {
    match outcome {
        RefreshOutcome::Empty => println!("\n{}\n", EMPTY_STATE),
        RefreshOutcome::Shown { .. } => display_current(session),
    }
}

fn display_current(session: &LensSession) {
    match session.current() {
        Some(lens) => println!("\n{}", render_card(lens, session.reflect_expanded())),
        None => println!("\n{}\n", EMPTY_STATE),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  new / n         - Show a new lens");
    println!("  reflect / r     - Show or hide prompts and counter");
    println!("  copy / c        - Print the shareable text");
    println!("  draft <text>    - Save your draft");
    println!("  history / h     - List recently shown lenses");
    println!("  reset           - Clear the recent history");
    println!("  quit / q        - Close");
    println!();
}
