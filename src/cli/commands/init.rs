//! Init command - first-run setup.

use crate::catalog::SqliteClipStore;
use crate::cli::Output;
use crate::config::{Settings, StoreProvider};
use crate::dictionary::Dictionary;
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Tingli Setup");
    println!();
    println!("Welcome to Tingli! Let's get your study catalog set up.\n");

    // Step 1: Data directory
    println!("{}", style("Step 1: Setting up directories").bold().cyan());
    println!();

    let data_dir = settings.data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        Output::success(&format!("Created data directory: {}", data_dir.display()));
    } else {
        Output::info(&format!("Data directory exists: {}", data_dir.display()));
    }

    println!();

    // Step 2: Catalog
    println!("{}", style("Step 2: Catalog store").bold().cyan());
    println!();

    match settings.store.provider {
        StoreProvider::Sqlite => {
            let path = settings.sqlite_path();
            SqliteClipStore::new(&path)?;
            Output::success(&format!("Catalog ready at {}", path.display()));
        }
        StoreProvider::Memory => {
            Output::warning("Store provider is 'memory': the catalog is lost on exit.");
        }
    }

    println!();

    // Step 3: Dictionary
    println!("{}", style("Step 3: Dictionary").bold().cyan());
    println!();

    match settings.dictionary_path() {
        Some(path) => match Dictionary::load(&path) {
            Ok(dict) => {
                Output::success(&format!(
                    "Loaded dictionary from {} ({} terms, {} patterns)",
                    path.display(),
                    dict.vocab.len(),
                    dict.grammar.len()
                ));
            }
            Err(e) => {
                Output::error(&format!("Dictionary file failed to load: {}", e));
                Output::info("Fix the file or unset dictionary.path to use the built-in set.");
            }
        },
        None => {
            let dict = Dictionary::builtin();
            Output::info(&format!(
                "Using the built-in demo dictionary ({} terms, {} patterns).",
                dict.vocab.len(),
                dict.grammar.len()
            ));
        }
    }

    println!();

    // Step 4: Config file
    println!("{}", style("Step 4: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
        println!();
        println!("  Edit your config with: {}", style("tingli config edit").green());
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!(
        "  {} Register a clip",
        style("tingli clip add <id> --title <t> --media <m> --start <s> --end <e>").cyan()
    );
    println!("  {} Paste its transcript", style("tingli ingest <clip_id>").cyan());
    println!("  {} Serve the web frontend", style("tingli serve").cyan());
    println!();
    println!("For more help: {}", style("tingli --help").cyan());

    Ok(())
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}
