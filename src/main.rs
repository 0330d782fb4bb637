mod cli;
mod config;
mod init;
mod models;
mod repl;
mod store;
mod trie;

use std::path::{Path, PathBuf};

use clap::Parser;

use cli::Commands;
use repl::Session;
use trie::Trie;

fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    // Handle CLI flags.
    if let Some(cmd) = cli.command {
        match cmd {
            // Generate a new config file.
            Commands::NewConfig { path } => {
                match config::generate_sample(&path) {
                    Ok(_) => {
                        log::info!("config file generated: {}", path.display());
                    }
                    Err(e) => {
                        log::error!("error generating config: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }
        }
    }

    let config = config::load_all(&cli.config);

    // The --load flag wins over the configured preload file.
    let preload = cli
        .load
        .or_else(|| non_empty_path(&config.app.preload));

    let trie = match preload {
        Some(path) => init::init_trie(&path).unwrap_or_else(|e| {
            log::error!("error loading {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => Trie::new(),
    };

    let mut session = Session::new(trie, config.app.max_results);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = session.run(stdin.lock(), &mut stdout) {
        log::error!("error reading commands: {}", e);
        std::process::exit(1);
    }

    if let Some(path) = non_empty_path(&config.app.autosave) {
        autosave(session.trie(), &path);
    }
}

/// Write the trie to the configured autosave file.
fn autosave(trie: &Trie, path: &Path) {
    let items = trie.items();
    match store::save(path, &items) {
        Ok(_) => log::info!("saved {} words to {}", items.len(), path.display()),
        Err(e) => {
            log::error!("error saving {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn non_empty_path(s: &str) -> Option<PathBuf> {
    if s.is_empty() {
        None
    } else {
        Some(PathBuf::from(s))
    }
}
