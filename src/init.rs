use std::path::Path;

use crate::{store, trie::Trie};

/// Initialize logger. Command output shares the terminal with the log, so
/// only warnings and errors show by default; `RUST_LOG` overrides.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Build a trie from a CSV file.
pub fn init_trie(path: &Path) -> Result<Trie, store::StoreError> {
    let pairs = store::load(path)?;
    let trie: Trie = pairs.into_iter().collect();
    if trie.is_empty() {
        log::info!("no words found in {}", path.display());
    } else {
        log::info!("loaded {} words from {}", trie.len(), path.display());
    }
    Ok(trie)
}
