use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// CSV file loaded into the trie on startup.
    #[serde(default)]
    pub preload: String,

    /// CSV file the trie is written to when the session ends.
    #[serde(default)]
    pub autosave: String,

    /// Upper bound on `complete` results. 0 means no bound.
    #[serde(default)]
    pub max_results: usize,
}
