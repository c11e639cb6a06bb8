//! Game configuration loader.

use std::path::Path;

use tale_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`GameConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("history_limit = 8\n").unwrap();

        assert_eq!(config.history_limit, 8);
        assert_eq!(config.default_stats, GameConfig::default().default_stats);
    }

    #[test]
    fn default_stats_table() {
        let config = ConfigLoader::parse(
            r#"
            [default_stats]
            health = 20
            willpower = 5
            perception = 7
            reputation = -1
            strength = 3
            agility = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.history_limit, GameConfig::DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.default_stats.health, 20);
        assert_eq!(config.default_stats.reputation, -1);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let error = ConfigLoader::parse("history_limit = \"lots\"").unwrap_err();
        assert!(error.to_string().contains("config TOML"));
    }
}
