//! Rules configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Half-moves after which an undecided game is drawn
pub const DEFAULT_MOVE_LIMIT: u16 = 44;

/// Tunable rule parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Completed turns (both players) before the game is drawn
    pub move_limit: u16,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            move_limit: DEFAULT_MOVE_LIMIT,
        }
    }
}

impl RulesConfig {
    /// Set the draw limit
    pub fn with_move_limit(mut self, move_limit: u16) -> Self {
        self.move_limit = move_limit;
        self
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading rules config {}", path.display()))?;
        let config: RulesConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing rules config {}", path.display()))?;
        if config.move_limit == 0 {
            anyhow::bail!("move_limit must be at least 1");
        }
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit() {
        assert_eq!(RulesConfig::default().move_limit, 44);
        assert_eq!(RulesConfig::default().with_move_limit(10).move_limit, 10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RulesConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RulesConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("fanorona-rules-{}.json", std::process::id()));
        let config = RulesConfig::default().with_move_limit(60);
        config.save(&path).unwrap();
        let loaded = RulesConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let path = std::env::temp_dir().join(format!("fanorona-rules-zero-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"move_limit": 0}"#).unwrap();
        let result = RulesConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
