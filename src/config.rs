// ⚙️ Report Configuration - realm, labels and icons
//
// Localization lives outside this crate; callers hand translated section
// labels in through ReportLabels. Title glyphs are fixed (the layout engine
// recognizes title rows by them), only the words after them are configurable.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLabels {
    pub stats: String,
    pub resists: String,
    pub skills: String,
    pub bonuses: String,
    pub equipment: String,
    pub armor: String,
    pub jewelry: String,
    pub weapons: String,
    pub totals: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        ReportLabels {
            stats: "Stats".to_string(),
            resists: "Resists".to_string(),
            skills: "Skills".to_string(),
            bonuses: "Bonuses".to_string(),
            equipment: "Equipment".to_string(),
            armor: "Armor".to_string(),
            jewelry: "Jewelry".to_string(),
            weapons: "Weapons".to_string(),
            totals: "Total".to_string(),
        }
    }
}

/// Glyphs placed in front of an item's price cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceIcons {
    /// Price came from the template's local cache
    pub local_cache: String,
    /// Price came from the item database
    pub database: String,
    /// No price, but the database knows the item category
    pub category: String,
    /// Nothing known about the item
    pub unknown: String,
}

impl Default for PriceIcons {
    fn default() -> Self {
        PriceIcons {
            local_cache: "📌".to_string(),
            database: "🪙".to_string(),
            category: "🏷".to_string(),
            unknown: "❓".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Realm used for `name:realm` database lookups
    pub realm: String,
    pub labels: ReportLabels,
    pub icons: PriceIcons,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            realm: "all".to_string(),
            labels: ReportLabels::default(),
            icons: PriceIcons::default(),
        }
    }
}

impl ReportConfig {
    pub fn for_realm(realm: &str) -> Self {
        ReportConfig {
            realm: realm.to_string(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file. Missing keys take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read report config: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse report config JSON")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.realm, "all");
        assert_eq!(config.labels.stats, "Stats");
        assert_eq!(config.icons.unknown, "❓");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"realm": "Hibernia", "labels": {{"stats": "Attribute"}}}}"#).unwrap();

        let config = ReportConfig::from_file(file.path()).unwrap();
        assert_eq!(config.realm, "Hibernia");
        assert_eq!(config.labels.stats, "Attribute");
        assert_eq!(config.labels.resists, "Resists");
        assert_eq!(config.icons, PriceIcons::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = ReportConfig::from_file("/nonexistent/report.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_for_realm() {
        assert_eq!(ReportConfig::for_realm("Midgard").realm, "Midgard");
    }
}
