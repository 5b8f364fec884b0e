// 💰 Price Resolver - local cache, then the item database, then nothing
//
// Resolution tiers, first hit wins:
//   1. local cache, exact item name
//   2. database `name:realm` (lowercased)
//   3. database `name:all`
//   4. database bare item name (legacy rows)
// Missing data is a normal outcome and yields an empty PriceRecord.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// ============================================================================
// COLLABORATOR CONTRACTS
// ============================================================================

/// Caller-supplied per-template price overrides.
pub trait LocalPriceCache {
    fn get(&self, item_name: &str) -> Option<String>;
}

impl LocalPriceCache for HashMap<String, String> {
    fn get(&self, item_name: &str) -> Option<String> {
        HashMap::get(self, item_name).cloned()
    }
}

/// A row from the item database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub merchant_price: Option<u64>,
    #[serde(default)]
    pub merchant_currency: Option<String>,
    #[serde(default)]
    pub merchant_zone: Option<String>,
    #[serde(default)]
    pub item_category: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
}

impl ItemRecord {
    pub fn with_price(price: u64, currency: Option<&str>) -> Self {
        ItemRecord {
            merchant_price: Some(price),
            merchant_currency: currency.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn with_category(category: &str) -> Self {
        ItemRecord {
            item_category: Some(category.to_string()),
            ..Default::default()
        }
    }

    fn has_price(&self) -> bool {
        self.merchant_price.is_some()
    }

    fn has_category(&self) -> bool {
        self.item_category.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Read-only item database keyed by composite lookup keys.
pub trait ItemDatabase {
    fn search(&self, key: &str) -> Option<ItemRecord>;
}

impl ItemDatabase for HashMap<String, ItemRecord> {
    fn search(&self, key: &str) -> Option<ItemRecord> {
        self.get(key).cloned()
    }
}

/// A database that knows nothing; every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDatabase;

impl ItemDatabase for NoDatabase {
    fn search(&self, _key: &str) -> Option<ItemRecord> {
        None
    }
}

/// Load a flat `{ "item name": "price" }` JSON object as a local cache.
pub fn load_price_cache<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read price cache: {:?}", path.as_ref()))?;

    serde_json::from_str(&content).context("Failed to parse price cache JSON")
}

// ============================================================================
// PRICE RECORD
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    LocalCache,
    Database,
    None,
}

/// Resolved price for one item. `currency` is only set alongside `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub source: PriceSource,
}

impl PriceRecord {
    pub fn unresolved() -> Self {
        PriceRecord {
            amount: None,
            currency: None,
            category: None,
            source: PriceSource::None,
        }
    }

    pub fn has_price(&self) -> bool {
        self.amount.is_some()
    }

    /// Neither a price nor a category: the item lands in the unresolved list.
    pub fn is_unresolved(&self) -> bool {
        self.amount.is_none() && self.category.is_none()
    }

    /// `100 Scales` / `50 Marks` / `50` when there is no currency label.
    pub fn display_price(&self) -> Option<String> {
        let amount = self.amount.as_deref()?;
        match self.currency.as_deref() {
            Some(currency) if !currency.is_empty() => Some(format!("{} {}", amount, currency)),
            _ => Some(amount.to_string()),
        }
    }

    /// Numeric amount and currency label for totals.
    ///
    /// With an explicit currency the leading token of `amount` is parsed;
    /// otherwise the amount string itself is split into `<number> <label>`.
    /// Non-numeric leading tokens give `None`.
    pub fn numeric_amount(&self) -> Option<(i64, String)> {
        let amount = self.amount.as_deref()?.trim();
        let mut tokens = amount.split_whitespace();
        let value = parse_amount_token(tokens.next()?)?;

        let label = match self.currency.as_deref() {
            Some(currency) if !currency.is_empty() => currency.to_string(),
            _ => tokens.collect::<Vec<_>>().join(" "),
        };
        Some((value, label))
    }
}

fn parse_amount_token(token: &str) -> Option<i64> {
    token.replace(',', "").parse().ok()
}

// ============================================================================
// ZONE CURRENCIES
// ============================================================================

/// Merchant zone → currency, used when a database row has no currency.
/// Closed table; unknown zones map to an empty label.
pub const ZONE_CURRENCIES: &[(&str, &str)] = &[
    ("darkness falls", "Seals"),
    ("dragon", "Scales"),
    ("atlantis", "Atlantean Glass"),
    ("frontiers", "Bounty Points"),
    ("catacombs", "Grimoires"),
];

pub fn zone_currency(zone: &str) -> &'static str {
    let zone = zone.trim().to_lowercase();
    ZONE_CURRENCIES
        .iter()
        .find(|(known, _)| *known == zone)
        .map(|(_, currency)| *currency)
        .unwrap_or("")
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Composite database keys, in tier order.
pub fn lookup_keys(item_name: &str, realm: &str) -> [String; 3] {
    let name = item_name.to_lowercase();
    [
        format!("{}:{}", name, realm.to_lowercase()),
        format!("{}:all", name),
        item_name.to_string(),
    ]
}

fn record_to_price(record: ItemRecord) -> PriceRecord {
    match record.merchant_price {
        Some(price) => {
            let currency = match record.merchant_currency.filter(|c| !c.is_empty()) {
                Some(currency) => currency,
                None => record
                    .merchant_zone
                    .as_deref()
                    .map(zone_currency)
                    .unwrap_or("")
                    .to_string(),
            };
            PriceRecord {
                amount: Some(price.to_string()),
                currency: Some(currency),
                category: record.item_category.filter(|c| !c.is_empty()),
                source: PriceSource::Database,
            }
        }
        None => PriceRecord {
            amount: None,
            currency: None,
            category: record.item_category,
            source: PriceSource::Database,
        },
    }
}

/// Resolve a price for `item_name`. Never fails; absence is `PriceSource::None`.
pub fn resolve_price(
    item_name: &str,
    realm: &str,
    local_cache: &dyn LocalPriceCache,
    database: &dyn ItemDatabase,
) -> PriceRecord {
    if let Some(price) = local_cache.get(item_name) {
        return PriceRecord {
            amount: Some(price),
            currency: None,
            category: None,
            source: PriceSource::LocalCache,
        };
    }

    for key in lookup_keys(item_name, realm) {
        match database.search(&key) {
            Some(record) if record.has_price() || record.has_category() => {
                return record_to_price(record);
            }
            _ => continue,
        }
    }

    PriceRecord::unresolved()
}

// ============================================================================
// TESTS
// ============================================================================
