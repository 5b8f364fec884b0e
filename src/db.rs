// 🗄️ Item Database - CSV import into SQLite and keyed item lookups
//
// One table, keyed by the same composite keys the price resolver asks for,
// so a lookup is a single primary-key read.

use crate::pricing::{ItemDatabase, ItemRecord};
use anyhow::{Context, Result};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One row of the item import CSV.
///
/// `lookup_key` is stored verbatim: `name:realm` / `name:all` (lowercased)
/// or a bare item name for legacy rows.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ItemRow {
    #[serde(rename = "Lookup_Key")]
    pub lookup_key: String,

    #[serde(rename = "Merchant_Price", default)]
    pub merchant_price: Option<u64>,

    #[serde(rename = "Merchant_Currency", default)]
    pub merchant_currency: Option<String>,

    #[serde(rename = "Merchant_Zone", default)]
    pub merchant_zone: Option<String>,

    #[serde(rename = "Item_Category", default)]
    pub item_category: Option<String>,

    #[serde(rename = "Model_Id", default)]
    pub model_id: Option<String>,
}

impl ItemRow {
    pub fn record(&self) -> ItemRecord {
        ItemRecord {
            merchant_price: self.merchant_price,
            merchant_currency: self.merchant_currency.clone(),
            merchant_zone: self.merchant_zone.clone(),
            item_category: self.item_category.clone(),
            model_id: self.model_id.clone(),
        }
    }
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            lookup_key TEXT PRIMARY KEY NOT NULL,
            merchant_price INTEGER,
            merchant_currency TEXT,
            merchant_zone TEXT,
            item_category TEXT,
            model_id TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    Ok(())
}

pub fn load_item_csv(csv_path: &Path) -> Result<Vec<ItemRow>> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open item CSV: {:?}", csv_path))?;

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: ItemRow = result.context("Failed to deserialize item row")?;
        rows.push(row);
    }

    Ok(rows)
}

/// Insert or replace rows by lookup key. Returns the number of rows written.
pub fn insert_items(conn: &Connection, rows: &[ItemRow]) -> Result<usize> {
    let mut written = 0;

    for row in rows {
        let price = row.merchant_price.and_then(|p| i64::try_from(p).ok());
        written += conn
            .execute(
                "INSERT INTO items (
                    lookup_key, merchant_price, merchant_currency,
                    merchant_zone, item_category, model_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(lookup_key) DO UPDATE SET
                    merchant_price = excluded.merchant_price,
                    merchant_currency = excluded.merchant_currency,
                    merchant_zone = excluded.merchant_zone,
                    item_category = excluded.item_category,
                    model_id = excluded.model_id",
                params![
                    row.lookup_key,
                    price,
                    row.merchant_currency,
                    row.merchant_zone,
                    row.item_category,
                    row.model_id,
                ],
            )
            .with_context(|| format!("Failed to insert item {:?}", row.lookup_key))?;
    }

    info!("Wrote {} item rows", written);
    Ok(written)
}

pub fn count_items(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;

    Ok(count)
}

// ============================================================================
// ITEM DATABASE ADAPTER
// ============================================================================

/// SQLite-backed [`ItemDatabase`].
///
/// Lookups never fail: a query error is logged and reported as a miss, so a
/// broken database degrades to "no price" instead of aborting a render.
pub struct SqliteItemDatabase {
    conn: Connection,
}

impl SqliteItemDatabase {
    pub fn new(conn: Connection) -> Self {
        SqliteItemDatabase { conn }
    }

    /// Open (creating if needed) an item database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("Failed to open item database: {:?}", path.as_ref()))?;
        setup_database(&conn)?;
        Ok(SqliteItemDatabase { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn query(&self, key: &str) -> rusqlite::Result<Option<ItemRecord>> {
        self.conn
            .query_row(
                "SELECT merchant_price, merchant_currency, merchant_zone, item_category, model_id
                 FROM items WHERE lookup_key = ?1",
                params![key],
                |row| {
                    let price: Option<i64> = row.get(0)?;
                    Ok(ItemRecord {
                        merchant_price: price.and_then(|p| u64::try_from(p).ok()),
                        merchant_currency: row.get(1)?,
                        merchant_zone: row.get(2)?,
                        item_category: row.get(3)?,
                        model_id: row.get(4)?,
                    })
                },
            )
            .optional()
    }
}

impl ItemDatabase for SqliteItemDatabase {
    fn search(&self, key: &str) -> Option<ItemRecord> {
        match self.query(key) {
            Ok(record) => record,
            Err(e) => {
                warn!("Item lookup for {:?} failed: {}", key, e);
                None
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
