// 📋 Report Assembler - blocks, equipment buckets, prices and totals
//
// Layout, top to bottom:
//   Stats ‖ Resists
//   Skills ‖ Bonuses
//   ───────────────
//   Equipment: armor, jewelry (paired rows), weapons
//   Total per currency
//
// Each equipped item is priced exactly once per render.

use crate::config::ReportConfig;
use crate::entities::{EquipmentItem, Slot, SlotCategory, JEWELRY_PAIRS};
use crate::layout::{block_width, merge_columns, pair_rows, rule_line, MIN_LEFT_WIDTH};
use crate::markup::styled;
use crate::parser::{get_parser, parse_template, ParsedTemplate, TemplateParser};
use crate::pricing::{resolve_price, ItemDatabase, LocalPriceCache, PriceRecord, PriceSource};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

pub const STATS_GLYPH: &str = "📊";
pub const RESISTS_GLYPH: &str = "🛡️";
pub const SKILLS_GLYPH: &str = "🎯";
pub const BONUSES_GLYPH: &str = "✨";
pub const EQUIPMENT_GLYPH: &str = "⚔️";
pub const ARMOR_GLYPH: &str = "🪖";
pub const JEWELRY_GLYPH: &str = "💍";
pub const WEAPONS_GLYPH: &str = "🗡️";
pub const TOTALS_GLYPH: &str = "💰";

const ENTRY_INDENT: &str = "  ";

// ============================================================================
// CURRENCY TOTALS
// ============================================================================

/// Accumulated numeric amounts per currency label, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CurrencyTotals {
    totals: IndexMap<String, i64>,
}

impl CurrencyTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resolved price. Prices without a numeric leading token are skipped,
    /// and so is an amount that would overflow its currency's running total.
    pub fn add(&mut self, price: &PriceRecord) {
        let Some((amount, currency)) = price.numeric_amount() else {
            return;
        };
        let total = self.totals.entry(currency).or_insert(0);
        match total.checked_add(amount) {
            Some(sum) => *total = sum,
            None => debug!("Total overflow, skipping amount {}", amount),
        }
    }

    pub fn get(&self, currency: &str) -> Option<i64> {
        self.totals.get(currency).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// `100 Scales, 50 Marks`
    pub fn display(&self) -> String {
        self.totals
            .iter()
            .map(|(currency, amount)| {
                if currency.is_empty() {
                    amount.to_string()
                } else {
                    format!("{} {}", amount, currency)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================================
// RENDERED REPORT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedReport {
    /// Report text, style tokens included
    pub text: String,
    /// Items that resolved to neither a price nor a category
    pub unresolved: Vec<String>,
    pub totals: CurrencyTotals,
}

impl RenderedReport {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}

// ============================================================================
// ASSEMBLER
// ============================================================================

pub struct ReportAssembler<'a> {
    config: &'a ReportConfig,
    local_cache: &'a dyn LocalPriceCache,
    database: &'a dyn ItemDatabase,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(
        config: &'a ReportConfig,
        local_cache: &'a dyn LocalPriceCache,
        database: &'a dyn ItemDatabase,
    ) -> Self {
        ReportAssembler {
            config,
            local_cache,
            database,
        }
    }

    fn title(&self, glyph: &str, label: &str) -> String {
        format!("{} {}", glyph, styled("title", label))
    }

    fn column<T>(&self, glyph: &str, label: &str, entries: &[T], line: impl Fn(&T) -> String) -> Vec<String> {
        if entries.is_empty() {
            return Vec::new();
        }
        let mut lines = vec![self.title(glyph, label)];
        lines.extend(entries.iter().map(|e| format!("{}{}", ENTRY_INDENT, line(e))));
        lines
    }

    /// Stats ‖ Resists and Skills ‖ Bonuses, each merged into two columns.
    fn character_blocks(&self, parsed: &ParsedTemplate) -> Vec<Vec<String>> {
        let labels = &self.config.labels;

        let stats: Vec<_> = parsed.stats.iter().filter(|s| s.is_retained()).cloned().collect();
        let resists: Vec<_> = parsed.resists.iter().filter(|r| r.is_retained()).cloned().collect();
        let skills: Vec<_> = parsed.skills.iter().filter(|s| s.is_retained()).cloned().collect();

        let pairs = [
            (
                self.column(STATS_GLYPH, &labels.stats, &stats, |s| s.display()),
                self.column(RESISTS_GLYPH, &labels.resists, &resists, |r| r.display()),
            ),
            (
                self.column(SKILLS_GLYPH, &labels.skills, &skills, |s| s.display()),
                self.column(BONUSES_GLYPH, &labels.bonuses, &parsed.bonuses, |b| b.display()),
            ),
        ];

        pairs
            .into_iter()
            .filter(|(left, right)| !left.is_empty() || !right.is_empty())
            .map(|(left, right)| merge_columns(&left, &right))
            .collect()
    }

    fn price_cell(&self, price: &PriceRecord) -> String {
        let icons = &self.config.icons;

        if let Some(display) = price.display_price() {
            let icon = match price.source {
                PriceSource::LocalCache => &icons.local_cache,
                PriceSource::Database | PriceSource::None => &icons.database,
            };
            return format!("{} {}", icon, styled("price", &display));
        }

        match price.category.as_deref() {
            Some(category) => format!("{} {}", icons.category, styled("category", category)),
            None => icons.unknown.clone(),
        }
    }

    fn item_cell(&self, parser: &dyn TemplateParser, item: &EquipmentItem) -> String {
        let mut cell = format!("{}: {}", parser.slot_label(item.slot), item.name);
        if item.source_type.is_player_made() {
            cell.push_str(&format!(" [{}]", item.source_type.name()));
        }
        cell
    }

    fn equipment_block(
        &self,
        parsed: &ParsedTemplate,
        prices: &HashMap<Slot, PriceRecord>,
    ) -> Vec<String> {
        let labels = &self.config.labels;
        let parser = get_parser(parsed.dialect);

        let cell = |item: &EquipmentItem| -> (String, String) {
            let price = prices.get(&item.slot).cloned().unwrap_or_else(PriceRecord::unresolved);
            (self.item_cell(parser.as_ref(), item), self.price_cell(&price))
        };

        let mut lines = vec![self.title(EQUIPMENT_GLYPH, &labels.equipment)];

        for category in [SlotCategory::Armor, SlotCategory::Jewelry, SlotCategory::Weapons] {
            let (glyph, label) = match category {
                SlotCategory::Armor => (ARMOR_GLYPH, &labels.armor),
                SlotCategory::Weapons => (WEAPONS_GLYPH, &labels.weapons),
                SlotCategory::Jewelry => {
                    lines.extend(self.jewelry_rows(parsed, &cell));
                    continue;
                }
            };

            let items = parsed.items_in_category(category);
            if items.is_empty() {
                continue;
            }
            let (names, cells): (Vec<String>, Vec<String>) = items
                .into_iter()
                .map(|item| {
                    let (name, price) = cell(item);
                    (format!("{}{}", ENTRY_INDENT, name), price)
                })
                .unzip();

            lines.push(self.title(glyph, label));
            lines.extend(merge_columns(&names, &cells));
        }

        lines
    }

    /// Jewelry as left/right pairs from JEWELRY_PAIRS, under its own title.
    fn jewelry_rows(
        &self,
        parsed: &ParsedTemplate,
        cell: &dyn Fn(&EquipmentItem) -> (String, String),
    ) -> Vec<String> {
        let jewel_cell = |slot: Slot| {
            parsed.item_in(slot).map(|item| {
                let (name, price) = cell(item);
                format!("{}  {}", name, price)
            })
        };

        let rows: Vec<(Option<String>, Option<String>)> = JEWELRY_PAIRS
            .iter()
            .map(|(left, right)| {
                let left = jewel_cell(*left).map(|c| format!("{}{}", ENTRY_INDENT, c));
                let right = right.and_then(&jewel_cell);
                match (left, right) {
                    // A lone right-hand jewel moves to the left column
                    (None, Some(r)) => (Some(format!("{}{}", ENTRY_INDENT, r)), None),
                    pair => pair,
                }
            })
            .collect();

        let body = pair_rows(&rows);
        if body.is_empty() {
            return body;
        }
        let mut lines = vec![self.title(JEWELRY_GLYPH, &self.config.labels.jewelry)];
        lines.extend(body);
        lines
    }

    /// Render a parsed template.
    pub fn assemble(&self, parsed: &ParsedTemplate) -> RenderedReport {
        if parsed.is_empty() {
            return RenderedReport::default();
        }

        let mut prices: HashMap<Slot, PriceRecord> = HashMap::new();
        let mut totals = CurrencyTotals::new();
        let mut unresolved = Vec::new();

        for item in &parsed.equipment {
            let price = resolve_price(&item.name, &self.config.realm, self.local_cache, self.database);
            if price.is_unresolved() {
                debug!("No price or category for {:?}", item.name);
                unresolved.push(item.name.clone());
            }
            totals.add(&price);
            prices.insert(item.slot, price);
        }

        let mut lines: Vec<String> = Vec::new();
        for block in self.character_blocks(parsed) {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(block);
        }

        if !parsed.equipment.is_empty() {
            if !lines.is_empty() {
                let width = block_width(&lines).max(MIN_LEFT_WIDTH * 2);
                lines.push(rule_line(width));
            }
            lines.extend(self.equipment_block(parsed, &prices));

            if !totals.is_empty() {
                lines.push(String::new());
                lines.push(format!(
                    "{} {}: {}",
                    TOTALS_GLYPH,
                    styled("title", &self.config.labels.totals),
                    styled("price", &totals.display())
                ));
            }
        }

        RenderedReport {
            text: lines.join("\n"),
            unresolved,
            totals,
        }
    }
}

/// Detect, parse and render a template in one call.
pub fn render_template(
    text: &str,
    config: &ReportConfig,
    local_cache: &dyn LocalPriceCache,
    database: &dyn ItemDatabase,
) -> RenderedReport {
    let parsed = parse_template(text);
    ReportAssembler::new(config, local_cache, database).assemble(&parsed)
}

// ============================================================================
// TESTS
// ============================================================================
