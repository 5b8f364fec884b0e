// Template Report - Core Library
// Exposes all modules for use in the CLI and tests

pub mod markup;
pub mod entities;
pub mod extract;
pub mod parser;
pub mod dialects;
pub mod pricing;
pub mod layout;
pub mod config;
pub mod report;
pub mod db;

// Re-export commonly used types
pub use markup::{strip_markup, styled, visible_width};
pub use entities::{
    BonusEntry, ResistEntry, SkillEntry, StatEntry,
    EquipmentItem, Slot, SlotCategory, SourceType,
};
pub use parser::{
    Dialect, ParsedTemplate, TemplateDocument, TemplateParser,
    detect_dialect, get_parser, parse_template,
};
pub use dialects::{FieldBlockParser, SlotHeaderParser};
pub use pricing::{
    ItemDatabase, ItemRecord, LocalPriceCache, NoDatabase, PriceRecord, PriceSource,
    load_price_cache, resolve_price,
};
pub use layout::{merge_columns, pair_rows};
pub use config::{PriceIcons, ReportConfig, ReportLabels};
pub use report::{CurrencyTotals, RenderedReport, ReportAssembler, render_template};
pub use db::{
    ItemRow, SqliteItemDatabase,
    count_items, insert_items, load_item_csv, setup_database,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
