// 🏗️ Parser Framework - dialect detection and section scanning
//
// A template is classified once (Dialect A or B), then handed to the one
// parser that speaks that dialect. Parsers share the TemplateBuilder
// accumulator and the line extractors in `extract`; what differs is the
// grammar: section markers, slot vocabulary and how equipment is spelled.

use crate::dialects::{FieldBlockParser, SlotHeaderParser};
use crate::entities::{
    BonusEntry, EquipmentItem, ResistEntry, SkillEntry, Slot, SlotCategory, SlotDef, SourceType,
    StatEntry,
};
use crate::extract::is_valid_item_name;
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Dialect - which exporter produced the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialect {
    /// `Chest (Item Name):` slot headers
    A,
    /// `Name:` / `Source Type:` field blocks under bare slot lines
    B,
}

impl Dialect {
    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::A => "Slot-header export",
            Dialect::B => "Field-block export",
        }
    }

    /// Short code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Dialect::A => "A",
            Dialect::B => "B",
        }
    }
}

/// Scanner state: which block the current line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    None,
    Stats,
    Resists,
    Skills,
    Bonuses,
    Equipment,
}

/// Raw input plus the dialect it was classified as. Immutable after detection.
#[derive(Debug, Clone, Copy)]
pub struct TemplateDocument<'a> {
    text: &'a str,
    dialect: Dialect,
}

impl<'a> TemplateDocument<'a> {
    pub fn new(text: &'a str) -> Self {
        let dialect = detect_dialect(text);
        info!("Detected template dialect {} ({})", dialect.code(), dialect.name());
        TemplateDocument { text, dialect }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Everything extracted from one template, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedTemplate {
    pub dialect: Dialect,
    pub stats: Vec<StatEntry>,
    pub resists: Vec<ResistEntry>,
    pub skills: Vec<SkillEntry>,
    pub bonuses: Vec<BonusEntry>,
    pub equipment: Vec<EquipmentItem>,
}

impl ParsedTemplate {
    pub fn empty(dialect: Dialect) -> Self {
        ParsedTemplate {
            dialect,
            stats: Vec::new(),
            resists: Vec::new(),
            skills: Vec::new(),
            bonuses: Vec::new(),
            equipment: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
            && self.resists.is_empty()
            && self.skills.is_empty()
            && self.bonuses.is_empty()
            && self.equipment.is_empty()
    }

    pub fn item_in(&self, slot: Slot) -> Option<&EquipmentItem> {
        self.equipment.iter().find(|item| item.slot == slot)
    }

    /// Equipped items whose slot falls in `category`, in the dialect's slot order.
    pub fn items_in_category(&self, category: SlotCategory) -> Vec<&EquipmentItem> {
        get_parser(self.dialect)
            .slot_table()
            .iter()
            .filter(|def| def.category == category)
            .filter_map(|def| self.item_in(def.slot))
            .collect()
    }
}

// ============================================================================
// EQUIPMENT LINES
// ============================================================================

/// What an equipment extractor recognized on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipmentLine {
    /// A slot opens; the slot-header dialect carries the name inline.
    Slot {
        def: &'static SlotDef,
        name: Option<String>,
    },
    /// A slot header whose item is an unequipped template placeholder.
    Placeholder { def: &'static SlotDef, name: String },
    /// `Name: …`
    Name(String),
    /// `Source Type: …`
    Source(SourceType),
    /// `Item Procs and Charges` closes the current item.
    Terminator,
}

pub const ITEM_TERMINATOR: &str = "Item Procs and Charges";

// ============================================================================
// SCANNER ACCUMULATOR
// ============================================================================

#[derive(Debug)]
struct PendingItem {
    slot: Slot,
    name: Option<String>,
    source_type: SourceType,
}

/// Scanner-local accumulator, owned by a single parse call.
///
/// Stats/resists/skills/bonuses keep the first occurrence of a name.
/// Equipment keeps one item per slot; a later item for the same slot
/// replaces the earlier one but keeps its position.
#[derive(Debug)]
pub struct TemplateBuilder {
    dialect: Dialect,
    stats: IndexMap<String, StatEntry>,
    resists: IndexMap<String, ResistEntry>,
    skills: IndexMap<String, SkillEntry>,
    bonuses: IndexMap<String, BonusEntry>,
    equipment: IndexMap<Slot, EquipmentItem>,
    pending: Option<PendingItem>,
}

impl TemplateBuilder {
    pub fn new(dialect: Dialect) -> Self {
        TemplateBuilder {
            dialect,
            stats: IndexMap::new(),
            resists: IndexMap::new(),
            skills: IndexMap::new(),
            bonuses: IndexMap::new(),
            equipment: IndexMap::new(),
            pending: None,
        }
    }

    pub fn add_stat(&mut self, entry: StatEntry) {
        self.stats.entry(entry.name.clone()).or_insert(entry);
    }

    pub fn add_resist(&mut self, entry: ResistEntry) {
        self.resists.entry(entry.name.clone()).or_insert(entry);
    }

    pub fn add_skill(&mut self, entry: SkillEntry) {
        self.skills.entry(entry.name.clone()).or_insert(entry);
    }

    pub fn add_bonus(&mut self, entry: BonusEntry) {
        self.bonuses.entry(entry.name.clone()).or_insert(entry);
    }

    /// Start accumulating an item for `slot`, flushing whatever was open.
    pub fn open_item(&mut self, slot: Slot, name: Option<String>) {
        self.flush_item();
        self.pending = Some(PendingItem {
            slot,
            name,
            source_type: SourceType::Unknown,
        });
    }

    pub fn has_open_item(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_item_name(&mut self, name: String) {
        if let Some(pending) = self.pending.as_mut() {
            pending.name = Some(name);
        }
    }

    pub fn set_item_source(&mut self, source_type: SourceType) {
        if let Some(pending) = self.pending.as_mut() {
            pending.source_type = source_type;
        }
    }

    /// Close the open item; it is kept only if it has a usable name.
    pub fn flush_item(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        match pending.name {
            Some(name) if is_valid_item_name(&name) => {
                let item = EquipmentItem::new(pending.slot, name.trim()).with_source(pending.source_type);
                self.equipment.insert(pending.slot, item);
            }
            name => debug!("Dropping {:?} item with unusable name {:?}", pending.slot, name),
        }
    }

    /// Drop the open item without keeping it.
    pub fn discard_item(&mut self) {
        self.pending = None;
    }

    pub fn finish(mut self) -> ParsedTemplate {
        self.flush_item();
        ParsedTemplate {
            dialect: self.dialect,
            stats: self.stats.into_values().collect(),
            resists: self.resists.into_values().collect(),
            skills: self.skills.into_values().collect(),
            bonuses: self.bonuses.into_values().collect(),
            equipment: self.equipment.into_values().collect(),
        }
    }
}

// ============================================================================
// PARSER TRAIT
// ============================================================================

/// TemplateParser - one implementation per dialect
pub trait TemplateParser: Send + Sync {
    /// The dialect this parser handles
    fn dialect(&self) -> Dialect;

    /// Slot vocabulary and slot → category table for this dialect
    fn slot_table(&self) -> &'static [SlotDef];

    /// Section a header line switches to, if the line is a section header
    fn section_header(&self, line: &str) -> Option<Section>;

    /// Recognize an equipment line. `doc` is a read-only view of the whole
    /// template for dialects that validate items against their surroundings.
    fn extract_equipment(&self, line: &str, doc: &TemplateDocument<'_>) -> Option<EquipmentLine>;

    /// Single pass over the document, partitioning lines into sections
    fn scan_sections(&self, doc: &TemplateDocument<'_>) -> ParsedTemplate;

    /// Label used for `slot` in this dialect
    fn slot_label(&self, slot: Slot) -> &'static str {
        crate::entities::slot_def(self.slot_table(), slot)
            .map(|def| def.label)
            .unwrap_or("?")
    }
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// Classify raw template text.
///
/// Any line matching the slot-header pattern anywhere makes the whole
/// document Dialect A; everything else is Dialect B. A B export that
/// happens to contain such a line is classified as A.
pub fn detect_dialect(text: &str) -> Dialect {
    if crate::dialects::slot_header::contains_slot_header(text) {
        Dialect::A
    } else {
        Dialect::B
    }
}

/// Get the parser for a dialect
pub fn get_parser(dialect: Dialect) -> Box<dyn TemplateParser> {
    match dialect {
        Dialect::A => Box::new(SlotHeaderParser::new()),
        Dialect::B => Box::new(FieldBlockParser::new()),
    }
}

/// Detect, pick the parser, scan.
pub fn parse_template(text: &str) -> ParsedTemplate {
    let doc = TemplateDocument::new(text);
    if doc.is_blank() {
        return ParsedTemplate::empty(doc.dialect());
    }
    get_parser(doc.dialect()).scan_sections(&doc)
}

// ============================================================================
// TESTS
// ============================================================================
