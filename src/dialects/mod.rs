// Dialect grammars
//
// - slot_header: Dialect A, `Slot (Item):` headers
// - field_block: Dialect B, bare slot lines followed by `Name:` fields

pub mod field_block;
pub mod slot_header;

pub use field_block::FieldBlockParser;
pub use slot_header::SlotHeaderParser;
