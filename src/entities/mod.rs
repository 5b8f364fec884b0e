// Entity Models
//
// Typed records extracted from a template:
// - character entries (stats, resists, skills, bonuses)
// - equipment (slots, slot categories, equipped items)

pub mod character;
pub mod equipment;

pub use character::{BonusEntry, ResistEntry, SkillEntry, StatEntry};
pub use equipment::{
    slot_by_label, slot_def, EquipmentItem, Slot, SlotCategory, SlotDef, SourceType, JEWELRY_PAIRS,
};
