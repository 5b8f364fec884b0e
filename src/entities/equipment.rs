// ⚔️ Equipment Entity - slots, categories and equipped items
//
// Slot is the canonical equipment position. Each dialect names positions
// with its own vocabulary ("Chest" vs "Torso") through a SlotDef table that
// also decides which report bucket (armor / jewelry / weapons) a slot lands in.

use serde::{Deserialize, Serialize};

// ============================================================================
// SLOT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Helm,
    Hands,
    Chest,
    Arms,
    Legs,
    Feet,
    Neck,
    Cloak,
    Jewel,
    Belt,
    LeftRing,
    RightRing,
    LeftWrist,
    RightWrist,
    Mythirian,
    RightHand,
    LeftHand,
    TwoHanded,
    Ranged,
}

/// Report bucket an equipped item is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotCategory {
    Armor,
    Jewelry,
    Weapons,
}

impl SlotCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotCategory::Armor => "Armor",
            SlotCategory::Jewelry => "Jewelry",
            SlotCategory::Weapons => "Weapons",
        }
    }
}

/// One row of a dialect's slot vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotDef {
    pub label: &'static str,
    pub slot: Slot,
    pub category: SlotCategory,
}

impl SlotDef {
    pub const fn new(label: &'static str, slot: Slot, category: SlotCategory) -> Self {
        SlotDef {
            label,
            slot,
            category,
        }
    }
}

/// Find the slot definition for an exact label.
pub fn slot_by_label(table: &'static [SlotDef], label: &str) -> Option<&'static SlotDef> {
    table.iter().find(|def| def.label == label)
}

/// Find the slot definition for a canonical slot.
pub fn slot_def(table: &'static [SlotDef], slot: Slot) -> Option<&'static SlotDef> {
    table.iter().find(|def| def.slot == slot)
}

/// Jewelry is rendered as left/right pairs; a `None` partner renders alone.
pub const JEWELRY_PAIRS: &[(Slot, Option<Slot>)] = &[
    (Slot::Neck, Some(Slot::Cloak)),
    (Slot::Jewel, Some(Slot::Belt)),
    (Slot::LeftRing, Some(Slot::RightRing)),
    (Slot::LeftWrist, Some(Slot::RightWrist)),
    (Slot::Mythirian, None),
];

// ============================================================================
// SOURCE TYPE
// ============================================================================

/// Where the exported item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    Loot,
    Crafted,
    Spellcraft,
    Unknown,
}

impl SourceType {
    /// Map an export's free-text source label (case-insensitive).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "loot" | "drop" | "dropped" => SourceType::Loot,
            "crafted" | "crafting" => SourceType::Crafted,
            "spellcraft" | "spellcrafted" | "spellcrafting" => SourceType::Spellcraft,
            _ => SourceType::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceType::Loot => "Loot",
            SourceType::Crafted => "Crafted",
            SourceType::Spellcraft => "Spellcraft",
            SourceType::Unknown => "Unknown",
        }
    }

    pub fn is_player_made(&self) -> bool {
        matches!(self, SourceType::Crafted | SourceType::Spellcraft)
    }
}

// ============================================================================
// EQUIPMENT ITEM
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub slot: Slot,
    pub name: String,
    pub source_type: SourceType,
}

impl EquipmentItem {
    pub fn new(slot: Slot, name: impl Into<String>) -> Self {
        EquipmentItem {
            slot,
            name: name.into(),
            source_type: SourceType::Unknown,
        }
    }

    pub fn with_source(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[SlotDef] = &[
        SlotDef::new("Chest", Slot::Chest, SlotCategory::Armor),
        SlotDef::new("Neck", Slot::Neck, SlotCategory::Jewelry),
    ];

    #[test]
    fn test_slot_lookup_by_label() {
        let def = slot_by_label(TABLE, "Chest").unwrap();
        assert_eq!(def.slot, Slot::Chest);
        assert_eq!(def.category, SlotCategory::Armor);
        assert!(slot_by_label(TABLE, "chest").is_none());
    }

    #[test]
    fn test_slot_def_reverse_lookup() {
        assert_eq!(slot_def(TABLE, Slot::Neck).unwrap().label, "Neck");
        assert!(slot_def(TABLE, Slot::Ranged).is_none());
    }

    #[test]
    fn test_source_type_from_label() {
        assert_eq!(SourceType::from_label("Loot"), SourceType::Loot);
        assert_eq!(SourceType::from_label(" spellcraft "), SourceType::Spellcraft);
        assert_eq!(SourceType::from_label("Crafted"), SourceType::Crafted);
        assert_eq!(SourceType::from_label("Quest Reward"), SourceType::Unknown);
    }

    #[test]
    fn test_item_builder() {
        let item = EquipmentItem::new(Slot::Chest, "Dragon Tooth Hauberk").with_source(SourceType::Loot);
        assert_eq!(item.source_type, SourceType::Loot);
        assert!(!item.source_type.is_player_made());
    }

    #[test]
    fn test_jewelry_pairs_only_reference_distinct_slots() {
        for (left, right) in JEWELRY_PAIRS {
            assert_ne!(Some(*left), *right);
        }
    }
}
