// 🧾 Dialect B - field-block exports
//
// Attributes
// Strength: 75/101
//
// Resistance
// 26% Crush
//
// Items
// Torso
// Name: Dragon Tooth Hauberk
// Source Type: Loot
// Level: 51
// Item Procs and Charges
// ...
//
// Equipment is a small state machine of its own: a bare slot line opens an
// item, `Name:` / `Source Type:` fill it in, and a blank line, the procs
// marker or the next slot line closes it.

use crate::entities::{slot_by_label, Slot, SlotCategory, SlotDef, SourceType};
use crate::extract::{
    extract_bonus_filtered, extract_resist_percent, extract_skill_leveled, extract_stat,
    parse_field,
};
use crate::parser::{
    Dialect, EquipmentLine, ParsedTemplate, Section, TemplateBuilder, TemplateDocument,
    TemplateParser, ITEM_TERMINATOR,
};
use log::trace;

pub const SLOT_TABLE: &[SlotDef] = &[
    SlotDef::new("Head", Slot::Helm, SlotCategory::Armor),
    SlotDef::new("Hands", Slot::Hands, SlotCategory::Armor),
    SlotDef::new("Torso", Slot::Chest, SlotCategory::Armor),
    SlotDef::new("Arms", Slot::Arms, SlotCategory::Armor),
    SlotDef::new("Legs", Slot::Legs, SlotCategory::Armor),
    SlotDef::new("Feet", Slot::Feet, SlotCategory::Armor),
    SlotDef::new("Necklace", Slot::Neck, SlotCategory::Jewelry),
    SlotDef::new("Cloak", Slot::Cloak, SlotCategory::Jewelry),
    SlotDef::new("Jewel", Slot::Jewel, SlotCategory::Jewelry),
    SlotDef::new("Belt", Slot::Belt, SlotCategory::Jewelry),
    SlotDef::new("Ring 1", Slot::LeftRing, SlotCategory::Jewelry),
    SlotDef::new("Ring 2", Slot::RightRing, SlotCategory::Jewelry),
    SlotDef::new("Bracer 1", Slot::LeftWrist, SlotCategory::Jewelry),
    SlotDef::new("Bracer 2", Slot::RightWrist, SlotCategory::Jewelry),
    SlotDef::new("Main Hand", Slot::RightHand, SlotCategory::Weapons),
    SlotDef::new("Off Hand", Slot::LeftHand, SlotCategory::Weapons),
    SlotDef::new("Two Hand", Slot::TwoHanded, SlotCategory::Weapons),
    SlotDef::new("Ranged", Slot::Ranged, SlotCategory::Weapons),
];

/// Parser for Dialect B exports
pub struct FieldBlockParser;

impl FieldBlockParser {
    pub fn new() -> Self {
        FieldBlockParser
    }

    fn apply_entry(&self, section: Section, line: &str, builder: &mut TemplateBuilder) {
        let kept = match section {
            Section::Stats => extract_stat(line).map(|e| builder.add_stat(e)),
            Section::Resists => extract_resist_percent(line).map(|e| builder.add_resist(e)),
            Section::Skills => extract_skill_leveled(line).map(|e| builder.add_skill(e)),
            Section::Bonuses => extract_bonus_filtered(line).map(|e| builder.add_bonus(e)),
            Section::None | Section::Equipment => None,
        };
        if kept.is_none() {
            trace!("Dialect B: skipped {:?} line {:?}", section, line);
        }
    }

    fn apply_equipment(&self, line: &str, doc: &TemplateDocument<'_>, builder: &mut TemplateBuilder) {
        match self.extract_equipment(line, doc) {
            Some(EquipmentLine::Slot { def, name }) => builder.open_item(def.slot, name),
            Some(EquipmentLine::Name(name)) => builder.set_item_name(name),
            Some(EquipmentLine::Source(source)) => builder.set_item_source(source),
            Some(EquipmentLine::Terminator) => builder.flush_item(),
            Some(EquipmentLine::Placeholder { .. }) | None => {
                trace!("Dialect B: ignored item line {:?}", line);
            }
        }
    }
}

impl Default for FieldBlockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateParser for FieldBlockParser {
    fn dialect(&self) -> Dialect {
        Dialect::B
    }

    fn slot_table(&self) -> &'static [SlotDef] {
        SLOT_TABLE
    }

    fn section_header(&self, line: &str) -> Option<Section> {
        match line {
            "Attributes" => Some(Section::Stats),
            "Resistance" => Some(Section::Resists),
            "Skills" => Some(Section::Skills),
            "Other Bonuses" => Some(Section::Bonuses),
            "Items" => Some(Section::Equipment),
            _ => None,
        }
    }

    fn extract_equipment(&self, line: &str, _doc: &TemplateDocument<'_>) -> Option<EquipmentLine> {
        let trimmed = line.trim();
        if trimmed == ITEM_TERMINATOR {
            return Some(EquipmentLine::Terminator);
        }

        let label = trimmed.strip_suffix(':').unwrap_or(trimmed);
        if let Some(def) = slot_by_label(SLOT_TABLE, label) {
            return Some(EquipmentLine::Slot { def, name: None });
        }

        match parse_field(line)? {
            ("Name", value) => Some(EquipmentLine::Name(value.to_string())),
            ("Source Type", value) => Some(EquipmentLine::Source(SourceType::from_label(value))),
            _ => None,
        }
    }

    fn scan_sections(&self, doc: &TemplateDocument<'_>) -> ParsedTemplate {
        let mut builder = TemplateBuilder::new(Dialect::B);
        let mut section = Section::None;

        for line in doc.text().lines() {
            if let Some(next) = self.section_header(line) {
                builder.flush_item();
                section = next;
                continue;
            }

            if section == Section::Equipment {
                if line.trim().is_empty() {
                    builder.flush_item();
                } else {
                    self.apply_equipment(line, doc, &mut builder);
                }
                continue;
            }

            if line.trim().is_empty() {
                section = Section::None;
                continue;
            }

            self.apply_entry(section, line, &mut builder);
        }

        builder.finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BonusEntry, ResistEntry, SkillEntry, StatEntry};

    const SAMPLE: &str = "\
Attributes
Strength: 0/100
Dexterity: 75/100

Resistance
26% Crush
12% Body

Skills
+11 Slash
0 Parry

Other Bonuses
Armor Factor: 50
Level: 51
Utility: 35.5

Items
Torso
Name: Dragon Tooth Hauberk
Source Type: Loot
Level: 51
Item Procs and Charges
Name: Should Not Rename
Ring 1:
Name: Band of Stars
Source Type: Spellcraft

Main Hand
Name: Ab
";

    fn parse(text: &str) -> ParsedTemplate {
        let doc = TemplateDocument::new(text);
        assert_eq!(doc.dialect(), Dialect::B);
        FieldBlockParser::new().scan_sections(&doc)
    }

    #[test]
    fn test_scan_sections() {
        let parsed = parse(SAMPLE);

        assert_eq!(parsed.stats, vec![StatEntry::new("Dexterity", 75, 100)]);
        assert_eq!(
            parsed.resists,
            vec![ResistEntry::new("Crush", 26), ResistEntry::new("Body", 12)]
        );
        assert_eq!(parsed.skills, vec![SkillEntry::new("Slash", 11)]);
        assert_eq!(parsed.bonuses, vec![BonusEntry::new("Armor Factor", "50")]);
    }

    #[test]
    fn test_scan_equipment_blocks() {
        let parsed = parse(SAMPLE);

        assert_eq!(parsed.equipment.len(), 2);
        assert_eq!(parsed.equipment[0].slot, Slot::Chest);
        assert_eq!(parsed.equipment[0].name, "Dragon Tooth Hauberk");
        assert_eq!(parsed.equipment[0].source_type, SourceType::Loot);
        assert_eq!(parsed.equipment[1].slot, Slot::LeftRing);
        assert_eq!(parsed.equipment[1].name, "Band of Stars");
        assert_eq!(parsed.equipment[1].source_type, SourceType::Spellcraft);
    }

    #[test]
    fn test_next_slot_closes_item() {
        let parsed = parse("Items\nHead\nName: Crown of Zahur\nFeet\nName: Boots of Speed\n");
        let names: Vec<_> = parsed.equipment.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Crown of Zahur", "Boots of Speed"]);
    }

    #[test]
    fn test_same_slot_last_seen_wins() {
        let parsed = parse("Items\nHead\nName: Old Cap\n\nHead\nName: Crown of Zahur\n");
        assert_eq!(parsed.equipment.len(), 1);
        assert_eq!(parsed.equipment[0].name, "Crown of Zahur");
    }

    #[test]
    fn test_section_header_closes_item() {
        let parsed = parse("Items\nCloak\nName: Cloak of Shades\nAttributes\nStrength: 50/101\n");
        assert_eq!(parsed.equipment.len(), 1);
        assert_eq!(parsed.stats.len(), 1);
    }

    #[test]
    fn test_slot_lines_outside_items_are_ignored() {
        let parsed = parse("Head\nName: Crown of Zahur\n");
        assert!(parsed.equipment.is_empty());
    }

    #[test]
    fn test_dialect_a_header_lines_are_not_b_slots() {
        let parser = FieldBlockParser::new();
        let doc = TemplateDocument::new("");
        assert_eq!(parser.extract_equipment("Torso (Hauberk)", &doc), None);
        assert!(matches!(
            parser.extract_equipment("Ring 2", &doc),
            Some(EquipmentLine::Slot { name: None, .. })
        ));
    }
}
