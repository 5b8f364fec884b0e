// 🧾 Dialect A - slot-header exports
//
// Stats:
// Strength: 75/101
//
// Resists:
// Crush: 26/26(+5)
//
// Chest (Dragon Tooth Hauberk):
// Source Type: Loot
//
// Every block is `name: current/cap` except bonuses (`name: value`) and
// equipment, where the item name sits inside the slot header itself.

use crate::entities::{slot_by_label, Slot, SlotCategory, SlotDef, SourceType};
use crate::extract::{
    extract_bonus, extract_resist_ratio, extract_skill_ratio, extract_stat, parse_field,
};
use crate::parser::{
    Dialect, EquipmentLine, ParsedTemplate, Section, TemplateBuilder, TemplateDocument,
    TemplateParser, ITEM_TERMINATOR,
};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters after a slot header that are searched for the quality marker.
pub const QUALITY_WINDOW_CHARS: usize = 200;

/// Presence of this marker right after a header means the item is an
/// unequipped placeholder, not something the character wears.
pub const QUALITY_MARKER: &str = "Quality:";

pub const SLOT_TABLE: &[SlotDef] = &[
    SlotDef::new("Helm", Slot::Helm, SlotCategory::Armor),
    SlotDef::new("Hands", Slot::Hands, SlotCategory::Armor),
    SlotDef::new("Chest", Slot::Chest, SlotCategory::Armor),
    SlotDef::new("Arms", Slot::Arms, SlotCategory::Armor),
    SlotDef::new("Legs", Slot::Legs, SlotCategory::Armor),
    SlotDef::new("Feet", Slot::Feet, SlotCategory::Armor),
    SlotDef::new("Neck", Slot::Neck, SlotCategory::Jewelry),
    SlotDef::new("Cloak", Slot::Cloak, SlotCategory::Jewelry),
    SlotDef::new("Jewel", Slot::Jewel, SlotCategory::Jewelry),
    SlotDef::new("Belt", Slot::Belt, SlotCategory::Jewelry),
    SlotDef::new("Left Ring", Slot::LeftRing, SlotCategory::Jewelry),
    SlotDef::new("Right Ring", Slot::RightRing, SlotCategory::Jewelry),
    SlotDef::new("Left Wrist", Slot::LeftWrist, SlotCategory::Jewelry),
    SlotDef::new("Right Wrist", Slot::RightWrist, SlotCategory::Jewelry),
    SlotDef::new("Mythirian", Slot::Mythirian, SlotCategory::Jewelry),
    SlotDef::new("Right Hand", Slot::RightHand, SlotCategory::Weapons),
    SlotDef::new("Left Hand", Slot::LeftHand, SlotCategory::Weapons),
    SlotDef::new("Two Handed", Slot::TwoHanded, SlotCategory::Weapons),
    SlotDef::new("Ranged", Slot::Ranged, SlotCategory::Weapons),
];

static SLOT_HEADER: Lazy<Regex> = Lazy::new(|| {
    let labels: Vec<String> = SLOT_TABLE.iter().map(|def| regex::escape(def.label)).collect();
    Regex::new(&format!(r"(?m)^({})\s*\((.+)\):\s*$", labels.join("|")))
        .expect("valid slot header regex")
});

/// True if any line of `text` is a slot header.
pub fn contains_slot_header(text: &str) -> bool {
    SLOT_HEADER.is_match(text)
}

/// True if the window following the first occurrence of `header` in the
/// document contains [`QUALITY_MARKER`].
///
/// Only the first occurrence is inspected, so a header repeated verbatim is
/// judged by its first copy.
pub fn is_placeholder(text: &str, header: &str) -> bool {
    let Some(start) = text.find(header) else {
        return false;
    };
    let after = &text[start + header.len()..];
    let end = after
        .char_indices()
        .nth(QUALITY_WINDOW_CHARS)
        .map(|(idx, _)| idx)
        .unwrap_or(after.len());
    after[..end].contains(QUALITY_MARKER)
}

/// Parser for Dialect A exports
pub struct SlotHeaderParser;

impl SlotHeaderParser {
    pub fn new() -> Self {
        SlotHeaderParser
    }

    fn apply_entry(&self, section: Section, line: &str, builder: &mut TemplateBuilder) {
        let kept = match section {
            Section::Stats => extract_stat(line).map(|e| builder.add_stat(e)),
            Section::Resists => extract_resist_ratio(line).map(|e| builder.add_resist(e)),
            Section::Skills => extract_skill_ratio(line).map(|e| builder.add_skill(e)),
            Section::Bonuses => extract_bonus(line).map(|e| builder.add_bonus(e)),
            Section::None | Section::Equipment => None,
        };
        if kept.is_none() {
            trace!("Dialect A: skipped {:?} line {:?}", section, line);
        }
    }
}

impl Default for SlotHeaderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateParser for SlotHeaderParser {
    fn dialect(&self) -> Dialect {
        Dialect::A
    }

    fn slot_table(&self) -> &'static [SlotDef] {
        SLOT_TABLE
    }

    fn section_header(&self, line: &str) -> Option<Section> {
        match line {
            "Stats:" => Some(Section::Stats),
            "Resists:" => Some(Section::Resists),
            "Skills:" => Some(Section::Skills),
            "Bonuses:" => Some(Section::Bonuses),
            "Equipment:" => Some(Section::Equipment),
            _ => None,
        }
    }

    fn extract_equipment(&self, line: &str, doc: &TemplateDocument<'_>) -> Option<EquipmentLine> {
        if let Some(caps) = SLOT_HEADER.captures(line) {
            let def = slot_by_label(SLOT_TABLE, caps.get(1)?.as_str())?;
            let name = caps.get(2)?.as_str().trim().to_string();

            if is_placeholder(doc.text(), line) {
                return Some(EquipmentLine::Placeholder { def, name });
            }
            return Some(EquipmentLine::Slot {
                def,
                name: Some(name),
            });
        }

        if line.trim() == ITEM_TERMINATOR {
            return Some(EquipmentLine::Terminator);
        }

        match parse_field(line)? {
            ("Source Type", value) => Some(EquipmentLine::Source(SourceType::from_label(value))),
            _ => None,
        }
    }

    fn scan_sections(&self, doc: &TemplateDocument<'_>) -> ParsedTemplate {
        let mut builder = TemplateBuilder::new(Dialect::A);
        let mut section = Section::None;

        for line in doc.text().lines() {
            if let Some(next) = self.section_header(line) {
                builder.flush_item();
                section = next;
                continue;
            }

            // Slot headers are recognized in every state.
            match self.extract_equipment(line, doc) {
                Some(EquipmentLine::Slot { def, name }) => {
                    builder.open_item(def.slot, name);
                    section = Section::Equipment;
                    continue;
                }
                Some(EquipmentLine::Placeholder { def, name }) => {
                    debug!("Dialect A: {} ({}) is a placeholder, excluded", def.label, name);
                    builder.flush_item();
                    section = Section::Equipment;
                    continue;
                }
                Some(EquipmentLine::Terminator) if section == Section::Equipment => {
                    builder.flush_item();
                    continue;
                }
                Some(EquipmentLine::Source(source)) if section == Section::Equipment => {
                    builder.set_item_source(source);
                    continue;
                }
                _ => {}
            }

            if line.trim().is_empty() {
                if section == Section::Equipment {
                    builder.flush_item();
                } else {
                    section = Section::None;
                }
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
Stats:
Strength: 0/100
Dexterity: 75/100
Constitution: 101/101(+26)

Resists:
Crush: 26/26(+5)
Heat: 0/26

Skills:
Slash: 11/11
Parry: 0/11

Bonuses:
Armor Factor: 50
Power Pool: 5%

Equipment:
Chest (Dragon Tooth Hauberk):
Source Type: Loot

Right Hand (Sword):
Source Type: Spellcraft
Item Procs and Charges
Source Type: Loot

Neck (Ab):
";

    fn parse(text: &str) -> ParsedTemplate {
        let doc = TemplateDocument::new(text);
        assert_eq!(doc.dialect(), Dialect::A);
        SlotHeaderParser::new().scan_sections(&doc)
    }

    #[test]
    fn test_scan_sections() {
        let parsed = parse(SAMPLE);

        assert_eq!(
            parsed.stats,
            vec![StatEntry::new("Dexterity", 75, 100), StatEntry::new("Constitution", 101, 101)]
        );
        assert_eq!(
            parsed.resists,
            vec![ResistEntry::new("Crush", 26), ResistEntry::new("Heat", 0)]
        );
        assert_eq!(parsed.skills, vec![SkillEntry::new("Slash", 11)]);
        assert_eq!(
            parsed.bonuses,
            vec![BonusEntry::new("Armor Factor", "50"), BonusEntry::new("Power Pool", "5%")]
        );
    }

    #[test]
    fn test_scan_equipment() {
        let parsed = parse(SAMPLE);

        assert_eq!(parsed.equipment.len(), 2);
        assert_eq!(parsed.equipment[0].slot, Slot::Chest);
        assert_eq!(parsed.equipment[0].name, "Dragon Tooth Hauberk");
        assert_eq!(parsed.equipment[0].source_type, SourceType::Loot);

        // Source after the terminator does not reach the closed item
        assert_eq!(parsed.equipment[1].slot, Slot::RightHand);
        assert_eq!(parsed.equipment[1].source_type, SourceType::Spellcraft);
    }

    #[test]
    fn test_quality_marker_excludes_item() {
        let parsed = parse("Chest (Dragon Tooth Hauberk):\nQuality: 100%\n");
        assert!(parsed.equipment.is_empty());
    }

    #[test]
    fn test_quality_marker_outside_window_is_ignored() {
        let filler = "x".repeat(QUALITY_WINDOW_CHARS);
        let text = format!("Chest (Dragon Tooth Hauberk):\n{}\nQuality: 100%\n", filler);
        let parsed = parse(&text);
        assert_eq!(parsed.equipment.len(), 1);
    }

    #[test]
    fn test_quality_window_counts_characters() {
        // Two-byte filler: the window is measured in characters, not bytes
        let filler = "é".repeat(QUALITY_WINDOW_CHARS - 10);
        let text = format!("Helm (Crown):{}Quality:", filler);
        assert!(is_placeholder(&text, "Helm (Crown):"));
    }

    #[test]
    fn test_quality_check_uses_first_header_occurrence() {
        let text = "Helm (Crown):\nQuality: 99%\n\nStats:\nHelm (Crown):\n";
        let parsed = parse(text);
        assert!(parsed.equipment.is_empty());
    }

    #[test]
    fn test_nested_parentheses_in_name() {
        let parsed = parse("Cloak (Cloak of Shades (Epic)):\n");
        assert_eq!(parsed.equipment[0].name, "Cloak of Shades (Epic)");
    }

    #[test]
    fn test_slot_header_switches_state_from_any_section() {
        let text = "Stats:\nStrength: 75/101\nHelm (Crown of Zahur):\nDexterity: 10/101\n";
        let parsed = parse(text);
        assert_eq!(parsed.stats.len(), 1);
        assert_eq!(parsed.equipment.len(), 1);
    }

    #[test]
    fn test_section_headers_are_whitespace_sensitive() {
        let parser = SlotHeaderParser::new();
        assert_eq!(parser.section_header("Stats:"), Some(Section::Stats));
        assert_eq!(parser.section_header(" Stats:"), None);
        assert_eq!(parser.section_header("stats:"), None);
    }

    #[test]
    fn test_slot_labels() {
        let parser = SlotHeaderParser::new();
        assert_eq!(parser.slot_label(Slot::LeftRing), "Left Ring");
        assert_eq!(parser.slot_label(Slot::TwoHanded), "Two Handed");
    }
}
