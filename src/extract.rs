// 🔎 Entity Extractors - one line in, one typed record (or nothing) out
//
// Every function here is pure: it sees a single line and never touches
// scanner state. Lines that do not fit the expected shape are not errors,
// exports are hand-edited and partial garbage is normal, so the result is
// simply `None`.

use crate::entities::{BonusEntry, ResistEntry, SkillEntry, StatEntry};
use once_cell::sync::Lazy;
use regex::Regex;

/// Keys that show up as `name: value` lines but describe item structure,
/// not character bonuses.
pub const PSEUDO_BONUS_KEYS: &[&str] = &["Level", "Utility", "Source Type", "Name"];

/// Item names must be longer than this many characters.
pub const MIN_ITEM_NAME_CHARS: usize = 2;

// `Strength: 75/101`, `Constitution: 101/101(+26)`, `Crush: 26/26 +5`
static RATIO_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([^:]+?)\s*:\s*(-?\d+)\s*/\s*(-?\d+)\s*(?:\(\s*\+\s*\d+\s*\)|\+\s*\d+)?\s*$")
        .expect("valid ratio regex")
});

// `26% Crush`
static PERCENT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?\d+)\s*%\s+(\S.*?)\s*$").expect("valid percent regex")
});

// `11 Slash`, `+11 Slash`
static LEVEL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\+?(-?\d+)\s+(\S.*?)\s*$").expect("valid level regex")
});

// `Armor Factor: 50`
static FIELD_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([^:]+?)\s*:\s*(.*?)\s*$").expect("valid field regex")
});

// ============================================================================
// SHARED SHAPES
// ============================================================================

/// `name: current/cap` with an optional `(+bonus)` / `+bonus` that is dropped.
pub fn parse_ratio(line: &str) -> Option<(String, i64, i64)> {
    let caps = RATIO_LINE.captures(line)?;
    let name = caps.get(1)?.as_str().to_string();
    let current = caps.get(2)?.as_str().parse().ok()?;
    let cap = caps.get(3)?.as_str().parse().ok()?;
    Some((name, current, cap))
}

/// `Key: value` split on the first colon. The value may be empty.
pub fn parse_field(line: &str) -> Option<(&str, &str)> {
    let caps = FIELD_LINE.captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

pub fn is_valid_item_name(name: &str) -> bool {
    name.trim().chars().count() > MIN_ITEM_NAME_CHARS
}

// ============================================================================
// STATS
// ============================================================================

/// Stat line, both dialects. Entries with `current <= 0` are dropped.
pub fn extract_stat(line: &str) -> Option<StatEntry> {
    let (name, current, cap) = parse_ratio(line)?;
    let entry = StatEntry::new(name, current, cap);
    entry.is_retained().then_some(entry)
}

// ============================================================================
// RESISTS
// ============================================================================

/// Slot-header dialect: `Crush: 26/26(+5)`.
pub fn extract_resist_ratio(line: &str) -> Option<ResistEntry> {
    let (name, value, _cap) = parse_ratio(line)?;
    Some(ResistEntry::new(name, value))
}

/// Field-block dialect: `26% Crush`.
pub fn extract_resist_percent(line: &str) -> Option<ResistEntry> {
    let caps = PERCENT_LINE.captures(line)?;
    let value = caps.get(1)?.as_str().parse().ok()?;
    Some(ResistEntry::new(caps.get(2)?.as_str(), value))
}

// ============================================================================
// SKILLS
// ============================================================================

/// Slot-header dialect: `Slash: 11/11`. Level `<= 0` is dropped.
pub fn extract_skill_ratio(line: &str) -> Option<SkillEntry> {
    let (name, level, _cap) = parse_ratio(line)?;
    let entry = SkillEntry::new(name, level);
    entry.is_retained().then_some(entry)
}

/// Field-block dialect: `11 Slash` or `+11 Slash`. Level `<= 0` is dropped.
pub fn extract_skill_leveled(line: &str) -> Option<SkillEntry> {
    let caps = LEVEL_LINE.captures(line)?;
    let level = caps.get(1)?.as_str().parse().ok()?;
    let entry = SkillEntry::new(caps.get(2)?.as_str(), level);
    entry.is_retained().then_some(entry)
}

// ============================================================================
// BONUSES
// ============================================================================

/// `name: value`, value kept as text. Empty values are dropped.
pub fn extract_bonus(line: &str) -> Option<BonusEntry> {
    let (name, value) = parse_field(line)?;
    if name.is_empty() || value.is_empty() {
        return None;
    }
    Some(BonusEntry::new(name, value))
}

/// Like [`extract_bonus`] but skips the structural keys in [`PSEUDO_BONUS_KEYS`].
pub fn extract_bonus_filtered(line: &str) -> Option<BonusEntry> {
    let entry = extract_bonus(line)?;
    if PSEUDO_BONUS_KEYS.contains(&entry.name.as_str()) {
        return None;
    }
    Some(entry)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_line() {
        let stat = extract_stat("Dexterity: 75/100").unwrap();
        assert_eq!(stat, StatEntry::new("Dexterity", 75, 100));
    }

    #[test]
    fn test_stat_bonus_suffix_is_discarded() {
        let stat = extract_stat("Constitution: 101/101(+26)").unwrap();
        assert_eq!(stat.current, 101);
        assert_eq!(stat.cap, 101);

        let stat = extract_stat("  Quickness : 80 / 101 +5").unwrap();
        assert_eq!(stat, StatEntry::new("Quickness", 80, 101));
    }

    #[test]
    fn test_stat_zero_is_dropped() {
        assert!(extract_stat("Strength: 0/100").is_none());
        assert!(extract_stat("Strength: -3/100").is_none());
    }

    #[test]
    fn test_stat_malformed_lines() {
        assert!(extract_stat("Strength 75/100").is_none());
        assert!(extract_stat("Strength: many").is_none());
        assert!(extract_stat("").is_none());
    }

    #[test]
    fn test_resist_ratio() {
        assert_eq!(extract_resist_ratio("Crush: 26/26(+5)"), Some(ResistEntry::new("Crush", 26)));
    }

    #[test]
    fn test_resist_percent() {
        assert_eq!(extract_resist_percent("26% Crush"), Some(ResistEntry::new("Crush", 26)));
        assert_eq!(extract_resist_percent("  12 % Body  "), Some(ResistEntry::new("Body", 12)));
        assert!(extract_resist_percent("Crush 26%").is_none());
    }

    #[test]
    fn test_skill_forms() {
        assert_eq!(extract_skill_ratio("Slash: 11/11"), Some(SkillEntry::new("Slash", 11)));
        assert_eq!(extract_skill_leveled("+11 Slash"), Some(SkillEntry::new("Slash", 11)));
        assert_eq!(extract_skill_leveled("3 Two Handed"), Some(SkillEntry::new("Two Handed", 3)));
        assert!(extract_skill_leveled("0 Parry").is_none());
        assert!(extract_skill_ratio("Parry: 0/11").is_none());
    }

    #[test]
    fn test_bonus_keeps_opaque_value() {
        let bonus = extract_bonus("Power Pool: 5% (cap 25)").unwrap();
        assert_eq!(bonus, BonusEntry::new("Power Pool", "5% (cap 25)"));
        assert!(extract_bonus("Armor Factor:").is_none());
        assert!(extract_bonus("no colon here").is_none());
    }

    #[test]
    fn test_bonus_denylist() {
        assert!(extract_bonus_filtered("Level: 51").is_none());
        assert!(extract_bonus_filtered("Utility: 35.5").is_none());
        assert!(extract_bonus_filtered("Source Type: Loot").is_none());
        assert!(extract_bonus_filtered("Name: Dragon Tooth Hauberk").is_none());
        assert!(extract_bonus_filtered("Armor Factor: 50").is_some());
    }

    #[test]
    fn test_item_name_length() {
        assert!(!is_valid_item_name("ab"));
        assert!(!is_valid_item_name("  ab "));
        assert!(is_valid_item_name("Axe"));
    }
}
