// 📊 Character entries - stats, resists, skills and bonuses
//
// Plain records produced by the line extractors. Numeric entries with a
// non-positive value are never rendered; bonuses keep their value as opaque
// text because exports put things like "5%" or "+3 (cap)" there.

use serde::{Deserialize, Serialize};

/// A primary attribute line such as `Strength: 75/101`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub name: String,
    pub current: i64,
    pub cap: i64,
}

impl StatEntry {
    pub fn new(name: impl Into<String>, current: i64, cap: i64) -> Self {
        StatEntry {
            name: name.into(),
            current,
            cap,
        }
    }

    pub fn is_retained(&self) -> bool {
        self.current > 0
    }

    /// `Strength: 75/101`
    pub fn display(&self) -> String {
        format!("{}: {}/{}", self.name, self.current, self.cap)
    }
}

/// A resistance value, percentage-like (0 to roughly 50).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResistEntry {
    pub name: String,
    pub value: i64,
}

impl ResistEntry {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        ResistEntry {
            name: name.into(),
            value,
        }
    }

    pub fn is_retained(&self) -> bool {
        self.value > 0
    }

    /// `Crush: 26%`
    pub fn display(&self) -> String {
        format!("{}: {}%", self.name, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub level: i64,
}

impl SkillEntry {
    pub fn new(name: impl Into<String>, level: i64) -> Self {
        SkillEntry {
            name: name.into(),
            level,
        }
    }

    pub fn is_retained(&self) -> bool {
        self.level > 0
    }

    /// `Slash: +11`
    pub fn display(&self) -> String {
        format!("{}: +{}", self.name, self.level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusEntry {
    pub name: String,
    pub value: String,
}

impl BonusEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        BonusEntry {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn display(&self) -> String {
        format!("{}: {}", self.name, self.value)
    }
}

// ============================================================================
// TESTS
// ============================================================================
