//! Static label tables

use serde::{Deserialize, Serialize};

/// Display record for one classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelEntry {
    /// Position in the active table
    pub index: usize,
    /// Label name shown to the user
    pub name: &'static str,
    /// Decorative icon
    pub icon: &'static str,
    /// CSS color used for the result card
    pub color: &'static str,
    /// Message keyed by label
    pub message: &'static str,
}

const NEGATIVE: LabelEntry = LabelEntry {
    index: 0,
    name: "NEGATIVE",
    icon: "🌑",
    color: "#ff4b4b",
    message: "I sense darkness in your words.",
};

const NEUTRAL: LabelEntry = LabelEntry {
    index: 1,
    name: "NEUTRAL",
    icon: "🌗",
    color: "#ffd166",
    message: "Your words drift somewhere in between.",
};

const POSITIVE_BINARY: LabelEntry = LabelEntry {
    index: 1,
    name: "POSITIVE",
    icon: "🌕",
    color: "#00ff87",
    message: "Your energy shines bright!",
};

const POSITIVE_TERNARY: LabelEntry = LabelEntry {
    index: 2,
    ..POSITIVE_BINARY
};

static BINARY_ENTRIES: [LabelEntry; 2] = [NEGATIVE, POSITIVE_BINARY];
static TERNARY_ENTRIES: [LabelEntry; 3] = [NEGATIVE, NEUTRAL, POSITIVE_TERNARY];

/// Number of labels the dashboard displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelCardinality {
    /// NEGATIVE / POSITIVE
    Binary,
    /// NEGATIVE / NEUTRAL / POSITIVE
    #[default]
    Ternary,
}

impl LabelCardinality {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelCardinality::Binary => "binary",
            LabelCardinality::Ternary => "ternary",
        }
    }
}

/// Immutable index → label lookup table
#[derive(Debug, Clone, Copy)]
pub struct LabelTable {
    cardinality: LabelCardinality,
    entries: &'static [LabelEntry],
}

impl LabelTable {
    /// Build the table for the given cardinality
    pub fn new(cardinality: LabelCardinality) -> Self {
        let entries: &'static [LabelEntry] = match cardinality {
            LabelCardinality::Binary => &BINARY_ENTRIES,
            LabelCardinality::Ternary => &TERNARY_ENTRIES,
        };
        Self {
            cardinality,
            entries,
        }
    }

    pub fn binary() -> Self {
        Self::new(LabelCardinality::Binary)
    }

    pub fn ternary() -> Self {
        Self::new(LabelCardinality::Ternary)
    }

    /// Look up the entry for a class index
    pub fn get(&self, index: usize) -> Option<&LabelEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LabelEntry] {
        self.entries
    }

    pub fn cardinality(&self) -> LabelCardinality {
        self.cardinality
    }
}
