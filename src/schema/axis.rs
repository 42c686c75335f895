use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// A closed set of keys a catalog table is indexed by.
///
/// Every implementor is a fieldless enum whose `index` is its position in
/// `ALL`, so a table holding one cell per key can be indexed directly.
pub trait AxisKey: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Axis name used in diagnostics ("permissionLevel", "contentType", ...).
    const AXIS: &'static str;

    /// Every key, in ordinal order.
    const ALL: &'static [Self];

    /// The key as written in catalog files and context input.
    fn key(self) -> &'static str;

    /// Position of this key in `ALL`.
    fn index(self) -> usize;

    /// Parse a key exactly as written by `key`.
    fn parse(input: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.key() == input)
    }
}

/// Relationship-building theme a piece of copy is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    Empathy,
    Understanding,
    Decision,
    Value,
    Trust,
}

impl Default for ContentType {
    fn default() -> Self {
        Self::Empathy
    }
}

impl AxisKey for ContentType {
    const AXIS: &'static str = "contentType";
    const ALL: &'static [Self] = &[
        Self::Empathy,
        Self::Understanding,
        Self::Decision,
        Self::Value,
        Self::Trust,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Empathy => "empathy",
            Self::Understanding => "understanding",
            Self::Decision => "decision",
            Self::Value => "value",
            Self::Trust => "trust",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Six-step aggressiveness scale for tone, urgency, and guarantee language.
///
/// Ordered: `L0 < L1 < ... < L5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PermissionLevel {
    L0,
    L1,
    L2,
    L3,
    L4,
    L5,
}

impl Default for PermissionLevel {
    fn default() -> Self {
        Self::L3
    }
}

impl PermissionLevel {
    /// Presentation accent for this level: base up to L3, then accent, then urgent.
    pub fn tone(self) -> Tone {
        match self {
            Self::L0 | Self::L1 | Self::L2 | Self::L3 => Tone::Base,
            Self::L4 => Tone::Accent,
            Self::L5 => Tone::Urgent,
        }
    }
}

impl AxisKey for PermissionLevel {
    const AXIS: &'static str = "permissionLevel";
    const ALL: &'static [Self] = &[Self::L0, Self::L1, Self::L2, Self::L3, Self::L4, Self::L5];

    fn key(self) -> &'static str {
        match self {
            Self::L0 => "L0",
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
            Self::L4 => "L4",
            Self::L5 => "L5",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Color accent used for offers and calls-to-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Base,
    Accent,
    Urgent,
}

/// How many optional elaboration blocks the story composer inserts.
///
/// Inclusion is monotonic: everything `Medium` renders, `Long` renders too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoryLength {
    Basic,
    Medium,
    Long,
}

impl Default for StoryLength {
    fn default() -> Self {
        Self::Basic
    }
}

impl StoryLength {
    /// Background, first-meeting, and follow-up blocks.
    pub fn includes_medium_detail(self) -> bool {
        self >= Self::Medium
    }

    /// Crisis-detail and treatment-journey blocks.
    pub fn includes_long_detail(self) -> bool {
        self >= Self::Long
    }
}

impl AxisKey for StoryLength {
    const AXIS: &'static str = "length";
    const ALL: &'static [Self] = &[Self::Basic, Self::Medium, Self::Long];

    fn key(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for StoryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_parse() {
        for level in PermissionLevel::ALL {
            assert_eq!(PermissionLevel::parse(level.key()), Some(*level));
        }
        for ct in ContentType::ALL {
            assert_eq!(ContentType::parse(ct.key()), Some(*ct));
        }
        for length in StoryLength::ALL {
            assert_eq!(StoryLength::parse(length.key()), Some(*length));
        }
    }

    #[test]
    fn parse_is_case_and_whitespace_sensitive() {
        assert_eq!(PermissionLevel::parse("l4"), None);
        assert_eq!(PermissionLevel::parse(" L4 "), None);
        assert_eq!(ContentType::parse("TRUST"), None);
        assert_eq!(ContentType::parse("Trust"), None);
        assert_eq!(StoryLength::parse("Long"), None);
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        assert_eq!(PermissionLevel::parse("L6"), None);
        assert_eq!(ContentType::parse("empthy"), None);
        assert_eq!(StoryLength::parse(""), None);
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, level) in PermissionLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
        for (i, ct) in ContentType::ALL.iter().enumerate() {
            assert_eq!(ct.index(), i);
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(PermissionLevel::default(), PermissionLevel::L3);
        assert_eq!(ContentType::default(), ContentType::Empathy);
        assert_eq!(StoryLength::default(), StoryLength::Basic);
    }

    #[test]
    fn tone_by_level() {
        assert_eq!(PermissionLevel::L0.tone(), Tone::Base);
        assert_eq!(PermissionLevel::L3.tone(), Tone::Base);
        assert_eq!(PermissionLevel::L4.tone(), Tone::Accent);
        assert_eq!(PermissionLevel::L5.tone(), Tone::Urgent);
    }

    #[test]
    fn length_inclusion_is_monotonic() {
        assert!(!StoryLength::Basic.includes_medium_detail());
        assert!(StoryLength::Medium.includes_medium_detail());
        assert!(!StoryLength::Medium.includes_long_detail());
        assert!(StoryLength::Long.includes_medium_detail());
        assert!(StoryLength::Long.includes_long_detail());
    }

    #[test]
    fn display_uses_catalog_key() {
        assert_eq!(PermissionLevel::L2.to_string(), "L2");
        assert_eq!(ContentType::Understanding.to_string(), "understanding");
    }
}
