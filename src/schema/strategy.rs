use serde::{Deserialize, Serialize};
use std::fmt;

use super::axis::{AxisKey, ContentType};

/// Copywriting trigger a content type leans on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmotionalTrigger {
    /// Loss aversion.
    Fear,
    Desire,
    Trust,
    Belonging,
    Authority,
    Scarcity,
    Reciprocity,
    /// Social proof.
    Proof,
}

impl EmotionalTrigger {
    /// Fixed one-to-one mapping from content type. Not score-driven.
    pub fn for_content(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Empathy => Self::Trust,
            ContentType::Understanding => Self::Desire,
            ContentType::Decision => Self::Trust,
            ContentType::Value => Self::Desire,
            ContentType::Trust => Self::Proof,
        }
    }
}

impl AxisKey for EmotionalTrigger {
    const AXIS: &'static str = "emotionalTrigger";
    const ALL: &'static [Self] = &[
        Self::Fear,
        Self::Desire,
        Self::Trust,
        Self::Belonging,
        Self::Authority,
        Self::Scarcity,
        Self::Reciprocity,
        Self::Proof,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Fear => "fear",
            Self::Desire => "desire",
            Self::Trust => "trust",
            Self::Belonging => "belonging",
            Self::Authority => "authority",
            Self::Scarcity => "scarcity",
            Self::Reciprocity => "reciprocity",
            Self::Proof => "proof",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EmotionalTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Persuasion language pattern a content type is phrased with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinguisticPattern {
    /// Speaks as if the outcome already happened.
    Presupposition,
    /// Embedded command.
    Embedded,
    Metaphor,
    /// Mirrors the reader's experience.
    Pacing,
    /// Leads from the mirrored experience to the next step.
    Leading,
}

impl LinguisticPattern {
    /// Fixed one-to-one mapping from content type.
    pub fn for_content(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Empathy => Self::Pacing,
            ContentType::Understanding => Self::Embedded,
            ContentType::Decision => Self::Presupposition,
            ContentType::Value => Self::Metaphor,
            ContentType::Trust => Self::Leading,
        }
    }
}

impl AxisKey for LinguisticPattern {
    const AXIS: &'static str = "linguisticPattern";
    const ALL: &'static [Self] = &[
        Self::Presupposition,
        Self::Embedded,
        Self::Metaphor,
        Self::Pacing,
        Self::Leading,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Presupposition => "presupposition",
            Self::Embedded => "embedded",
            Self::Metaphor => "metaphor",
            Self::Pacing => "pacing",
            Self::Leading => "leading",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LinguisticPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
