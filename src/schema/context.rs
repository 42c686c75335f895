use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::relationship::TrustScores;

/// Rejected caller input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("trust score vector is empty")]
    EmptyTrustScores,
    #[error("trust score '{dimension}' is not a finite number")]
    NonFiniteScore { dimension: String },
    #[error("trust score '{dimension}' = {score} is outside [0, 100]")]
    ScoreOutOfRange { dimension: String, score: f64 },
    #[error("required field '{0}' is empty")]
    MissingField(&'static str),
}

/// 1-based index into a list of alternate phrasings.
///
/// Zero, negative, and non-numeric input all select the first alternative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Variant(Option<i64>);

impl Variant {
    pub fn new(ordinal: i64) -> Self {
        Self(Some(ordinal))
    }

    /// The ordinal actually used for selection (always >= 1).
    pub fn ordinal(self) -> u64 {
        match self.0 {
            Some(n) if n >= 1 => n as u64,
            _ => 1,
        }
    }

    /// Zero-based position in a list of `len` alternatives, wrapping cyclically.
    pub fn index(self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.ordinal() - 1) % len as u64) as usize
    }
}

impl From<i64> for Variant {
    fn from(ordinal: i64) -> Self {
        Self::new(ordinal)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVariant {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for Variant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ordinal = match RawVariant::deserialize(deserializer)? {
            RawVariant::Int(n) => Some(n),
            RawVariant::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
            RawVariant::Text(s) => s.trim().parse().ok(),
            RawVariant::Float(_) | RawVariant::Other(_) => None,
        };
        Ok(Self(ordinal))
    }
}

/// The single input value to every generation operation.
///
/// Axis fields are kept as raw text so the resolver can tell an absent
/// value from an unrecognized one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Context {
    pub clinic_name: String,
    pub director_name: String,
    pub content_type: Option<String>,
    pub permission_level: Option<String>,
    pub variant: Variant,
    pub trust_scores: TrustScores,
    pub length: Option<String>,
    pub philosophy: Option<String>,
    pub director_style: Option<String>,
    pub revenue_stage: Option<String>,
}

impl Context {
    pub fn new(clinic_name: impl Into<String>, director_name: impl Into<String>) -> Self {
        Self {
            clinic_name: clinic_name.into(),
            director_name: director_name.into(),
            ..Self::default()
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_permission_level(mut self, level: impl Into<String>) -> Self {
        self.permission_level = Some(level.into());
        self
    }

    pub fn with_variant(mut self, variant: impl Into<Variant>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_trust_score(mut self, dimension: impl Into<String>, score: f64) -> Self {
        self.trust_scores.insert(dimension, score);
        self
    }

    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.length = Some(length.into());
        self
    }

    pub fn with_philosophy(mut self, philosophy: impl Into<String>) -> Self {
        self.philosophy = Some(philosophy.into());
        self
    }

    pub fn require_clinic(&self) -> Result<(), ValidationError> {
        if self.clinic_name.trim().is_empty() {
            return Err(ValidationError::MissingField("clinicName"));
        }
        Ok(())
    }

    /// Clinic and director names are interpolated into titles and must be present.
    pub fn require_names(&self) -> Result<(), ValidationError> {
        self.require_clinic()?;
        if self.director_name.trim().is_empty() {
            return Err(ValidationError::MissingField("directorName"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_index_wraps() {
        assert_eq!(Variant::new(1).index(3), 0);
        assert_eq!(Variant::new(3).index(3), 2);
        assert_eq!(Variant::new(4).index(3), 0);
        assert_eq!(Variant::new(8).index(3), 1);
    }

    #[test]
    fn non_positive_variant_acts_as_first() {
        assert_eq!(Variant::new(0).index(3), 0);
        assert_eq!(Variant::new(-5).index(3), 0);
        assert_eq!(Variant::default().index(3), 0);
    }

    #[test]
    fn variant_deserializes_leniently() {
        let parse = |json: &str| serde_json::from_str::<Variant>(json).unwrap();
        assert_eq!(parse("2"), Variant::new(2));
        assert_eq!(parse("2.0"), Variant::new(2));
        assert_eq!(parse("\"3\""), Variant::new(3));
        assert_eq!(parse("\"abc\"").ordinal(), 1);
        assert_eq!(parse("2.5").ordinal(), 1);
        assert_eq!(parse("null").ordinal(), 1);
        assert_eq!(parse("[1, 2]").ordinal(), 1);
    }

    #[test]
    fn context_deserializes_camel_case() {
        let json = r#"{
            "clinicName": "X",
            "directorName": "Y",
            "contentType": "trust",
            "permissionLevel": "L5",
            "variant": 2,
            "trustScores": {"a": 90, "b": 95},
            "length": "long"
        }"#;
        let ctx: Context = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.clinic_name, "X");
        assert_eq!(ctx.content_type.as_deref(), Some("trust"));
        assert_eq!(ctx.permission_level.as_deref(), Some("L5"));
        assert_eq!(ctx.variant, Variant::new(2));
        assert_eq!(ctx.trust_scores.len(), 2);
        assert_eq!(ctx.length.as_deref(), Some("long"));
        assert!(ctx.philosophy.is_none());
    }

    #[test]
    fn missing_fields_default() {
        let ctx: Context = serde_json::from_str("{}").unwrap();
        assert!(ctx.clinic_name.is_empty());
        assert!(ctx.trust_scores.is_empty());
        assert_eq!(ctx.variant.ordinal(), 1);
    }

    #[test]
    fn require_names() {
        assert!(Context::new("X", "Y").require_names().is_ok());
        assert_eq!(
            Context::new("  ", "Y").require_names(),
            Err(ValidationError::MissingField("clinicName"))
        );
        assert_eq!(
            Context::new("X", "").require_names(),
            Err(ValidationError::MissingField("directorName"))
        );
    }
}
