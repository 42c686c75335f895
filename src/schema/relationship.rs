use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::axis::AxisKey;

/// Maturity of the audience's relationship with the clinic, derived from
/// the mean of a trust-score vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipStage {
    Stranger,
    Acquaintance,
    Friend,
    Customer,
    LoyalCustomer,
}

impl AxisKey for RelationshipStage {
    const AXIS: &'static str = "relationshipStage";
    const ALL: &'static [Self] = &[
        Self::Stranger,
        Self::Acquaintance,
        Self::Friend,
        Self::Customer,
        Self::LoyalCustomer,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Stranger => "stranger",
            Self::Acquaintance => "acquaintance",
            Self::Friend => "friend",
            Self::Customer => "customer",
            Self::LoyalCustomer => "loyalCustomer",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RelationshipStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-dimension relationship-health scores, each expected in `[0, 100]`.
///
/// Dimensions are kept sorted so that summation order, and therefore the
/// mean, does not depend on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustScores(BTreeMap<String, f64>);

impl TrustScores {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, dimension: impl Into<String>, score: f64) -> Option<f64> {
        self.0.insert(dimension.into(), score)
    }

    pub fn get(&self, dimension: &str) -> Option<f64> {
        self.0.get(dimension).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for TrustScores {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_order_follows_maturity() {
        assert!(RelationshipStage::Stranger < RelationshipStage::Acquaintance);
        assert!(RelationshipStage::Customer < RelationshipStage::LoyalCustomer);
    }

    #[test]
    fn stage_keys() {
        assert_eq!(RelationshipStage::LoyalCustomer.key(), "loyalCustomer");
        assert_eq!(RelationshipStage::parse("loyalCustomer"), Some(RelationshipStage::LoyalCustomer));
        assert_eq!(RelationshipStage::parse("loyalcustomer"), None);
    }

    #[test]
    fn trust_scores_from_pairs() {
        let scores: TrustScores = [("empathy", 65.0), ("trust", 70.0)].into_iter().collect();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores.get("trust"), Some(70.0));
        assert_eq!(scores.get("space"), None);
    }

    #[test]
    fn trust_scores_deserialize_from_json_object() {
        let scores: TrustScores = serde_json::from_str(r#"{"b": 95, "a": 90.5}"#).unwrap();
        let dims: Vec<&str> = scores.iter().map(|(k, _)| k).collect();
        assert_eq!(dims, vec!["a", "b"]);
        assert_eq!(scores.get("a"), Some(90.5));
    }

    #[test]
    fn trust_scores_reject_non_numeric_values() {
        let result: Result<TrustScores, _> = serde_json::from_str(r#"{"a": "high"}"#);
        assert!(result.is_err());
    }
}
