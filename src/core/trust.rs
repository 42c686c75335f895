use crate::schema::context::ValidationError;
use crate::schema::relationship::{RelationshipStage, TrustScores};

/// Lower bounds (inclusive) of each stage above `Stranger`.
const STAGE_FLOORS: [(f64, RelationshipStage); 4] = [
    (85.0, RelationshipStage::LoyalCustomer),
    (70.0, RelationshipStage::Customer),
    (50.0, RelationshipStage::Friend),
    (30.0, RelationshipStage::Acquaintance),
];

/// Unweighted arithmetic mean of the scores, after validating each one.
pub fn average(scores: &TrustScores) -> Result<f64, ValidationError> {
    if scores.is_empty() {
        return Err(ValidationError::EmptyTrustScores);
    }
    let mut sum = 0.0;
    for (dimension, score) in scores.iter() {
        if !score.is_finite() {
            return Err(ValidationError::NonFiniteScore {
                dimension: dimension.to_string(),
            });
        }
        if !(0.0..=100.0).contains(&score) {
            return Err(ValidationError::ScoreOutOfRange {
                dimension: dimension.to_string(),
                score,
            });
        }
        sum += score;
    }
    Ok(sum / scores.len() as f64)
}

impl RelationshipStage {
    /// Stage for a mean score using half-open bands:
    /// `<30`, `[30,50)`, `[50,70)`, `[70,85)`, `>=85`.
    pub fn from_average(mean: f64) -> RelationshipStage {
        STAGE_FLOORS
            .iter()
            .find(|(floor, _)| mean >= *floor)
            .map(|(_, stage)| *stage)
            .unwrap_or(RelationshipStage::Stranger)
    }
}

pub fn stage(scores: &TrustScores) -> Result<RelationshipStage, ValidationError> {
    average(scores).map(RelationshipStage::from_average)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: &[f64]) -> TrustScores {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("d{}", i), *v))
            .collect()
    }

    #[test]
    fn band_boundaries_are_exact() {
        let cases = [
            (0.0, RelationshipStage::Stranger),
            (29.999, RelationshipStage::Stranger),
            (30.0, RelationshipStage::Acquaintance),
            (49.999, RelationshipStage::Acquaintance),
            (50.0, RelationshipStage::Friend),
            (69.999, RelationshipStage::Friend),
            (70.0, RelationshipStage::Customer),
            (84.999, RelationshipStage::Customer),
            (85.0, RelationshipStage::LoyalCustomer),
            (100.0, RelationshipStage::LoyalCustomer),
        ];
        for (mean, expected) in cases {
            assert_eq!(RelationshipStage::from_average(mean), expected, "mean {}", mean);
            assert_eq!(stage(&scores(&[mean])).unwrap(), expected, "mean {}", mean);
        }
    }

    #[test]
    fn mean_of_several_dimensions() {
        let s = scores(&[90.0, 95.0]);
        assert_eq!(average(&s).unwrap(), 92.5);
        assert_eq!(stage(&s).unwrap(), RelationshipStage::LoyalCustomer);
    }

    #[test]
    fn order_does_not_matter() {
        let a: TrustScores = [("a", 12.5), ("b", 71.0), ("c", 40.25)].into_iter().collect();
        let b: TrustScores = [("c", 40.25), ("a", 12.5), ("b", 71.0)].into_iter().collect();
        assert_eq!(average(&a).unwrap(), average(&b).unwrap());
    }

    #[test]
    fn empty_vector_is_rejected() {
        assert_eq!(stage(&TrustScores::new()), Err(ValidationError::EmptyTrustScores));
    }

    #[test]
    fn non_finite_score_is_rejected() {
        let s: TrustScores = [("a", 50.0), ("b", f64::NAN)].into_iter().collect();
        assert_eq!(
            average(&s),
            Err(ValidationError::NonFiniteScore {
                dimension: "b".to_string()
            })
        );
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        let s: TrustScores = [("space", 120.0)].into_iter().collect();
        assert!(matches!(
            average(&s),
            Err(ValidationError::ScoreOutOfRange { score, .. }) if score == 120.0
        ));
        let negative: TrustScores = [("space", -0.5)].into_iter().collect();
        assert!(average(&negative).is_err());
    }
}
