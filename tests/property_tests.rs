/// Property tests: determinism, variant wrapping, and stage ordering.

use marketing_engine::core::engine::MarketingEngine;
use marketing_engine::core::resolver::Axes;
use marketing_engine::core::selectors;
use marketing_engine::core::trust;
use marketing_engine::schema::axis::{AxisKey, ContentType, PermissionLevel};
use marketing_engine::schema::context::{Context, Variant};
use marketing_engine::schema::relationship::{RelationshipStage, TrustScores};
use proptest::prelude::*;
use std::sync::OnceLock;

fn engine() -> &'static MarketingEngine {
    static ENGINE: OnceLock<MarketingEngine> = OnceLock::new();
    ENGINE.get_or_init(|| MarketingEngine::builder().build().unwrap())
}

fn level() -> impl Strategy<Value = PermissionLevel> {
    prop::sample::select(PermissionLevel::ALL)
}

fn content_type() -> impl Strategy<Value = ContentType> {
    prop::sample::select(ContentType::ALL)
}

fn hook_at(l: PermissionLevel, ct: ContentType, v: i64) -> &'static str {
    let mut axes = Axes::exact(l, ct);
    axes.variant = Variant::new(v);
    selectors::hook(engine().catalog(), &axes).fragment
}

proptest! {
    #[test]
    fn variant_selection_wraps(l in level(), ct in content_type(), v in 1i64..10_000) {
        let n = selectors::hooks(engine().catalog(), l, ct).len() as i64;
        let wrapped = (v - 1).rem_euclid(n) + 1;
        prop_assert_eq!(hook_at(l, ct, v), hook_at(l, ct, wrapped));
    }

    #[test]
    fn non_positive_variant_selects_first(l in level(), ct in content_type(), v in i64::MIN..=0) {
        prop_assert_eq!(hook_at(l, ct, v), hook_at(l, ct, 1));
    }

    #[test]
    fn stage_is_monotonic_in_mean(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(RelationshipStage::from_average(lo) <= RelationshipStage::from_average(hi));
    }

    #[test]
    fn stage_ignores_dimension_order(scores in prop::collection::vec(0.0f64..=100.0, 1..8)) {
        let forward: TrustScores = scores.iter().enumerate().map(|(i, s)| (format!("d{}", i), *s)).collect();
        let reversed: TrustScores = scores.iter().rev().enumerate().map(|(i, s)| (format!("d{}", i), *s)).collect();
        prop_assert_eq!(trust::stage(&forward).unwrap(), trust::stage(&reversed).unwrap());
    }

    #[test]
    fn documents_are_pure(
        l in level(),
        ct in content_type(),
        variant in -5i64..20,
        clinic in "[가-힣a-zA-Z<>&\"' ]{1,12}",
    ) {
        let ctx = Context::new(clinic, "원장")
            .with_permission_level(l.key())
            .with_content_type(ct.key())
            .with_variant(variant)
            .with_length("long");
        let e = engine();
        prop_assert_eq!(e.assemble_content(&ctx).unwrap(), e.assemble_content(&ctx).unwrap());
        prop_assert_eq!(e.assemble_story(&ctx).unwrap(), e.assemble_story(&ctx).unwrap());
    }

    #[test]
    fn caller_names_never_inject_markup(clinic in "[a-z<>]{1,10}", director in "[a-z<>]{1,10}") {
        let ctx = Context::new(clinic.clone(), director.clone());
        let title = engine().generate_ad_title(&ctx).unwrap();
        prop_assert!(!title.contains('<') && !title.contains('>'));
    }

    #[test]
    fn lenient_mode_accepts_any_axis_text(level_text in ".{0,8}", type_text in ".{0,12}") {
        let ctx = Context::new("X", "Y")
            .with_permission_level(level_text)
            .with_content_type(type_text);
        let doc = engine().assemble_content(&ctx).unwrap();
        prop_assert!(doc.as_str().ends_with("</div>"));
    }
}
