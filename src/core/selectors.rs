/// Fragment selectors: one lookup per structural role.
///
/// Every selector is total over a validated catalog. Roles keyed by both
/// level and content type go through the resolver and take `Axes`; the rest
/// take a single typed key. Caller-supplied names are escaped before they
/// are interpolated into a template.
use serde::Serialize;

use super::catalog::{
    ActionCopy, CallToAction, Catalog, Character, Conflict, DecisionPoint, DesireCopy,
    InterestCopy, Message, Pacing, Strategy, Transformation, TriggerPhrases, TrustProof,
    TurningPoint, Understanding, ValueProposition,
};
use super::markup::escape_markup;
use super::resolver::{resolve, resolve_variant, Axes, Resolution};
use super::template::Fields;
use crate::schema::axis::{AxisKey, ContentType, PermissionLevel};
use crate::schema::relationship::RelationshipStage;
use crate::schema::strategy::{EmotionalTrigger, LinguisticPattern};

pub fn title(catalog: &Catalog, axes: &Axes, clinic: &str, director: &str) -> String {
    let clinic = escape_markup(clinic);
    let director = escape_markup(director);
    resolve(&catalog.content().titles, axes)
        .fragment
        .render(&Fields {
            clinic: &clinic,
            director: &director,
            ..Fields::default()
        })
}

/// All hook alternatives for a (level, type) pair. Never empty.
pub fn hooks(catalog: &Catalog, level: PermissionLevel, content_type: ContentType) -> &[String] {
    catalog.content().hooks.get(level).get(content_type)
}

/// The hook alternative picked by the axes' variant.
pub fn hook<'a>(catalog: &'a Catalog, axes: &Axes) -> Resolution<'a, String> {
    resolve_variant(&catalog.content().hooks, axes)
}

pub fn offer(catalog: &Catalog, level: PermissionLevel) -> &str {
    catalog.content().offers.get(level)
}

pub fn pacing(catalog: &Catalog, level: PermissionLevel) -> &Pacing {
    catalog.content().pacing.get(level)
}

pub fn understanding(catalog: &Catalog, level: PermissionLevel) -> &Understanding {
    catalog.content().understanding.get(level)
}

pub fn decision_point(catalog: &Catalog, level: PermissionLevel) -> &DecisionPoint {
    catalog.content().decisions.get(level)
}

pub fn value_proposition(catalog: &Catalog, level: PermissionLevel) -> &ValueProposition {
    catalog.content().values.get(level)
}

pub fn value_header(catalog: &Catalog, level: PermissionLevel) -> &str {
    catalog.content().value_headers.get(level)
}

/// Urgency lines appended to the value section; empty below L4.
pub fn value_extras(catalog: &Catalog, level: PermissionLevel) -> &[String] {
    catalog.content().value_extras.get(level)
}

pub fn trust_proof(catalog: &Catalog, level: PermissionLevel) -> &TrustProof {
    catalog.content().trust_proofs.get(level)
}

/// Urgency lines appended to the trust section; empty below L4.
pub fn trust_extras(catalog: &Catalog, level: PermissionLevel) -> &[String] {
    catalog.content().trust_extras.get(level)
}

/// Exactly five tags, each including its leading `#`.
pub fn hashtags<'a>(catalog: &'a Catalog, axes: &Axes) -> &'a [String] {
    resolve(&catalog.content().hashtags, axes).fragment
}

pub fn character(catalog: &Catalog, content_type: ContentType) -> &Character {
    catalog.story().characters.get(content_type)
}

pub fn conflict(catalog: &Catalog, content_type: ContentType) -> &Conflict {
    catalog.story().conflicts.get(content_type)
}

pub fn resolution(catalog: &Catalog, content_type: ContentType) -> &TurningPoint {
    catalog.story().resolutions.get(content_type)
}

/// The resolution's discovery line with the clinic name filled in.
pub fn discovery(catalog: &Catalog, content_type: ContentType, clinic: &str) -> String {
    let clinic = escape_markup(clinic);
    resolution(catalog, content_type).discovery.render(&Fields {
        clinic: &clinic,
        ..Fields::default()
    })
}

pub fn transformation(catalog: &Catalog, content_type: ContentType) -> &Transformation {
    catalog.story().transformations.get(content_type)
}

pub fn message<'a>(catalog: &'a Catalog, axes: &Axes) -> &'a Message {
    resolve(&catalog.story().messages, axes).fragment
}

pub fn call_to_action(catalog: &Catalog, level: PermissionLevel) -> &CallToAction {
    catalog.story().calls_to_action.get(level)
}

pub fn background(catalog: &Catalog, content_type: ContentType) -> &[String] {
    catalog.story().backgrounds.get(content_type)
}

pub fn crisis_detail(catalog: &Catalog, content_type: ContentType) -> &[String] {
    catalog.story().crisis_details.get(content_type)
}

/// Waiting-room paragraphs, addressed to the protagonist by name.
pub fn first_meeting(catalog: &Catalog, character_name: &str) -> Vec<String> {
    let fields = Fields {
        character: character_name,
        ..Fields::default()
    };
    catalog
        .story()
        .first_meeting
        .iter()
        .map(|p| p.render(&fields))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBeat<'a> {
    pub label: Option<&'a str>,
    pub continues: bool,
    pub text: String,
}

pub fn treatment_journey<'a>(
    catalog: &'a Catalog,
    content_type: ContentType,
    character_name: &str,
) -> Vec<RenderedBeat<'a>> {
    let fields = Fields {
        character: character_name,
        ..Fields::default()
    };
    catalog
        .story()
        .treatment_journeys
        .get(content_type)
        .iter()
        .map(|beat| RenderedBeat {
            label: beat.label.as_deref(),
            continues: beat.continues,
            text: beat.text.render(&fields),
        })
        .collect()
}

pub fn follow_up(catalog: &Catalog, content_type: ContentType) -> &[String] {
    catalog.story().follow_ups.get(content_type)
}

pub fn emotional_trigger(content_type: ContentType) -> EmotionalTrigger {
    EmotionalTrigger::for_content(content_type)
}

pub fn linguistic_pattern(content_type: ContentType) -> LinguisticPattern {
    LinguisticPattern::for_content(content_type)
}

pub fn strategy_for_stage(catalog: &Catalog, stage: RelationshipStage) -> &Strategy {
    catalog.strategy().strategies.get(stage)
}

pub fn trigger_phrases(catalog: &Catalog, trigger: EmotionalTrigger) -> &TriggerPhrases {
    catalog.strategy().triggers.get(trigger)
}

/// Prefix `text` with the trigger's lead phrase.
pub fn apply_emotional_trigger(catalog: &Catalog, text: &str, trigger: EmotionalTrigger) -> String {
    format!("{} {}", trigger_phrases(catalog, trigger).prefix, text)
}

/// Wrap `text` in the pattern's template.
pub fn apply_linguistic_pattern(
    catalog: &Catalog,
    text: &str,
    pattern: LinguisticPattern,
) -> String {
    catalog.strategy().patterns.get(pattern).render(&Fields {
        text,
        ..Fields::default()
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attention<'a> {
    pub headline: &'a str,
    pub subheadline: &'a str,
    pub visual: &'a str,
}

/// Attention, interest, desire, action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AidaPlan<'a> {
    pub attention: Attention<'a>,
    pub interest: &'a InterestCopy,
    pub desire: &'a DesireCopy,
    pub action: &'a ActionCopy,
}

pub fn aida<'a>(catalog: &'a Catalog, headline: &'a str) -> AidaPlan<'a> {
    let copy = &catalog.strategy().aida;
    AidaPlan {
        attention: Attention {
            headline,
            subheadline: &copy.attention.subheadline,
            visual: &copy.attention.visual,
        },
        interest: &copy.interest,
        desire: &copy.desire,
        action: &copy.action,
    }
}

/// Keys of every cell a selector can reach, for diagnostics and linting.
pub fn grid_keys() -> impl Iterator<Item = (PermissionLevel, ContentType)> {
    PermissionLevel::ALL
        .iter()
        .flat_map(|&l| ContentType::ALL.iter().map(move |&c| (l, c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FallbackPolicy;
    use crate::schema::context::{Context, Variant};

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn with_variant(level: PermissionLevel, ct: ContentType, variant: i64) -> Axes {
        let mut axes = Axes::exact(level, ct);
        axes.variant = Variant::new(variant);
        axes
    }

    #[test]
    fn every_grid_cell_selects_non_empty_fragments() {
        let c = catalog();
        for (level, ct) in grid_keys() {
            let axes = Axes::exact(level, ct);
            assert!(!title(&c, &axes, "X", "Y").trim().is_empty());
            assert!(!hook(&c, &axes).fragment.trim().is_empty());
            assert!(!offer(&c, level).trim().is_empty());
            assert_eq!(hashtags(&c, &axes).len(), 5);
        }
        assert_eq!(grid_keys().count(), 30);
    }

    #[test]
    fn title_interpolates_escaped_names() {
        let c = catalog();
        let t = title(&c, &Axes::exact(PermissionLevel::L5, ContentType::Trust), "X", "Y");
        assert_eq!(t, "X Y 원장, 만족 못하면 100% 환불");

        let l0 = Axes::exact(PermissionLevel::L0, ContentType::Empathy);
        let injected = title(&c, &l0, "<b>", "Y");
        assert!(injected.starts_with("&lt;b&gt; Y"));
    }

    #[test]
    fn hook_variant_wraps() {
        let c = catalog();
        let (l, t) = (PermissionLevel::L3, ContentType::Value);
        let n = hooks(&c, l, t).len() as i64;
        let pick = |v: i64| hook(&c, &with_variant(l, t, v)).fragment;
        assert_eq!(pick(1), pick(n + 1));
        assert_eq!(pick(0), pick(1));
        assert_ne!(pick(1), pick(2));
        assert_eq!(pick(2), &hooks(&c, l, t)[1]);
    }

    #[test]
    fn fallback_hook_is_tagged_inexact() {
        let c = catalog();
        let ctx = Context::new("X", "Y").with_permission_level("l5");
        let axes = Axes::from_context(&ctx, FallbackPolicy::Lenient).unwrap();
        let picked = hook(&c, &axes);
        assert!(!picked.is_exact());
        assert_eq!(
            picked.fragment,
            hook(&c, &Axes::exact(PermissionLevel::L3, ContentType::Empathy)).fragment
        );
        assert!(hook(&c, &Axes::exact(PermissionLevel::L5, ContentType::Trust)).is_exact());
    }

    #[test]
    fn message_follows_both_axes() {
        let c = catalog();
        let a = message(&c, &Axes::exact(PermissionLevel::L0, ContentType::Trust));
        let b = message(&c, &Axes::exact(PermissionLevel::L5, ContentType::Trust));
        assert_eq!(a, c.story().messages.get(PermissionLevel::L0).get(ContentType::Trust));
        assert_eq!(b, c.story().messages.get(PermissionLevel::L5).get(ContentType::Trust));
    }

    #[test]
    fn discovery_mentions_clinic() {
        let c = catalog();
        let line = discovery(&c, ContentType::Understanding, "미소치과");
        assert_eq!(line, "지인의 소개로 미소치과을 알게 됐습니다.");
    }

    #[test]
    fn first_meeting_addresses_character() {
        let c = catalog();
        let name = &character(&c, ContentType::Empathy).name;
        let paragraphs = first_meeting(&c, name);
        assert_eq!(paragraphs.len(), 2);
        assert!(paragraphs[1].contains("김민수 씨(42세)님"));
    }

    #[test]
    fn decision_journey_fills_character_and_labels() {
        let c = catalog();
        let beats = treatment_journey(&c, ContentType::Decision, "박준호 씨(48세)");
        assert_eq!(beats.len(), 6);
        assert_eq!(beats[0].label, None);
        assert_eq!(beats[1].label, Some("옵션 A:"));
        let continued: Vec<bool> = beats.iter().map(|b| b.continues).collect();
        assert_eq!(continued, [false, false, true, true, false, false]);
        assert!(beats[4].text.contains("박준호 씨(48세)님의 상황"));
    }

    #[test]
    fn triggers_and_patterns_apply() {
        let c = catalog();
        assert_eq!(
            apply_emotional_trigger(&c, "치료", EmotionalTrigger::Proof),
            "증명된 치료"
        );
        assert_eq!(
            apply_linguistic_pattern(&c, "편안한 치료", LinguisticPattern::Metaphor),
            "마치 편안한 치료처럼"
        );
    }

    #[test]
    fn strategy_by_stage() {
        let c = catalog();
        assert_eq!(strategy_for_stage(&c, RelationshipStage::Stranger).goal, "인지도 확보");
        assert_eq!(strategy_for_stage(&c, RelationshipStage::LoyalCustomer).cta, "추천 프로그램");
    }

    #[test]
    fn aida_uses_supplied_headline() {
        let c = catalog();
        let plan = aida(&c, "헤드라인");
        assert_eq!(plan.attention.headline, "헤드라인");
        assert_eq!(plan.action.risk_reversal, "만족 보장");
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["action"]["riskReversal"], "만족 보장");
    }
}
