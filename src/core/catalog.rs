/// Template catalog: RON loading, dense per-axis tables, and load-time validation.
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::template::{Field, Template, TemplateError};
use crate::schema::axis::{AxisKey, ContentType, PermissionLevel};
use crate::schema::relationship::RelationshipStage;
use crate::schema::strategy::{EmotionalTrigger, LinguisticPattern};

const BUILTIN_CONTENT: &str = include_str!("../../catalog_data/dental_clinic/content.ron");
const BUILTIN_STORY: &str = include_str!("../../catalog_data/dental_clinic/story.ron");
const BUILTIN_STRATEGY: &str = include_str!("../../catalog_data/dental_clinic/strategy.ron");

/// Number of tags every hashtag list carries.
pub const HASHTAG_COUNT: usize = 5;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("{role}[{key}]: {source}")]
    Template {
        role: &'static str,
        key: String,
        #[source]
        source: TemplateError,
    },
    #[error("{role} has no entry for '{key}'")]
    MissingEntry { role: &'static str, key: String },
    #[error("{role}[{key}] is empty")]
    EmptyFragment { role: &'static str, key: String },
    #[error("hashtags[{key}] has {found} tags, expected 5")]
    HashtagCount { key: String, found: usize },
}

/// What a single cell failed on; turned into a `CatalogError` once the
/// cell's role and key are known.
enum Defect {
    Empty,
    HashtagCount(usize),
    Template(TemplateError),
}

impl Defect {
    fn at(self, role: &'static str, key: String) -> CatalogError {
        match self {
            Defect::Empty => CatalogError::EmptyFragment { role, key },
            Defect::HashtagCount(found) => CatalogError::HashtagCount { key, found },
            Defect::Template(source) => CatalogError::Template { role, key, source },
        }
    }
}

type Check<T> = fn(&T) -> Result<(), Defect>;

/// One value per key of an axis, stored densely by the key's ordinal.
///
/// Only constructed through validation, so `get` is total.
#[derive(Debug, Clone)]
pub struct Table<K: AxisKey, T> {
    cells: Vec<T>,
    _key: PhantomData<K>,
}

/// Permission level × content type.
pub type Grid<T> = Table<PermissionLevel, Table<ContentType, T>>;

impl<K: AxisKey, T> Table<K, T> {
    pub fn get(&self, key: K) -> &T {
        &self.cells[key.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        K::ALL.iter().copied().zip(self.cells.iter())
    }

    fn build(
        role: &'static str,
        prefix: Option<&str>,
        mut raw: FxHashMap<K, T>,
        check: Check<T>,
    ) -> Result<Self, CatalogError> {
        let key_name = |k: K| match prefix {
            Some(p) => format!("{}.{}", p, k.key()),
            None => k.key().to_string(),
        };
        let mut cells = Vec::with_capacity(K::ALL.len());
        for &k in K::ALL {
            let value = raw.remove(&k).ok_or_else(|| CatalogError::MissingEntry {
                role,
                key: key_name(k),
            })?;
            check(&value).map_err(|d| d.at(role, key_name(k)))?;
            cells.push(value);
        }
        Ok(Table {
            cells,
            _key: PhantomData,
        })
    }
}

fn grid<T>(
    role: &'static str,
    raw: FxHashMap<PermissionLevel, FxHashMap<ContentType, T>>,
    check: Check<T>,
) -> Result<Grid<T>, CatalogError> {
    let mut rows = FxHashMap::default();
    for (level, row) in raw {
        rows.insert(level, Table::build(role, Some(level.key()), row, check)?);
    }
    Table::build(role, None, rows, |_| Ok(()))
}

/// Text-bearing catalog values that must not be blank.
trait Leaf {
    fn is_blank(&self) -> bool;
}

impl Leaf for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Leaf for Template {
    fn is_blank(&self) -> bool {
        Template::is_blank(self)
    }
}

impl<T: Leaf> Leaf for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty() || self.iter().any(Leaf::is_blank)
    }
}

fn any_blank(fields: &[&String]) -> bool {
    fields.iter().any(|f| f.trim().is_empty())
}

fn non_blank<T: Leaf>(value: &T) -> Result<(), Defect> {
    if value.is_blank() {
        Err(Defect::Empty)
    } else {
        Ok(())
    }
}

/// Lists that may be empty but may not contain blank lines.
fn optional_lines(lines: &Vec<String>) -> Result<(), Defect> {
    if lines.iter().any(Leaf::is_blank) {
        Err(Defect::Empty)
    } else {
        Ok(())
    }
}

fn hashtag_list(tags: &Vec<String>) -> Result<(), Defect> {
    if tags.len() != HASHTAG_COUNT {
        return Err(Defect::HashtagCount(tags.len()));
    }
    non_blank(tags)
}

fn template_with(template: &Template, allowed: &[Field]) -> Result<(), Defect> {
    non_blank(template)?;
    template.check_fields(allowed).map_err(Defect::Template)
}

fn title_template(template: &Template) -> Result<(), Defect> {
    template_with(template, &[Field::Clinic, Field::Director])
}

fn pattern_template(template: &Template) -> Result<(), Defect> {
    template_with(template, &[Field::Text])
}

fn require<T: Leaf>(role: &'static str, key: &str, value: &T) -> Result<(), CatalogError> {
    non_blank(value).map_err(|d| d.at(role, key.to_string()))
}

// ---------------------------------------------------------------------------
// Leaf records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Pacing {
    pub acknowledgement: String,
    pub validation: String,
    pub normalization: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Understanding {
    pub problem_identification: String,
    pub root_cause: String,
    pub solution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct DecisionPoint {
    pub options: String,
    pub pros_and_cons: String,
    pub autonomy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ValueProposition {
    pub immediate: String,
    pub long_term: String,
    pub lifestyle: String,
    pub prevention: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct TrustProof {
    pub social_proof: String,
    pub authority: String,
    pub testimonial: String,
    pub guarantee: String,
}

/// Fixed section headings in structured content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentLabels {
    pub decision_heading: String,
    pub trust_heading: String,
}

/// Story protagonist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub background: String,
    pub fear: String,
    pub desire: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Conflict {
    pub situation: String,
    pub inner_conflict: String,
    pub escalation: String,
    pub crisis: String,
}

/// How the story's protagonist finds and meets the clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct TurningPoint {
    /// May reference `{clinic}`.
    pub discovery: Template,
    pub first_contact: String,
    pub first_visit: String,
    pub process: String,
    pub outcome: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub immediate: String,
    pub emotional: String,
    pub lifestyle: String,
    pub future: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub lesson: String,
    pub invitation: String,
    pub promise: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToAction {
    pub title: String,
    pub subtitle: String,
}

/// One step of a treatment journey, optionally led by a bold label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyBeat {
    #[serde(default)]
    pub label: Option<String>,
    /// Follows the previous beat after a single line break instead of a
    /// paragraph break.
    #[serde(default)]
    pub continues: bool,
    /// May reference `{character}`.
    pub text: Template,
}

/// Fixed headings and labels in story content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryLabels {
    pub title: String,
    pub subtitle: String,
    pub background_heading: String,
    pub crisis_heading: String,
    pub crisis_detail_heading: String,
    pub turning_point_heading: String,
    pub first_meeting_heading: String,
    pub journey_heading: String,
    pub change_heading: String,
    pub follow_up_heading: String,
    pub immediate_label: String,
    pub emotional_label: String,
    pub lifestyle_label: String,
    pub future_label: String,
    /// Joins a character's fear and desire ("A, but B").
    pub contrast: String,
}

/// Messaging strategy for a relationship stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub goal: String,
    pub content: String,
    pub tone: String,
    pub cta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerPhrases {
    pub prefix: String,
    pub emphasis: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionCopy {
    pub subheadline: String,
    pub visual: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestCopy {
    pub problem: String,
    pub agitation: String,
    pub education: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesireCopy {
    pub solution: String,
    pub benefits: String,
    pub transformation: String,
    pub proof: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ActionCopy {
    pub cta: String,
    pub urgency: String,
    pub risk_reversal: String,
    pub ease: String,
}

/// Fixed AIDA copy; the attention headline is supplied per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AidaCopy {
    pub attention: AttentionCopy,
    pub interest: InterestCopy,
    pub desire: DesireCopy,
    pub action: ActionCopy,
}

impl Leaf for Pacing {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.acknowledgement, &self.validation, &self.normalization])
    }
}

impl Leaf for Understanding {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.problem_identification, &self.root_cause, &self.solution])
    }
}

impl Leaf for DecisionPoint {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.options, &self.pros_and_cons, &self.autonomy])
    }
}

impl Leaf for ValueProposition {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.immediate, &self.long_term, &self.lifestyle, &self.prevention])
    }
}

impl Leaf for TrustProof {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.social_proof, &self.authority, &self.testimonial, &self.guarantee])
    }
}

impl Leaf for ContentLabels {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.decision_heading, &self.trust_heading])
    }
}

impl Leaf for Character {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.name, &self.background, &self.fear, &self.desire])
    }
}

impl Leaf for Conflict {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.situation, &self.inner_conflict, &self.escalation, &self.crisis])
    }
}

impl Leaf for TurningPoint {
    fn is_blank(&self) -> bool {
        self.discovery.is_blank()
            || any_blank(&[&self.first_contact, &self.first_visit, &self.process, &self.outcome])
    }
}

impl Leaf for Transformation {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.immediate, &self.emotional, &self.lifestyle, &self.future])
    }
}

impl Leaf for Message {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.lesson, &self.invitation, &self.promise])
    }
}

impl Leaf for CallToAction {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.title, &self.subtitle])
    }
}

impl Leaf for JourneyBeat {
    fn is_blank(&self) -> bool {
        self.text.is_blank() || self.label.as_deref().is_some_and(|l| l.trim().is_empty())
    }
}

impl Leaf for StoryLabels {
    fn is_blank(&self) -> bool {
        any_blank(&[
            &self.title,
            &self.subtitle,
            &self.background_heading,
            &self.crisis_heading,
            &self.crisis_detail_heading,
            &self.turning_point_heading,
            &self.first_meeting_heading,
            &self.journey_heading,
            &self.change_heading,
            &self.follow_up_heading,
            &self.immediate_label,
            &self.emotional_label,
            &self.lifestyle_label,
            &self.future_label,
            &self.contrast,
        ])
    }
}

impl Leaf for Strategy {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.goal, &self.content, &self.tone, &self.cta])
    }
}

impl Leaf for TriggerPhrases {
    fn is_blank(&self) -> bool {
        any_blank(&[&self.prefix, &self.emphasis, &self.accent])
    }
}

impl Leaf for AidaCopy {
    fn is_blank(&self) -> bool {
        let (a, i, d, x) = (&self.attention, &self.interest, &self.desire, &self.action);
        any_blank(&[
            &a.subheadline,
            &a.visual,
            &i.problem,
            &i.agitation,
            &i.education,
            &d.solution,
            &d.benefits,
            &d.transformation,
            &d.proof,
            &x.cta,
            &x.urgency,
            &x.risk_reversal,
            &x.ease,
        ])
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Fragments for structured persuasive content.
#[derive(Debug, Clone)]
pub struct ContentSection {
    pub titles: Grid<Template>,
    pub hooks: Grid<Vec<String>>,
    pub offers: Table<PermissionLevel, String>,
    pub pacing: Table<PermissionLevel, Pacing>,
    pub understanding: Table<PermissionLevel, Understanding>,
    pub decisions: Table<PermissionLevel, DecisionPoint>,
    pub values: Table<PermissionLevel, ValueProposition>,
    pub value_headers: Table<PermissionLevel, String>,
    pub value_extras: Table<PermissionLevel, Vec<String>>,
    pub trust_proofs: Table<PermissionLevel, TrustProof>,
    pub trust_extras: Table<PermissionLevel, Vec<String>>,
    pub hashtags: Grid<Vec<String>>,
    pub labels: ContentLabels,
}

/// Fragments for narrative content.
#[derive(Debug, Clone)]
pub struct StorySection {
    pub characters: Table<ContentType, Character>,
    pub conflicts: Table<ContentType, Conflict>,
    pub resolutions: Table<ContentType, TurningPoint>,
    pub transformations: Table<ContentType, Transformation>,
    pub messages: Grid<Message>,
    pub calls_to_action: Table<PermissionLevel, CallToAction>,
    pub backgrounds: Table<ContentType, Vec<String>>,
    pub crisis_details: Table<ContentType, Vec<String>>,
    pub first_meeting: Vec<Template>,
    pub treatment_journeys: Table<ContentType, Vec<JourneyBeat>>,
    pub follow_ups: Table<ContentType, Vec<String>>,
    pub labels: StoryLabels,
}

/// Messaging strategy tables.
#[derive(Debug, Clone)]
pub struct StrategySection {
    pub strategies: Table<RelationshipStage, Strategy>,
    pub triggers: Table<EmotionalTrigger, TriggerPhrases>,
    pub patterns: Table<LinguisticPattern, Template>,
    pub aida: AidaCopy,
}

// RON deserialization helpers: files are written as sparse maps keyed by
// axis names, converted into dense tables after validation.

type RawLevels<T> = FxHashMap<PermissionLevel, T>;
type RawTypes<T> = FxHashMap<ContentType, T>;
type RawGrid<T> = RawLevels<RawTypes<T>>;

#[derive(Debug, Deserialize)]
struct RawContent {
    titles: RawGrid<Template>,
    hooks: RawGrid<Vec<String>>,
    offers: RawLevels<String>,
    pacing: RawLevels<Pacing>,
    understanding: RawLevels<Understanding>,
    decisions: RawLevels<DecisionPoint>,
    values: RawLevels<ValueProposition>,
    value_headers: RawLevels<String>,
    value_extras: RawLevels<Vec<String>>,
    trust_proofs: RawLevels<TrustProof>,
    trust_extras: RawLevels<Vec<String>>,
    hashtags: RawGrid<Vec<String>>,
    labels: ContentLabels,
}

#[derive(Debug, Deserialize)]
struct RawStory {
    characters: RawTypes<Character>,
    conflicts: RawTypes<Conflict>,
    resolutions: RawTypes<TurningPoint>,
    transformations: RawTypes<Transformation>,
    messages: RawGrid<Message>,
    calls_to_action: RawLevels<CallToAction>,
    backgrounds: RawTypes<Vec<String>>,
    crisis_details: RawTypes<Vec<String>>,
    first_meeting: Vec<Template>,
    treatment_journeys: RawTypes<Vec<JourneyBeat>>,
    follow_ups: RawTypes<Vec<String>>,
    labels: StoryLabels,
}

#[derive(Debug, Deserialize)]
struct RawStrategy {
    strategies: FxHashMap<RelationshipStage, Strategy>,
    triggers: FxHashMap<EmotionalTrigger, TriggerPhrases>,
    patterns: FxHashMap<LinguisticPattern, Template>,
    aida: AidaCopy,
}

impl ContentSection {
    pub fn parse_ron(input: &str) -> Result<ContentSection, CatalogError> {
        let raw: RawContent = ron::from_str(input)?;
        require("labels", "content", &raw.labels)?;
        Ok(ContentSection {
            titles: grid("titles", raw.titles, title_template)?,
            hooks: grid("hooks", raw.hooks, non_blank)?,
            offers: Table::build("offers", None, raw.offers, non_blank)?,
            pacing: Table::build("pacing", None, raw.pacing, non_blank)?,
            understanding: Table::build("understanding", None, raw.understanding, non_blank)?,
            decisions: Table::build("decisions", None, raw.decisions, non_blank)?,
            values: Table::build("values", None, raw.values, non_blank)?,
            value_headers: Table::build("value_headers", None, raw.value_headers, non_blank)?,
            value_extras: Table::build("value_extras", None, raw.value_extras, optional_lines)?,
            trust_proofs: Table::build("trust_proofs", None, raw.trust_proofs, non_blank)?,
            trust_extras: Table::build("trust_extras", None, raw.trust_extras, optional_lines)?,
            hashtags: grid("hashtags", raw.hashtags, hashtag_list)?,
            labels: raw.labels,
        })
    }
}

impl StorySection {
    pub fn parse_ron(input: &str) -> Result<StorySection, CatalogError> {
        let raw: RawStory = ron::from_str(input)?;
        require("labels", "story", &raw.labels)?;
        require("first_meeting", "-", &raw.first_meeting)?;
        for (i, paragraph) in raw.first_meeting.iter().enumerate() {
            paragraph
                .check_fields(&[Field::Character])
                .map_err(|e| Defect::Template(e).at("first_meeting", i.to_string()))?;
        }
        Ok(StorySection {
            characters: Table::build("characters", None, raw.characters, non_blank)?,
            conflicts: Table::build("conflicts", None, raw.conflicts, non_blank)?,
            resolutions: Table::build("resolutions", None, raw.resolutions, |r| {
                non_blank(r)?;
                r.discovery
                    .check_fields(&[Field::Clinic])
                    .map_err(Defect::Template)
            })?,
            transformations: Table::build(
                "transformations",
                None,
                raw.transformations,
                non_blank,
            )?,
            messages: grid("messages", raw.messages, non_blank)?,
            calls_to_action: Table::build(
                "calls_to_action",
                None,
                raw.calls_to_action,
                non_blank,
            )?,
            backgrounds: Table::build("backgrounds", None, raw.backgrounds, non_blank)?,
            crisis_details: Table::build("crisis_details", None, raw.crisis_details, non_blank)?,
            first_meeting: raw.first_meeting,
            treatment_journeys: Table::build(
                "treatment_journeys",
                None,
                raw.treatment_journeys,
                |beats| {
                    non_blank(beats)?;
                    beats.iter().try_for_each(|b| {
                        b.text
                            .check_fields(&[Field::Character])
                            .map_err(Defect::Template)
                    })
                },
            )?,
            follow_ups: Table::build("follow_ups", None, raw.follow_ups, non_blank)?,
            labels: raw.labels,
        })
    }
}

impl StrategySection {
    pub fn parse_ron(input: &str) -> Result<StrategySection, CatalogError> {
        let raw: RawStrategy = ron::from_str(input)?;
        require("aida", "-", &raw.aida)?;
        Ok(StrategySection {
            strategies: Table::build("strategies", None, raw.strategies, non_blank)?,
            triggers: Table::build("triggers", None, raw.triggers, non_blank)?,
            patterns: Table::build("patterns", None, raw.patterns, pattern_template)?,
            aida: raw.aida,
        })
    }
}

/// The full, validated fragment catalog. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    content: ContentSection,
    story: StorySection,
    strategy: StrategySection,
}

impl Catalog {
    /// The dental-clinic catalog compiled into the crate.
    pub fn builtin() -> Result<Catalog, CatalogError> {
        Self::from_sources(BUILTIN_CONTENT, BUILTIN_STORY, BUILTIN_STRATEGY)
    }

    /// Load `content.ron`, `story.ron`, and `strategy.ron` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Catalog, CatalogError> {
        let content = std::fs::read_to_string(dir.join("content.ron"))?;
        let story = std::fs::read_to_string(dir.join("story.ron"))?;
        let strategy = std::fs::read_to_string(dir.join("strategy.ron"))?;
        debug!(dir = %dir.display(), "loading catalog from directory");
        Self::from_sources(&content, &story, &strategy)
    }

    pub fn from_sources(content: &str, story: &str, strategy: &str) -> Result<Catalog, CatalogError> {
        let catalog = Catalog {
            content: ContentSection::parse_ron(content)?,
            story: StorySection::parse_ron(story)?,
            strategy: StrategySection::parse_ron(strategy)?,
        };
        debug!(
            first_meeting = catalog.story.first_meeting.len(),
            patterns = LinguisticPattern::ALL.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn content(&self) -> &ContentSection {
        &self.content
    }

    pub fn story(&self) -> &StorySection {
        &self.story
    }

    pub fn strategy(&self) -> &StrategySection {
        &self.strategy
    }
}
