/// The engine facade: pairs a validated catalog with configuration and
/// exposes every generation operation over a `Context`.
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::catalog::{
    Catalog, CatalogError, DecisionPoint, Pacing, Strategy, TrustProof, Understanding,
    ValueProposition,
};
use crate::core::compose;
use crate::core::config::{ConfigError, EngineConfig, FallbackPolicy};
use crate::core::markup::{escape_markup, GeneratedDocument};
use crate::core::resolver::{resolve_key, story_length, Axes, UnknownAxis};
use crate::core::selectors::{self, AidaPlan};
use crate::core::trust;
use crate::schema::context::{Context, ValidationError};
use crate::schema::relationship::{RelationshipStage, TrustScores};
use crate::schema::strategy::{EmotionalTrigger, LinguisticPattern};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    UnknownAxis(#[from] UnknownAxis),
}

/// The five-step body of a hook/story/offer message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustProcess<'a> {
    pub pacing: &'a Pacing,
    pub understanding: &'a Understanding,
    pub decision: &'a DecisionPoint,
    pub value: &'a ValueProposition,
    pub trust: &'a TrustProof,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HookStoryOffer<'a> {
    pub hook: &'a str,
    pub story: TrustProcess<'a>,
    pub offer: &'a str,
    /// How each axis was resolved, so callers can spot fallbacks.
    pub axes: Axes,
}

/// Everything the integrated content operation derives from one context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPlan<'a> {
    pub title: String,
    pub hook_story_offer: HookStoryOffer<'a>,
    pub relationship_stage: RelationshipStage,
    pub strategy: &'a Strategy,
    pub aida: AidaPlan<'a>,
    pub emotional_trigger: EmotionalTrigger,
    pub linguistic_pattern: LinguisticPattern,
    pub document: GeneratedDocument,
}

/// The top-level marketing engine. Built via `MarketingEngine::builder()`.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone)]
pub struct MarketingEngine {
    catalog: Catalog,
    config: EngineConfig,
}

/// Builder for constructing a `MarketingEngine`.
#[derive(Debug, Default)]
pub struct MarketingEngineBuilder {
    config: Option<EngineConfig>,
    config_path: Option<PathBuf>,
    fallback: Option<FallbackPolicy>,
    catalog_dir: Option<PathBuf>,
    /// Directly provided catalog (for testing without files).
    catalog: Option<Catalog>,
}

impl MarketingEngine {
    pub fn builder() -> MarketingEngineBuilder {
        MarketingEngineBuilder::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve every axis of a context under the configured policy.
    pub fn axes(&self, ctx: &Context) -> Result<Axes, EngineError> {
        Ok(Axes::from_context(ctx, self.config.fallback)?)
    }

    /// Advertising headline with the clinic and director names filled in.
    pub fn generate_ad_title(&self, ctx: &Context) -> Result<String, EngineError> {
        ctx.require_names()?;
        let axes = self.axes(ctx)?;
        Ok(selectors::title(
            &self.catalog,
            &axes,
            &ctx.clinic_name,
            &ctx.director_name,
        ))
    }

    pub fn hook_story_offer(&self, ctx: &Context) -> Result<HookStoryOffer<'_>, EngineError> {
        let axes = self.axes(ctx)?;
        Ok(self.hook_story_offer_for(axes))
    }

    fn hook_story_offer_for(&self, axes: Axes) -> HookStoryOffer<'_> {
        let catalog = &self.catalog;
        let level = axes.level();
        HookStoryOffer {
            hook: selectors::hook(catalog, &axes).fragment,
            story: TrustProcess {
                pacing: selectors::pacing(catalog, level),
                understanding: selectors::understanding(catalog, level),
                decision: selectors::decision_point(catalog, level),
                value: selectors::value_proposition(catalog, level),
                trust: selectors::trust_proof(catalog, level),
            },
            offer: selectors::offer(catalog, level),
            axes,
        }
    }

    pub fn relationship_stage(&self, scores: &TrustScores) -> Result<RelationshipStage, EngineError> {
        Ok(trust::stage(scores)?)
    }

    pub fn strategy_for(&self, stage: RelationshipStage) -> &Strategy {
        selectors::strategy_for_stage(&self.catalog, stage)
    }

    /// The five hashtags for the context's (level, type) pair.
    pub fn hashtags(&self, ctx: &Context) -> Result<&[String], EngineError> {
        let axes = self.axes(ctx)?;
        Ok(selectors::hashtags(&self.catalog, &axes))
    }

    /// Structured persuasive content. Needs no trust scores.
    pub fn assemble_content(&self, ctx: &Context) -> Result<GeneratedDocument, EngineError> {
        let axes = self.axes(ctx)?;
        Ok(compose::assemble_content(&self.catalog, &self.config.palette, &axes))
    }

    /// Integrated content: title, hook/story/offer, relationship stage and
    /// strategy, AIDA plan, trigger, pattern, and the rendered document.
    pub fn plan_content(&self, ctx: &Context) -> Result<ContentPlan<'_>, EngineError> {
        ctx.require_names()?;
        let axes = self.axes(ctx)?;
        let relationship_stage = trust::stage(&ctx.trust_scores)?;
        debug!(stage = %relationship_stage, "relationship stage derived");

        let content_type = axes.content_type();
        let title = selectors::title(&self.catalog, &axes, &ctx.clinic_name, &ctx.director_name);
        let document = compose::assemble_content(&self.catalog, &self.config.palette, &axes);
        let hook_story_offer = self.hook_story_offer_for(axes);
        Ok(ContentPlan {
            title,
            aida: selectors::aida(&self.catalog, hook_story_offer.hook),
            hook_story_offer,
            relationship_stage,
            strategy: self.strategy_for(relationship_stage),
            emotional_trigger: selectors::emotional_trigger(content_type),
            linguistic_pattern: selectors::linguistic_pattern(content_type),
            document,
        })
    }

    /// Narrative content; elaboration depends on the context's length.
    pub fn assemble_story(&self, ctx: &Context) -> Result<GeneratedDocument, EngineError> {
        ctx.require_clinic()?;
        let axes = self.axes(ctx)?;
        let length = story_length(ctx, self.config.fallback)?;
        Ok(compose::assemble_story(
            &self.catalog,
            &self.config.palette,
            &axes,
            length.value(),
            &ctx.clinic_name,
        ))
    }

    /// Prefix `text` with a trigger's lead phrase. Unrecognized triggers
    /// fall back to `trust` unless the policy is strict.
    pub fn apply_emotional_trigger(&self, text: &str, trigger: &str) -> Result<String, EngineError> {
        let trigger = resolve_key(Some(trigger), EmotionalTrigger::Trust, self.config.fallback)?;
        Ok(selectors::apply_emotional_trigger(
            &self.catalog,
            &escape_markup(text),
            trigger.value(),
        ))
    }

    /// Wrap `text` in a pattern's template. Unrecognized patterns leave the
    /// text unchanged unless the policy is strict.
    pub fn apply_linguistic_pattern(&self, text: &str, pattern: &str) -> Result<String, EngineError> {
        let text = escape_markup(text);
        let pattern = resolve_key(Some(pattern), LinguisticPattern::Pacing, self.config.fallback)?;
        if !pattern.is_found() {
            return Ok(text);
        }
        Ok(selectors::apply_linguistic_pattern(&self.catalog, &text, pattern.value()))
    }
}

impl MarketingEngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from a RON file at build time.
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Override the fallback policy of whichever configuration is used.
    pub fn fallback(mut self, policy: FallbackPolicy) -> Self {
        self.fallback = Some(policy);
        self
    }

    /// Load the catalog from a directory instead of the built-in one.
    pub fn catalog_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.catalog_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Provide a catalog directly (for testing without files).
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn build(self) -> Result<MarketingEngine, EngineError> {
        let mut config = match (self.config, self.config_path) {
            (Some(config), _) => {
                config.palette.validate()?;
                config
            }
            (None, Some(path)) => EngineConfig::load_from_ron(&path)?,
            (None, None) => EngineConfig::default(),
        };
        if let Some(policy) = self.fallback {
            config.fallback = policy;
        }

        let catalog = match (self.catalog, self.catalog_dir) {
            (Some(catalog), _) => catalog,
            (None, Some(dir)) => Catalog::load_from_dir(&dir)?,
            (None, None) => Catalog::builtin()?,
        };

        debug!(fallback = ?config.fallback, "marketing engine built");
        Ok(MarketingEngine { catalog, config })
    }
}
