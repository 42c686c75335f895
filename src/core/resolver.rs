/// Axis resolution: turns raw context keys into typed axis values, recording
/// whether each value was found or substituted with its default.
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use super::catalog::Grid;
use super::config::FallbackPolicy;
use crate::schema::axis::{AxisKey, ContentType, PermissionLevel, StoryLength};
use crate::schema::context::{Context, Variant};

/// A present axis value that matches no known key. Only raised under
/// `FallbackPolicy::Strict`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {axis} '{value}'")]
pub struct UnknownAxis {
    pub axis: &'static str,
    pub value: String,
}

/// Outcome of resolving one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolved<K> {
    /// The requested key was recognized.
    Found(K),
    /// The default was used. `requested` is `None` when no key was given.
    DefaultedFrom { requested: Option<String>, value: K },
}

impl<K: Copy> Resolved<K> {
    pub fn value(&self) -> K {
        match self {
            Resolved::Found(k) => *k,
            Resolved::DefaultedFrom { value, .. } => *value,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolved::Found(_))
    }
}

/// Resolve one raw key against axis `K`.
///
/// Keys match exactly. Absent and blank keys default silently under either
/// policy; anything else unrecognized defaults with a warning, or fails under
/// `Strict`.
pub fn resolve_key<K: AxisKey>(
    raw: Option<&str>,
    default: K,
    policy: FallbackPolicy,
) -> Result<Resolved<K>, UnknownAxis> {
    let requested = match raw {
        Some(r) if !r.trim().is_empty() => r,
        _ => {
            return Ok(Resolved::DefaultedFrom {
                requested: None,
                value: default,
            })
        }
    };
    if let Some(key) = K::parse(requested) {
        return Ok(Resolved::Found(key));
    }
    match policy {
        FallbackPolicy::Strict => Err(UnknownAxis {
            axis: K::AXIS,
            value: requested.to_string(),
        }),
        FallbackPolicy::Lenient => {
            warn!(
                axis = K::AXIS,
                value = %requested,
                default = default.key(),
                "unrecognized axis value, using default"
            );
            Ok(Resolved::DefaultedFrom {
                requested: Some(requested.to_string()),
                value: default,
            })
        }
    }
}

/// Every selection axis of a context, resolved once per operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axes {
    pub level: Resolved<PermissionLevel>,
    pub content_type: Resolved<ContentType>,
    pub variant: Variant,
}

impl Axes {
    pub fn from_context(ctx: &Context, policy: FallbackPolicy) -> Result<Axes, UnknownAxis> {
        Ok(Axes {
            level: resolve_key(ctx.permission_level.as_deref(), PermissionLevel::default(), policy)?,
            content_type: resolve_key(ctx.content_type.as_deref(), ContentType::default(), policy)?,
            variant: ctx.variant,
        })
    }

    /// Axes for an explicit, already-typed selection.
    pub fn exact(level: PermissionLevel, content_type: ContentType) -> Axes {
        Axes {
            level: Resolved::Found(level),
            content_type: Resolved::Found(content_type),
            variant: Variant::default(),
        }
    }

    pub fn level(&self) -> PermissionLevel {
        self.level.value()
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type.value()
    }
}

/// Story length is read only by narrative content, so it is resolved apart
/// from `Axes`.
pub fn story_length(
    ctx: &Context,
    policy: FallbackPolicy,
) -> Result<Resolved<StoryLength>, UnknownAxis> {
    resolve_key(ctx.length.as_deref(), StoryLength::default(), policy)
}

/// A fragment together with how its (level, type) cell was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a, T> {
    pub fragment: &'a T,
    pub level: Resolved<PermissionLevel>,
    pub content_type: Resolved<ContentType>,
}

impl<'a, T> Resolution<'a, T> {
    /// True when neither axis fell back to its default.
    pub fn is_exact(&self) -> bool {
        self.level.is_found() && self.content_type.is_found()
    }
}

/// Look up the (level, type) cell of a grid.
pub fn resolve<'a, T>(grid: &'a Grid<T>, axes: &Axes) -> Resolution<'a, T> {
    Resolution {
        fragment: grid.get(axes.level()).get(axes.content_type()),
        level: axes.level.clone(),
        content_type: axes.content_type.clone(),
    }
}

/// Look up a list cell and pick one alternative by the variant, wrapping
/// cyclically.
pub fn resolve_variant<'a>(grid: &'a Grid<Vec<String>>, axes: &Axes) -> Resolution<'a, String> {
    let cell = resolve(grid, axes);
    let alternatives = cell.fragment;
    Resolution {
        fragment: &alternatives[axes.variant.index(alternatives.len())],
        level: cell.level,
        content_type: cell.content_type,
    }
}
