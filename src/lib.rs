//! Marketing Engine: deterministic copy generation for clinics.
//!
//! Selects pre-authored fragments from a catalog indexed by permission level,
//! content type, relationship stage, and story length, then assembles them
//! into titles, hook/story/offer structures, and styled markup documents.
//! Identical inputs always produce identical output.

pub mod core;
pub mod schema;

pub use crate::core::catalog::Catalog;
pub use crate::core::config::{EngineConfig, FallbackPolicy, Palette};
pub use crate::core::engine::{EngineError, MarketingEngine, MarketingEngineBuilder};
pub use crate::core::markup::GeneratedDocument;
pub use crate::schema::context::Context;
