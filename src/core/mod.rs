pub mod catalog;
pub mod compose;
pub mod config;
pub mod engine;
pub mod markup;
pub mod resolver;
pub mod selectors;
pub mod template;
pub mod trust;
