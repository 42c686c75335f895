pub mod axis;
pub mod context;
pub mod relationship;
pub mod strategy;
