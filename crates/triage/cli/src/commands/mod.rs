//! CLI command implementations

pub mod demo;
pub mod evaluate;
pub mod generate;
pub mod rules;
