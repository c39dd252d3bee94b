#![forbid(unsafe_code)]

//! docker-compose document model and relationship extraction (headless).
//!
//! Pipeline:
//! - [`parse_document`] / [`normalize`]: YAML tree to a canonical [`ComposeDocument`]
//! - [`facts`]: links, dependencies, ports, volume usages, labels
//! - [`routing`]: label-declared reverse-proxy rules and their de-duplicated index
//!
//! Everything here is pure; output ordering is left to the renderers, which sort.

pub mod config;
pub mod document;
pub mod error;
pub mod facts;
pub mod routing;

pub use config::SchemaPolicy;
pub use document::{ComponentSpec, ComposeDocument, Labels, normalize, parse_document};
pub use error::{Error, Result};
pub use facts::{PortMapping, Relation, VolumeUsage};
pub use routing::{RoutingRule, RuleIndex};

#[cfg(test)]
mod tests;
