#![forbid(unsafe_code)]

//! PlantUML renderers for docker-compose documents.
//!
//! Two views are available, both pure functions of a normalized [`ComposeDocument`]:
//! - [`render_link_graph`]: every service with its links and `depends_on` edges
//! - [`render_boundaries`]: externally relevant services with their ports, shared volumes and
//!   routing rules
//!
//! All iteration is sort-derived so the same document always yields the same text.
//!
//! [`ComposeDocument`]: composeuml_core::ComposeDocument

pub mod boundaries;
pub mod link_graph;
pub mod markup;
pub mod routing;

pub use boundaries::{BoundaryOptions, VolumeRegistry, render_boundaries};
pub use link_graph::render_link_graph;
pub use markup::STYLE_DIRECTIVE;
pub use routing::render_rules;
