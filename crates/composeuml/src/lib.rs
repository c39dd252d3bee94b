#![forbid(unsafe_code)]

//! `composeuml` turns docker-compose documents into PlantUML component diagrams.
//!
//! # Features
//!
//! - `render` (default): the link-graph and boundary renderers plus [`render::Translator`]

pub use composeuml_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use composeuml_render::boundaries::BoundaryOptions;
    pub use composeuml_render::{STYLE_DIRECTIVE, render_boundaries, render_link_graph};

    use composeuml_core::{ComposeDocument, SchemaPolicy};

    /// Which diagrams to emit for a document.
    ///
    /// Every enabled view contributes one diagram, in field order. `notes` and `group` apply to
    /// all boundary views.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Views {
        pub link_graph: bool,
        pub boundaries: bool,
        pub port_boundaries: bool,
        pub volume_boundaries: bool,
        pub routing_boundaries: bool,
        pub notes: bool,
        pub group: bool,
    }

    impl Views {
        pub fn is_empty(&self) -> bool {
            !(self.link_graph
                || self.boundaries
                || self.port_boundaries
                || self.volume_boundaries
                || self.routing_boundaries)
        }

        fn boundary_views(&self) -> impl Iterator<Item = BoundaryOptions> + '_ {
            [
                (self.boundaries, BoundaryOptions::default()),
                (self.port_boundaries, BoundaryOptions::ports_only()),
                (self.volume_boundaries, BoundaryOptions::volumes_only()),
                (self.routing_boundaries, BoundaryOptions::routing_only()),
            ]
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, options)| options.with_notes(self.notes).with_group(self.group))
        }
    }

    /// Parses compose text under a [`SchemaPolicy`] and renders the selected [`Views`].
    #[derive(Debug, Clone, Default)]
    pub struct Translator {
        views: Views,
        policy: SchemaPolicy,
    }

    impl Translator {
        pub fn new(views: Views) -> Self {
            Self {
                views,
                policy: SchemaPolicy::default(),
            }
        }

        pub fn with_policy(mut self, policy: SchemaPolicy) -> Self {
            self.policy = policy;
            self
        }

        pub fn views(&self) -> &Views {
            &self.views
        }

        pub fn policy(&self) -> &SchemaPolicy {
            &self.policy
        }

        pub fn translate(&self, text: &str) -> composeuml_core::Result<String> {
            let doc = composeuml_core::parse_document(text, &self.policy)?;
            Ok(self.translate_document(&doc))
        }

        /// Renders every enabled view and joins the diagrams with a newline.
        ///
        /// No enabled view yields an empty string.
        pub fn translate_document(&self, doc: &ComposeDocument) -> String {
            let mut diagrams = Vec::new();
            if self.views.link_graph {
                diagrams.push(render_link_graph(doc, self.views.notes));
            }
            for options in self.views.boundary_views() {
                diagrams.push(render_boundaries(doc, &options));
            }
            tracing::debug!(diagrams = diagrams.len(), "translated compose document");
            diagrams.join("\n")
        }
    }

    /// Convenience wrapper around [`Translator::translate`] with the lenient schema policy.
    pub fn translate(text: &str, views: &Views) -> composeuml_core::Result<String> {
        Translator::new(*views).translate(text)
    }
}
