use crate::markup::{STYLE_DIRECTIVE, write_note};
use composeuml_core::{ComposeDocument, facts};
use std::fmt::Write as _;

/// Renders every service, its links (`-->`) and its dependencies (`..>`).
///
/// With `notes`, services carrying labels get a note listing them.
pub fn render_link_graph(doc: &ComposeDocument, notes: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{STYLE_DIRECTIVE}");

    let components = doc.sorted_components();
    for component in &components {
        let _ = writeln!(out, "[{component}]");
    }

    let mut links = facts::links(doc);
    links.sort();
    for link in &links {
        let _ = writeln!(out, "[{}] --> [{}]", link.source, link.target);
    }

    let mut dependencies = facts::dependencies(doc);
    dependencies.sort();
    for dependency in &dependencies {
        let _ = writeln!(
            out,
            "[{}] ..> [{}] : depends on",
            dependency.source, dependency.target
        );
    }

    if notes {
        for component in &components {
            if let Some(labels) = facts::labels(doc, component).filter(|l| !l.is_empty()) {
                write_note(&mut out, "", component, labels);
            }
        }
    }

    tracing::debug!(
        components = components.len(),
        links = links.len(),
        dependencies = dependencies.len(),
        "rendered link graph"
    );

    out.trim().to_string()
}
