//! System boundary view.
//!
//! Only services that touch the outside world are drawn inside `cloud system { ... }`: those
//! publishing ports, mounting named volumes or bind mounts, or exposed through routing rules.
//! Shared `(volume, path)` pairs collapse into a single `volume_N` node.

use crate::markup::{STYLE_DIRECTIVE, group, strip_slashes, write_note};
use crate::routing::render_rules;
use composeuml_core::{ComposeDocument, RuleIndex, facts};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryOptions {
    pub ports: bool,
    pub volumes: bool,
    pub routing: bool,
    pub notes: bool,
    pub group: bool,
}

impl Default for BoundaryOptions {
    fn default() -> Self {
        Self {
            ports: true,
            volumes: true,
            routing: true,
            notes: false,
            group: false,
        }
    }
}

impl BoundaryOptions {
    pub fn ports_only() -> Self {
        Self {
            volumes: false,
            routing: false,
            ..Self::default()
        }
    }

    pub fn volumes_only() -> Self {
        Self {
            ports: false,
            routing: false,
            ..Self::default()
        }
    }

    pub fn routing_only() -> Self {
        Self {
            ports: false,
            volumes: false,
            ..Self::default()
        }
    }

    pub fn with_notes(mut self, notes: bool) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_group(mut self, group: bool) -> Self {
        self.group = group;
        self
    }
}

/// Assigns `volume_N` ids to `(volume, path)` pairs in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct VolumeRegistry {
    ids: IndexMap<String, String>,
}

impl VolumeRegistry {
    /// Registers the pair and returns its new id, or `None` if it was already known.
    pub fn register(&mut self, volume: &str, path: &str) -> Option<&str> {
        let key = facts::volume_identifier(volume, path);
        if self.ids.contains_key(&key) {
            return None;
        }
        let id = format!("volume_{}", self.ids.len() + 1);
        let (index, _) = self.ids.insert_full(key, id);
        self.ids.get_index(index).map(|(_, id)| id.as_str())
    }

    pub fn get(&self, volume: &str, path: &str) -> Option<&str> {
        self.ids
            .get(&facts::volume_identifier(volume, path))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn is_relevant(
    doc: &ComposeDocument,
    rules: &RuleIndex,
    component: &str,
    options: &BoundaryOptions,
) -> bool {
    (options.ports && facts::has_service_external_ports(doc, component))
        || (options.volumes && facts::has_service_volumes(doc, component))
        || (options.routing && rules.has_rule(component))
}

/// `database` blocks for every used volume, registering each distinct path on the way.
fn volume_declarations(
    doc: &ComposeDocument,
    volumes: &[String],
    registry: &mut VolumeRegistry,
) -> String {
    let mut out = String::new();
    for volume in volumes {
        if !facts::is_volume_used(doc, volume) {
            continue;
        }
        let _ = writeln!(out, "database {volume} {{");
        let mut paths = facts::volume_usage(doc, volume);
        paths.sort();
        for path in &paths {
            if let Some(id) = registry.register(volume, path) {
                let _ = writeln!(out, "  [{path}] as {id}");
            }
        }
        out.push_str("}\n");
    }
    out
}

/// Returns `(interface declarations, edges)` for all published ports.
fn port_declarations(doc: &ComposeDocument) -> (String, String) {
    let mut ports = facts::ports(doc);
    ports.sort();

    let mut declared = HashSet::new();
    let mut interfaces = String::new();
    let mut edges = String::new();
    for port in &ports {
        let target = match &port.container {
            Some(container) => format!("{} : {container}", port.host),
            None => port.host.clone(),
        };
        let host = strip_slashes(&port.host);
        let _ = writeln!(edges, "[{}] --> {}", port.service, strip_slashes(&target));
        if declared.insert(host.clone()) {
            let _ = writeln!(interfaces, "interface {host}");
        }
    }
    (interfaces, edges)
}

pub fn render_boundaries(doc: &ComposeDocument, options: &BoundaryOptions) -> String {
    let rules = RuleIndex::build(doc);

    let mut out = String::new();
    let _ = writeln!(out, "{STYLE_DIRECTIVE}");

    out.push_str("cloud system {\n");
    let mut relevant = 0usize;
    for component in doc.sorted_components() {
        if !is_relevant(doc, &rules, component, options) {
            continue;
        }
        relevant += 1;
        let _ = writeln!(out, "  [{component}]");
        if !options.notes {
            continue;
        }
        if let Some(labels) = facts::labels(doc, component).filter(|l| !l.is_empty()) {
            write_note(&mut out, "  ", component, labels);
        }
    }
    out.push_str("}\n");

    let mut volumes = facts::volumes(doc);
    volumes.sort();
    let mut registry = VolumeRegistry::default();

    if options.volumes {
        let declarations = volume_declarations(doc, &volumes, &mut registry);
        if options.group {
            out.push_str(&group("volumes", &declarations));
        } else {
            out.push_str(&declarations);
        }
    }

    if options.ports {
        let (interfaces, edges) = port_declarations(doc);
        if options.group {
            out.push_str(&group("ports", &interfaces));
        } else {
            out.push_str(&interfaces);
        }
        out.push_str(&edges);
    }

    if options.volumes {
        for volume in &volumes {
            let mut users = facts::service_using_path(doc, volume);
            users.sort();
            for (service, path) in &users {
                let target = registry.get(volume, path).unwrap_or(path.as_str());
                let _ = writeln!(out, "[{service}] --> {target}");
            }
        }
    }

    if options.routing {
        out.push_str(&render_rules(&rules, options.group));
    }

    tracing::debug!(
        relevant,
        volume_nodes = registry.len(),
        rules = rules.rules().len(),
        "rendered system boundaries"
    );

    out.trim().to_string()
}
