//! Markup for the routing rule index.
//!
//! Rules become `interface` nodes shared by every service using them; each
//! `(service, segment)` pair gets its own `~~0` edge.

use composeuml_core::RuleIndex;

/// Package name used when rule declarations are grouped.
pub const RULE_GROUP: &str = "Traefik";

pub fn rule_id(index: usize) -> String {
    format!("traefik_rule_{index}")
}

pub fn rule_declarations(index: &RuleIndex) -> Vec<String> {
    index
        .rules()
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("interface \"{rule}\" as {}", rule_id(i)))
        .collect()
}

/// Edge lines sorted by their text, not by rule id.
pub fn rule_connections(index: &RuleIndex) -> Vec<String> {
    let mut lines: Vec<String> = index
        .connections()
        .iter()
        .map(|(i, (component, segment))| {
            format!("{} ~~0 [{component}] : \"{segment}\"", rule_id(*i))
        })
        .collect();
    lines.sort();
    lines
}

/// Declarations followed by edges, one per line. With `group`, declarations are wrapped in a
/// `package Traefik { ... }` block when there is at least one rule.
pub fn render_rules(index: &RuleIndex, group: bool) -> String {
    let declarations = rule_declarations(index);
    let mut lines = Vec::with_capacity(declarations.len() + index.connections().len() + 2);
    if group && !declarations.is_empty() {
        lines.push(format!("package {RULE_GROUP} {{"));
        lines.extend(declarations);
        lines.push("}".to_string());
    } else {
        lines.extend(declarations);
    }
    lines.extend(rule_connections(index));
    lines.join("\n")
}
