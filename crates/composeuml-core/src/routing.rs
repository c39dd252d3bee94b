//! Reverse-proxy routing rules declared through service labels.
//!
//! Traefik v1 style keys are recognized (`traefik.frontend.rule`,
//! `traefik.<segment>.frontend.rule`) together with the proxy-neutral `routing.` spelling
//! (`routing.frontend.rule`, `routing.<segment>.frontend.rule`, `routing.rule`,
//! `routing.<segment>.rule`).

use crate::document::ComposeDocument;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};

/// Segment used when a rule key names no segment.
pub const DEFAULT_SEGMENT: &str = " ";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoutingRule {
    pub component: String,
    pub rule: String,
    pub segment: String,
}

fn rule_key_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:(?:traefik|routing)\.(?:(?P<segment>[^.]+)\.)?frontend\.rule|routing\.(?:(?P<short>[^.]+)\.)?rule)$",
        )
        .expect("valid regex")
    })
}

/// Matches a label key against the routing-rule shape.
///
/// Returns `None` when the key is not a rule key, `Some(None)` for an unsegmented rule key and
/// `Some(Some(segment))` otherwise.
pub fn match_rule_key(key: &str) -> Option<Option<&str>> {
    let caps = rule_key_regex().captures(key)?;
    let segment = caps.name("segment").or_else(|| caps.name("short"));
    Some(segment.map(|m| m.as_str()))
}

/// Every routing rule declared in the document, in document order.
pub fn rules(doc: &ComposeDocument) -> Vec<RoutingRule> {
    let mut out = Vec::new();
    for (component, spec) in &doc.components {
        let Some(labels) = spec.labels.as_ref() else {
            continue;
        };
        for (key, value) in labels {
            let Some(segment) = match_rule_key(key) else {
                continue;
            };
            tracing::trace!(component = %component, key = %key, rule = %value, "routing rule");
            out.push(RoutingRule {
                component: component.clone(),
                rule: value.clone(),
                segment: segment.unwrap_or(DEFAULT_SEGMENT).to_string(),
            });
        }
    }
    out
}

/// De-duplicated rule expressions and their `(component, segment)` fan-out.
///
/// Rule ids are positions in the lexicographically sorted list of distinct expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleIndex {
    rules: Vec<String>,
    connections: Vec<(usize, (String, String))>,
    services: BTreeSet<String>,
}

impl RuleIndex {
    pub fn build(doc: &ComposeDocument) -> Self {
        let extracted = rules(doc);

        let distinct: BTreeSet<&str> = extracted.iter().map(|r| r.rule.as_str()).collect();
        let rules: Vec<String> = distinct.into_iter().map(str::to_string).collect();
        let position: HashMap<&str, usize> = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (rule.as_str(), i))
            .collect();

        let mut seen = BTreeSet::new();
        let mut connections = Vec::new();
        let mut services = BTreeSet::new();
        for rule in &extracted {
            services.insert(rule.component.clone());
            let index = position[rule.rule.as_str()];
            let destination = (rule.component.clone(), rule.segment.clone());
            if seen.insert((index, destination.clone())) {
                connections.push((index, destination));
            }
        }

        tracing::debug!(
            rules = rules.len(),
            connections = connections.len(),
            "built routing rule index"
        );

        Self {
            rules,
            connections,
            services,
        }
    }

    pub fn has_rule(&self, component: &str) -> bool {
        self.services.contains(component)
    }

    /// Distinct rule expressions; the position is the rule id.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// `(rule id, (component, segment))` edges.
    pub fn connections(&self) -> &[(usize, (String, String))] {
        &self.connections
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
