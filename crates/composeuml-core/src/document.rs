//! Canonical view of a compose document.
//!
//! Compose files come in two shapes: the legacy flat shape where every top-level key is a
//! service, and the versioned shape (`version: "2"`) where services live under `services:` and
//! named volumes under `volumes:`. [`normalize`] folds both into one [`ComposeDocument`] so the
//! extractors never look at the raw tree again.

use crate::config::SchemaPolicy;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

/// Label map of one service, in declared order.
pub type Labels = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentSpec {
    /// Raw link targets; an alias may still be attached after a colon.
    pub links: Vec<String>,
    pub depends_on: Vec<String>,
    /// Raw port text (`"80"`, `"8080:80"`, `"8080-8081:80-81"`, ...).
    pub ports: Vec<String>,
    /// Raw mount text (`"data:/var/lib/data"`, `"/host:/container"`, ...).
    pub volumes: Vec<String>,
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeDocument {
    /// Text of the `version` marker, if the document carries one.
    pub version: Option<String>,
    pub components: IndexMap<String, ComponentSpec>,
    /// Names declared under the top-level `volumes:` key (versioned shape only).
    pub volumes: Vec<String>,
}

impl ComposeDocument {
    pub fn is_versioned(&self) -> bool {
        self.version.is_some()
    }

    /// Component names in declared order.
    pub fn components(&self) -> impl Iterator<Item = &str> + '_ {
        self.components.keys().map(String::as_str)
    }

    pub fn sorted_components(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components().collect();
        names.sort_unstable();
        names
    }

    pub fn component(&self, name: &str) -> Option<&ComponentSpec> {
        self.components.get(name)
    }
}

/// Parses compose YAML text and normalizes it.
pub fn parse_document(text: &str, policy: &SchemaPolicy) -> Result<ComposeDocument> {
    let mut tree: Value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(text)?
    };
    tree.apply_merge()?;
    normalize(&tree, policy)
}

/// Normalizes an already parsed YAML tree into a [`ComposeDocument`].
pub fn normalize(tree: &Value, policy: &SchemaPolicy) -> Result<ComposeDocument> {
    let empty = Mapping::new();
    let root = match tree {
        Value::Null => &empty,
        Value::Mapping(map) => map,
        other => {
            return Err(Error::InvalidDocument {
                message: format!("top level should be a mapping. Got {}", describe(other)),
            });
        }
    };

    let version = match root.get("version") {
        None => None,
        Some(Value::Null) => Some(String::new()),
        Some(v) => Some(scalar_text(v).ok_or_else(|| Error::InvalidDocument {
            message: format!("`version` should be a scalar. Got {}", describe(v)),
        })?),
    };
    policy.check(version.as_deref())?;

    let services = if version.is_some() {
        section(root, "services")?.unwrap_or(&empty)
    } else {
        root
    };

    let mut components = IndexMap::with_capacity(services.len());
    for (key, value) in services {
        let name = scalar_text(key).ok_or_else(|| Error::InvalidDocument {
            message: format!("service names should be scalars. Got {}", describe(key)),
        })?;
        let spec = normalize_component(&name, value)?;
        components.insert(name, spec);
    }

    let mut volumes = Vec::new();
    if version.is_some() {
        if let Some(declared) = section(root, "volumes")? {
            for key in declared.keys() {
                volumes.push(scalar_text(key).ok_or_else(|| Error::InvalidDocument {
                    message: format!("volume names should be scalars. Got {}", describe(key)),
                })?);
            }
        }
    }

    tracing::debug!(
        components = components.len(),
        volumes = volumes.len(),
        versioned = version.is_some(),
        "normalized compose document"
    );

    Ok(ComposeDocument {
        version,
        components,
        volumes,
    })
}

fn section<'a>(root: &'a Mapping, key: &str) -> Result<Option<&'a Mapping>> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Mapping(map)) => Ok(Some(map)),
        Some(other) => Err(Error::InvalidDocument {
            message: format!("`{key}:` should be a mapping. Got {}", describe(other)),
        }),
    }
}

fn normalize_component(name: &str, value: &Value) -> Result<ComponentSpec> {
    let spec = match value {
        Value::Null => return Ok(ComponentSpec::default()),
        Value::Mapping(map) => map,
        other => {
            return Err(Error::InvalidComponent {
                component: name.to_string(),
                found: describe(other),
            });
        }
    };

    let labels = match spec.get("labels") {
        None | Some(Value::Null) => None,
        Some(v) => Some(normalize_labels(name, v)?),
    };

    Ok(ComponentSpec {
        links: string_entries(name, spec, "links")?,
        depends_on: dependency_names(name, spec)?,
        ports: port_entries(name, spec)?,
        volumes: volume_entries(name, spec)?,
        labels,
    })
}

fn sequence<'a>(component: &str, spec: &'a Mapping, field: &'static str) -> Result<&'a [Value]> {
    match spec.get(field) {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Sequence(items)) => Ok(items.as_slice()),
        Some(other) => Err(Error::InvalidField {
            component: component.to_string(),
            field,
            expected: "a list",
            found: describe(other),
        }),
    }
}

fn string_entries(component: &str, spec: &Mapping, field: &'static str) -> Result<Vec<String>> {
    sequence(component, spec, field)?
        .iter()
        .map(|item| {
            scalar_text(item).ok_or_else(|| Error::InvalidField {
                component: component.to_string(),
                field,
                expected: "a list of strings",
                found: describe(item),
            })
        })
        .collect()
}

fn dependency_names(component: &str, spec: &Mapping) -> Result<Vec<String>> {
    // Long form: `depends_on: {db: {condition: service_healthy}}`.
    if let Some(Value::Mapping(map)) = spec.get("depends_on") {
        return map
            .keys()
            .map(|key| {
                scalar_text(key).ok_or_else(|| Error::InvalidField {
                    component: component.to_string(),
                    field: "depends_on",
                    expected: "a list or a mapping of service names",
                    found: describe(key),
                })
            })
            .collect();
    }
    string_entries(component, spec, "depends_on")
}

#[derive(Debug, Deserialize)]
struct LongPort {
    target: Value,
    #[serde(default)]
    published: Value,
}

#[derive(Debug, Deserialize)]
struct LongVolume {
    #[serde(default)]
    source: Option<String>,
    target: String,
}

fn port_entries(component: &str, spec: &Mapping) -> Result<Vec<String>> {
    let invalid = |found: &Value| Error::InvalidField {
        component: component.to_string(),
        field: "ports",
        expected: "a list of port specs",
        found: describe(found),
    };

    let mut out = Vec::new();
    for item in sequence(component, spec, "ports")? {
        if let Some(text) = scalar_text(item) {
            out.push(text);
            continue;
        }
        if !item.is_mapping() {
            return Err(invalid(item));
        }
        let long: LongPort = serde_yaml::from_value(item.clone()).map_err(|_| invalid(item))?;
        let target = scalar_text(&long.target).ok_or_else(|| invalid(item))?;
        match scalar_text(&long.published) {
            Some(published) => out.push(format!("{published}:{target}")),
            None => out.push(target),
        }
    }
    Ok(out)
}

fn volume_entries(component: &str, spec: &Mapping) -> Result<Vec<String>> {
    let invalid = |found: &Value| Error::InvalidField {
        component: component.to_string(),
        field: "volumes",
        expected: "a list of mount specs",
        found: describe(found),
    };

    let mut out = Vec::new();
    for item in sequence(component, spec, "volumes")? {
        match item {
            Value::String(s) => out.push(s.clone()),
            Value::Mapping(_) => {
                let long: LongVolume =
                    serde_yaml::from_value(item.clone()).map_err(|_| invalid(item))?;
                match long.source {
                    Some(source) => out.push(format!("{source}:{}", long.target)),
                    None => out.push(long.target),
                }
            }
            other => return Err(invalid(other)),
        }
    }
    Ok(out)
}

fn normalize_labels(component: &str, value: &Value) -> Result<Labels> {
    match value {
        Value::Mapping(map) => {
            let mut labels = Labels::with_capacity(map.len());
            for (key, v) in map {
                let invalid = |found: &Value| Error::InvalidLabels {
                    component: component.to_string(),
                    found: describe(found),
                };
                let key = scalar_text(key).ok_or_else(|| invalid(key))?;
                let text = match v {
                    Value::Null => String::new(),
                    other => scalar_text(other).ok_or_else(|| invalid(other))?,
                };
                labels.insert(key, text);
            }
            Ok(labels)
        }
        Value::String(raw) => {
            let Some((key, v)) = raw.split_once(':') else {
                return Err(Error::MalformedLabel {
                    component: component.to_string(),
                    label: raw.clone(),
                });
            };
            Ok(Labels::from([(key.to_string(), v.to_string())]))
        }
        other => Err(Error::InvalidLabels {
            component: component.to_string(),
            found: describe(other),
        }),
    }
}

/// Text of a scalar YAML node; `None` for null, sequences and mappings.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "<null>".to_string(),
        Value::Bool(b) => format!("<bool> {b}"),
        Value::Number(n) => format!("<number> {n}"),
        Value::String(s) => format!("<str> {s:?}"),
        Value::Sequence(items) => format!("<list> of {} item(s)", items.len()),
        Value::Mapping(map) => format!("<dict> of {} key(s)", map.len()),
        Value::Tagged(tagged) => format!("<tagged {}>", tagged.tag),
    }
}
