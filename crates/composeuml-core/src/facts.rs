//! Relationship facts extracted from a [`ComposeDocument`].
//!
//! Every extractor walks the canonical component map once and returns its tuples in document
//! order. Presentation order is the renderer's job: callers sort.

use crate::document::{ComposeDocument, Labels};

/// A `(source, target)` edge. Used for both links and `depends_on`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Relation {
    pub source: String,
    pub target: String,
}

impl Relation {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A published or exposed port of one service.
///
/// `container` is `None` when the entry only names a port (`"80"`), and the container side of the
/// mapping otherwise (`"8080:80"`). Dash ranges are already rewritten to `..`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortMapping {
    pub service: String,
    pub host: String,
    pub container: Option<String>,
}

/// One service mounting `path` of the named volume `volume`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VolumeUsage {
    pub service: String,
    pub volume: String,
    pub path: String,
}

/// Strips a `name:alias` link down to `name`.
fn link_target(link: &str) -> &str {
    link.split_once(':').map_or(link, |(name, _alias)| name)
}

pub fn links(doc: &ComposeDocument) -> Vec<Relation> {
    doc.components
        .iter()
        .flat_map(|(name, spec)| {
            spec.links
                .iter()
                .map(move |link| Relation::new(name.as_str(), link_target(link)))
        })
        .collect()
}

pub fn dependencies(doc: &ComposeDocument) -> Vec<Relation> {
    doc.components
        .iter()
        .flat_map(|(name, spec)| {
            spec.depends_on
                .iter()
                .map(move |dependency| Relation::new(name.as_str(), dependency.as_str()))
        })
        .collect()
}

/// Parses one raw port entry into `(host_or_range, container)`.
pub fn parse_port(raw: &str) -> (String, Option<String>) {
    let port = raw.replace('-', "..");
    match port.rsplit_once(':') {
        Some((host, container)) => (host.to_string(), Some(container.to_string())),
        None => (port, None),
    }
}

pub fn ports(doc: &ComposeDocument) -> Vec<PortMapping> {
    let mut out = Vec::new();
    for (name, spec) in &doc.components {
        for raw in &spec.ports {
            let (host, container) = parse_port(raw);
            out.push(PortMapping {
                service: name.clone(),
                host,
                container,
            });
        }
    }
    out
}

/// Named volumes declared at the top level. The flat legacy shape has none.
pub fn volumes(doc: &ComposeDocument) -> Vec<String> {
    doc.volumes.clone()
}

/// Registry key of a `(volume, path)` pair.
pub fn volume_identifier(volume: &str, path: &str) -> String {
    format!("{volume}.{path}")
}

/// Path within `volume` if `mount` is a `volume:path[:mode]` entry for it.
fn mounted_path<'a>(mount: &'a str, volume: &str) -> Option<&'a str> {
    let rest = mount.strip_prefix(volume)?.strip_prefix(':')?;
    Some(rest.split(':').next().unwrap_or(rest))
}

/// Every path of `volume` mounted by any service, duplicates included.
pub fn volume_usage(doc: &ComposeDocument, volume: &str) -> Vec<String> {
    service_using_path(doc, volume)
        .into_iter()
        .map(|(_, path)| path)
        .collect()
}

/// `(service, path)` pairs for every mount of `volume`.
pub fn service_using_path(doc: &ComposeDocument, volume: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (name, spec) in &doc.components {
        for mount in &spec.volumes {
            if let Some(path) = mounted_path(mount, volume) {
                out.push((name.clone(), path.to_string()));
            }
        }
    }
    out
}

/// All usages of all declared volumes.
pub fn volume_usages(doc: &ComposeDocument) -> Vec<VolumeUsage> {
    doc.volumes
        .iter()
        .flat_map(|volume| {
            service_using_path(doc, volume)
                .into_iter()
                .map(move |(service, path)| VolumeUsage {
                    service,
                    volume: volume.clone(),
                    path,
                })
        })
        .collect()
}

pub fn is_volume_used(doc: &ComposeDocument, volume: &str) -> bool {
    doc.components.values().any(|spec| {
        spec.volumes
            .iter()
            .any(|mount| mounted_path(mount, volume).is_some())
    })
}

/// Whether any other service links to or depends on `service`.
pub fn is_service_used(doc: &ComposeDocument, service: &str) -> bool {
    doc.components.values().any(|spec| {
        spec.links.iter().any(|link| link_target(link) == service)
            || spec.depends_on.iter().any(|dep| dep == service)
    })
}

pub fn has_service_external_ports(doc: &ComposeDocument, service: &str) -> bool {
    doc.component(service)
        .is_some_and(|spec| !spec.ports.is_empty())
}

/// Whether `service` mounts anything that is neither an absolute path nor a bare path.
pub fn has_service_volumes(doc: &ComposeDocument, service: &str) -> bool {
    doc.component(service).is_some_and(|spec| {
        spec.volumes
            .iter()
            .any(|mount| !mount.starts_with('/') && mount.contains(':'))
    })
}

pub fn labels<'a>(doc: &'a ComposeDocument, service: &str) -> Option<&'a Labels> {
    doc.component(service)?.labels.as_ref()
}
