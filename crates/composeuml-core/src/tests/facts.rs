use super::doc;
use crate::facts::*;
use crate::*;

const SAMPLE: &str = r#"
version: "2"
services:
  web:
    links:
      - api:backend
      - cache
    depends_on:
      - db
    ports:
      - "8080:80"
      - "443"
      - "9000-9002:9000-9002"
    volumes:
      - data:/srv/static:ro
      - /etc/localtime:/etc/localtime
  api:
    depends_on: [db]
    volumes:
      - data:/srv/static
      - ./config:/config
  db:
    volumes:
      - pgdata:/var/lib/postgresql/data
  cache: {}
volumes:
  data:
  pgdata:
  unused:
"#;

#[test]
fn links_strip_aliases() {
    let d = doc(SAMPLE);
    assert_eq!(
        links(&d),
        vec![Relation::new("web", "api"), Relation::new("web", "cache")]
    );
}

#[test]
fn dependencies_keep_declared_pairs() {
    let d = doc(SAMPLE);
    assert_eq!(
        dependencies(&d),
        vec![Relation::new("web", "db"), Relation::new("api", "db")]
    );
}

#[test]
fn parse_port_handles_mappings_exposed_ports_and_ranges() {
    assert_eq!(parse_port("8080:80"), ("8080".to_string(), Some("80".to_string())));
    assert_eq!(parse_port("80"), ("80".to_string(), None));
    assert_eq!(parse_port("8080-8099"), ("8080..8099".to_string(), None));
    assert_eq!(
        parse_port("127.0.0.1:5000:5000"),
        ("127.0.0.1:5000".to_string(), Some("5000".to_string()))
    );
    assert_eq!(
        parse_port("53:53/udp"),
        ("53".to_string(), Some("53/udp".to_string()))
    );
}

#[test]
fn ports_are_collected_per_service() {
    let d = doc(SAMPLE);
    let got = ports(&d);
    assert_eq!(got.len(), 3);
    assert_eq!(
        got[2],
        PortMapping {
            service: "web".to_string(),
            host: "9000..9002".to_string(),
            container: Some("9000..9002".to_string()),
        }
    );
}

#[test]
fn volume_queries_follow_named_mounts() {
    let d = doc(SAMPLE);
    assert_eq!(volumes(&d), vec!["data", "pgdata", "unused"]);
    assert_eq!(volume_usage(&d, "data"), vec!["/srv/static", "/srv/static"]);
    assert_eq!(
        service_using_path(&d, "data"),
        vec![
            ("web".to_string(), "/srv/static".to_string()),
            ("api".to_string(), "/srv/static".to_string()),
        ]
    );
    assert!(is_volume_used(&d, "pgdata"));
    assert!(!is_volume_used(&d, "unused"));
    assert_eq!(volume_identifier("data", "/srv/static"), "data./srv/static");
}

#[test]
fn volume_prefix_must_be_followed_by_a_colon() {
    let d = doc("version: '2'\nservices:\n  a:\n    volumes: ['database:/x']\nvolumes:\n  data: {}\n");
    assert!(!is_volume_used(&d, "data"));
    assert!(volume_usage(&d, "data").is_empty());
}

#[test]
fn volume_usages_span_all_declared_volumes() {
    let d = doc(SAMPLE);
    let mut usages = volume_usages(&d);
    usages.sort();
    let services: Vec<(&str, &str)> = usages
        .iter()
        .map(|u| (u.service.as_str(), u.volume.as_str()))
        .collect();
    assert_eq!(services, vec![("api", "data"), ("db", "pgdata"), ("web", "data")]);
}

#[test]
fn flat_shape_declares_no_volumes() {
    let d = doc("web:\n  volumes: ['data:/x']\n");
    assert!(volumes(&d).is_empty());
    assert!(has_service_volumes(&d, "web"));
}

#[test]
fn boundary_relevance_predicates() {
    let d = doc(SAMPLE);
    assert!(has_service_external_ports(&d, "web"));
    assert!(!has_service_external_ports(&d, "api"));
    assert!(!has_service_external_ports(&d, "missing"));

    assert!(has_service_volumes(&d, "web"));
    assert!(has_service_volumes(&d, "api"));
    assert!(!has_service_volumes(&d, "cache"));

    let d = doc("a:\n  volumes: ['/abs:/x', 'plain']\n");
    assert!(!has_service_volumes(&d, "a"));
}

#[test]
fn service_usage_counts_links_and_dependencies() {
    let d = doc(SAMPLE);
    assert!(is_service_used(&d, "api"));
    assert!(is_service_used(&d, "db"));
    assert!(is_service_used(&d, "cache"));
    assert!(!is_service_used(&d, "web"));
}

#[test]
fn labels_are_absent_unless_declared() {
    let d = doc("a:\n  labels:\n    x: y\nb: {}\n");
    assert_eq!(
        labels(&d, "a").and_then(|l| l.get("x")).map(String::as_str),
        Some("y")
    );
    assert!(labels(&d, "b").is_none());
    assert!(labels(&d, "missing").is_none());
}
