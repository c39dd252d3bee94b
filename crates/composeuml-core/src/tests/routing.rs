use super::doc;
use crate::routing::*;

#[test]
fn rule_keys_are_recognized_with_optional_segments() {
    assert_eq!(match_rule_key("traefik.frontend.rule"), Some(None));
    assert_eq!(match_rule_key("traefik.foo.frontend.rule"), Some(Some("foo")));
    assert_eq!(match_rule_key("routing.frontend.rule"), Some(None));
    assert_eq!(match_rule_key("routing.foo.frontend.rule"), Some(Some("foo")));
    assert_eq!(match_rule_key("routing.rule"), Some(None));
    assert_eq!(match_rule_key("routing.api.rule"), Some(Some("api")));

    assert_eq!(match_rule_key("traefik.port"), None);
    assert_eq!(match_rule_key("traefik.a.b.frontend.rule"), None);
    assert_eq!(match_rule_key("xtraefik.frontend.rule"), None);
    assert_eq!(match_rule_key("traefik.frontend.rule.extra"), None);
}

#[test]
fn single_rule() {
    let index = RuleIndex::build(&doc(r#"
version: "2"
services:
  service:
    labels:
      traefik.frontend.rule: Host:patate.com
"#));
    assert_eq!(index.rules(), ["Host:patate.com".to_string()]);
    assert_eq!(
        index.connections(),
        [(0, ("service".to_string(), " ".to_string()))]
    );
    assert!(index.has_rule("service"));
    assert!(!index.has_rule("other"));
}

#[test]
fn rule_ids_follow_sorted_expressions() {
    let index = RuleIndex::build(&doc(r#"
version: "2"
services:
  service1:
    labels:
      traefik.frontend.rule: Host:patate.com
  service2:
    labels:
      traefik.frontend.rule: Host:bar.com
"#));
    assert_eq!(
        index.rules(),
        ["Host:bar.com".to_string(), "Host:patate.com".to_string()]
    );
    let mut connections = index.connections().to_vec();
    connections.sort();
    assert_eq!(
        connections,
        vec![
            (0, ("service2".to_string(), " ".to_string())),
            (1, ("service1".to_string(), " ".to_string())),
        ]
    );
}

#[test]
fn shared_expression_across_segments_yields_one_rule() {
    let d = doc(r#"
version: "2"
services:
  a:
    labels:
      routing.frontend.rule: Host:x.com
  b:
    labels:
      routing.foo.frontend.rule: Host:x.com
"#);
    let extracted = rules(&d);
    assert_eq!(
        extracted,
        vec![
            RoutingRule {
                component: "a".to_string(),
                rule: "Host:x.com".to_string(),
                segment: DEFAULT_SEGMENT.to_string(),
            },
            RoutingRule {
                component: "b".to_string(),
                rule: "Host:x.com".to_string(),
                segment: "foo".to_string(),
            },
        ]
    );

    let index = RuleIndex::build(&d);
    assert_eq!(index.rules().len(), 1);
    assert_eq!(index.connections().len(), 2);
}

#[test]
fn components_without_labels_have_no_rules() {
    let index = RuleIndex::build(&doc("a: {}\nb:\n  labels:\n    other: value\n"));
    assert!(index.is_empty());
    assert!(index.connections().is_empty());
    assert!(!index.has_rule("a"));
}

#[test]
fn string_form_label_can_carry_a_rule() {
    let index = RuleIndex::build(&doc("a:\n  labels: \"traefik.frontend.rule:Host:a.com\"\n"));
    assert_eq!(index.rules(), ["Host:a.com".to_string()]);
}
