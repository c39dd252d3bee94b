use composeuml::render::{Translator, Views};
use std::path::{Path, PathBuf};

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
}

fn list_fixture_yml_files(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };
    let mut out: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|e| e == "yml"))
        .collect();
    out.sort();
    out
}

/// Golden suffix and the views it was rendered with.
fn golden_views() -> [(&'static str, Views); 3] {
    [
        (
            "links",
            Views {
                link_graph: true,
                notes: true,
                ..Views::default()
            },
        ),
        (
            "boundaries",
            Views {
                boundaries: true,
                ..Views::default()
            },
        ),
        (
            "boundaries-grouped",
            Views {
                boundaries: true,
                notes: true,
                group: true,
                ..Views::default()
            },
        ),
    ]
}

#[test]
fn fixtures_match_golden_diagrams() {
    let fixtures = list_fixture_yml_files(&fixtures_root());
    assert!(
        !fixtures.is_empty(),
        "no fixtures found under {}",
        fixtures_root().display()
    );

    for yml_path in fixtures {
        let text = std::fs::read_to_string(&yml_path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", yml_path.display()));

        for (suffix, views) in golden_views() {
            let actual = Translator::new(views)
                .translate(&text)
                .unwrap_or_else(|e| panic!("translate failed for {}: {e}", yml_path.display()));

            let golden_path = yml_path.with_extension(format!("{suffix}.puml"));
            let golden = std::fs::read_to_string(&golden_path).unwrap_or_else(|_| {
                panic!("missing golden diagram {}", golden_path.display())
            });

            assert_eq!(
                actual,
                golden.trim_end_matches('\n'),
                "diagram mismatch for {}",
                golden_path.display()
            );
        }
    }
}
