use composeuml_core::Labels;
use std::fmt::Write as _;

/// First line of every rendered diagram.
pub const STYLE_DIRECTIVE: &str = "skinparam componentStyle uml2";

/// Wraps `content` in `package NAME { ... }`, indenting each line by two spaces.
///
/// Empty content renders nothing so that empty groups never show up in the diagram.
pub fn group(name: &str, content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let body = content.split('\n').collect::<Vec<_>>().join("\n  ");
    format!("package {name} {{\n  {}\n}}\n", body.trim())
}

/// Appends a `note top of [component]` block listing `key=value` lines in label order.
pub fn write_note(out: &mut String, indent: &str, component: &str, labels: &Labels) {
    let _ = writeln!(out, "{indent}note top of [{component}]");
    for (key, value) in labels {
        let _ = writeln!(out, "{indent}  {key}={value}");
    }
    let _ = writeln!(out, "{indent}end note");
}

/// Removes `/` which PlantUML would otherwise read as part of the arrow syntax.
pub fn strip_slashes(text: &str) -> String {
    text.replace('/', "")
}
