use camino::Utf8Path;
use scanlens_annotate::LineAnnotation;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Render consumed annotations for one file: a header line per annotated
/// source line (worst severity), then every message in arrival order.
pub fn render_annotations(path: &Utf8Path, lines: &BTreeMap<i64, LineAnnotation>) -> String {
    let mut out = String::new();
    for (line, annotation) in lines {
        let _ = writeln!(out, "{path}:{line} {}", annotation.severity);
        for message in &annotation.messages {
            let _ = writeln!(out, "  {message}");
        }
    }
    out
}
