use std::path::Path;

use serde::Serialize;
use validir_core::Report;

use crate::args::OutputFormat;

// Kept separate from the core types so their shape can change without
// breaking consumers of the JSON output.
#[derive(Serialize)]
struct JsonOut<'a> {
    ok: bool,
    directory: String,
    template: String,
    skip_hidden: bool,
    allow_extra: bool,
    mismatch: Option<JsonMismatch<'a>>,
}

#[derive(Serialize)]
struct JsonMismatch<'a> {
    kind: &'static str,
    entry: &'static str,
    path: &'a str,
    message: String,
}

pub fn render_json(report: &Report, template: &Path) -> String {
    let policy = report.policy();
    let out = JsonOut {
        ok: report.is_match(),
        directory: report.directory().display().to_string(),
        template: template.display().to_string(),
        skip_hidden: policy.skip_hidden,
        allow_extra: policy.allow_extra,
        mismatch: report.mismatch().map(|m| JsonMismatch {
            kind: m.kind.as_str(),
            entry: m.entry.as_str(),
            path: m.path.as_str(),
            message: m.to_string(),
        }),
    };

    // Serializing plain strings and bools cannot fail.
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{\"ok\":false}".to_string())
}

pub fn render_human(report: &Report, template: &Path, verbosity: u8, quiet: bool) -> String {
    let mut out = String::new();
    let dir = report.directory().display();

    if !quiet && verbosity > 0 {
        let policy = report.policy();
        out.push_str(&format!(
            "validir: skip_hidden={}, allow_extra={}\n",
            policy.skip_hidden, policy.allow_extra
        ));
    }

    match report.mismatch() {
        None if quiet => {}
        None => out.push_str(&format!(
            "Directory {dir} matches template {}\n",
            template.display()
        )),
        Some(m) => out.push_str(&format!(
            "Directory {dir} DOES NOT MATCH template {}: {m}\n",
            template.display()
        )),
    }

    out
}

pub fn render(
    report: &Report,
    template: &Path,
    format: OutputFormat,
    verbosity: u8,
    quiet: bool,
) -> String {
    match format {
        OutputFormat::Human => render_human(report, template, verbosity, quiet),
        OutputFormat::Json => render_json(report, template),
    }
}
