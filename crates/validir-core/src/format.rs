use std::borrow::Cow;
use std::path::Path;

use crate::error::Error;
use crate::value::Value;

/// Text formats a template can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    /// `.json` files are JSON; everything else is YAML.
    pub fn from_path(path: &Path) -> Format {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }

    pub fn parse(self, text: &str) -> Result<Value, Error> {
        Ok(match self {
            Format::Yaml => serde_yaml::from_str(text)?,
            Format::Json => serde_json::from_str(text)?,
        })
    }

    pub fn render(self, value: &Value) -> Result<String, Error> {
        Ok(match self {
            Format::Yaml => quote_yaml11_bools(value, serde_yaml::to_string(value)?),
            Format::Json => {
                let mut s = serde_json::to_string_pretty(value)?;
                s.push('\n');
                s
            }
        })
    }
}

/// Plain scalars that YAML 1.1 readers (PyYAML among them) load as
/// booleans. `serde_yaml` follows YAML 1.2 and writes them unquoted.
const YAML11_BOOLS: [&str; 16] = [
    "y", "Y", "yes", "Yes", "YES", "n", "N", "no", "No", "NO", "on", "On", "ON", "off", "Off",
    "OFF",
];

/// Single-quote sequence items, keys and values that are one of
/// [`YAML11_BOOLS`].
///
/// The quoted text is only used if it reads back to `value`.
fn quote_yaml11_bools(value: &Value, text: String) -> String {
    let quoted: String = text.split_inclusive('\n').map(quote_line).collect();
    if quoted == text {
        return text;
    }
    match serde_yaml::from_str::<Value>(&quoted) {
        Ok(back) if back == *value => quoted,
        _ => {
            tracing::debug!("leaving YAML 1.1 boolean-like names unquoted");
            text
        }
    }
}

fn quote_line(line: &str) -> Cow<'_, str> {
    let body = line.trim_end_matches('\n');
    let mut start = body.len() - body.trim_start_matches(' ').len();
    while body[start..].starts_with("- ") {
        start += 2;
    }
    let (prefix, rest) = body.split_at(start);

    let (key, sep, val) = match rest.split_once(": ") {
        Some((k, v)) => (k, ": ", v),
        None => match rest.strip_suffix(':') {
            Some(k) => (k, ":", ""),
            None => (rest, "", ""),
        },
    };
    if !YAML11_BOOLS.contains(&key) && !YAML11_BOOLS.contains(&val) {
        return Cow::Borrowed(line);
    }

    let quote = |s: &str| {
        if YAML11_BOOLS.contains(&s) {
            format!("'{s}'")
        } else {
            s.to_string()
        }
    };
    let newline = &line[body.len()..];
    Cow::Owned(format!("{prefix}{}{sep}{}{newline}", quote(key), quote(val)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("t.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("t.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("t.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("t.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("template")), Format::Yaml);
    }

    #[test]
    fn syntax_errors_are_reported_per_format() {
        assert!(matches!(Format::Yaml.parse("root: [a"), Err(Error::Yaml(_))));
        assert!(matches!(Format::Json.parse("{\"root\": "), Err(Error::Json(_))));
    }

    #[test]
    fn names_that_look_like_other_scalars_stay_strings() {
        let v = Value::Sequence(vec!["123".into(), "true".into(), "null".into()]);
        for format in [Format::Yaml, Format::Json] {
            let text = format.render(&v).unwrap();
            assert_eq!(format.parse(&text).unwrap(), v, "{format:?}: {text}");
        }
    }

    #[test]
    fn yaml_quotes_names_older_readers_take_for_booleans() {
        let v = Value::Sequence(vec![
            "yes".into(),
            "on".into(),
            "N".into(),
            "notes".into(),
            Value::Mapping(vec![("off".into(), Value::Sequence(vec![]))]),
            Value::Mapping(vec![("no".into(), Value::Sequence(vec!["y".into()]))]),
        ]);

        let text = Format::Yaml.render(&v).unwrap();
        for quoted in [
            "- 'yes'\n",
            "- 'on'\n",
            "- 'N'\n",
            "- 'off': []\n",
            "- 'no':\n",
            "- 'y'\n",
        ] {
            assert!(text.contains(quoted), "{quoted:?} in:\n{text}");
        }
        assert!(text.contains("- notes\n"), "{text}");
        assert_eq!(Format::Yaml.parse(&text).unwrap(), v);
    }

    #[test]
    fn boolean_like_line_fragments_are_left_alone() {
        assert_eq!(quote_line("- yesterday\n"), "- yesterday\n");
        assert_eq!(quote_line("skip_hidden: true\n"), "skip_hidden: true\n");
        assert_eq!(quote_line("  - - on\n"), "  - - 'on'\n");
        assert_eq!(quote_line("a: off"), "a: 'off'");
    }
}
