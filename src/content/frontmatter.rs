//! Front matter extraction for Markdown/MDX posts.
//!
//! Two block styles are recognized at the top of a file:
//!
//! ```text
//! ---                         +++
//! title: Hello                title = "Hello"
//! pubDate: Jul 08 2022        pub_date = 2022-07-08
//! tags: [rust, web]           tags = ["rust", "web"]
//! ---                         +++
//! ```
//!
//! Both produce a flat JSON object that `PostMeta` deserializes from.

use super::JsonMap;
use anyhow::{Result, anyhow};
use serde_json::Value;
use std::iter::Peekable;

/// Split `content` into its front matter map and the remaining body.
///
/// Returns `Ok(None)` when the file has no front matter block.
pub fn extract_frontmatter(content: &str) -> Result<Option<(JsonMap, &str)>> {
    match detect_frontmatter(content) {
        Some((fm, body, is_toml)) => {
            let map = if is_toml {
                parse_toml(fm)?
            } else {
                parse_yaml_like(fm)?
            };
            Ok(Some((map, body)))
        }
        None => Ok(None),
    }
}

/// Detect and extract frontmatter.
/// Returns `(frontmatter, body, is_toml)` if found.
fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if trimmed.starts_with(fence)
            && let Some(end) = trimmed[3..].find(&format!("\n{fence}"))
        {
            let fm = trimmed[3..3 + end].trim();
            let body = trimmed[3 + end + 4..].trim_start_matches(['\r', '\n']);
            return Some((fm, body, is_toml));
        }
    }

    None
}

/// Parse TOML frontmatter.
///
/// TOML dates survive the JSON round trip as single-entry objects, which
/// `DateTimeUtc` knows how to read.
fn parse_toml(content: &str) -> Result<JsonMap> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| anyhow!("invalid TOML front matter: {e}"))?;
    match serde_json::to_value(table)? {
        Value::Object(map) => Ok(map),
        _ => Err(anyhow!("TOML front matter is not a table")),
    }
}

/// Parse simple YAML-like frontmatter (`key: value`).
///
/// Handles quoted strings, flow lists (`[a, b]`), plain scalars folded over
/// indented lines, block lists and block scalars:
///
/// ```text
/// tags:
///   - rust
///   - web
/// description: >-
///   Folded into
///   one line.
/// ```
///
/// Nested mappings are not supported and are reported as errors instead of
/// being flattened into top-level keys.
fn parse_yaml_like(content: &str) -> Result<JsonMap> {
    let mut map = JsonMap::new();
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if is_indented(line) {
            return Err(anyhow!("unexpected indented line `{trimmed}`"));
        }

        let (key, value) = trimmed
            .split_once(':')
            .ok_or_else(|| anyhow!("expected `key: value`, found `{trimmed}`"))?;
        let key = key.trim().to_string();
        let value = value.trim();

        let value = if let Some(style) = BlockScalar::parse(value)? {
            Value::String(style.read(&mut lines))
        } else if value.is_empty() {
            read_block_list(&key, &mut lines)?
        } else {
            let mut parsed = parse_yaml_value(value);
            if let Value::String(text) = &mut parsed
                && unquote(value).is_none()
            {
                // Plain scalars continue on more-indented lines.
                while let Some(next) = lines.next_if(|l| is_indented(l) && !is_list_item(l)) {
                    text.push(' ');
                    text.push_str(next.trim());
                }
            }
            parsed
        };

        map.insert(key, value);
    }

    Ok(map)
}

fn is_indented(line: &str) -> bool {
    line.starts_with([' ', '\t']) && !line.trim().is_empty()
}

fn is_list_item(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed == "-" || trimmed.starts_with("- ")
}

/// Items of a block list following `key:`. An empty value is `null`.
fn read_block_list<'a>(
    key: &str,
    lines: &mut Peekable<impl Iterator<Item = &'a str>>,
) -> Result<Value> {
    let mut items = Vec::new();
    while let Some(line) = lines.next_if(|l| is_list_item(l)) {
        let item = line.trim().strip_prefix('-').unwrap_or_default();
        items.push(parse_yaml_value(item));
    }

    if !items.is_empty() {
        return Ok(Value::Array(items));
    }
    match lines.peek() {
        Some(next) if is_indented(next) => {
            Err(anyhow!("nested mapping under `{key}` is not supported"))
        }
        _ => Ok(Value::Null),
    }
}

/// Trailing newline handling of a block scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomping {
    /// Single trailing newline (no indicator).
    Clip,
    /// No trailing newline (`-`).
    Strip,
    /// Every trailing newline (`+`).
    Keep,
}

/// Header of a `|` (literal) or `>` (folded) block scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlockScalar {
    folded: bool,
    chomping: Chomping,
}

impl BlockScalar {
    fn parse(value: &str) -> Result<Option<Self>> {
        let folded = match value.chars().next() {
            Some('|') => false,
            Some('>') => true,
            _ => return Ok(None),
        };
        let chomping = match &value[1..] {
            "" => Chomping::Clip,
            "-" => Chomping::Strip,
            "+" => Chomping::Keep,
            _ => return Err(anyhow!("unsupported block scalar header `{value}`")),
        };
        Ok(Some(Self { folded, chomping }))
    }

    /// Consume the indented lines of the block and build its value.
    fn read<'a>(self, lines: &mut Peekable<impl Iterator<Item = &'a str>>) -> String {
        let mut block = Vec::new();
        while let Some(line) = lines.next_if(|l| l.trim().is_empty() || is_indented(l)) {
            block.push(line);
        }

        let indent = block
            .iter()
            .find(|l| !l.trim().is_empty())
            .map_or(0, |l| l.len() - l.trim_start().len());
        let block: Vec<&str> = block
            .iter()
            .map(|l| {
                if l.trim().is_empty() {
                    ""
                } else {
                    let strip = indent.min(l.len() - l.trim_start().len());
                    l[strip..].trim_end()
                }
            })
            .collect();

        let trailing = block.iter().rev().take_while(|l| l.is_empty()).count();
        let body = &block[..block.len() - trailing];

        let mut text = if self.folded {
            fold_lines(body)
        } else {
            body.join("\n")
        };

        if text.is_empty() {
            return text;
        }
        match self.chomping {
            Chomping::Strip => {}
            Chomping::Clip => text.push('\n'),
            Chomping::Keep => text.push_str(&"\n".repeat(trailing + 1)),
        }
        text
    }
}

/// Join lines with spaces; an empty line becomes a newline.
fn fold_lines(lines: &[&str]) -> String {
    let mut text = String::new();
    let mut after_break = true;
    for line in lines {
        if line.is_empty() {
            text.push('\n');
            after_break = true;
        } else {
            if !after_break {
                text.push(' ');
            }
            text.push_str(line);
            after_break = false;
        }
    }
    text
}

/// Parse a YAML-like value string to JSON value
///
/// Supports:
/// - Quoted strings: `"a: b"`, `'it''s'`
/// - Booleans: `true`, `false`
/// - Null: `null`, `~`
/// - Numbers: `123`, `3.14`
/// - Flow lists: `[a, "b", 3]`
/// - Strings: everything else
fn parse_yaml_value(s: &str) -> Value {
    let s = s.trim();

    if let Some(quoted) = unquote(s) {
        return Value::String(quoted);
    }

    if let Some(inner) = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return Value::Array(
            inner
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(parse_yaml_value)
                .collect(),
        );
    }

    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }

    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }

    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }

    Value::String(s.to_string())
}

/// Strip matching single or double quotes.
fn unquote(s: &str) -> Option<String> {
    if s.len() < 2 {
        return None;
    }
    if let Some(inner) = s.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return Some(inner.replace("\\\"", "\""));
    }
    if let Some(inner) = s.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        return Some(inner.replace("''", "'"));
    }
    None
}
