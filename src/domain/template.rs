//! Dollar-placeholder message templates.
//!
//! Supports `$name`, `${name}` and `$$` (a literal dollar sign). Names are ASCII
//! identifiers. A placeholder without a value, or a `$` that starts no valid
//! placeholder, is an error rather than being left in the output.

use std::collections::BTreeMap;

use thiserror::Error;

/// Placeholder values keyed by name.
pub type Variables = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("no value for placeholder '{0}'")]
    UnknownPlaceholder(String),
    #[error("invalid placeholder at line {line}, column {column}")]
    InvalidPlaceholder { line: usize, column: usize },
}

/// A parsed template, reusable across many substitutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            if ch != '$' {
                literal.push(ch);
                continue;
            }

            match chars.peek().map(|&(_, next)| next) {
                Some('$') => {
                    chars.next();
                    literal.push('$');
                }
                Some('{') => {
                    chars.next();
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed || !is_identifier(&name) {
                        return Err(invalid_at(source, offset));
                    }
                    flush(&mut segments, &mut literal);
                    segments.push(Segment::Placeholder(name));
                }
                Some(c) if c == '_' || c.is_ascii_alphabetic() => {
                    let mut name = String::new();
                    while let Some(&(_, c)) = chars.peek() {
                        if c == '_' || c.is_ascii_alphanumeric() {
                            name.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    flush(&mut segments, &mut literal);
                    segments.push(Segment::Placeholder(name));
                }
                _ => return Err(invalid_at(source, offset)),
            }
        }

        flush(&mut segments, &mut literal);
        Ok(Self { segments })
    }

    /// Names referenced by the template, in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(name) = segment
                && !names.contains(&name.as_str())
            {
                names.push(name);
            }
        }
        names
    }

    pub fn substitute(&self, vars: &Variables) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = vars
                        .get(name)
                        .ok_or_else(|| TemplateError::UnknownPlaceholder(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Parse and substitute in one go.
pub fn render(source: &str, vars: &Variables) -> Result<String, TemplateError> {
    Template::parse(source)?.substitute(vars)
}

fn flush(segments: &mut Vec<Segment>, literal: &mut String) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

fn invalid_at(source: &str, offset: usize) -> TemplateError {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map(|s| s.chars().count()).unwrap_or(0) + 1;
    TemplateError::InvalidPlaceholder { line, column }
}
