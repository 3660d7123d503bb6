//! Email template definitions and `{{name}}` placeholder substitution.
//!
//! A placeholder is the literal `{{`, one or more characters other than `}`,
//! then the literal `}}`. Names are matched exactly: no trimming, case
//! sensitive. Anything that does not close is plain text.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Range;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Read-only lookup of placeholder values by name.
pub trait Variables {
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl Variables for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Variables for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Variables for [(&str, &str)] {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.iter().find(|(key, _)| *key == name).map(|(_, value)| *value)
    }
}

/// One `{{name}}` occurrence inside a template body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub name: &'a str,
    /// Byte range of the whole token, braces included.
    pub span: Range<usize>,
}

/// Iterator over placeholder occurrences, left to right.
pub struct Placeholders<'a> {
    source: &'a str,
    pos: usize,
    /// First `}` at or after the last name start, or `source.len()` when none is left.
    next_close: Option<usize>,
}

impl<'a> Placeholders<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            next_close: None,
        }
    }

    fn close_from(&mut self, from: usize) -> usize {
        match self.next_close {
            Some(close) if close >= from => close,
            _ => {
                let close = self.source[from..]
                    .find('}')
                    .map_or(self.source.len(), |i| from + i);
                self.next_close = Some(close);
                close
            }
        }
    }
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = Placeholder<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(offset) = self.source[self.pos..].find(OPEN) {
            let start = self.pos + offset;
            let name_start = start + OPEN.len();
            let close = self.close_from(name_start);

            if close > name_start && self.source[close..].starts_with(CLOSE) {
                let end = close + CLOSE.len();
                self.pos = end;
                return Some(Placeholder {
                    name: &self.source[name_start..close],
                    span: start..end,
                });
            }

            // Unclosed or empty: retry from the next byte, like an unanchored regex search.
            self.pos = start + 1;
        }
        self.pos = self.source.len();
        None
    }
}

/// A named HTML email template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub raw_content: &'static str,
}

impl EmailTemplate {
    pub const fn new(id: &'static str, name: &'static str, raw_content: &'static str) -> Self {
        Self {
            id,
            name,
            raw_content,
        }
    }

    pub fn placeholders(&self) -> Placeholders<'static> {
        Placeholders::new(self.raw_content)
    }

    /// Distinct placeholder names in order of first appearance.
    pub fn extract_placeholders(&self) -> Vec<&'static str> {
        let mut seen = HashSet::new();
        self.placeholders()
            .map(|p| p.name)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Substitute `values` into the body in a single pass.
    ///
    /// Missing names become the empty string and inserted values are not
    /// rescanned, so a value containing `{{x}}` is emitted verbatim.
    pub fn render<V: Variables + ?Sized>(&self, values: &V) -> String {
        let source = self.raw_content;
        let mut out = String::with_capacity(source.len());
        let mut last = 0;

        for placeholder in self.placeholders() {
            out.push_str(&source[last..placeholder.span.start]);
            out.push_str(values.lookup(placeholder.name).unwrap_or(""));
            last = placeholder.span.end;
        }
        out.push_str(&source[last..]);
        out
    }

    /// Declared names that `values` leaves absent or empty.
    pub fn missing_placeholders<V: Variables + ?Sized>(&self, values: &V) -> Vec<&'static str> {
        self.extract_placeholders()
            .into_iter()
            .filter(|name| values.lookup(name).is_none_or(str::is_empty))
            .collect()
    }
}
