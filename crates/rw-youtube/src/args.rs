//! Directive argument parsing.
//!
//! Parses the `[content]{key=value ...}` part of a leaf directive.

use std::collections::BTreeMap;

/// Parsed arguments from `::name[content]{key="value"}`.
///
/// # Example
///
/// ```
/// use rw_youtube::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("dQw4w9WgXcQ", r#"width=50% aspect="4:3""#);
/// assert_eq!(args.content, "dQw4w9WgXcQ");
/// assert_eq!(args.get("width"), Some("50%"));
/// assert_eq!(args.get("aspect"), Some("4:3"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Content from brackets, empty if not provided.
    pub content: String,
    /// Key-value options, keyed by name.
    pub options: BTreeMap<String, String>,
    /// Bare tokens without a value, in source order.
    pub flags: Vec<String>,
}

impl DirectiveArgs {
    /// Parse bracket content and the attribute string (without braces).
    #[must_use]
    pub fn parse(content: &str, attrs: &str) -> Self {
        let mut args = Self {
            content: content.to_owned(),
            ..Default::default()
        };

        let mut remaining = attrs.trim();
        while !remaining.is_empty() {
            if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.options.insert(key.to_owned(), value.to_owned());
                remaining = rest.trim_start();
            } else {
                let end = remaining
                    .find(char::is_whitespace)
                    .unwrap_or(remaining.len());
                args.flags.push(remaining[..end].to_owned());
                remaining = remaining[end..].trim_start();
            }
        }

        args
    }

    /// Get an option value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Names of all options and flags, options first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options
            .keys()
            .map(String::as_str)
            .chain(self.flags.iter().map(String::as_str))
    }
}

/// Parse `key="value"`, `key='value'`, or `key=value` at the start of `s`.
///
/// Returns `None` if the first token has no `=`.
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let token_end = s.find(char::is_whitespace).unwrap_or(s.len());
    let eq_pos = s[..token_end].find('=')?;
    let key = &s[..eq_pos];
    if key.is_empty() {
        return None;
    }

    let after_eq = &s[eq_pos + 1..];
    for quote in ['"', '\''] {
        if let Some(stripped) = after_eq.strip_prefix(quote) {
            let end_quote = stripped.find(quote)?;
            return Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]));
        }
    }

    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
    Some((key, &after_eq[..end], &after_eq[end..]))
}
