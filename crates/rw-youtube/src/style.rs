//! Inline CSS style maps.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// CSS declarations for a `style` attribute.
///
/// Serialization sorts properties by name so generated pages are stable
/// across builds, whatever order properties were set in.
///
/// # Example
///
/// ```
/// use rw_youtube::StyleMap;
///
/// let mut style = StyleMap::new();
/// style.set("width", "560px");
/// style.set("border", "0");
/// assert_eq!(style.to_string(), "border: 0; width: 560px");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    declarations: BTreeMap<String, String>,
}

impl StyleMap {
    /// Create an empty style map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.declarations.insert(property.into(), value.into());
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Get a property value.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the map has no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (property, value)) in self.declarations.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{property}: {value}")?;
        }
        Ok(())
    }
}

/// Error returned when a declaration has no `:` separator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CSS declaration {0:?}")]
pub struct InvalidDeclaration(pub String);

impl FromStr for StyleMap {
    type Err = InvalidDeclaration;

    /// Parse `key: value; key: value`, ignoring empty declarations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut style = Self::new();
        for declaration in s.split(';') {
            let declaration = declaration.trim();
            if declaration.is_empty() {
                continue;
            }
            let (property, value) = declaration
                .split_once(':')
                .ok_or_else(|| InvalidDeclaration(declaration.to_owned()))?;
            style.set(property.trim(), value.trim());
        }
        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty() {
        let style = StyleMap::new();
        assert!(style.is_empty());
        assert_eq!(style.to_string(), "");
    }

    #[test]
    fn test_sorted_output() {
        let style = StyleMap::new()
            .with("width", "100%")
            .with("position", "relative")
            .with("padding-top", "30px");
        assert_eq!(
            style.to_string(),
            "padding-top: 30px; position: relative; width: 100%"
        );
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let a = StyleMap::new()
            .with("height", "345px")
            .with("border", "0")
            .with("width", "560px");
        let b = StyleMap::new()
            .with("width", "560px")
            .with("height", "345px")
            .with("border", "0");
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_set_replaces() {
        let mut style = StyleMap::new();
        style.set("width", "1px");
        style.set("width", "2px");
        assert_eq!(style.len(), 1);
        assert_eq!(style.get("width"), Some("2px"));
    }

    #[test]
    fn test_parse_then_serialize_is_sorted() {
        let style: StyleMap = "width: 560px; border: 0;height: 345px".parse().unwrap();
        assert_eq!(style.to_string(), "border: 0; height: 345px; width: 560px");
    }

    #[test]
    fn test_serialize_parse_is_stable() {
        let text = "border: 0; height: 345px; width: 560px";
        let style: StyleMap = text.parse().unwrap();
        assert_eq!(style.to_string(), text);
        let again: StyleMap = style.to_string().parse().unwrap();
        assert_eq!(again, style);
    }

    #[test]
    fn test_parse_invalid_declaration() {
        let result: Result<StyleMap, _> = "border 0".parse();
        assert_eq!(result, Err(InvalidDeclaration("border 0".to_owned())));
    }
}
