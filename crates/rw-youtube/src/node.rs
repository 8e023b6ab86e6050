//! Embed nodes and per-format rendering.

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::{AspectRatio, EmbedLayout, EmbedSettings, SizeValue, resolve};

/// Output format a document is being rendered to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// HTML pages. Embeds render as iframes.
    #[default]
    Html,
    /// `LaTeX` / print output. Embeds render nothing.
    Latex,
    /// Plain text output. Embeds render nothing.
    Text,
}

impl OutputFormat {
    /// Whether this format can show interactive embeds.
    #[must_use]
    pub fn supports_embeds(self) -> bool {
        matches!(self, Self::Html)
    }

    /// Format name as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Latex => "latex",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognized output format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output format {0:?}: expected `html`, `latex`, or `text`")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "latex" => Ok(Self::Latex),
            "text" => Ok(Self::Text),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}

/// Node produced by a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `YouTube` embed.
    Youtube(EmbedNode),
}

impl Node {
    /// Render the node for a format.
    ///
    /// Returns `None` when the format cannot show this node.
    #[must_use]
    pub fn render(&self, format: OutputFormat, settings: &EmbedSettings) -> Option<String> {
        match self {
            Self::Youtube(embed) => embed.render(format, settings),
        }
    }
}

/// A resolved `::youtube` directive.
///
/// Built once per directive occurrence from already-validated options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedNode {
    /// Video id, appended verbatim to the embed URL.
    pub video_id: String,
    /// Requested width.
    pub width: Option<SizeValue>,
    /// Requested height.
    pub height: Option<SizeValue>,
    /// Requested aspect ratio.
    pub aspect: Option<AspectRatio>,
}

impl EmbedNode {
    /// Create a node with no sizing options.
    #[must_use]
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            width: None,
            height: None,
            aspect: None,
        }
    }

    /// Layout for this node.
    #[must_use]
    pub fn layout(&self, settings: &EmbedSettings) -> EmbedLayout {
        resolve(self.width, self.height, self.aspect, settings)
    }

    /// Render the node for a format.
    ///
    /// # Example
    ///
    /// ```
    /// use rw_youtube::{EmbedNode, EmbedSettings, OutputFormat};
    ///
    /// let node = EmbedNode::new("dQw4w9WgXcQ");
    /// let settings = EmbedSettings::default();
    ///
    /// let html = node.render(OutputFormat::Html, &settings).unwrap();
    /// assert!(html.starts_with("<iframe"));
    /// assert!(node.render(OutputFormat::Text, &settings).is_none());
    /// ```
    #[must_use]
    pub fn render(&self, format: OutputFormat, settings: &EmbedSettings) -> Option<String> {
        if !format.supports_embeds() {
            return None;
        }
        let mut out = String::new();
        self.visit(&mut out, format, settings);
        self.depart(&mut out, format);
        Some(out)
    }

    /// Append this node's markup to `out`.
    ///
    /// Appends nothing for formats that cannot show embeds.
    pub fn visit(&self, out: &mut String, format: OutputFormat, settings: &EmbedSettings) {
        if !format.supports_embeds() {
            return;
        }

        let src = settings.embed_src(&self.video_id);
        match self.layout(settings) {
            EmbedLayout::Responsive { container, frame } => {
                start_tag(out, "div", &[("style", &container.to_string())]);
                start_tag(out, "iframe", &[("src", &src), ("style", &frame.to_string())]);
                out.push_str("</iframe></div>");
            }
            EmbedLayout::Fixed { frame } => {
                start_tag(out, "iframe", &[("src", &src), ("style", &frame.to_string())]);
                out.push_str("</iframe>");
            }
        }
    }

    /// Close this node's markup. Embeds are fully closed by
    /// [`visit`](Self::visit), so this appends nothing.
    #[allow(clippy::unused_self)]
    pub fn depart(&self, _out: &mut String, _format: OutputFormat) {}
}

/// Write an opening tag with escaped attribute values.
fn start_tag(out: &mut String, name: &str, attrs: &[(&str, &str)]) {
    out.push('<');
    out.push_str(name);
    for (key, value) in attrs {
        write!(out, r#" {key}="{}""#, escape_attr(value)).unwrap();
    }
    out.push('>');
}

/// Escape a string for use inside a double-quoted attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
