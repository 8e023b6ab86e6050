//! Line-based directive processor.
//!
//! A minimal [`ExtensionHost`] that expands leaf directives in markdown
//! source before it is handed to a markdown renderer. A directive must sit
//! on its own line; fenced code blocks are left untouched.

use std::fmt;

use crate::host::{ExtensionHost, LeafDirective};
use crate::{DirectiveArgs, EmbedSettings, OutputFormat, YoutubeError};

/// A directive that failed to expand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Line of the directive (1-indexed).
    pub line: usize,
    /// Directive name.
    pub directive: String,
    /// What was wrong with it.
    pub error: YoutubeError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.directive, self.error)
    }
}

/// Expands registered leaf directives for one output format.
///
/// # Example
///
/// ```
/// use rw_youtube::{DirectiveProcessor, OutputFormat, register};
///
/// let mut processor = DirectiveProcessor::new(OutputFormat::Html);
/// register(&mut processor);
///
/// let output = processor.process("# Demo\n\n::youtube[dQw4w9WgXcQ]{width=100%}\n");
/// assert!(output.contains(r#"<iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ""#));
/// assert!(processor.diagnostics().is_empty());
/// ```
pub struct DirectiveProcessor {
    format: OutputFormat,
    settings: EmbedSettings,
    directives: Vec<Box<dyn LeafDirective>>,
    diagnostics: Vec<Diagnostic>,
}

impl DirectiveProcessor {
    /// Create a processor with default embed settings.
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        Self::with_settings(format, EmbedSettings::default())
    }

    /// Create a processor with custom embed settings.
    #[must_use]
    pub fn with_settings(format: OutputFormat, settings: EmbedSettings) -> Self {
        Self {
            format,
            settings,
            directives: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Output format directives are rendered for.
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Diagnostics collected so far, in source order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Expand directives in `input`.
    ///
    /// Failed directives keep their source text and add a [`Diagnostic`].
    /// Directives the format cannot show become empty lines.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut fence = Fence::default();

        for (idx, raw) in input.split_inclusive('\n').enumerate() {
            let (line, ending) = split_line_ending(raw);
            if fence.update(line) || fence.is_open() {
                output.push_str(line);
            } else {
                self.process_line(line, idx + 1, &mut output);
            }
            output.push_str(ending);
        }

        output
    }

    fn process_line(&mut self, line: &str, line_num: usize, output: &mut String) {
        let Some((name, args)) = parse_leaf_line(line) else {
            output.push_str(line);
            return;
        };
        let Some(directive) = self.directives.iter().find(|d| d.name() == name) else {
            output.push_str(line);
            return;
        };

        match directive.run(&args) {
            Ok(node) => {
                if let Some(markup) = node.render(self.format, &self.settings) {
                    output.push_str(&markup);
                }
            }
            Err(error) => {
                tracing::warn!(line = line_num, directive = name, %error, "Directive failed");
                self.diagnostics.push(Diagnostic {
                    line: line_num,
                    directive: name.to_owned(),
                    error,
                });
                output.push_str(line);
            }
        }
    }
}

impl ExtensionHost for DirectiveProcessor {
    fn add_directive(&mut self, directive: Box<dyn LeafDirective>) {
        self.directives.retain(|d| d.name() != directive.name());
        self.directives.push(directive);
    }

    fn has_directive(&self, name: &str) -> bool {
        self.directives.iter().any(|d| d.name() == name)
    }
}

/// Parse a line consisting of exactly `::name[content]{attrs}`.
///
/// Brackets and braces are optional; surrounding whitespace is ignored.
fn parse_leaf_line(line: &str) -> Option<(&str, DirectiveArgs)> {
    let rest = line.trim().strip_prefix("::")?;
    if rest.starts_with(':') {
        return None;
    }

    let name_end = rest.find(['[', '{']).unwrap_or(rest.len());
    let name = &rest[..name_end];
    if !is_valid_name(name) {
        return None;
    }
    let rest = &rest[name_end..];

    let (content, rest) = match rest.strip_prefix('[') {
        Some(inner) => inner.split_once(']')?,
        None => ("", rest),
    };
    let (attrs, rest) = match rest.strip_prefix('{') {
        Some(inner) => inner.split_once('}')?,
        None => ("", rest),
    };
    if !rest.is_empty() {
        return None;
    }

    Some((name, DirectiveArgs::parse(content, attrs)))
}

/// Split a line from `split_inclusive('\n')` into text and its `\n` or
/// `\r\n` terminator (empty for a final unterminated line).
fn split_line_ending(raw: &str) -> (&str, &str) {
    let text_len = raw
        .strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .map_or(raw.len(), str::len);
    raw.split_at(text_len)
}

/// Directive names contain only alphanumerics, hyphens, and underscores.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Fenced code block state.
///
/// A fence opens with three or more backticks or tildes indented by at most
/// three spaces, and closes with at least as many of the same character and
/// nothing else on the line. A backtick fence's info string cannot contain
/// backticks. Lines indented four or more spaces are indented code, never
/// fences.
#[derive(Debug, Default)]
struct Fence {
    open: Option<(char, usize)>,
}

impl Fence {
    fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Track a line. Returns `true` if the line opened or closed a fence.
    fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start_matches(' ');
        if line.len() - trimmed.len() > 3 {
            return false;
        }
        let Some(first) = trimmed.chars().next().filter(|c| matches!(c, '`' | '~')) else {
            return false;
        };
        let len = trimmed.chars().take_while(|&c| c == first).count();

        match self.open {
            Some((ch, open_len)) => {
                let closes = ch == first
                    && len >= open_len
                    && trimmed[len..].chars().all(char::is_whitespace);
                if closes {
                    self.open = None;
                }
                closes
            }
            None if len >= 3 && !(first == '`' && trimmed[len..].contains('`')) => {
                self.open = Some((first, len));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmbedNode, Node, YoutubeDirective, register};
    use pretty_assertions::assert_eq;

    fn html_processor() -> DirectiveProcessor {
        let mut processor = DirectiveProcessor::new(OutputFormat::Html);
        register(&mut processor);
        processor
    }

    #[test]
    fn test_parse_leaf_line() {
        let (name, args) = parse_leaf_line("::youtube[abc]{width=50%}").unwrap();
        assert_eq!(name, "youtube");
        assert_eq!(args.content, "abc");
        assert_eq!(args.get("width"), Some("50%"));
    }

    #[test]
    fn test_parse_leaf_line_indented() {
        let (name, args) = parse_leaf_line("   ::youtube[abc]  ").unwrap();
        assert_eq!(name, "youtube");
        assert_eq!(args.content, "abc");
    }

    #[test]
    fn test_parse_leaf_line_without_content() {
        let (name, args) = parse_leaf_line("::youtube{width=50%}").unwrap();
        assert_eq!(name, "youtube");
        assert_eq!(args.content, "");
    }

    #[test]
    fn test_parse_leaf_line_rejects_other_syntax() {
        assert!(parse_leaf_line("text ::youtube[abc]").is_none());
        assert!(parse_leaf_line(":youtube[abc]").is_none());
        assert!(parse_leaf_line(":::youtube[abc]").is_none());
        assert!(parse_leaf_line("::youtube[abc] trailing").is_none());
        assert!(parse_leaf_line("::youtube[abc").is_none());
        assert!(parse_leaf_line("::you tube[abc]").is_none());
        assert!(parse_leaf_line("::").is_none());
    }

    #[test]
    fn test_expands_directive() {
        let mut processor = html_processor();
        let output = processor.process("Intro\n\n::youtube[abc]\n\nOutro\n");
        assert_eq!(
            output,
            concat!(
                "Intro\n\n",
                r#"<iframe src="https://www.youtube.com/embed/abc" style="border: 0; height: 345px; width: 560px"></iframe>"#,
                "\n\nOutro\n"
            )
        );
        assert!(processor.diagnostics().is_empty());
    }

    #[test]
    fn test_preserves_missing_trailing_newline() {
        let mut processor = html_processor();
        let output = processor.process("a\nb");
        assert_eq!(output, "a\nb");
    }

    #[test]
    fn test_preserves_crlf() {
        let mut processor = html_processor();
        let output = processor.process("a\r\nb\r\n");
        assert_eq!(output, "a\r\nb\r\n");
    }

    #[test]
    fn test_preserves_crlf_around_directive() {
        let mut processor = html_processor();
        let output = processor.process("Intro\r\n::youtube[abc]\r\nOutro");
        assert_eq!(
            output,
            concat!(
                "Intro\r\n",
                r#"<iframe src="https://www.youtube.com/embed/abc" style="border: 0; height: 345px; width: 560px"></iframe>"#,
                "\r\nOutro"
            )
        );
        assert!(processor.diagnostics().is_empty());
    }

    #[test]
    fn test_preserves_mixed_line_endings() {
        let mut processor = DirectiveProcessor::new(OutputFormat::Text);
        register(&mut processor);
        let output = processor.process("a\n::youtube[abc]\r\n\r\nb\n");
        assert_eq!(output, "a\n\r\n\r\nb\n");
    }

    #[test]
    fn test_crlf_fence_is_skipped() {
        let mut processor = html_processor();
        let input = "```\r\n::youtube[abc]\r\n```\r\n";
        assert_eq!(processor.process(input), input);
    }

    #[test]
    fn test_split_line_ending() {
        assert_eq!(split_line_ending("a\r\n"), ("a", "\r\n"));
        assert_eq!(split_line_ending("a\n"), ("a", "\n"));
        assert_eq!(split_line_ending("a"), ("a", ""));
        assert_eq!(split_line_ending("a\r"), ("a\r", ""));
    }

    #[test]
    fn test_empty_input() {
        let mut processor = html_processor();
        assert_eq!(processor.process(""), "");
    }

    #[test]
    fn test_text_format_drops_embed() {
        let mut processor = DirectiveProcessor::new(OutputFormat::Text);
        register(&mut processor);
        let output = processor.process("before\n::youtube[abc]{width=50%}\nafter\n");
        assert_eq!(output, "before\n\nafter\n");
        assert!(processor.diagnostics().is_empty());
    }

    #[test]
    fn test_invalid_directive_keeps_source() {
        let mut processor = html_processor();
        let input = "# Title\n::youtube[abc]{aspect=16x9}\n";
        let output = processor.process(input);
        assert_eq!(output, input);
        assert_eq!(
            processor.diagnostics(),
            &[Diagnostic {
                line: 2,
                directive: "youtube".to_owned(),
                error: YoutubeError::InvalidAspect("16x9".to_owned()),
            }]
        );
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic {
            line: 7,
            directive: "youtube".to_owned(),
            error: YoutubeError::MissingVideoId,
        };
        assert!(diagnostic.to_string().starts_with("line 7: youtube: missing video id"));
    }

    #[test]
    fn test_unknown_directive_passes_through() {
        let mut processor = html_processor();
        let input = "::vimeo[123]\n";
        assert_eq!(processor.process(input), input);
        assert!(processor.diagnostics().is_empty());
    }

    #[test]
    fn test_unregistered_processor_passes_through() {
        let mut processor = DirectiveProcessor::new(OutputFormat::Html);
        let input = "::youtube[abc]\n";
        assert_eq!(processor.process(input), input);
    }

    #[test]
    fn test_skips_fenced_code() {
        let mut processor = html_processor();
        let input = "```markdown\n::youtube[abc]\n```\n~~~~\n::youtube[abc]\n~~~\n~~~~\n";
        assert_eq!(processor.process(input), input);
        assert!(processor.diagnostics().is_empty());
    }

    #[test]
    fn test_directive_after_fence() {
        let mut processor = html_processor();
        let output = processor.process("```\ncode\n```\n::youtube[abc]\n");
        assert!(output.starts_with("```\ncode\n```\n<iframe "));
    }

    #[test]
    fn test_multiple_errors_are_collected() {
        let mut processor = html_processor();
        let _ = processor.process("::youtube[]\n::youtube[ok]\n::youtube[x]{width=wide}\n");
        let lines: Vec<_> = processor.diagnostics().iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_register_replaces_same_name() {
        struct Fixed;

        impl LeafDirective for Fixed {
            fn name(&self) -> &'static str {
                "youtube"
            }

            fn run(&self, _args: &DirectiveArgs) -> Result<Node, YoutubeError> {
                Ok(Node::Youtube(EmbedNode::new("fixed")))
            }
        }

        let mut processor = DirectiveProcessor::new(OutputFormat::Html);
        processor.add_directive(Box::new(YoutubeDirective));
        processor.add_directive(Box::new(Fixed));
        let output = processor.process("::youtube[abc]");
        assert!(output.contains("/embed/fixed\""));
    }

    #[test]
    fn test_custom_settings() {
        let settings = EmbedSettings {
            control_height: 0,
            ..EmbedSettings::default()
        };
        let mut processor = DirectiveProcessor::with_settings(OutputFormat::Html, settings);
        register(&mut processor);
        let output = processor.process("::youtube[abc]{height=300}");
        assert!(output.contains("height: 300px; width: 533px"));
    }

    #[test]
    fn test_indented_code_is_not_fence() {
        let mut fence = Fence::default();
        assert!(!fence.update("    ```"));
        assert!(!fence.is_open());
        assert!(fence.update("   ```"));
        assert!(fence.is_open());
        assert!(!fence.update("    ```"));
        assert!(fence.is_open());
        assert!(fence.update("```"));
        assert!(!fence.is_open());
    }

    #[test]
    fn test_backtick_info_string_with_backtick_is_not_fence() {
        let mut fence = Fence::default();
        assert!(!fence.update("```a`b"));
        assert!(!fence.is_open());
        assert!(fence.update("~~~a`b"));
        assert!(fence.is_open());
    }

    #[test]
    fn test_directive_after_pseudo_fences() {
        let mut processor = html_processor();
        let output = processor.process("    ```\n```a`b\n::youtube[abc]\n");
        assert!(output.starts_with("    ```\n```a`b\n<iframe "));
        assert!(processor.diagnostics().is_empty());
    }

    #[test]
    fn test_format_accessor() {
        assert_eq!(html_processor().format(), OutputFormat::Html);
        assert_eq!(
            DirectiveProcessor::new(OutputFormat::Latex).format(),
            OutputFormat::Latex
        );
    }

    #[test]
    fn test_fence_tracking() {
        let mut fence = Fence::default();
        assert!(!fence.update("``"));
        assert!(!fence.is_open());
        assert!(fence.update("````rust"));
        assert!(fence.is_open());
        assert!(!fence.update("```"));
        assert!(!fence.update("~~~~"));
        assert!(!fence.update("```` trailing"));
        assert!(fence.is_open());
        assert!(fence.update("`````"));
        assert!(!fence.is_open());
    }
}
