//! The `::youtube` directive.

use crate::host::{ExtensionHost, LeafDirective};
use crate::{DirectiveArgs, EmbedNode, Node, YoutubeError, parse_aspect, parse_size};

/// Options accepted by `::youtube`.
const OPTIONS: [&str; 3] = ["width", "height", "aspect"];

/// Leaf directive embedding a `YouTube` video:
/// `::youtube[VIDEO_ID]{width=.. height=.. aspect=..}`.
///
/// # Example
///
/// ```
/// use rw_youtube::{DirectiveArgs, LeafDirective, Node, SizeValue, YoutubeDirective};
///
/// let args = DirectiveArgs::parse("dQw4w9WgXcQ", "width=50%");
/// let Node::Youtube(embed) = YoutubeDirective.run(&args).unwrap();
/// assert_eq!(embed.width, Some(SizeValue::percent(50)));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct YoutubeDirective;

impl LeafDirective for YoutubeDirective {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn run(&self, args: &DirectiveArgs) -> Result<Node, YoutubeError> {
        let video_id = args.content.trim();
        if video_id.is_empty() {
            return Err(YoutubeError::MissingVideoId);
        }
        if video_id.contains(char::is_whitespace) {
            return Err(YoutubeError::InvalidVideoId(video_id.to_owned()));
        }
        if let Some(unknown) = args.names().find(|name| !OPTIONS.contains(name)) {
            return Err(YoutubeError::UnknownOption(unknown.to_owned()));
        }

        let aspect = parse_aspect(args.get("aspect"))?;
        let width = parse_size(args.get("width"))?;
        let height = parse_size(args.get("height"))?;

        tracing::debug!(
            video_id,
            width = ?width,
            height = ?height,
            aspect = ?aspect,
            "Resolved youtube directive"
        );

        Ok(Node::Youtube(EmbedNode {
            video_id: video_id.to_owned(),
            width,
            height,
            aspect,
        }))
    }
}

/// Register the `::youtube` directive with a host.
///
/// Call once while setting up the host, before processing documents.
///
/// # Example
///
/// ```
/// use rw_youtube::{DirectiveProcessor, ExtensionHost, OutputFormat, register};
///
/// let mut processor = DirectiveProcessor::new(OutputFormat::Html);
/// register(&mut processor);
/// assert!(processor.has_directive("youtube"));
/// ```
pub fn register<H: ExtensionHost + ?Sized>(host: &mut H) {
    host.add_directive(Box::new(YoutubeDirective));
    tracing::debug!(directive = "youtube", "Registered directive");
}
