//! `YouTube` embed directive for RW markdown documents.
//!
//! Authors embed a video with a leaf directive:
//!
//! ```text
//! ::youtube[dQw4w9WgXcQ]{width=50% aspect=4:3}
//! ```
//!
//! Options:
//!
//! - `width`, `height`: digits with an optional `px` or `%` suffix (default `px`)
//! - `aspect`: `width:height`, default `16:9`
//!
//! # Layout
//!
//! A percentage `width` without a `height` renders a responsive container
//! whose bottom padding keeps the aspect ratio, with the iframe filling it.
//! Anything else renders a fixed-size iframe: a missing dimension is derived
//! from the other one and the aspect ratio (560px wide when neither is
//! given), and the frame height includes a 30px control-bar allowance.
//!
//! # Output formats
//!
//! Only [`OutputFormat::Html`] renders markup. `LaTeX` and text output render
//! nothing, so documents with embeds still build for those formats.
//!
//! # Example
//!
//! ```
//! use rw_youtube::{DirectiveProcessor, OutputFormat, register};
//!
//! let mut processor = DirectiveProcessor::new(OutputFormat::Html);
//! register(&mut processor);
//!
//! let html = processor.process("::youtube[dQw4w9WgXcQ]{height=300 aspect=4:3}");
//! assert_eq!(
//!     html,
//!     r#"<iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ" style="border: 0; height: 330px; width: 400px"></iframe>"#
//! );
//! ```

mod args;
mod config;
mod directive;
mod error;
mod host;
mod layout;
mod node;
mod processor;
mod size;
mod style;

pub use args::DirectiveArgs;
pub use config::{
    CONFIG_FILENAME, CONTROL_HEIGHT, Config, ConfigError, DEFAULT_EMBED_URL, DEFAULT_WIDTH,
    EmbedSettings, YoutubeConfig,
};
pub use directive::{YoutubeDirective, register};
pub use error::YoutubeError;
pub use host::{ExtensionHost, LeafDirective};
pub use layout::{EmbedLayout, resolve};
pub use node::{EmbedNode, Node, OutputFormat, UnknownFormat};
pub use processor::{Diagnostic, DirectiveProcessor};
pub use size::{AspectRatio, SizeUnit, SizeValue, parse_aspect, parse_size};
pub use style::{InvalidDeclaration, StyleMap};
