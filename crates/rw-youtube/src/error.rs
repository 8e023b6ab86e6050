//! Directive error types.

/// Error raised while turning directive options into an embed.
///
/// All variants are input-validation failures detected before any markup
/// is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum YoutubeError {
    /// Malformed `width` or `height` value.
    #[error("invalid size {0:?}: expected digits optionally followed by `px` or `%`")]
    InvalidSize(String),
    /// Malformed `aspect` value.
    #[error("invalid aspect ratio {0:?}: expected `width:height` with positive integers")]
    InvalidAspect(String),
    /// No video id in brackets.
    #[error("missing video id: expected `::youtube[VIDEO_ID]`")]
    MissingVideoId,
    /// Video id contains whitespace.
    #[error("invalid video id {0:?}: must not contain whitespace")]
    InvalidVideoId(String),
    /// Option the directive does not understand.
    #[error("unknown option {0:?}: expected one of `width`, `height`, `aspect`")]
    UnknownOption(String),
}
