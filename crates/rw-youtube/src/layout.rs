//! Embed dimension resolution.
//!
//! A percentage width with no height produces a responsive layout: the
//! container keeps the video's aspect ratio through bottom padding and the
//! frame fills it. Every other combination produces a fixed-size frame.

use crate::{AspectRatio, EmbedSettings, SizeUnit, SizeValue, StyleMap};

/// Computed layout for one embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedLayout {
    /// Sizing container wrapping an absolutely positioned frame.
    Responsive {
        /// Style of the outer `div`.
        container: StyleMap,
        /// Style of the inner `iframe`.
        frame: StyleMap,
    },
    /// Single frame with explicit dimensions.
    Fixed {
        /// Style of the `iframe`.
        frame: StyleMap,
    },
}

impl EmbedLayout {
    /// Style of the `iframe` element.
    #[must_use]
    pub fn frame(&self) -> &StyleMap {
        match self {
            Self::Responsive { frame, .. } | Self::Fixed { frame } => frame,
        }
    }

    /// Style of the wrapping container, if any.
    #[must_use]
    pub fn container(&self) -> Option<&StyleMap> {
        match self {
            Self::Responsive { container, .. } => Some(container),
            Self::Fixed { .. } => None,
        }
    }
}

/// Compute the layout for the given options.
///
/// # Example
///
/// ```
/// use rw_youtube::{EmbedLayout, EmbedSettings, resolve};
///
/// let layout = resolve(None, None, None, &EmbedSettings::default());
/// assert_eq!(layout.frame().get("width"), Some("560px"));
/// assert_eq!(layout.frame().get("height"), Some("345px"));
/// assert!(matches!(layout, EmbedLayout::Fixed { .. }));
/// ```
#[must_use]
pub fn resolve(
    width: Option<SizeValue>,
    height: Option<SizeValue>,
    aspect: Option<AspectRatio>,
    settings: &EmbedSettings,
) -> EmbedLayout {
    let aspect = aspect.unwrap_or(settings.default_aspect);

    match (width, height) {
        (Some(width), None) if width.unit == SizeUnit::Percent => {
            responsive(width.magnitude, aspect, settings)
        }
        _ => fixed(width, height, aspect, settings),
    }
}

fn responsive(width: u32, aspect: AspectRatio, settings: &EmbedSettings) -> EmbedLayout {
    let container = StyleMap::new()
        .with("position", "relative")
        .with("width", format!("{width}%"))
        .with("padding-top", format!("{}px", settings.control_height))
        .with(
            "padding-bottom",
            format!("{:.6}%", aspect.height_percent_for(width)),
        );
    let frame = StyleMap::new()
        .with("position", "absolute")
        .with("top", "0")
        .with("left", "0")
        .with("width", "100%")
        .with("height", "100%")
        .with("border", "0");
    EmbedLayout::Responsive { container, frame }
}

fn fixed(
    width: Option<SizeValue>,
    height: Option<SizeValue>,
    aspect: AspectRatio,
    settings: &EmbedSettings,
) -> EmbedLayout {
    let width = width.unwrap_or_else(|| match height {
        Some(height) => SizeValue::px(aspect.width_for(height.magnitude)),
        None => SizeValue::px(settings.default_width),
    });
    let height = height.unwrap_or_else(|| SizeValue::px(aspect.height_for(width.magnitude)));
    let frame_height = SizeValue {
        magnitude: height.magnitude.saturating_add(settings.control_height),
        unit: height.unit,
    };

    let frame = StyleMap::new()
        .with("width", width.to_string())
        .with("height", frame_height.to_string())
        .with("border", "0");
    EmbedLayout::Fixed { frame }
}
