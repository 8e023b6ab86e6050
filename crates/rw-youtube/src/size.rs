//! Size and aspect ratio option parsing.
//!
//! Sizes are written as a digit run with an optional unit (`560`, `560px`,
//! `50%`). Aspect ratios are written as `width:height` (`16:9`).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::YoutubeError;

static SIZE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(%|px)?$").unwrap());

static ASPECT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):(\d+)$").unwrap());

/// Unit of a [`SizeValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeUnit {
    /// CSS pixels.
    Px,
    /// Percentage of the containing block.
    Percent,
}

impl SizeUnit {
    /// CSS suffix for this unit.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
        }
    }
}

/// A parsed `width` or `height` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SizeValue {
    /// Numeric part of the size.
    pub magnitude: u32,
    /// Unit, `px` when the option had no suffix.
    pub unit: SizeUnit,
}

impl SizeValue {
    /// Size in pixels.
    #[must_use]
    pub fn px(magnitude: u32) -> Self {
        Self {
            magnitude,
            unit: SizeUnit::Px,
        }
    }

    /// Size as a percentage.
    #[must_use]
    pub fn percent(magnitude: u32) -> Self {
        Self {
            magnitude,
            unit: SizeUnit::Percent,
        }
    }
}

impl fmt::Display for SizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.suffix())
    }
}

impl FromStr for SizeValue {
    type Err = YoutubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || YoutubeError::InvalidSize(s.to_owned());
        let caps = SIZE_PATTERN.captures(s).ok_or_else(invalid)?;
        let magnitude = caps[1].parse::<u32>().map_err(|_| invalid())?;
        let unit = match caps.get(2).map(|m| m.as_str()) {
            Some("%") => SizeUnit::Percent,
            _ => SizeUnit::Px,
        };
        Ok(Self { magnitude, unit })
    }
}

/// A parsed `aspect` option.
///
/// Both terms are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    /// Horizontal term.
    pub numerator: u32,
    /// Vertical term.
    pub denominator: u32,
}

impl AspectRatio {
    /// Widescreen 16:9, used when no aspect is given.
    pub const WIDESCREEN: Self = Self {
        numerator: 16,
        denominator: 9,
    };

    /// Height for the given width, truncated to an integer.
    #[must_use]
    pub fn height_for(self, width: u32) -> u32 {
        scale(width, self.denominator, self.numerator)
    }

    /// Width for the given height, truncated to an integer.
    #[must_use]
    pub fn width_for(self, height: u32) -> u32 {
        scale(height, self.numerator, self.denominator)
    }

    /// Height for the given width as an unrounded percentage.
    #[must_use]
    pub fn height_percent_for(self, width: u32) -> f64 {
        f64::from(width) * f64::from(self.denominator) / f64::from(self.numerator)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

impl FromStr for AspectRatio {
    type Err = YoutubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || YoutubeError::InvalidAspect(s.to_owned());
        let caps = ASPECT_PATTERN.captures(s).ok_or_else(invalid)?;
        let numerator = caps[1].parse::<u32>().map_err(|_| invalid())?;
        let denominator = caps[2].parse::<u32>().map_err(|_| invalid())?;
        if numerator == 0 || denominator == 0 {
            return Err(invalid());
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }
}

/// `value * mul / div` in 64-bit, saturated back into `u32`.
fn scale(value: u32, mul: u32, div: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(mul) / u64::from(div);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Parse an optional `width`/`height` option.
///
/// Returns `Ok(None)` when the option was not given, which is distinct from
/// a zero size.
///
/// # Example
///
/// ```
/// use rw_youtube::{SizeValue, parse_size};
///
/// assert_eq!(parse_size(Some("50%")).unwrap(), Some(SizeValue::percent(50)));
/// assert_eq!(parse_size(Some("320")).unwrap(), Some(SizeValue::px(320)));
/// assert_eq!(parse_size(None).unwrap(), None);
/// assert!(parse_size(Some("10em")).is_err());
/// ```
pub fn parse_size(value: Option<&str>) -> Result<Option<SizeValue>, YoutubeError> {
    value.map(str::parse).transpose()
}

/// Parse an optional `aspect` option.
///
/// # Example
///
/// ```
/// use rw_youtube::parse_aspect;
///
/// let aspect = parse_aspect(Some("4:3")).unwrap().unwrap();
/// assert_eq!((aspect.numerator, aspect.denominator), (4, 3));
/// assert!(parse_aspect(Some("16x9")).is_err());
/// ```
pub fn parse_aspect(value: Option<&str>) -> Result<Option<AspectRatio>, YoutubeError> {
    value.map(str::parse).transpose()
}
