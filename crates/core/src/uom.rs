//! Unit-of-measure tags for performance-data values.
//!
//! The compact threshold grammar suffixes a value with one of a fixed set
//! of unit tags (`"3.2s"`, `"85%"`, `"512MB"`). [`split_value_uom`] strips
//! the suffix off a raw subtoken; [`SUFFIX_ORDER`] fixes the order in which
//! suffixes are tested, which is load-bearing: `us` and `ms` must be tried
//! before the bare `s`, and `KB`/`MB`/`TB` before the bare `B`.

use serde::{Deserialize, Serialize};

/// Unit of measure attached to a threshold value.
///
/// Serialized as the literal suffix used on the wire (empty string for a
/// dimensionless value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Uom {
    /// Dimensionless value (no suffix).
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "us")]
    Microseconds,
    #[serde(rename = "ms")]
    Milliseconds,
    #[serde(rename = "s")]
    Seconds,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "KB")]
    Kilobytes,
    #[serde(rename = "MB")]
    Megabytes,
    #[serde(rename = "TB")]
    Terabytes,
    #[serde(rename = "B")]
    Bytes,
    /// Continuous counter (`c`), e.g. total requests served.
    #[serde(rename = "c")]
    Counter,
}

/// Suffixes in the order they are tested against a raw value subtoken.
///
/// This is an ordered slice, not a map: the multi-character suffixes shadow
/// their single-character tails, so reordering it changes what parses.
pub const SUFFIX_ORDER: &[(&str, Uom)] = &[
    ("us", Uom::Microseconds),
    ("ms", Uom::Milliseconds),
    ("s", Uom::Seconds),
    ("%", Uom::Percent),
    ("KB", Uom::Kilobytes),
    ("MB", Uom::Megabytes),
    ("TB", Uom::Terabytes),
    ("B", Uom::Bytes),
    ("c", Uom::Counter),
];

impl Uom {
    /// The literal wire suffix for this unit (empty for [`Uom::None`]).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Percent => "%",
            Self::Kilobytes => "KB",
            Self::Megabytes => "MB",
            Self::Terabytes => "TB",
            Self::Bytes => "B",
            Self::Counter => "c",
        }
    }
}

impl std::fmt::Display for Uom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a raw `value[uom]` subtoken into its numeric part and unit.
///
/// The first suffix in [`SUFFIX_ORDER`] that matches wins and is stripped.
/// Anything without a recognised suffix (most commonly a token ending in a
/// digit) is returned whole as a dimensionless value; this function never
/// rejects input.
pub fn split_value_uom(raw: &str) -> (&str, Uom) {
    for (suffix, uom) in SUFFIX_ORDER {
        if let Some(value) = raw.strip_suffix(suffix) {
            return (value, *uom);
        }
    }
    (raw, Uom::None)
}
