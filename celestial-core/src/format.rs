//! Per-axis format specifications and the format-string grammar.
//!
//! A [`FormatSpec`] is usually built from a short pattern string:
//!
//! | Pattern | Meaning |
//! |---------|---------|
//! | `dd`, `dd:mm`, `dd:mm:ss`, `dd:mm:ss.sss` | Sexagesimal degrees, 1-3 fields |
//! | `hh`, `hh:mm`, `hh:mm:ss`, `hh:mm:ss.sss` | Sexagesimal hours (degrees / 15) |
//! | `d`, `d.ddd` | Decimal degrees |
//! | `m`, `m.mmm` | Decimal arcminutes |
//! | `s`, `s.sss` | Decimal arcseconds |
//! | `x`, `x.xxx` | Decimal scalar, no unit conversion |
//!
//! The number of repeated characters after the dot is the precision.
//!
//! ```
//! use celestial_core::format::{AngleUnit, FormatBase, FormatSpec};
//!
//! let spec = FormatSpec::parse("hh:mm:ss.ss").unwrap();
//! assert_eq!(spec.base, FormatBase::Sexagesimal { unit: AngleUnit::Hours, fields: 3 });
//! assert_eq!(spec.precision, 2);
//!
//! let spec = FormatSpec::parse("d.dddd").unwrap();
//! assert_eq!(spec.base, FormatBase::Decimal { scale: 1.0 });
//! assert_eq!(spec.precision, 4);
//! ```

use core::str::FromStr;

use crate::errors::{FormatError, FormatResult};
use crate::math::MAX_PRECISION;

/// Major unit of a sexagesimal rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AngleUnit {
    Degrees,
    /// 1 hour = 15 degrees.
    Hours,
}

/// Number base of a rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FormatBase {
    /// Base-60 subdivision with 1 to 3 fields.
    Sexagesimal { unit: AngleUnit, fields: u8 },
    /// Fixed-point decimal of `value * scale`.
    Decimal { scale: f64 },
    /// Shortest decimal that reads back to the same `f64`.
    Plain,
}

/// Symbols written after each sexagesimal field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Separators {
    pub major: String,
    pub minor: String,
    pub second: String,
}

impl Separators {
    pub fn new(major: &str, minor: &str, second: &str) -> Self {
        Self {
            major: major.to_string(),
            minor: minor.to_string(),
            second: second.to_string(),
        }
    }

    /// `°`, `'`, `"`.
    pub fn degrees() -> Self {
        Self::new("°", "'", "\"")
    }

    /// `h`, `m`, `s`.
    pub fn hours() -> Self {
        Self::new("h", "m", "s")
    }

    /// `12:30:15` style.
    pub fn colons() -> Self {
        Self::new(":", ":", "")
    }

    pub fn for_unit(unit: AngleUnit) -> Self {
        match unit {
            AngleUnit::Degrees => Self::degrees(),
            AngleUnit::Hours => Self::hours(),
        }
    }

    /// Separator written after field `index` (0 = major).
    pub fn after(&self, index: usize) -> &str {
        match index {
            0 => &self.major,
            1 => &self.minor,
            _ => &self.second,
        }
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self::degrees()
    }
}

/// How the sign of a value is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SignConvention {
    /// `-` for negative values, nothing otherwise.
    #[default]
    Signed,
    /// Magnitude only.
    Unsigned,
    /// Magnitude followed by a hemisphere letter, e.g. `N`/`S`.
    Hemisphere { positive: char, negative: char },
}

impl SignConvention {
    pub fn north_south() -> Self {
        Self::Hemisphere {
            positive: 'N',
            negative: 'S',
        }
    }

    pub fn east_west() -> Self {
        Self::Hemisphere {
            positive: 'E',
            negative: 'W',
        }
    }
}

/// Formatting configuration of one displayed axis.
///
/// Mutable at any time by the axis that owns it; formatting reads it fresh
/// on every call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatSpec {
    pub base: FormatBase,
    /// Decimals of the last rendered field.
    pub precision: u8,
    pub separators: Separators,
    /// Suffix appended verbatim to decimal and plain renderings.
    pub unit: String,
    pub sign: SignConvention,
}

impl FormatSpec {
    /// Sexagesimal degrees with `fields` fields (clamped to 1..=3).
    pub fn dms(fields: u8, precision: u8) -> Self {
        Self::sexagesimal(AngleUnit::Degrees, fields, precision)
    }

    /// Sexagesimal hours with `fields` fields (clamped to 1..=3).
    pub fn hms(fields: u8, precision: u8) -> Self {
        Self::sexagesimal(AngleUnit::Hours, fields, precision)
    }

    pub fn sexagesimal(unit: AngleUnit, fields: u8, precision: u8) -> Self {
        Self {
            base: FormatBase::Sexagesimal {
                unit,
                fields: fields.clamp(1, 3),
            },
            precision: precision.min(MAX_PRECISION),
            separators: Separators::for_unit(unit),
            unit: String::new(),
            sign: SignConvention::Signed,
        }
    }

    /// Decimal rendering of `value * scale`.
    pub fn decimal(scale: f64, precision: u8) -> Self {
        Self {
            base: FormatBase::Decimal { scale },
            precision: precision.min(MAX_PRECISION),
            separators: Separators::default(),
            unit: String::new(),
            sign: SignConvention::Signed,
        }
    }

    pub fn plain() -> Self {
        Self {
            base: FormatBase::Plain,
            precision: 0,
            separators: Separators::default(),
            unit: String::new(),
            sign: SignConvention::Signed,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_sign(mut self, sign: SignConvention) -> Self {
        self.sign = sign;
        self
    }

    pub fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }

    pub fn is_sexagesimal(&self) -> bool {
        matches!(self.base, FormatBase::Sexagesimal { .. })
    }

    /// Parses a pattern of the format grammar (see the module docs).
    pub fn parse(pattern: &str) -> FormatResult<Self> {
        let trimmed = pattern.trim();
        if let Some(tail) = trimmed.strip_prefix("dd") {
            let (fields, precision) = parse_sexagesimal_tail(pattern, tail)?;
            return Ok(Self::dms(fields, precision));
        }
        if let Some(tail) = trimmed.strip_prefix("hh") {
            let (fields, precision) = parse_sexagesimal_tail(pattern, tail)?;
            return Ok(Self::hms(fields, precision));
        }

        let mut chars = trimmed.chars();
        let lead = chars
            .next()
            .ok_or_else(|| FormatError::invalid_format(pattern, "empty format"))?;
        let scale = match lead {
            'd' => 1.0,
            'm' => 60.0,
            's' => 3600.0,
            'x' => 1.0,
            other => {
                return Err(FormatError::invalid_format(
                    pattern,
                    format!("unknown format character '{other}'"),
                ))
            }
        };
        let precision = parse_decimals(pattern, chars.as_str(), lead)?;
        Ok(Self::decimal(scale, precision))
    }
}

impl FromStr for FormatSpec {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parses what follows `dd`/`hh`: `""`, `":mm"`, `":mm:ss"`, `":mm:ss.s+"`.
fn parse_sexagesimal_tail(pattern: &str, tail: &str) -> FormatResult<(u8, u8)> {
    if tail.is_empty() {
        return Ok((1, 0));
    }
    let Some(tail) = tail.strip_prefix(":mm") else {
        return Err(FormatError::invalid_format(pattern, "expected ':mm'"));
    };
    if tail.is_empty() {
        return Ok((2, 0));
    }
    let Some(tail) = tail.strip_prefix(":ss") else {
        return Err(FormatError::invalid_format(pattern, "expected ':ss'"));
    };
    let precision = parse_decimals(pattern, tail, 's')?;
    Ok((3, precision))
}

/// Parses `""` or `".ccc"` where `c` is `repeated`.
fn parse_decimals(pattern: &str, tail: &str, repeated: char) -> FormatResult<u8> {
    if tail.is_empty() {
        return Ok(0);
    }
    let Some(digits) = tail.strip_prefix('.') else {
        return Err(FormatError::invalid_format(
            pattern,
            format!("unexpected '{tail}'"),
        ));
    };
    if digits.is_empty() || digits.chars().any(|c| c != repeated) {
        return Err(FormatError::invalid_format(
            pattern,
            format!("decimals must be one or more '{repeated}'"),
        ));
    }
    let count = digits.chars().count();
    if count > MAX_PRECISION as usize {
        return Err(FormatError::invalid_format(
            pattern,
            format!("at most {MAX_PRECISION} decimals are supported"),
        ));
    }
    Ok(count as u8)
}
