//! Sexagesimal rendering with carry.
//!
//! Astronomy writes angles in base 60: `DD°MM'SS.ss"` for degrees and
//! `HHhMMmSS.sss` for hours. The subtle part is rounding. Rounding each
//! field on its own turns `0°59'59.99999"` into `0°59'60"`; here the value is
//! rounded once, as an integer count of the smallest displayed unit, and the
//! fields are then peeled off that integer so a carry always reaches the
//! field above.
//!
//! ```
//! use celestial_core::angle::render_sexagesimal;
//! use celestial_core::{FormatSpec, SignConvention};
//!
//! let spec = FormatSpec::dms(3, 0);
//! let almost_one = 59.0 / 60.0 + 59.99999 / 3600.0;
//! assert_eq!(render_sexagesimal(almost_one, &spec), "1°00'00\"");
//!
//! // a value that rounds to zero never shows a sign
//! assert_eq!(render_sexagesimal(-0.00001, &spec), "0°00'00\"");
//!
//! let spec = FormatSpec::dms(3, 0).with_sign(SignConvention::north_south());
//! assert_eq!(render_sexagesimal(-28.765556, &spec), "28°45'56\"S");
//! ```

use crate::format::{AngleUnit, FormatBase, FormatSpec, SignConvention};
use crate::math::{pow10, round_half_away, MAX_PRECISION};

/// An angle split into base-60 fields after rounding.
///
/// `fields[0]` is degrees or hours, `fields[1]` minutes, `fields[2]` seconds;
/// only the first `count` entries are meaningful. `fraction` holds the
/// decimals of the last field as an integer with `precision` digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sexagesimal {
    pub negative: bool,
    pub fields: [u64; 3],
    pub count: u8,
    pub fraction: u64,
    pub precision: u8,
}

/// Largest count of smallest units that `f64` holds exactly (2^53).
const MAX_UNITS: f64 = 9_007_199_254_740_992.0;

/// Splits `value` (in major units) into `count` fields with `precision`
/// decimals on the last one.
///
/// Decimals are dropped while the rounded count of the smallest unit would
/// exceed 2^53, so `precision` in the result may be lower than requested.
/// Values too large even for whole units saturate; see [`fits`].
pub fn decompose(value: f64, count: u8, precision: u8) -> Sexagesimal {
    let count = count.clamp(1, 3);
    let units = value.abs() * per_major(count);
    let mut precision = precision.min(MAX_PRECISION);
    while precision > 0 && units * pow10(precision) >= MAX_UNITS {
        precision -= 1;
    }

    let frac_div = pow10(precision) as u64;
    let total = round_half_away(units * frac_div as f64).min(MAX_UNITS) as u64;

    let fraction = total % frac_div;
    let whole = total / frac_div;
    let fields = match count {
        1 => [whole, 0, 0],
        2 => [whole / 60, whole % 60, 0],
        _ => [whole / 3600, (whole / 60) % 60, whole % 60],
    };

    Sexagesimal {
        negative: value < 0.0 && total != 0,
        fields,
        count,
        fraction,
        precision,
    }
}

/// Whether `value` splits into `count` exact whole fields.
pub fn fits(value: f64, count: u8) -> bool {
    value.is_finite() && value.abs() * per_major(count.clamp(1, 3)) < MAX_UNITS
}

fn per_major(count: u8) -> f64 {
    libm::pow(60.0, (count - 1) as f64)
}

impl Sexagesimal {
    /// Writes the fields with `spec`'s separators and sign convention.
    pub fn render(&self, spec: &FormatSpec) -> String {
        let mut out = String::new();
        if self.negative && spec.sign == SignConvention::Signed {
            out.push('-');
        }

        let last = self.count as usize - 1;
        for (index, field) in self.fields.iter().take(self.count as usize).enumerate() {
            if index == 0 {
                out.push_str(&field.to_string());
            } else {
                out.push_str(&format!("{field:02}"));
            }
            if index == last && self.precision > 0 {
                out.push('.');
                out.push_str(&format!(
                    "{:0width$}",
                    self.fraction,
                    width = self.precision as usize
                ));
            }
            out.push_str(spec.separators.after(index));
        }

        if let SignConvention::Hemisphere { positive, negative } = spec.sign {
            out.push(if self.negative { negative } else { positive });
        }
        out
    }
}

/// Renders `degrees` as a sexagesimal string under `spec`.
///
/// Hour-based specs divide by 15 first. Non-sexagesimal specs are rendered
/// as whole-arcsecond degrees. Values with no exact sexagesimal form fall
/// back to the plain number.
pub fn render_sexagesimal(degrees: f64, spec: &FormatSpec) -> String {
    let (unit, count) = match spec.base {
        FormatBase::Sexagesimal { unit, fields } => (unit, fields),
        _ => (AngleUnit::Degrees, 3),
    };
    let value = match unit {
        AngleUnit::Degrees => degrees,
        AngleUnit::Hours => degrees / 15.0,
    };
    if !fits(value, count) {
        return degrees.to_string();
    }
    decompose(value, count, spec.precision).render(spec)
}
