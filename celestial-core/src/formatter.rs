//! The coordinate formatter: one world value in, one display string out.
//!
//! [`format_coordinate`] is pure. It reads nothing but its arguments, so a
//! changed [`FormatSpec`] shows up on the very next call, and two axes never
//! influence each other's output.

use crate::angle::{parse::split_sign, parse_sexagesimal, render_sexagesimal, wrap_at};
use crate::errors::{FormatError, FormatResult};
use crate::format::{FormatBase, FormatSpec, SignConvention};
use crate::kind::CoordinateKind;
use crate::math::round_to;

/// Formats a world coordinate for display.
///
/// Longitudes are wrapped first. Sexagesimal specs treat `value` as degrees;
/// decimal specs render `value * scale` with `spec.precision` decimals
/// followed by `spec.unit`; plain specs render the shortest exact decimal.
///
/// ```
/// use celestial_core::{format_coordinate, CoordinateKind, FormatSpec};
///
/// let lon = format_coordinate(-0.5, CoordinateKind::longitude(), &FormatSpec::dms(2, 0));
/// assert_eq!(lon, "359°30'");
///
/// let v = format_coordinate(2563.2, CoordinateKind::Spectral, &FormatSpec::decimal(1.0, 0));
/// assert_eq!(v, "2563");
/// ```
pub fn format_coordinate(value: f64, kind: CoordinateKind, spec: &FormatSpec) -> String {
    let value = match kind {
        CoordinateKind::Longitude { wrap } => wrap_at(value, wrap),
        _ => value,
    };

    match spec.base {
        FormatBase::Sexagesimal { .. } => render_sexagesimal(value, spec),
        FormatBase::Decimal { scale } => {
            render_decimal(round_to(value * scale, spec.precision), spec)
        }
        FormatBase::Plain => render_decimal(if value == 0.0 { 0.0 } else { value }, spec),
    }
}

fn render_decimal(value: f64, spec: &FormatSpec) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = match spec.sign {
        SignConvention::Signed => value,
        _ => value.abs(),
    };
    let mut out = match spec.base {
        FormatBase::Plain => magnitude.to_string(),
        _ => format!("{:.*}", spec.precision as usize, magnitude),
    };
    out.push_str(&spec.unit);
    if let SignConvention::Hemisphere { positive, negative } = spec.sign {
        out.push(if value < 0.0 { negative } else { positive });
    }
    out
}

/// Reads a string produced by [`format_coordinate`] under `spec` back into
/// a world value.
///
/// Longitude wrapping is not undone; the result lies in the wrapped window.
pub fn parse_coordinate(input: &str, spec: &FormatSpec) -> FormatResult<f64> {
    let scale = match spec.base {
        FormatBase::Sexagesimal { .. } => return parse_sexagesimal(input, spec),
        FormatBase::Decimal { scale } => scale,
        FormatBase::Plain => 1.0,
    };

    let (body, negative) = split_sign(input.trim(), spec.sign);
    let body = body.strip_suffix(spec.unit.as_str()).unwrap_or(body).trim();
    let value = body
        .parse::<f64>()
        .map_err(|_| FormatError::parse(input, "invalid decimal number"))?;
    let value = if negative { -value } else { value };
    Ok(value / scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_degrees() {
        let spec = FormatSpec::parse("d.dddd").unwrap();
        assert_eq!(
            format_coordinate(267.17572, CoordinateKind::longitude(), &spec),
            "267.1757"
        );
    }

    #[test]
    fn test_decimal_arcminutes_with_unit() {
        let spec = FormatSpec::parse("m.m").unwrap().with_unit("'");
        assert_eq!(format_coordinate(0.5, CoordinateKind::Latitude, &spec), "30.0'");
    }

    #[test]
    fn test_decimal_negative_zero() {
        let spec = FormatSpec::decimal(1.0, 2);
        assert_eq!(format_coordinate(-0.001, CoordinateKind::Scalar, &spec), "0.00");
        assert_eq!(format_coordinate(-0.0, CoordinateKind::Scalar, &FormatSpec::plain()), "0");
    }

    #[test]
    fn test_plain_is_shortest() {
        let spec = FormatSpec::plain();
        assert_eq!(format_coordinate(2563.0, CoordinateKind::Spectral, &spec), "2563");
        assert_eq!(format_coordinate(0.125, CoordinateKind::Scalar, &spec), "0.125");
    }

    #[test]
    fn test_longitude_wrap_before_formatting() {
        let spec = FormatSpec::decimal(1.0, 1);
        let kind = CoordinateKind::Longitude { wrap: 180.0 };
        assert_eq!(format_coordinate(350.0, kind, &spec), "-10.0");
        assert_eq!(format_coordinate(-10.0, CoordinateKind::longitude(), &spec), "350.0");
    }

    #[test]
    fn test_latitude_is_not_wrapped() {
        let spec = FormatSpec::dms(3, 0);
        assert_eq!(format_coordinate(-0.488889, CoordinateKind::Latitude, &spec), "-0°29'20\"");
    }

    #[test]
    fn test_decimal_hemisphere() {
        let spec = FormatSpec::decimal(1.0, 1).with_sign(SignConvention::north_south());
        assert_eq!(format_coordinate(-12.25, CoordinateKind::Latitude, &spec), "12.3S");
        assert_eq!(format_coordinate(12.25, CoordinateKind::Latitude, &spec), "12.3N");
    }

    #[test]
    fn test_same_input_same_output() {
        let spec = FormatSpec::dms(3, 1);
        let a = format_coordinate(123.456, CoordinateKind::Latitude, &spec);
        let b = format_coordinate(123.456, CoordinateKind::Latitude, &spec);
        assert_eq!(a, b);
    }

    #[test]
    fn test_decimal_reformat_is_idempotent() {
        for pattern in ["d.dddd", "m.mm", "s.s", "x.xxx", "d"] {
            let spec = FormatSpec::parse(pattern).unwrap().with_unit(" u");
            for value in [0.0, -0.4888, 1.23456789, 266.404996, -89.99999, 1e-5] {
                let first = format_coordinate(value, CoordinateKind::Scalar, &spec);
                let back = parse_coordinate(&first, &spec).unwrap();
                let second = format_coordinate(back, CoordinateKind::Scalar, &spec);
                assert_eq!(first, second, "pattern {pattern} value {value}");
            }
        }
    }

    #[test]
    fn test_parse_coordinate_sexagesimal() {
        let spec = FormatSpec::dms(3, 0);
        let v = parse_coordinate("-28°45'56\"", &spec).unwrap();
        assert!((v + 28.765555555555555).abs() < 1e-10);
    }

    #[test]
    fn test_parse_coordinate_rejects_garbage() {
        assert!(parse_coordinate("twelve", &FormatSpec::decimal(1.0, 2)).is_err());
    }
}
