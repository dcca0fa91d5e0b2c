//! Reading sexagesimal renderings back into degrees.
//!
//! The parser accepts what [`render_sexagesimal`](super::render_sexagesimal)
//! writes for the same [`FormatSpec`]: the spec's separators, a leading `-`
//! or a trailing hemisphere letter, and decimals on the last field only.

use crate::errors::{FormatError, FormatResult};
use crate::format::{AngleUnit, FormatBase, FormatSpec, SignConvention};

/// Parses a sexagesimal string produced under `spec`, returning degrees.
pub fn parse_sexagesimal(input: &str, spec: &FormatSpec) -> FormatResult<f64> {
    let unit = match spec.base {
        FormatBase::Sexagesimal { unit, .. } => unit,
        _ => AngleUnit::Degrees,
    };

    let (body, negative) = split_sign(input.trim(), spec.sign);

    let mut normalized = body.to_string();
    for index in 0..3 {
        let sep = spec.separators.after(index);
        if !sep.is_empty() {
            normalized = normalized.replace(sep, " ");
        }
    }
    let parts: Vec<&str> = normalized.split_whitespace().collect();

    if parts.is_empty() {
        return Err(FormatError::parse(input, "empty string"));
    }
    if parts.len() > 3 {
        return Err(FormatError::parse(
            input,
            "too many components (max 3)",
        ));
    }

    let mut values = [0.0; 3];
    for (index, part) in parts.iter().enumerate() {
        values[index] = part
            .parse::<f64>()
            .map_err(|_| FormatError::parse(input, format!("invalid field '{part}'")))?;
        if index > 0 && !(0.0..60.0).contains(&values[index]) {
            return Err(FormatError::parse(input, "field must be in range [0, 60)"));
        }
    }
    let last = parts.len() - 1;
    if parts[..last].iter().any(|p| p.contains('.')) {
        return Err(FormatError::parse(
            input,
            "only the last field may carry decimals",
        ));
    }

    let magnitude = values[0] + values[1] / 60.0 + values[2] / 3600.0;
    let signed = if negative { -magnitude } else { magnitude };
    Ok(match unit {
        AngleUnit::Degrees => signed,
        AngleUnit::Hours => signed * 15.0,
    })
}

/// Strips the sign marker allowed by `sign`, returning the body and whether it was negative.
pub(crate) fn split_sign(input: &str, sign: SignConvention) -> (&str, bool) {
    match sign {
        SignConvention::Hemisphere { positive, negative } => {
            if let Some(body) = input.strip_suffix(negative) {
                (body.trim_end(), true)
            } else {
                (input.strip_suffix(positive).unwrap_or(input).trim_end(), false)
            }
        }
        SignConvention::Signed | SignConvention::Unsigned => match input.strip_prefix('-') {
            Some(body) => (body, true),
            None => (input.strip_prefix('+').unwrap_or(input), false),
        },
    }
}
