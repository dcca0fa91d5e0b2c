/// Maximum number of decimals any formatter renders.
pub const MAX_PRECISION: u8 = 9;

#[inline]
pub fn fmod(x: f64, y: f64) -> f64 {
    libm::fmod(x, y)
}

/// Rounds half away from zero (`2.5 -> 3`, `-2.5 -> -3`).
#[inline]
pub fn round_half_away(x: f64) -> f64 {
    libm::round(x)
}

#[inline]
pub fn pow10(n: u8) -> f64 {
    libm::pow(10.0, n as f64)
}

/// Rounds `x` to `precision` decimals and drops the sign of a zero result.
#[inline]
pub fn round_to(x: f64, precision: u8) -> f64 {
    let factor = pow10(precision);
    let rounded = round_half_away(x * factor) / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Smallest number of decimals that represents `step` exactly (within 1e-9 relative).
pub fn decimals_for_step(step: f64) -> u8 {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    for decimals in 0..=MAX_PRECISION {
        let scaled = step * pow10(decimals);
        if (scaled - round_half_away(scaled)).abs() <= 1e-9 * scaled.max(1.0) {
            return decimals;
        }
    }
    MAX_PRECISION
}
