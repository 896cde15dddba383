//! Number rounding and rendering

/// Largest magnitude where every integer is exactly representable
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

/// Round to `decimals` decimal places
///
/// Rounds the exact decimal value of `x`, so a value that already has
/// `decimals` places comes back unchanged and rounding twice is the same
/// as rounding once. Values too large to carry that many decimals come
/// back unchanged. Negative zero is normalized to `0.0`.
pub fn round_to(x: f64, decimals: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let scaled = x * 10f64.powi(decimals as i32);
    let rounded = if scaled.abs() >= MAX_EXACT {
        x
    } else {
        format!("{:.*}", decimals as usize, x)
            .parse::<f64>()
            .unwrap_or(x)
    };
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Shortest text that reads back as the same float
///
/// Integral values keep a `.0` and exponents carry a sign and at least two
/// digits: `2.0`, `-0.5`, `1e-05`, `1.5e+16`.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let text = format!("{:?}", x);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

/// Render with a fixed number of significant digits, keeping trailing zeros
///
/// Fixed notation is used for decimal exponents in `(-5, digits)`,
/// scientific otherwise: `3.14159265358979`, `2.00000000000000`,
/// `0.000100000000000000`, `1.00000000000000e+20`.
pub fn format_significant(x: f64, digits: usize) -> String {
    if !x.is_finite() {
        return format_float(x);
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, x.abs());
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let significand: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let sign = if x < 0.0 { "-" } else { "" };

    let min_fixed = -((digits / 3).max(5) as i32);
    let max_fixed = digits as i32;

    if exponent > min_fixed && exponent < max_fixed {
        if exponent >= 0 {
            let split = (exponent + 1) as usize;
            let (int_part, frac_part) = significand.split_at(split.min(significand.len()));
            let frac_part = if frac_part.is_empty() { "0" } else { frac_part };
            format!("{}{}.{}", sign, int_part, frac_part)
        } else {
            let zeros = "0".repeat((-exponent - 1) as usize);
            format!("{}0.{}{}", sign, zeros, significand)
        }
    } else {
        let (first, rest) = significand.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        let exp_sign = if exponent >= 0 { "+" } else { "" };
        format!("{}{}.{}e{}{}", sign, first, rest, exp_sign, exponent)
    }
}
