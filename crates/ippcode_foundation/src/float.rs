//! Hexadecimal floating-point text.
//!
//! Floats are written in the `0x1.<13 hex digits>p<exp>` form and read
//! back from either that form or ordinary decimal notation.

const MANTISSA_BITS: u32 = 52;
const MANTISSA_MASK: u64 = (1 << MANTISSA_BITS) - 1;
const EXPONENT_BIAS: i64 = 1023;

/// Formats a float in hexadecimal notation.
///
/// Normal numbers always carry thirteen mantissa digits, zero is
/// `0x0.0p+0`, and subnormals use a `0x0.` prefix with exponent `-1022`.
#[must_use]
pub fn to_hex(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value.is_infinite() {
        return format!("{sign}inf");
    }
    if value == 0.0 {
        return format!("{sign}0x0.0p+0");
    }

    let bits = value.to_bits();
    let mantissa = bits & MANTISSA_MASK;
    #[allow(clippy::cast_possible_wrap)]
    let biased = ((bits >> MANTISSA_BITS) & 0x7ff) as i64;

    if biased == 0 {
        format!("{sign}0x0.{mantissa:013x}p-1022")
    } else {
        let exponent = biased - EXPONENT_BIAS;
        format!("{sign}0x1.{mantissa:013x}p{exponent:+}")
    }
}

/// Parses decimal or hexadecimal float text.
///
/// Returns `None` when the text is neither.
#[must_use]
pub fn parse(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<f64>() {
        return Some(value);
    }

    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let rest = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .unwrap_or(rest);

    let magnitude = parse_hex_magnitude(rest)?;
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_hex_magnitude(text: &str) -> Option<f64> {
    let (body, exponent_text) = match text.find(['p', 'P']) {
        Some(i) => (&text[..i], Some(&text[i + 1..])),
        None => (text, None),
    };

    let mut mantissa: u64 = 0;
    let mut exponent: i64 = 0;
    let mut digits = 0usize;
    let mut seen_point = false;

    for c in body.chars() {
        if c == '.' {
            if seen_point {
                return None;
            }
            seen_point = true;
            continue;
        }
        let digit = c.to_digit(16)?;
        digits += 1;
        if mantissa >> 60 == 0 {
            mantissa = mantissa * 16 + u64::from(digit);
            if seen_point {
                exponent -= 4;
            }
        } else if !seen_point {
            // Mantissa is full; further integer digits only shift it.
            exponent += 4;
        }
    }
    if digits == 0 {
        return None;
    }

    let explicit = match exponent_text {
        Some(e) if !e.is_empty() => e.parse::<i64>().ok()?,
        Some(_) => return None,
        None => 0,
    };

    #[allow(clippy::cast_precision_loss)]
    let base = mantissa as f64;
    Some(scale(base, (exponent + explicit).clamp(-4000, 4000)))
}

/// Multiplies by a power of two without overflowing the intermediate factor.
fn scale(mut value: f64, mut exponent: i64) -> f64 {
    let big = 2f64.powi(1000);
    let small = 2f64.powi(-1000);
    while exponent > 1000 {
        value *= big;
        exponent -= 1000;
    }
    while exponent < -1000 {
        value *= small;
        exponent += 1000;
    }
    #[allow(clippy::cast_possible_truncation)]
    let rest = 2f64.powi(exponent as i32);
    value * rest
}
