//! Numeric literal parsing with explicit target widths.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberError {
    /// Not a literal of the requested kind.
    Syntax,
    /// Well-formed but outside the target width.
    Range,
}

/// Parse a signed integer literal into a value that fits in `bits` bits.
///
/// Accepts an optional sign followed by a `0x`, `0o` or `0b` prefixed
/// literal, a leading-zero octal literal, or a plain decimal literal.
pub(crate) fn parse_int(literal: &str, bits: u32) -> Result<i64, NumberError> {
    let (negative, body) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };
    let magnitude = i128::from(parse_magnitude(body)?);
    let value = if negative { -magnitude } else { magnitude };

    let min = -(1i128 << (bits - 1));
    let max = (1i128 << (bits - 1)) - 1;
    if value < min || value > max {
        return Err(NumberError::Range);
    }
    Ok(value as i64)
}

/// Parse an unsigned integer literal (no sign allowed) that fits in `bits` bits.
pub(crate) fn parse_uint(literal: &str, bits: u32) -> Result<u64, NumberError> {
    let value = parse_magnitude(literal)?;
    let max = if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    };
    if value > max {
        return Err(NumberError::Range);
    }
    Ok(value)
}

pub(crate) fn parse_f32(literal: &str) -> Result<f32, NumberError> {
    let value: f32 = literal.parse().map_err(|_| NumberError::Syntax)?;
    if value.is_infinite() && !is_infinity_literal(literal) {
        return Err(NumberError::Range);
    }
    Ok(value)
}

pub(crate) fn parse_f64(literal: &str) -> Result<f64, NumberError> {
    let value: f64 = literal.parse().map_err(|_| NumberError::Syntax)?;
    if value.is_infinite() && !is_infinity_literal(literal) {
        return Err(NumberError::Range);
    }
    Ok(value)
}

fn parse_magnitude(body: &str) -> Result<u64, NumberError> {
    let (digits, radix) = if let Some(rest) = strip_prefix(body, 'x') {
        (rest, 16)
    } else if let Some(rest) = strip_prefix(body, 'o') {
        (rest, 8)
    } else if let Some(rest) = strip_prefix(body, 'b') {
        (rest, 2)
    } else if body.len() > 1 && body.starts_with('0') {
        (&body[1..], 8)
    } else {
        (body, 10)
    };

    // from_str_radix would also accept a sign here.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(NumberError::Syntax);
    }
    u64::from_str_radix(digits, radix).map_err(|_| NumberError::Range)
}

fn strip_prefix(body: &str, marker: char) -> Option<&str> {
    let rest = body.strip_prefix('0')?;
    rest.strip_prefix(marker)
        .or_else(|| rest.strip_prefix(marker.to_ascii_uppercase()))
}

fn is_infinity_literal(literal: &str) -> bool {
    let unsigned = literal.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
