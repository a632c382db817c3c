//! Strict typed-value grammars for raw config values.
//!
//! Each parser accepts exactly one narrow textual form and fails with an
//! explicit [`ValueError`] otherwise — no partial results, no coercion.
//! These are deliberately not general-purpose parsers: the accepted grammars
//! are part of the config-format contract (e.g. `1.` and `.5` are not valid
//! decimals here even though `str::parse::<f64>` would take them).

use crate::error::ValueError;

/// Parse a boolean. Accepts exactly `true`, `True`, `false`, `False`.
pub fn parse_bool(raw: &str) -> Result<bool, ValueError> {
    match raw {
        "true" | "True" => Ok(true),
        "false" | "False" => Ok(false),
        _ => Err(ValueError::Bool(raw.to_string())),
    }
}

/// Parse an unsigned integer: a non-empty run of ASCII digits.
///
/// No sign, no restriction on leading zeros. Values beyond [`u32::MAX`] are
/// a defined [`ValueError::UintRange`] failure.
pub fn parse_uint(raw: &str) -> Result<u32, ValueError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValueError::Uint(raw.to_string()));
    }
    raw.parse::<u32>()
        .map_err(|_| ValueError::UintRange(raw.to_string()))
}

/// Parse a decimal number with a deliberately strict grammar.
///
/// Accepted: ASCII digits, an optional leading `-`, and at most one `.`
/// that is immediately preceded and followed by a digit. `1.`, `.5`, `-`,
/// and the empty string are all rejected.
pub fn parse_double(raw: &str) -> Result<f64, ValueError> {
    let bytes = raw.as_bytes();
    let mut seps = 0;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'0'..=b'9' => {}
            b'-' if i == 0 => {}
            b'.' => {
                seps += 1;
                let digit_before = i > 0 && bytes[i - 1].is_ascii_digit();
                let digit_after = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
                if seps > 1 || !digit_before || !digit_after {
                    return Err(ValueError::Double(raw.to_string()));
                }
            }
            _ => return Err(ValueError::Double(raw.to_string())),
        }
    }
    // Rejects "" and a bare "-", which pass the character scan.
    raw.parse::<f64>()
        .map_err(|_| ValueError::Double(raw.to_string()))
}

/// Parse a quoted string: the raw value must start and end with `"` and be
/// at least two characters long. The quotes are stripped; no escape
/// processing is performed.
pub fn parse_string(raw: &str) -> Result<&str, ValueError> {
    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return Err(ValueError::Str(raw.to_string()));
    }
    Ok(&raw[1..raw.len() - 1])
}
