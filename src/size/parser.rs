use super::{ByteCount, FormatError, GIB, KIB, MIB};

/// Parse a size specification such as `500`, `1K`, `20m` or `4G` into bytes.
///
/// Grammar: one or more ASCII digits followed by at most one unit letter
/// (`K`, `M`, `G`, case-insensitive, binary multiples). Whitespace, signs,
/// decimal points and anything after the unit are rejected.
///
/// The digit run is accumulated directly in `u64` and the unit is applied
/// with checked multiplication, so an oversized specification is reported
/// as [`FormatError::Overflow`] instead of wrapping to a smaller value.
pub fn parse_size_spec(spec: &str) -> Result<ByteCount, FormatError> {
    if spec.is_empty() {
        return Err(FormatError::Empty);
    }

    let digits_end = spec
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(spec.len());

    if digits_end == 0 {
        return Err(FormatError::MissingDigits {
            spec: spec.to_string(),
        });
    }

    let (digits, suffix) = spec.split_at(digits_end);
    let multiplier = unit_multiplier(spec, digits_end, suffix)?;

    let overflow = || FormatError::Overflow {
        spec: spec.to_string(),
    };

    let value = digits
        .bytes()
        .try_fold(0u64, |acc, b| {
            acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
        })
        .ok_or_else(overflow)?;

    let bytes = value.checked_mul(multiplier).ok_or_else(overflow)?;

    if bytes == 0 {
        return Err(FormatError::Zero {
            spec: spec.to_string(),
        });
    }

    Ok(bytes)
}

/// Resolve the optional unit suffix that follows the digit run
fn unit_multiplier(spec: &str, position: usize, suffix: &str) -> Result<ByteCount, FormatError> {
    let mut chars = suffix.chars();

    let multiplier = match chars.next() {
        None => return Ok(1),
        Some('k' | 'K') => KIB,
        Some('m' | 'M') => MIB,
        Some('g' | 'G') => GIB,
        Some(found) => {
            return Err(FormatError::InvalidCharacter {
                spec: spec.to_string(),
                position,
                found,
            });
        }
    };

    if chars.next().is_some() {
        return Err(FormatError::TrailingCharacters {
            spec: spec.to_string(),
        });
    }

    Ok(multiplier)
}

/// Render a byte count using the largest unit that divides it exactly
///
/// `1048576` becomes `1M`, `1500` stays `1500`. The output is accepted by
/// [`parse_size_spec`] and parses back to the same value.
pub fn format_byte_count(bytes: ByteCount) -> String {
    if bytes == 0 {
        return "0".to_string();
    }

    for (unit, letter) in [(GIB, 'G'), (MIB, 'M'), (KIB, 'K')] {
        if bytes % unit == 0 {
            return format!("{}{}", bytes / unit, letter);
        }
    }

    bytes.to_string()
}
