//! Display formatting shared by the catalog front ends.

/// Fraction digits needed to print any finite `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Format `value` with exactly `digits` fraction digits.
///
/// Rounds the exact binary value of `value`, with ties going away from zero,
/// so `1.125` prints as `1.13` while `1.005` (stored as `1.00499...`) prints
/// as `1.00`. Negative zero prints without a sign.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = digits.min(EXACT_FRACTION_DIGITS);

    // `{:.N}` only rounds past the last exact digit here, so this is a truncation
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept = integer
        .bytes()
        .chain(fraction.bytes().take(digits))
        .collect::<Vec<u8>>();

    if fraction.as_bytes().get(digits).is_some_and(|next| *next >= b'5') {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let (integer, fraction) = kept.split_at(kept.len() - digits);
    let mut fixed = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        fixed.push('-');
    }
    fixed.extend(integer.iter().copied().map(char::from));
    if digits > 0 {
        fixed.push('.');
        fixed.extend(fraction.iter().copied().map(char::from));
    }
    fixed
}
