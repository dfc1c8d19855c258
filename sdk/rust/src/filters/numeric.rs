//! Numeric literal detection
//!
//! Accepts plain decimal numbers only:
//!
//! ```text
//! number   := sign? mantissa exponent?
//! mantissa := digits ('.' digits?)? | '.' digits
//! exponent := ('e' | 'E') sign? digits
//! ```
//!
//! Blank input, surrounding whitespace, `NaN`, `Infinity`, hex literals and
//! values that overflow `f64` are not numeric.

/// True when `value` is a finite decimal number
pub fn looks_numeric(value: &str) -> bool {
    if !matches_decimal_grammar(value.as_bytes()) {
        return false;
    }
    value.parse::<f64>().is_ok_and(f64::is_finite)
}

fn matches_decimal_grammar(bytes: &[u8]) -> bool {
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        frac_digits = count_digits(&bytes[i..]);
        i += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_digits = count_digits(&bytes[i..]);
        if exp_digits == 0 {
            return false;
        }
        i += exp_digits;
    }

    i == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
