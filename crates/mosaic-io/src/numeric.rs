//! Locale-tolerant number parsing.
//!
//! Exports from the analysis tool use a decimal comma; hand-edited files
//! often carry a dot. Digit groups may be separated by plain or no-break
//! spaces. Every function returns `None` instead of failing so callers can
//! skip the field.

const GROUP_SPACES: [char; 3] = [' ', '\u{00A0}', '\u{202F}'];

/// Parses a signed integer, tolerating surrounding whitespace and digit-group spaces.
pub fn parse_int(text: &str) -> Option<i32> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    parse_int_token(s).or_else(|| parse_int_token(&strip_group_spaces(s)))
}

/// Parses a float written with either a decimal comma or a decimal dot.
///
/// The comma form is tried first, then the dot form, and only then both
/// again with digit-group spaces removed.
pub fn parse_float(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    parse_float_token(s).or_else(|| parse_float_token(&strip_group_spaces(s)))
}

/// Returns the first run of digits (with an optional leading minus) in `text`,
/// e.g. `2` for `"LC=2"`.
pub fn first_integer(text: &str) -> Option<i32> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |n| start + n);
    let signed_start = if start > 0 && bytes[start - 1] == b'-' {
        start - 1
    } else {
        start
    };
    text[signed_start..end].parse().ok()
}

fn strip_group_spaces(s: &str) -> String {
    s.chars().filter(|c| !GROUP_SPACES.contains(c)).collect()
}

fn parse_int_token(s: &str) -> Option<i32> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if !is_digits(digits) {
        return None;
    }
    s.parse().ok()
}

fn parse_float_token(s: &str) -> Option<f64> {
    parse_with_decimal(s, ',').or_else(|| parse_with_decimal(s, '.'))
}

fn parse_with_decimal(s: &str, decimal: char) -> Option<f64> {
    if !is_float_literal(s, decimal) {
        return None;
    }
    if decimal == '.' {
        s.parse().ok()
    } else {
        s.replace(decimal, ".").parse().ok()
    }
}

/// `[sign] (digits [sep digits?] | sep digits) [(e|E) [sign] digits]`
fn is_float_literal(s: &str, decimal: char) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let mantissa_ok = match mantissa.split_once(decimal) {
        Some((int, frac)) => {
            (int.is_empty() || is_digits(int))
                && (frac.is_empty() || is_digits(frac))
                && !(int.is_empty() && frac.is_empty())
        }
        None => is_digits(mantissa),
    };

    let exponent_ok = exponent.is_none_or(|exp| is_digits(exp.strip_prefix(['+', '-']).unwrap_or(exp)));

    mantissa_ok && exponent_ok
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_decimal_separators() {
        assert_eq!(parse_float("1,5"), Some(1.5));
        assert_eq!(parse_float("1.5"), Some(1.5));
        assert_eq!(parse_float(" -0,25 "), Some(-0.25));
        assert_eq!(parse_float("+3"), Some(3.0));
        assert_eq!(parse_float(",5"), Some(0.5));
        assert_eq!(parse_float("2."), Some(2.0));
    }

    #[test]
    fn parses_exponents() {
        assert_eq!(parse_float("1,5E-3"), Some(0.0015));
        assert_eq!(parse_float("-2.5e2"), Some(-250.0));
        assert_eq!(parse_float("4e+1"), Some(40.0));
    }

    #[test]
    fn strips_group_spaces_on_second_attempt() {
        let expected = Some(1234567.89);
        for text in [
            "1234567,89",
            "1234567.89",
            "1 234 567,89",
            "1 234 567.89",
            "1\u{00A0}234\u{00A0}567,89",
            "1\u{00A0}234\u{00A0}567.89",
            "1\u{202F}234\u{202F}567,89",
        ] {
            assert_eq!(parse_float(text), expected, "input {text:?}");
        }
    }

    #[test]
    fn rejects_non_numeric_text() {
        for text in ["", "   ", "abc", "1,2,3", "1.2.3", "1,2.3", "e5", "1e", "--1", "NaN", "inf", "."] {
            assert_eq!(parse_float(text), None, "input {text:?}");
        }
    }

    #[test]
    fn parses_integers() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("  -7 "), Some(-7));
        assert_eq!(parse_int("+3"), Some(3));
        assert_eq!(parse_int("12 345"), Some(12345));
        assert_eq!(parse_int("1,0"), None);
        assert_eq!(parse_int("x1"), None);
        assert_eq!(parse_int("99999999999"), None);
    }

    #[test]
    fn finds_first_integer() {
        assert_eq!(first_integer("LC=2"), Some(2));
        assert_eq!(first_integer("LC 12 snow"), Some(12));
        assert_eq!(first_integer("-3"), Some(-3));
        assert_eq!(first_integer("case-4"), Some(-4));
        assert_eq!(first_integer("none"), None);
    }
}
