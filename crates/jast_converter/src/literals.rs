//! Literal token decoding.
//!
//! Integer literals of every base normalize to a `u64`, floating literals
//! (decimal and hexadecimal) to an `f64`. Character and string literals keep
//! their escapes; only the quotes are removed. Text blocks are split into
//! lines and their common indentation is stripped.

use crate::support::{malformed, CResult};
use jast_ast::{AstError, Literal, LiteralKind};
use jast_parser::ParseTree;
use jast_scanner::{Token, TokenKind};

/// Decode the literal token of a `Literal` rule.
pub(crate) fn literal(tree: &ParseTree, token: &Token) -> CResult<Literal> {
    let text = token.text.as_str();
    let kind = match token.kind {
        TokenKind::IntegerLiteral => {
            let (value, long) = decode_integer(text).ok_or_else(|| out_of_range(text))?;
            LiteralKind::Int { value, long }
        }
        TokenKind::FloatingLiteral => {
            let (value, double) = decode_float(text).ok_or_else(|| out_of_range(text))?;
            LiteralKind::Float { value, double }
        }
        TokenKind::CharLiteral => LiteralKind::Char(strip_quotes(text, 1).to_string()),
        TokenKind::StringLiteral => LiteralKind::String(strip_quotes(text, 1).to_string()),
        TokenKind::TextBlock => LiteralKind::TextBlock(text_block_lines(text)),
        TokenKind::True => LiteralKind::Bool(true),
        TokenKind::False => LiteralKind::Bool(false),
        TokenKind::Null => LiteralKind::Null,
        _ => return Err(malformed(tree, format!("{} is not a literal", token.kind.describe()))),
    };
    Ok(Literal::new(kind))
}

fn out_of_range(text: &str) -> AstError {
    AstError::new("Literal", "value", format!("literal '{}' is out of range", text))
}

fn strip_quotes(text: &str, width: usize) -> &str {
    if text.len() >= 2 * width {
        &text[width..text.len() - width]
    } else {
        ""
    }
}

// ============================================================================
// Numbers
// ============================================================================

/// Decode an integer literal into its value and whether it carries the long
/// suffix. Returns `None` when the value does not fit in 64 bits.
pub fn decode_integer(text: &str) -> Option<(u64, bool)> {
    let (digits, long) = match text.strip_suffix(['l', 'L']) {
        Some(digits) => (digits, true),
        None => (text, false),
    };
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    let (radix, body) = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(bin) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        (2, bin)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits.as_str())
    };
    u64::from_str_radix(body, radix).ok().map(|value| (value, long))
}

/// Decode a floating literal into its value and whether it carries an
/// explicit `d`/`D` suffix. Returns `None` for values that are not finite.
pub fn decode_float(text: &str) -> Option<(f64, bool)> {
    let double = text.ends_with(['d', 'D']);
    let body = text.strip_suffix(['d', 'D', 'f', 'F']).unwrap_or(text);
    let body: String = body.chars().filter(|&c| c != '_').collect();
    let value = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => decode_hex_float(hex)?,
        None => body.parse::<f64>().ok()?,
    };
    value.is_finite().then_some((value, double))
}

/// `h.hhhp±e` without the `0x` prefix.
fn decode_hex_float(text: &str) -> Option<f64> {
    let (mantissa, exponent) = text.split_once(['p', 'P'])?;
    let exponent: i32 = exponent.parse().ok()?;
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    // Keep the leading 15 significant hex digits exactly; later digits only
    // shift the binary point.
    let mut value: u64 = 0;
    let mut significant = 0;
    let mut shift: i32 = exponent;
    for (index, c) in whole.chars().chain(fraction.chars()).enumerate() {
        let digit = c.to_digit(16)? as u64;
        let in_fraction = index >= whole.len();
        if significant < 15 {
            value = value * 16 + digit;
            if value != 0 {
                significant += 1;
            }
            if in_fraction {
                shift -= 4;
            }
        } else if !in_fraction {
            shift += 4;
        }
    }
    Some(value as f64 * 2f64.powi(shift))
}

// ============================================================================
// Text blocks
// ============================================================================

/// The content lines of a text block token, with the whitespace prefix
/// shared by all non-blank lines removed from every line. A closing
/// delimiter on its own line takes part in the shared prefix.
///
/// The opening line (`"""` and the line terminator) is dropped. The last
/// line holds whatever precedes the closing `"""`, so a closing delimiter on
/// its own line yields a trailing empty line.
pub fn text_block_lines(text: &str) -> Vec<String> {
    let inner = strip_quotes(text, 3);
    let content = match memchr::memchr(b'\n', inner.as_bytes()) {
        Some(newline) => &inner[newline + 1..],
        None => inner,
    };

    let mut lines = Vec::new();
    let mut start = 0;
    for newline in memchr::memchr_iter(b'\n', content.as_bytes()) {
        lines.push(&content[start..newline]);
        start = newline + 1;
    }
    lines.push(&content[start..]);
    let lines: Vec<&str> = lines
        .into_iter()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let prefix = common_indentation(&lines);
    lines
        .into_iter()
        .map(|line| match line.strip_prefix(prefix) {
            Some(rest) => rest.to_string(),
            None if line.trim().is_empty() => String::new(),
            None => line.to_string(),
        })
        .collect()
}

/// The longest whitespace prefix shared by every non-blank line and the
/// last line.
fn common_indentation<'a>(lines: &[&'a str]) -> &'a str {
    let last = lines.len().saturating_sub(1);
    let mut prefix: Option<&'a str> = None;
    let significant = lines
        .iter()
        .enumerate()
        .filter(|(index, line)| *index == last || !line.trim().is_empty())
        .map(|(_, line)| line);
    for line in significant {
        let indent = &line[..line.len() - line.trim_start().len()];
        prefix = Some(match prefix {
            None => indent,
            Some(current) => {
                let shared = current
                    .char_indices()
                    .zip(indent.chars())
                    .find(|((_, a), b)| a != b)
                    .map_or(current.len().min(indent.len()), |((index, _), _)| index);
                &current[..shared]
            }
        });
    }
    prefix.unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_bases() {
        assert_eq!(decode_integer("42"), Some((42, false)));
        assert_eq!(decode_integer("42L"), Some((42, true)));
        assert_eq!(decode_integer("0x2A"), Some((42, false)));
        assert_eq!(decode_integer("0X2al"), Some((42, true)));
        assert_eq!(decode_integer("052"), Some((42, false)));
        assert_eq!(decode_integer("0b101010"), Some((42, false)));
        assert_eq!(decode_integer("1_000_000"), Some((1_000_000, false)));
        assert_eq!(decode_integer("0"), Some((0, false)));
        assert_eq!(decode_integer("0xFFFF_FFFF_FFFF_FFFFL"), Some((u64::MAX, true)));
        assert_eq!(decode_integer("0x1_0000_0000_0000_0000"), None);
    }

    #[test]
    fn test_decimal_floats() {
        assert_eq!(decode_float("3.14"), Some((3.14, false)));
        assert_eq!(decode_float("3.14d"), Some((3.14, true)));
        assert_eq!(decode_float("2.5F"), Some((2.5, false)));
        assert_eq!(decode_float("1e3"), Some((1000.0, false)));
        assert_eq!(decode_float(".5"), Some((0.5, false)));
        assert_eq!(decode_float("1_0.0_1"), Some((10.01, false)));
        assert_eq!(decode_float("1e400"), None);
    }

    #[test]
    fn test_hex_floats() {
        let (value, double) = decode_float("0x1.91eb851eb851fp+1").unwrap();
        assert!((value - 3.14).abs() < 1e-9);
        assert!(!double);
        assert_eq!(decode_float("0x1p-2"), Some((0.25, false)));
        assert_eq!(decode_float("0x.8p1D"), Some((1.0, true)));
        assert_eq!(decode_float("0x10P0"), Some((16.0, false)));
    }

    #[test]
    fn test_text_block_strips_common_indentation() {
        let text = "\"\"\"\n    foo\n      bar\n\n    baz\n    \"\"\"";
        assert_eq!(text_block_lines(text), vec!["foo", "  bar", "", "baz", ""]);
    }

    #[test]
    fn test_text_block_closing_on_last_line() {
        assert_eq!(text_block_lines("\"\"\"\n  foo\"\"\""), vec!["foo"]);
        assert_eq!(text_block_lines("\"\"\"  \r\n\tfoo\r\n\t\"\"\""), vec!["foo", ""]);
    }

    #[test]
    fn test_text_block_closing_line_limits_indentation() {
        let text = "\"\"\"\n      foo\n    \"\"\"";
        assert_eq!(text_block_lines(text), vec!["  foo", ""]);
    }
}
