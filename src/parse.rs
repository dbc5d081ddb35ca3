//! Quote and escape aware line scanner.
//!
//! Used directly as a standalone string parser and indirectly by
//! [`crate::options::StripComments::Parsed`] to locate comment boundaries
//! without being fooled by `//` or `#` appearing inside a quoted string.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input has an unsupported escape sequence")]
    UnsupportedEscape,
    #[error("input has a bad octal escape sequence")]
    BadOctal,
    #[error("input has a bad hex escape sequence")]
    BadHex,
    #[error("input ends in a trailing backslash")]
    UnterminatedEscape,
    #[error("input has an unterminated quoted string")]
    UnterminatedQuote,
    #[error("input has an unsupported unicode escape sequence")]
    UnsupportedUnicode,
}

/// Controls how [`parse_string`] scans a line.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Stop parsing entirely (outside quotes) at the first of any of these bytes.
    pub stop_at_any_of: String,
    /// Stop parsing entirely (outside quotes) at the first occurrence of this string.
    pub stop_at_str: String,
    /// Outside quotes, end the current piece at the first of any of these bytes.
    pub split_at_any_of: String,
    /// Drop the surrounding quote characters from parsed output.
    pub remove_quotes: bool,
    /// Permit unquoted, unescaped content. If false, parsing stops (without
    /// error) at the first such character.
    pub allow_unquoted: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            stop_at_any_of: String::new(),
            stop_at_str: String::new(),
            split_at_any_of: String::new(),
            remove_quotes: true,
            allow_unquoted: true,
        }
    }
}

fn one_char_escape(c: char) -> Option<char> {
    Some(match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '\\' => '\\',
        '\'' => '\'',
        '"' => '"',
        '(' => '(',
        ')' => ')',
        '{' => '{',
        '}' => '}',
        '[' => '[',
        ']' => ']',
        '<' => '<',
        '>' => '>',
        ',' => ',',
        ';' => ';',
        '&' => '&',
        _ => return None,
    })
}

fn is_octal_digit(c: char) -> bool {
    ('0'..='7').contains(&c)
}

/// Consumes one escape sequence (the bytes after a leading `\`) from `chars`,
/// appending the decoded character to `out`. All escape bytes are ASCII, so
/// the returned count is both the number of chars and bytes consumed.
fn consume_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, out: &mut String) -> Result<usize, ParseError> {
    let c = chars.next().ok_or(ParseError::UnterminatedEscape)?;
    if let Some(mapped) = one_char_escape(c) {
        out.push(mapped);
        return Ok(1);
    }
    match c {
        'u' | 'U' | 'N' => Err(ParseError::UnsupportedUnicode),
        'o' => {
            if chars.peek() != Some(&'{') {
                return Err(ParseError::BadOctal);
            }
            chars.next();
            let mut digits = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(d) if is_octal_digit(d) => digits.push(d),
                    _ => return Err(ParseError::BadOctal),
                }
            }
            let value = u32::from_str_radix(&digits, 8).map_err(|_| ParseError::BadOctal)?;
            if value > 0xFF {
                return Err(ParseError::BadOctal);
            }
            out.push(char::from(value as u8));
            Ok(digits.len() + 3)
        }
        'x' => {
            if chars.peek() == Some(&'{') {
                chars.next();
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(d) if d.is_ascii_hexdigit() => digits.push(d),
                        _ => return Err(ParseError::BadHex),
                    }
                }
                let value = u32::from_str_radix(&digits, 16).map_err(|_| ParseError::BadHex)?;
                if value > 0xFF {
                    return Err(ParseError::BadHex);
                }
                out.push(char::from(value as u8));
                Ok(digits.len() + 3)
            } else {
                let mut digits = String::new();
                for _ in 0..2 {
                    match chars.peek() {
                        Some(d) if d.is_ascii_hexdigit() => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                if digits.is_empty() {
                    return Err(ParseError::BadHex);
                }
                let value = u32::from_str_radix(&digits, 16).map_err(|_| ParseError::BadHex)?;
                out.push(char::from(value as u8));
                Ok(digits.len() + 1)
            }
        }
        d if is_octal_digit(d) => {
            let mut digits = String::new();
            digits.push(d);
            for _ in 0..2 {
                match chars.peek() {
                    Some(o) if is_octal_digit(*o) => {
                        digits.push(*o);
                        chars.next();
                    }
                    _ => break,
                }
            }
            let value = u32::from_str_radix(&digits, 8).map_err(|_| ParseError::BadOctal)?;
            if value > 0xFF {
                return Err(ParseError::BadOctal);
            }
            out.push(char::from(value as u8));
            Ok(digits.len())
        }
        _ => Err(ParseError::UnsupportedEscape),
    }
}

/// Parses a single piece out of `input`, honoring quotes and escapes, and
/// returns `(parsed, remainder)`. Parsing ends at end-of-input, at a
/// `stop_at_any_of`/`stop_at_str` match outside quotes, or (if
/// `allow_unquoted` is false) at the first unrecognized unquoted byte.
pub fn parse_string<'a>(options: &ParseOptions, input: &'a str) -> Result<(String, &'a str), ParseError> {
    let mut out = String::new();
    let bytes_consumed = parse_into(options, input, &mut out)?;
    Ok((out, &input[bytes_consumed..]))
}

/// Splits `input` into pieces at each `split_at_any_of` byte (outside
/// quotes), applying the same quote/escape rules to each piece, and returns
/// the pieces plus the unconsumed remainder.
pub fn parse_string_list<'a>(options: &ParseOptions, input: &'a str) -> Result<(Vec<String>, &'a str), ParseError> {
    let mut pieces = Vec::new();
    let mut rest = input;
    loop {
        let mut out = String::new();
        let consumed = parse_into(options, rest, &mut out)?;
        pieces.push(out);
        rest = &rest[consumed..];
        match rest.chars().next() {
            Some(c) if options.split_at_any_of.contains(c) => {
                rest = &rest[c.len_utf8()..];
            }
            _ => break,
        }
    }
    Ok((pieces, rest))
}

fn parse_into(options: &ParseOptions, input: &str, out: &mut String) -> Result<usize, ParseError> {
    let mut idx = 0usize;
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        let rest = &input[idx..];
        if !options.stop_at_str.is_empty() && rest.starts_with(options.stop_at_str.as_str()) {
            break;
        }
        if !options.stop_at_any_of.is_empty() && options.stop_at_any_of.contains(c) {
            break;
        }
        if !options.split_at_any_of.is_empty() && options.split_at_any_of.contains(c) {
            break;
        }
        match c {
            '\\' => {
                chars.next();
                idx += 1;
                idx += consume_escape(&mut chars, out)?;
            }
            '\'' | '"' => {
                let quote = c;
                chars.next();
                idx += quote.len_utf8();
                if options.remove_quotes {
                    parse_quoted_body(&mut chars, &mut idx, quote, out)?;
                } else {
                    out.push(quote);
                    parse_quoted_body(&mut chars, &mut idx, quote, out)?;
                    out.push(quote);
                }
            }
            _ => {
                if !options.allow_unquoted {
                    break;
                }
                chars.next();
                idx += c.len_utf8();
                out.push(c);
            }
        }
    }
    Ok(idx)
}

fn parse_quoted_body(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    idx: &mut usize,
    quote: char,
    out: &mut String,
) -> Result<(), ParseError> {
    loop {
        match chars.peek().copied() {
            None => return Err(ParseError::UnterminatedQuote),
            Some(c) if c == quote => {
                chars.next();
                *idx += c.len_utf8();
                return Ok(());
            }
            Some('\\') => {
                chars.next();
                *idx += 1;
                *idx += consume_escape(chars, out)?;
            }
            Some(c) => {
                chars.next();
                *idx += c.len_utf8();
                out.push(c);
            }
        }
    }
}
