//! Query string tokenizer and value parsers.
//!
//! Minimal percent-decoding and key-value extraction without external dependencies.

use alloc::string::String;
use alloc::vec::Vec;

use super::{ParseWarning, PreviewParams};

/// Keys the preview page sends that carry no layout meaning.
const IGNORED_KEYS: &[&str] = &["t"];

/// Which parameters have been set so far; the first occurrence wins.
#[derive(Default)]
struct Seen {
    width: bool,
    height: bool,
    margin: bool,
    border: bool,
    corner: bool,
}

/// Parse a preview query string into parameters + warnings.
pub(crate) fn parse_query(query: &str) -> (PreviewParams, Vec<ParseWarning>) {
    let mut params = PreviewParams::default();
    let mut seen = Seen::default();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);

        let (field, seen_flag, name) = match key.as_str() {
            "width" => (&mut params.width, &mut seen.width, "width"),
            "height" => (&mut params.height, &mut seen.height, "height"),
            "margin" => (&mut params.margin, &mut seen.margin, "margin"),
            "border" => (&mut params.border, &mut seen.border, "border"),
            "corner" => (&mut params.corner, &mut seen.corner, "corner"),
            k if IGNORED_KEYS.contains(&k) => continue,
            _ => {
                warnings.push(ParseWarning::KeyNotRecognized {
                    key: key.clone(),
                    value,
                });
                continue;
            }
        };

        if *seen_flag {
            warnings.push(ParseWarning::DuplicateKey { key, value });
            continue;
        }
        match parse_int(&value) {
            Some(v) => {
                *field = v;
                *seen_flag = true;
            }
            None => warnings.push(ParseWarning::ValueInvalid { key: name, value }),
        }
    }

    (params, warnings)
}

// ---- Value parsers ----

/// Parse a decimal integer, saturating values beyond the `i32` range.
fn parse_int(s: &str) -> Option<i32> {
    let v = s.trim().parse::<i64>().ok()?;
    Some(v.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
}

// ---- Query string tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    // Strip leading '?' if present (caller may or may not have stripped it)
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_parameters() {
        let (p, warnings) = parse_query("width=800&height=600&margin=12&border=3&corner=40");
        assert_eq!(
            p,
            PreviewParams {
                width: 800,
                height: 600,
                margin: 12,
                border: 3,
                corner: 40
            }
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let (p, warnings) = parse_query("width=800");
        assert_eq!(p.width, 800);
        assert_eq!(p.height, PreviewParams::default().height);
        assert_eq!(p.corner, PreviewParams::default().corner);
        assert!(warnings.is_empty());
    }

    #[test]
    fn empty_query_is_default() {
        let (p, warnings) = parse_query("");
        assert_eq!(p, PreviewParams::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn keys_are_case_insensitive() {
        let (p, _) = parse_query("WIDTH=640&Height=480");
        assert_eq!((p.width, p.height), (640, 480));
    }

    #[test]
    fn invalid_value_keeps_default_and_warns() {
        let (p, warnings) = parse_query("margin=abc&border=1.5");
        assert_eq!(p.margin, 10);
        assert_eq!(p.border, 4);
        assert_eq!(
            warnings,
            [
                ParseWarning::ValueInvalid {
                    key: "margin",
                    value: String::from("abc")
                },
                ParseWarning::ValueInvalid {
                    key: "border",
                    value: String::from("1.5")
                },
            ]
        );
    }

    #[test]
    fn negative_and_huge_values_parse_unclamped() {
        let (p, warnings) = parse_query("width=-20&height=99999999999");
        assert_eq!(p.width, -20);
        assert_eq!(p.height, i32::MAX);
        assert!(warnings.is_empty());
    }

    #[test]
    fn first_value_wins_on_duplicates() {
        let (p, warnings) = parse_query("corner=5&corner=50");
        assert_eq!(p.corner, 5);
        assert_eq!(
            warnings,
            [ParseWarning::DuplicateKey {
                key: String::from("corner"),
                value: String::from("50")
            }]
        );
    }

    #[test]
    fn invalid_first_value_does_not_block_later_value() {
        let (p, warnings) = parse_query("corner=x&corner=50");
        assert_eq!(p.corner, 50);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn unknown_key_warns_cache_buster_does_not() {
        let (_, warnings) = parse_query("t=1712345678&zoom=2");
        assert_eq!(
            warnings,
            [ParseWarning::KeyNotRecognized {
                key: String::from("zoom"),
                value: String::from("2")
            }]
        );
    }

    #[test]
    fn percent_decoding_works() {
        assert_eq!(percent_decode("%20%2B+x"), " + x");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        let (p, _) = parse_query("wid%74h=%33%30%30");
        assert_eq!(p.width, 300);
    }

    #[test]
    fn leading_question_mark_stripped() {
        let (p, warnings) = parse_query("?height=321");
        assert_eq!(p.height, 321);
        assert!(warnings.is_empty());
    }

    #[test]
    fn whitespace_around_numbers_is_accepted() {
        let (p, _) = parse_query("border=+%207");
        // '+' decodes to a space, so the value is "  7".
        assert_eq!(p.border, 7);
    }
}
