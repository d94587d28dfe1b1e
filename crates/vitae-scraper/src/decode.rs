//! Decoding of the contact-info page into plain text.
//!
//! The page embeds its data as JSON inside HTML, so string values arrive
//! twice escaped: first as HTML entities (`&quot;`), then as JavaScript
//! backslash sequences (`\u00e9`, `\"`). Pattern rules run against the
//! fully decoded form.

/// Resolves HTML entities, then backslash escapes.
///
/// Text without entities or escapes passes through unchanged. Malformed
/// sequences are kept as literal characters.
#[must_use]
pub fn decode_payload(raw: &str) -> String {
    let unescaped = html_escape::decode_html_entities(raw);
    unescape_backslashes(&unescaped)
}

/// Decodes JavaScript/JSON string escapes (`\n`, `\"`, `\/`, `\xHH`,
/// `\uXXXX` including surrogate pairs).
#[must_use]
pub fn unescape_backslashes(input: &str) -> String {
    if !input.contains('\\') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let consumed = decode_escape(after, &mut out);
        rest = &after[consumed..];
    }
    out.push_str(rest);
    out
}

/// Decodes the escape that follows a backslash into `out`, returning how
/// many bytes of `after` were used. Zero means the backslash was literal.
fn decode_escape(after: &str, out: &mut String) -> usize {
    let Some(c) = after.chars().next() else {
        out.push('\\');
        return 0;
    };

    let simple = match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        '"' | '\'' | '\\' | '/' => Some(c),
        _ => None,
    };
    if let Some(ch) = simple {
        out.push(ch);
        return 1;
    }

    match c {
        'u' => {
            if let Some(unit) = hex_value(after.get(1..5)) {
                if (0xD800..0xDC00).contains(&unit) {
                    let low = (after.get(5..7) == Some("\\u"))
                        .then(|| hex_value(after.get(7..11)))
                        .flatten()
                        .filter(|low| (0xDC00..0xE000).contains(low));
                    let combined =
                        low.map(|low| 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00));
                    if let Some(ch) = combined.and_then(char::from_u32) {
                        out.push(ch);
                        return 11;
                    }
                } else if let Some(ch) = char::from_u32(unit) {
                    out.push(ch);
                    return 5;
                }
            }
        }
        'x' => {
            if let Some(ch) = hex_value(after.get(1..3)).and_then(char::from_u32) {
                out.push(ch);
                return 3;
            }
        }
        _ => {}
    }

    out.push('\\');
    0
}

fn hex_value(digits: Option<&str>) -> Option<u32> {
    digits
        .filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()))
        .and_then(|h| u32::from_str_radix(h, 16).ok())
}
