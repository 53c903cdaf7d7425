//! Character-reference decoding for text nodes.
//!
//! Numeric references (`&#1234;`, `&#x4d2;`) are decoded to their scalar
//! values. Named references are kept verbatim so the Markdown output can
//! carry them through (`&nbsp;` stays `&nbsp;`).

/// Decodes every terminated character reference in `text`.
///
/// An ampersand that is not followed by a `;`-terminated reference is
/// emitted literally.
#[must_use]
pub fn decode_references(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '&' {
            result.push(c);
            continue;
        }

        let mut name = String::new();
        let mut terminated = false;
        while let Some(&next) = chars.peek() {
            if next == ';' {
                chars.next();
                terminated = true;
                break;
            }
            if next.is_ascii_alphanumeric() || next == '#' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }

        if terminated {
            result.push_str(&translate_reference(&name));
        } else {
            result.push('&');
            result.push_str(&name);
        }
    }

    result
}

/// Translates a single reference name (without `&` and `;`).
fn translate_reference(name: &str) -> String {
    match name.strip_prefix('#') {
        Some(digits) => match digits.strip_prefix(['x', 'X']) {
            Some(hex) => translate_numeric(hex, 16),
            None => translate_numeric(digits, 10),
        },
        // Named references pass through untouched.
        None => format!("&{name};"),
    }
}

fn translate_numeric(digits: &str, radix: u32) -> String {
    match u32::from_str_radix(digits, radix).ok().and_then(char::from_u32) {
        Some(c) => c.to_string(),
        None => String::new(),
    }
}
