//! Decoding of explicitly escaped spans in backend replies.
//!
//! Backend wraps text that it had to escape into `IDEA-ESCAPE-START ... IDEA-ESCAPE-END`
//! markers. Only text inside markers is unescaped, markers are removed.

pub const ESCAPE_START: &str = "IDEA-ESCAPE-START";
pub const ESCAPE_END: &str = "IDEA-ESCAPE-END";

/// Replace all escape spans in `raw` with its unescaped content.
/// A span without end marker lasts until the end of the string.
pub fn decode_escape_spans(raw: &str) -> String {
    let mut result = raw.to_string();
    let mut cursor = 0;

    while let Some(start) = result[cursor..].find(ESCAPE_START).map(|pos| pos + cursor) {
        let span_start = start + ESCAPE_START.len();
        let (span_end, tail_start) = match result[span_start..].find(ESCAPE_END) {
            Some(pos) => (span_start + pos, span_start + pos + ESCAPE_END.len()),
            None => (result.len(), result.len()),
        };

        let decoded = unescape(&result[span_start..span_end]);
        cursor = start + decoded.len();
        result = format!("{}{decoded}{}", &result[..start], &result[tail_start..]);
    }

    result
}

/// Backslash escape decoding: `\n \r \t \b \f \' \" \\ \uXXXX`.
/// Unknown escapes decode into the escaped char itself, dangling backslash is kept as is.
pub fn unescape(s: &str) -> String {
    let mut buffer = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            buffer.push(ch);
            continue;
        }

        let Some(escaped) = chars.next() else {
            buffer.push('\\');
            break;
        };

        match escaped {
            'n' => buffer.push('\n'),
            'r' => buffer.push('\r'),
            't' => buffer.push('\t'),
            'b' => buffer.push('\u{8}'),
            'f' => buffer.push('\u{c}'),
            'u' => {
                let hex: String = chars.clone().take(4).collect();
                match (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                {
                    Some(code) => {
                        chars.nth(3);
                        buffer.push(decode_utf16_unit(code, &mut chars));
                    }
                    None => buffer.push_str("\\u"),
                }
            }
            other => buffer.push(other),
        }
    }

    buffer
}

/// Turn a utf-16 code unit into char, a high surrogate consumes the following `\uXXXX` low one.
fn decode_utf16_unit(code: u32, chars: &mut std::iter::Peekable<std::str::Chars>) -> char {
    if let Some(ch) = char::from_u32(code) {
        return ch;
    }

    if (0xD800..0xDC00).contains(&code) {
        let next: String = chars.clone().take(6).collect();
        if let Some(low) = next
            .strip_prefix("\\u")
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .filter(|low| (0xDC00..0xE000).contains(low))
        {
            chars.nth(5);
            let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER);
        }
    }

    char::REPLACEMENT_CHARACTER
}
