use crate::value::presentation::{ContentHint, FullValueEvaluator};
use itertools::Itertools;

const ELLIPSIS: &str = "...";

/// Display string for a value and optional evaluator of its full text.
#[derive(Debug, Clone, PartialEq)]
pub struct Truncated {
    pub display: String,
    pub full_value: Option<FullValueEvaluator>,
}

/// True if text contains a line break anywhere except at the last position.
fn has_inner_line_break(text: &str) -> bool {
    let len = text.len();
    ['\n', '\r']
        .into_iter()
        .filter_map(|sep| text.find(sep))
        .any(|idx| idx < len - 1)
}

fn quotes(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let (first, last) = (chars.next()?, chars.next_back()?);
    (first == last && (first == '\'' || first == '"')).then_some(first)
}

/// Decide how `value` must be shown.
///
/// Values longer than `max_len` chars, or containing an inner line break, are shown
/// abbreviated and get a full value evaluator, which returns the whole text without
/// surrounding quotes.
pub fn truncate(value: &str, max_len: usize, hint: ContentHint) -> Truncated {
    let char_count = value.chars().count();

    if char_count <= max_len && !has_inner_line_break(value) {
        return Truncated {
            display: value.to_string(),
            full_value: None,
        };
    }

    let quote = quotes(value);

    let display = if char_count > max_len {
        let ending = match quote {
            Some(q) => format!("{q} "),
            None => " ".to_string(),
        };
        let prefix = value.chars().take(max_len).join("");
        format!("{prefix}{ELLIPSIS}{ending}")
    } else if !value.ends_with(' ') {
        // separator between text value and full value link
        format!("{value} ")
    } else {
        value.to_string()
    };

    let unquoted = match quote {
        Some(q) => value
            .strip_prefix(q)
            .and_then(|v| v.strip_suffix(q))
            .unwrap_or(value),
        None => value,
    };

    Truncated {
        display,
        full_value: Some(FullValueEvaluator::Text {
            text: unquoted.to_string(),
            hint,
        }),
    }
}

/// Cut `text` to `max_len` chars and add an ellipsis if it was longer.
pub fn cap(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        format!("{}{ELLIPSIS} ", text.chars().take(max_len).join(""))
    } else {
        text.to_string()
    }
}
