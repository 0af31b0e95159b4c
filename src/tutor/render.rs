//! Turns lesson markup into terminal text.

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LIST_ITEM: Regex =
        Regex::new(r"<li\b[^>]*>").expect("list item pattern is valid");
    // Only known markup tags are stripped, so generics such as `Vec<Symbol>`
    // survive.
    static ref TAG: Regex = Regex::new(
        r"</?(?:h[1-6]|p|ul|ol|li|pre|code|strong|em|b|i|br|a)\b[^>]*>"
    )
    .expect("tag pattern is valid");
}

/// Strips markup from lesson content, keeping line structure and code
/// indentation. Runs of blank lines are collapsed into one.
pub fn plain_text(markup: &str) -> String {
    let text = LIST_ITEM.replace_all(markup, "• ");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    text.lines()
        .map(str::trim_end)
        .coalesce(|prev, next| {
            if prev.is_empty() && next.is_empty() {
                Ok(prev)
            } else {
                Err((prev, next))
            }
        })
        .skip_while(|line| line.is_empty())
        .join("\n")
        .trim_end()
        .to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Formats remediation hints.
///
/// Format is as follows:
///
/// ```bash
/// ╭─[ requirements ]
/// │ • {hint}
/// ╰─[ {msg} ]
/// ```
pub fn format_hints(hints: &[String], msg: &str) -> String {
    let body = hints.iter().map(|hint| format!("    │ • {hint}")).join("\n");
    format!("    ╭─[ requirements ]\n{body}\n    ╰─[ {msg} ]")
}
