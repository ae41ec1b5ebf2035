/*!
 * XML entity escaping for markup text content.
 *
 * The compiler embeds user prose directly into element content and
 * attribute values, so the five XML-reserved characters must be
 * replaced by entities before accumulation.
 */

/// Escape the XML-reserved characters in a text fragment
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Reverse [`escape_text`] for the five entities it produces
///
/// This only understands the entities the compiler emits; it is not a
/// general XML entity decoder.
pub fn unescape_text(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
