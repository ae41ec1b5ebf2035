/*!
 * Tag tokenizer and balance checking for markup validation.
 *
 * Tags are scanned with a regular expression but modeled as explicit
 * tokens, so the balance check is a plain stack machine rather than ad
 * hoc pattern matching.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// Any element tag: optional closing slash, name, attributes, optional self-closing slash
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9:_-]*)(?:\s+[^>]*?)?(/?)>").expect("Invalid tag regex")
});

/// A single scanned tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagToken {
    /// An opening tag, e.g. `<voice name="...">`
    Open(String),
    /// A closing tag, e.g. `</voice>`
    Close(String),
    /// A self-closing tag, e.g. `<break/>`
    SelfClosing(String),
}

impl TagToken {
    /// The element name carried by this token
    pub fn name(&self) -> &str {
        match self {
            Self::Open(name) | Self::Close(name) | Self::SelfClosing(name) => name,
        }
    }
}

/// Scan every tag in the markup, lower-casing element names
pub fn tokenize(markup: &str) -> Vec<TagToken> {
    TAG_REGEX
        .captures_iter(markup)
        .map(|cap| {
            let name = cap[2].to_lowercase();
            if !cap[1].is_empty() {
                TagToken::Close(name)
            } else if !cap[3].is_empty() {
                TagToken::SelfClosing(name)
            } else {
                TagToken::Open(name)
            }
        })
        .collect()
}

/// Run the stack-based balance check over a token stream
///
/// Self-closing tags must belong to the whitelist and are exempt from
/// stack tracking. Returns a message naming the offending tag(s) on
/// the first violation.
pub fn check_balance(tokens: &[TagToken], self_closing_whitelist: &[&str]) -> Result<(), String> {
    let mut stack: Vec<&str> = Vec::new();

    for token in tokens {
        match token {
            TagToken::SelfClosing(name) => {
                if !self_closing_whitelist.contains(&name.as_str()) {
                    return Err(format!("Disallowed self-closing tag: {}", name));
                }
            }
            TagToken::Open(name) => {
                stack.push(name);
            }
            TagToken::Close(name) => match stack.pop() {
                None => {
                    return Err(format!("Unexpected closing tag: {}", name));
                }
                Some(open_name) if open_name != name => {
                    return Err(format!(
                        "Mismatched tag: expected {}, found {}",
                        open_name, name
                    ));
                }
                Some(_) => {}
            },
        }
    }

    if !stack.is_empty() {
        return Err(format!("Unclosed tags: {}", stack.join(", ")));
    }

    Ok(())
}
