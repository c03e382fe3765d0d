//! Markup handling for entry content.
//!
//! Entry bodies come from a rich-text editor (HTML) or are written as Markdown.
//! Search and word counting work on plain text, and the content-type filters
//! look for media and code markup. Everything here is heuristic text scanning,
//! not a full HTML or Markdown parser.

/// Tags that separate words when removed.
const BLOCK_TAGS: &[&str] = &[
    "p", "br", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "td", "th",
    "blockquote", "pre", "hr", "section", "article",
];

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

/// Removes HTML tags and decodes common entities.
///
/// Block-level tags are replaced by a single space so adjacent paragraphs do
/// not merge into one word; inline tags are dropped without a separator.
///
/// # Examples
///
/// ```
/// use jotter::entry::markup::strip_markup;
///
/// assert_eq!(strip_markup("<p>Felt calm</p>"), " Felt calm ");
/// assert_eq!(strip_markup("cal<b>m</b> &amp; still"), "calm & still");
/// ```
pub fn strip_markup(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open..];
        match after.find('>') {
            Some(close) => {
                if is_block_tag(&after[1..close]) {
                    text.push(' ');
                }
                rest = &after[close + 1..];
            }
            None => {
                // Unterminated '<' is literal text.
                text.push_str(after);
                rest = "";
            }
        }
    }
    text.push_str(rest);

    decode_entities(&text)
}

fn is_block_tag(inner: &str) -> bool {
    let name: String = inner
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    // `&amp;` is last so an escaped entity like `&amp;lt;` decodes only once.
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, plain)| {
            acc.replace(entity, plain)
        })
}

/// Counts whitespace-separated words in the plain-text form of `content`.
pub fn count_words(content: &str) -> usize {
    strip_markup(content).split_whitespace().count()
}

/// Detects image, video, embed or link markup, or a bare URL.
pub fn has_media(content: &str) -> bool {
    let lower = content.to_lowercase();
    ["<img", "<video", "<audio", "<iframe", "<a ", "http://", "https://"]
        .iter()
        .any(|needle| lower.contains(needle))
        || has_markdown_link(content)
}

/// Detects `[label](target)` or `![alt](src)` on a single line.
fn has_markdown_link(content: &str) -> bool {
    content.lines().any(|line| {
        let mut search_from = 0;
        while let Some(pos) = line[search_from..].find("](") {
            let split = search_from + pos;
            let opened = line[..split].contains('[');
            let closed = line[split + 2..].contains(')');
            if opened && closed {
                return true;
            }
            search_from = split + 2;
        }
        false
    })
}

/// Detects fenced code blocks, `<pre>`/`<code>` elements, or inline code spans.
pub fn has_code(content: &str) -> bool {
    let lower = content.to_lowercase();
    if ["```", "~~~", "<pre", "<code"]
        .iter()
        .any(|needle| lower.contains(needle))
    {
        return true;
    }
    content.lines().any(has_inline_code)
}

/// A backtick pair enclosing at least one non-backtick character.
fn has_inline_code(line: &str) -> bool {
    let mut parts = line.split('`');
    // Text before the first backtick is never code.
    parts.next();
    let spans: Vec<&str> = parts.collect();
    // An odd number of backticks leaves the last segment unterminated.
    let closed = if spans.len() % 2 == 0 {
        spans.len()
    } else {
        spans.len() - 1
    };
    spans[..closed]
        .iter()
        .step_by(2)
        .any(|span| !span.trim().is_empty())
}
