//! Escaping of RST inline markup characters.
//!
//! Text coming from Markdown may contain characters that RST reads as inline
//! markup: `*` (emphasis), `` ` `` (interpreted text / literals), `_`
//! (references), `|` (substitutions) and `\` itself. When escaping is enabled
//! every occurrence is backslash-escaped, regardless of position. Link labels
//! additionally escape `<` and `>` so the embedded URI stays unambiguous.
//!
//! Rendered lines get one more pass: a line that opens with something docutils
//! parses as block markup (a bullet, an enumerator such as `1.` or `(a)`, `..`,
//! `>>>`, a field marker or a run of adornment characters) gets a backslash
//! in front of that token, so `1. Not a list` is written `1\. Not a list`.
//!
//! Literal content (inline code, code blocks, raw HTML) never goes through here;
//! the `:literal:` role content is the one exception, where only `\` and `` ` ``
//! are escaped.

const TEXT_SPECIALS: &[char] = &['\\', '*', '`', '_', '|'];
const LABEL_SPECIALS: &[char] = &['\\', '*', '`', '_', '|', '<', '>'];
const ROLE_SPECIALS: &[char] = &['\\', '`'];
const BULLETS: &[&str] = &["-", "+", "\u{2022}", "\u{2023}", "\u{2043}"];

/// Escape text that appears in ordinary inline content
pub fn escape_text(text: &str) -> String {
    escape_with(text, TEXT_SPECIALS)
}

/// Escape text that appears inside a hyperlink reference label
pub fn escape_label(text: &str) -> String {
    escape_with(text, LABEL_SPECIALS)
}

/// Escape the content of an interpreted text role such as `:literal:`
pub fn escape_role_content(text: &str) -> String {
    escape_with(text, ROLE_SPECIALS)
}

/// Defuse block markup at the start of a rendered line
pub fn escape_line_start(line: &str) -> String {
    match block_marker_offset(line) {
        Some(offset) => {
            let mut escaped = String::with_capacity(line.len() + 1);
            escaped.push_str(&line[..offset]);
            escaped.push('\\');
            escaped.push_str(&line[offset..]);
            escaped
        }
        None => line.to_string(),
    }
}

/// Byte offset where a backslash breaks the block markup the line starts with
fn block_marker_offset(line: &str) -> Option<usize> {
    let token = line.split(char::is_whitespace).next().unwrap_or_default();
    if BULLETS.contains(&token) || token == ".." || token == ">>>" {
        return Some(0);
    }
    if let Some(offset) = enumerator_offset(token) {
        return Some(offset);
    }
    if is_field_marker(line) || is_adornment(line) {
        return Some(0);
    }
    None
}

/// `1.`, `a)`, `(iv)`, `#.` and friends
fn enumerator_offset(token: &str) -> Option<usize> {
    if let Some(inner) = token.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        return is_enumerator(inner).then_some(0);
    }
    let body = token
        .strip_suffix('.')
        .or_else(|| token.strip_suffix(')'))?;
    is_enumerator(body).then_some(body.len())
}

fn is_enumerator(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => false,
        (Some('#'), None) => true,
        (Some(c), None) if c.is_ascii_alphabetic() => true,
        _ => {
            text.chars().all(|c| c.is_ascii_digit())
                || text.chars().all(|c| "ivxlcdm".contains(c))
                || text.chars().all(|c| "IVXLCDM".contains(c))
        }
    }
}

/// `:name: body`, where the name may contain escaped characters and colons
/// that are not followed by a space or a backtick
fn is_field_marker(line: &str) -> bool {
    let Some(rest) = line.strip_prefix(':') else {
        return false;
    };
    if rest.is_empty() || rest.starts_with([':', ' ', '\t']) {
        return false;
    }
    let mut chars = rest.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            ':' => match chars.peek() {
                None => return true,
                Some(next) if next.is_whitespace() => return true,
                Some('`') => return false,
                Some(_) => {}
            },
            _ => {}
        }
    }
    false
}

/// A line made of one repeated punctuation character reads as a transition
/// or a section underline
fn is_adornment(line: &str) -> bool {
    let mut chars = line.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_punctuation()
        && first != '\\'
        && line.len() >= 2
        && chars.all(|c| c == first)
}

fn escape_with(text: &str, specials: &[char]) -> String {
    if !text.contains(specials) {
        return text.to_string();
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        if specials.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_text("Hello paragraph"), "Hello paragraph");
        assert_eq!(escape_text("a < b > c"), "a < b > c");
    }

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(escape_text("2 * 3"), "2 \\* 3");
        assert_eq!(escape_text("snake_case"), "snake\\_case");
        assert_eq!(escape_text("a|b"), "a\\|b");
        assert_eq!(escape_text("`tick`"), "\\`tick\\`");
        assert_eq!(escape_text("C:\\dir"), "C:\\\\dir");
    }

    #[test]
    fn enumerators_at_line_start_are_escaped() {
        assert_eq!(escape_line_start("1. Not a list"), "1\\. Not a list");
        assert_eq!(escape_line_start("#. Auto"), "#\\. Auto");
        assert_eq!(escape_line_start("b) second"), "b\\) second");
        assert_eq!(escape_line_start("(iv) roman"), "\\(iv) roman");
        assert_eq!(escape_line_start("2024."), "2024\\.");
    }

    #[test]
    fn bullets_and_explicit_markup_are_escaped() {
        assert_eq!(escape_line_start("- dash"), "\\- dash");
        assert_eq!(escape_line_start("+ plus"), "\\+ plus");
        assert_eq!(escape_line_start(".. note:: x"), "\\.. note:: x");
        assert_eq!(escape_line_start(">>> 1 + 1"), "\\>>> 1 + 1");
        assert_eq!(escape_line_start(":field: value"), "\\:field: value");
        assert_eq!(escape_line_start("===="), "\\====");
    }

    #[test]
    fn ordinary_lines_are_untouched() {
        for line in [
            "Hello paragraph",
            "-dash without space",
            "1.5 litres",
            "Version 2. Then more",
            "...",
            ":literal:`\\`tick`",
            "",
        ] {
            let expected = if line == "..." { "\\..." } else { line };
            assert_eq!(escape_line_start(line), expected, "{line:?}");
        }
    }

    #[test]
    fn role_content_escapes_backticks() {
        assert_eq!(escape_role_content("`tick`"), "\\`tick\\`");
    }

    #[test]
    fn labels_escape_angle_brackets() {
        assert_eq!(escape_label("see <here>"), "see \\<here\\>");
    }
}
