//! 位置固定のパターン走査ユーティリティ
//!
//! Every function here tries to match at the very start of `text` (never a
//! search) and returns the matched length in bytes. The behaviour mirrors the
//! shortest-match (`*?`) and lookahead semantics the rule tables are written
//! in terms of, without pulling a regex engine into the `no_std` core.

use alloc::string::String;

use super::rule::MatchFlags;

const QUOTES: [char; 2] = ['"', '\''];
const OPEN_BRACKETS: [char; 3] = ['(', '[', '{'];
const CLOSE_BRACKETS: [char; 3] = [')', ']', '}'];
const TRIPLE_QUOTES: [&str; 2] = ["\"\"\"", "'''"];

#[inline]
fn is_quote(c: char) -> bool {
    QUOTES.contains(&c)
}

#[inline]
fn is_bracket(c: char) -> bool {
    OPEN_BRACKETS.contains(&c) || CLOSE_BRACKETS.contains(&c)
}

/// 引用符・括弧・追加マーカーの直前かどうか
fn at_stop(rest: &str, markers: &[String]) -> bool {
    rest.starts_with(|c: char| is_quote(c) || is_bracket(c))
        || markers
            .iter()
            .any(|m| !m.is_empty() && rest.starts_with(m.as_str()))
}

/// Length of the leading whitespace run (`\s*`).
#[inline]
#[must_use]
pub fn leading_whitespace(text: &str) -> usize {
    text.find(|c: char| !c.is_whitespace())
        .unwrap_or(text.len())
}

/// `\s*\n` — whitespace through the last newline of the leading whitespace run.
#[must_use]
pub fn blank(text: &str) -> Option<usize> {
    text[..leading_whitespace(text)].rfind('\n').map(|i| i + 1)
}

/// `\s*?\n` — whitespace up to and including the first newline.
#[must_use]
pub fn line_ending(text: &str) -> Option<usize> {
    for (i, c) in text.char_indices() {
        if c == '\n' {
            return Some(i + 1);
        }
        if !c.is_whitespace() {
            return None;
        }
    }
    None
}

/// Opening bracket followed by the shortest non-bracket run that is followed
/// by a quote, a bracket or one of `markers`.
#[must_use]
pub fn bracket_open(text: &str, markers: &[String], flags: MatchFlags) -> Option<usize> {
    let start = leading_whitespace(text);
    let body = text[start..].strip_prefix(|c: char| OPEN_BRACKETS.contains(&c))?;
    let body_start = text.len() - body.len();

    for (i, c) in body.char_indices() {
        if at_stop(&body[i..], markers) {
            return Some(body_start + i);
        }
        if c == '\n' && !flags.spans_lines {
            return None;
        }
    }
    None
}

/// `\s*[)\]}]`
#[must_use]
pub fn bracket_close(text: &str) -> Option<usize> {
    let start = leading_whitespace(text);
    text[start..]
        .starts_with(|c: char| CLOSE_BRACKETS.contains(&c))
        .then_some(start + 1)
}

/// `'''…'''` or `"""…"""`, shortest, no escapes.
#[must_use]
pub fn triple_quote(text: &str, flags: MatchFlags) -> Option<usize> {
    let start = leading_whitespace(text);
    let rest = &text[start..];
    let delim = TRIPLE_QUOTES.into_iter().find(|d| rest.starts_with(*d))?;
    scan_until(&rest[delim.len()..], delim, false, flags).map(|n| start + delim.len() + n)
}

/// `open … close`, shortest, optionally backslash-escape aware.
#[must_use]
pub fn delimited(
    text: &str,
    open: &str,
    close: &str,
    escapes: bool,
    flags: MatchFlags,
) -> Option<usize> {
    if open.is_empty() || close.is_empty() {
        return None;
    }
    let start = leading_whitespace(text);
    let body = text[start..].strip_prefix(open)?;
    scan_until(body, close, escapes, flags).map(|n| start + open.len() + n)
}

/// Marker through end of line; the newline itself is left unconsumed.
#[must_use]
pub fn line_comment(text: &str, marker: &str) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }
    let start = leading_whitespace(text);
    let body = text[start..].strip_prefix(marker)?;
    body.find('\n').map(|i| start + marker.len() + i)
}

/// `"…"` or `'…'`, shortest, backslash-escape aware.
#[must_use]
pub fn quoted(text: &str, flags: MatchFlags) -> Option<usize> {
    let start = leading_whitespace(text);
    let rest = &text[start..];
    let close = match rest.chars().next()? {
        '"' => "\"",
        '\'' => "'",
        _ => return None,
    };
    scan_until(&rest[1..], close, true, flags).map(|n| start + 1 + n)
}

/// Shortest run up to (not including) a quote, a bracket, a newline or one
/// of `markers`. May be empty.
#[must_use]
pub fn code_run(text: &str, markers: &[String]) -> Option<usize> {
    text.char_indices()
        .find(|&(i, c)| c == '\n' || at_stop(&text[i..], markers))
        .map(|(i, _)| i)
}

/// One physical line including its newline.
#[must_use]
pub fn line(text: &str) -> Option<usize> {
    text.find('\n').map(|i| i + 1)
}

/// Lines after the first one in `span` that hold nothing but whitespace.
#[must_use]
pub fn interior_blank_lines(span: &str) -> usize {
    span.split_inclusive('\n')
        .skip(1)
        .filter(|l| l.ends_with('\n') && l.trim().is_empty())
        .count()
}

/// 終端文字列までの最短走査
fn scan_until(body: &str, close: &str, escapes: bool, flags: MatchFlags) -> Option<usize> {
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        if body[i..].starts_with(close) {
            return Some(i + close.len());
        }
        if c == '\n' && !flags.spans_lines {
            return None;
        }
        if escapes && c == '\\' {
            let (_, escaped) = chars.next()?;
            if escaped == '\n' && !flags.spans_lines {
                return None;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    const SPAN: MatchFlags = MatchFlags { spans_lines: true };
    const SINGLE: MatchFlags = MatchFlags { spans_lines: false };

    fn c_markers() -> Vec<String> {
        vec!["//".to_string(), "/*".to_string()]
    }

    #[test]
    fn test_blank_takes_last_newline_of_whitespace_run() {
        assert_eq!(blank("\n  \n  x"), Some(4));
        assert_eq!(blank("   \n"), Some(4));
        assert_eq!(blank("  x\n"), None);
        assert_eq!(blank(""), None);
    }

    #[test]
    fn test_line_ending_is_shortest() {
        assert_eq!(line_ending("  \n\n"), Some(3));
        assert_eq!(line_ending("\n"), Some(1));
        assert_eq!(line_ending(" x\n"), None);
        assert_eq!(line_ending("   "), None);
    }

    #[test]
    fn test_bracket_open_stops_before_quote_or_bracket() {
        assert_eq!(bracket_open("(a, 'b')", &[], SPAN), Some(4));
        assert_eq!(bracket_open("  [1, 2]", &[], SPAN), Some(7));
        assert_eq!(bracket_open("()", &[], SPAN), Some(1));
        // Nothing to stop at: no match.
        assert_eq!(bracket_open("(abc\n", &[], SPAN), None);
        assert_eq!(bracket_open("x(", &[], SPAN), None);
    }

    #[test]
    fn test_bracket_open_spans_lines_only_when_allowed() {
        let text = "(\n    1,\n    '''doc'''";
        assert_eq!(bracket_open(text, &[], SPAN), Some(13));
        assert_eq!(bracket_open(text, &[], SINGLE), None);
    }

    #[test]
    fn test_bracket_open_stops_before_comment_markers() {
        assert_eq!(bracket_open("(a // b\n)", &c_markers(), SPAN), Some(3));
        assert_eq!(bracket_open("(a / b)", &c_markers(), SPAN), Some(6));
    }

    #[test]
    fn test_bracket_close() {
        assert_eq!(bracket_close("  )x"), Some(3));
        assert_eq!(bracket_close("x)"), None);
    }

    #[test]
    fn test_triple_quote_same_delimiter() {
        assert_eq!(triple_quote("'''a\nb'''\n", SPAN), Some(9));
        assert_eq!(triple_quote("\"\"\"a'''b\"\"\"", SPAN), Some(11));
        assert_eq!(triple_quote("'''unterminated", SPAN), None);
        assert_eq!(triple_quote("'''a\n'''", SINGLE), None);
    }

    #[test]
    fn test_delimited_block_comment() {
        assert_eq!(delimited("/* a\n b */ x", "/*", "*/", false, SPAN), Some(10));
        assert_eq!(delimited(" --[[ x ]]", "--[[", "]]", false, SPAN), Some(10));
        assert_eq!(delimited("/* open", "/*", "*/", false, SPAN), None);
    }

    #[test]
    fn test_delimited_with_escapes() {
        // The escaped bracket does not close the long string.
        assert_eq!(delimited("[[a\\]]b]]", "[[", "]]", true, SPAN), Some(9));
        assert_eq!(delimited("[[a\\]]b]]", "[[", "]]", false, SPAN), Some(6));
    }

    #[test]
    fn test_line_comment_leaves_newline() {
        assert_eq!(line_comment("  # hi\nx", "#"), Some(6));
        assert_eq!(line_comment("// x\n", "//"), Some(4));
        assert_eq!(line_comment("# no newline", "#"), None);
        assert_eq!(line_comment("x # y\n", "#"), None);
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(quoted("'a\\'b' + c", SPAN), Some(6));
        assert_eq!(quoted("\"\"", SPAN), Some(2));
        assert_eq!(quoted(" \"x\\\\\" y", SPAN), Some(6));
        assert_eq!(quoted("'abc", SPAN), None);
        assert_eq!(quoted("'a\nb'", SINGLE), None);
        assert_eq!(quoted("'a\nb'", SPAN), Some(5));
    }

    #[test]
    fn test_code_run() {
        assert_eq!(code_run("x = 1  # note\n", &[]), Some(13));
        assert_eq!(code_run("int x; // note\n", &c_markers()), Some(7));
        assert_eq!(code_run("foo(bar)\n", &[]), Some(3));
        assert_eq!(code_run("(x", &[]), Some(0));
        assert_eq!(code_run("abc", &[]), None);
    }

    #[test]
    fn test_line() {
        assert_eq!(line("hello\nworld\n"), Some(6));
        assert_eq!(line("\n"), Some(1));
        assert_eq!(line("tail"), None);
    }

    #[test]
    fn test_interior_blank_lines() {
        assert_eq!(interior_blank_lines("'''\n\n'''"), 1);
        assert_eq!(interior_blank_lines("/*\n  \n\n*/"), 2);
        // The first line is never an interior line.
        assert_eq!(interior_blank_lines("  \n"), 0);
        assert_eq!(interior_blank_lines("/* a */"), 0);
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(code_run("名前 = 1\n", &[]), Some("名前 = 1".len()));
        assert_eq!(quoted("'日本語'", SPAN), Some("'日本語'".len()));
    }
}
