//! End-of-stream repair for unterminated inline code.
//!
//! When a stream stops after `` `foo `` the half-open span has already been
//! demoted to paragraph text; appending the missing backtick lets the view
//! style the run as the author intended. Both rules are conservative: when
//! any guard fails the text is left alone.

use std::sync::OnceLock;

use regex::Regex;

/// Matches a lone backtick (not part of a longer run) followed by content
/// that plausibly starts an inline code span: non-empty, not whitespace,
/// and not an emphasis marker.
fn opener_regex() -> &'static Regex {
    static OPENER: OnceLock<Regex> = OnceLock::new();
    OPENER.get_or_init(|| Regex::new(r"(?:^|[^`])`[^`\s*_~]").expect("invalid opener regex"))
}

/// Appends the missing closing backtick to a paragraph that ends in the
/// middle of an inline code run. Returns `None` when the text is fine as
/// it stands.
pub fn close_unterminated_code(text: &str) -> Option<String> {
    if dangling_inline_fence(text) || dangling_opener(text) {
        let mut repaired = text.to_string();
        repaired.push('`');
        return Some(repaired);
    }
    None
}

/// A single-line triple-backtick run whose closer is one backtick short.
fn dangling_inline_fence(text: &str) -> bool {
    !text.contains('\n')
        && text.starts_with("```")
        && text.ends_with("``")
        && !text.ends_with("```")
}

/// An odd number of lone backticks, one of which reads as an opener, with
/// no unbalanced triple-backtick fence in the way.
fn dangling_opener(text: &str) -> bool {
    let (triples, singles) = count_tick_runs(text);
    triples % 2 == 0 && singles % 2 == 1 && opener_regex().is_match(text)
}

/// Counts backtick runs as whole triple fences plus leftover lone ticks.
fn count_tick_runs(text: &str) -> (usize, usize) {
    let mut triples = 0;
    let mut singles = 0;
    let mut run = 0usize;
    for ch in text.chars() {
        if ch == '`' {
            run += 1;
        } else {
            triples += run / 3;
            singles += run % 3;
            run = 0;
        }
    }
    triples += run / 3;
    singles += run % 3;
    (triples, singles)
}
