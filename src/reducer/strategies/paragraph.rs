use crate::blocks::{BlockKind, Diff};
use crate::reducer::context::ParseContext;

use super::{ModeStrategy, tick_run};

/// Default mode: plain text runs, one block per line.
///
/// Paragraphs are created lazily, on the first character that needs one, so
/// bare newlines never produce empty blocks.
pub(crate) struct ParagraphReducer;

impl ModeStrategy for ParagraphReducer {
    fn process(&self, ctx: &mut ParseContext, ch: char, out: &mut Vec<Diff>) {
        process_char(ctx, ch, out);
    }

    fn flush_backticks(&self, ctx: &mut ParseContext, count: u8, out: &mut Vec<Diff>) {
        append_literal(ctx, &tick_run(count), out);
    }
}

/// Paragraph rules for one character: a newline ends the block, anything
/// else is literal text.
pub(crate) fn process_char(ctx: &mut ParseContext, ch: char, out: &mut Vec<Diff>) {
    if ch == '\n' {
        ctx.end_current();
        return;
    }
    let mut buf = [0u8; 4];
    append_literal(ctx, ch.encode_utf8(&mut buf), out);
}

/// Appends literal text to the current paragraph, creating it on demand.
pub(crate) fn append_literal(ctx: &mut ParseContext, text: &str, out: &mut Vec<Diff>) {
    if text.is_empty() {
        return;
    }
    if ctx.current.is_none() {
        ctx.open_block(BlockKind::Paragraph, out);
    }
    ctx.append_text(text, out);
}
