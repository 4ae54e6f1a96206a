use crate::blocks::{BlockKind, Diff};
use crate::reducer::context::{Mode, ParseContext};

use super::{ModeStrategy, StartTrigger, salvage_pending_prefix, tick_run};

/// Single-backtick code spans, emitted as standalone blocks.
///
/// A span opens on the first character after a lone backtick, never on the
/// backtick itself: the dispatcher must see a non-backtick before a run of
/// one can mean anything, which is what keeps fences unambiguous.
pub(crate) struct InlineCodeReducer;

impl InlineCodeReducer {
    pub(crate) const TICK: char = '`';
}

/// True when a lone pending backtick should open a span before the arriving
/// character is handled.
pub(crate) fn wants_entry(ctx: &ParseContext) -> bool {
    ctx.pending_backticks == 1
        && !matches!(ctx.mode, Mode::Code | Mode::FenceStart | Mode::InlineCode)
}

impl StartTrigger for InlineCodeReducer {
    fn can_start(&self, ctx: &ParseContext, _ch: char) -> bool {
        wants_entry(ctx)
    }

    fn start(&self, ctx: &mut ParseContext, _ch: char, out: &mut Vec<Diff>) -> bool {
        ctx.pending_backticks = 0; // the opener is consumed
        salvage_pending_prefix(ctx, out);
        ctx.open_block(BlockKind::InlineCode, out);
        ctx.mode = Mode::InlineCode;
        false // the character is span content
    }
}

impl ModeStrategy for InlineCodeReducer {
    fn process(&self, ctx: &mut ParseContext, ch: char, out: &mut Vec<Diff>) {
        if ch == '\n' {
            ctx.end_current();
            ctx.mode = Mode::Paragraph;
            return;
        }
        let mut buf = [0u8; 4];
        ctx.append_text(ch.encode_utf8(&mut buf), out);
    }

    fn flush_backticks(&self, ctx: &mut ParseContext, count: u8, out: &mut Vec<Diff>) {
        if count == 1 {
            // the terminator; the content was already announced
            ctx.end_current();
            ctx.mode = Mode::Paragraph;
        } else {
            ctx.append_text(&tick_run(count), out);
        }
    }
}
