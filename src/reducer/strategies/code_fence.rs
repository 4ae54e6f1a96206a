use crate::blocks::{BlockKind, Diff};
use crate::reducer::context::{Mode, ParseContext};

use super::{ModeStrategy, salvage_pending_prefix, tick_run};

/// Fenced code handler, covering both of its modes: FenceStart (the
/// language line after an opening fence) and Code (the body).
///
/// The fence itself is recognized by the dispatcher's backtick accounting;
/// this reducer only ever sees the characters between the fences.
pub(crate) struct CodeFenceReducer;

impl CodeFenceReducer {
    /// Backtick; a run of [`Self::FENCE_LEN`] opens or closes a fence.
    pub(crate) const TICK: char = '`';
    pub(crate) const FENCE_LEN: u8 = 3;
}

impl ModeStrategy for CodeFenceReducer {
    fn process(&self, ctx: &mut ParseContext, ch: char, out: &mut Vec<Diff>) {
        if ctx.mode == Mode::FenceStart {
            process_language_line(ctx, ch, out);
            return;
        }
        // code body: every character is literal, newlines included
        let mut buf = [0u8; 4];
        ctx.append_text(ch.encode_utf8(&mut buf), out);
    }

    fn flush_backticks(&self, ctx: &mut ParseContext, count: u8, out: &mut Vec<Diff>) {
        // short runs inside a fence are literal code text
        ctx.append_text(&tick_run(count), out);
    }
}

/// Collects the language tag until the newline that starts the body.
fn process_language_line(ctx: &mut ParseContext, ch: char, out: &mut Vec<Diff>) {
    if ch != '\n' {
        ctx.language_buffer.push(ch);
        return;
    }
    let lang = ctx.language_buffer.trim();
    if !lang.is_empty() {
        let lang = lang.to_string();
        if let Some(b) = ctx.current_block_mut() {
            b.kind = BlockKind::Code { lang: Some(lang) };
        }
        ctx.patch_current(out);
    }
    ctx.language_buffer.clear();
    ctx.mode = Mode::Code;
}

/// Opens a code block on three backticks, or closes the one being built.
///
/// Closing from FenceStart covers a fence immediately followed by another
/// fence: the empty code block is kept and closed.
pub(crate) fn toggle_fence(ctx: &mut ParseContext, out: &mut Vec<Diff>) {
    match ctx.mode {
        Mode::Code | Mode::FenceStart => {
            ctx.language_buffer.clear();
            ctx.end_current();
            ctx.mode = Mode::Paragraph;
        }
        _ => {
            salvage_pending_prefix(ctx, out);
            ctx.language_buffer.clear();
            ctx.open_block(BlockKind::Code { lang: None }, out);
            ctx.mode = Mode::FenceStart;
        }
    }
}
