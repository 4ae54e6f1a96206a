use crate::blocks::{BlockKind, Diff};
use crate::reducer::context::{Mode, ParseContext};

use super::{ModeStrategy, StartTrigger, paragraph, tick_run};

/// ATX heading handler.
///
/// Entry defers the triggering `#` back to `process`, which counts the run
/// until the separating space materializes the block. A run longer than six
/// or any other character before the space demotes the prefix to paragraph
/// text.
pub(crate) struct HeadingReducer;

impl HeadingReducer {
    pub(crate) const MARKER: char = '#';
    pub(crate) const MAX_LEVEL: u8 = 6;
}

impl StartTrigger for HeadingReducer {
    fn can_start(&self, ctx: &ParseContext, ch: char) -> bool {
        ch == Self::MARKER
            && ctx.mode == Mode::Paragraph
            && ctx.pending_backticks == 0
            && ctx.at_line_start()
    }

    fn start(&self, ctx: &mut ParseContext, _ch: char, _out: &mut Vec<Diff>) -> bool {
        ctx.mode = Mode::Heading;
        ctx.heading_level = 0;
        false // the `#` is counted by process
    }
}

impl ModeStrategy for HeadingReducer {
    fn process(&self, ctx: &mut ParseContext, ch: char, out: &mut Vec<Diff>) {
        if heading_open(ctx) {
            if ch == '\n' {
                ctx.end_current();
                ctx.mode = Mode::Paragraph;
            } else {
                // space is ordinary content once the block exists
                let mut buf = [0u8; 4];
                ctx.append_text(ch.encode_utf8(&mut buf), out);
            }
            return;
        }

        match ch {
            Self::MARKER => {
                ctx.heading_level += 1;
                if ctx.heading_level > Self::MAX_LEVEL {
                    abort_prefix(ctx, "", out);
                }
            }
            ' ' => {
                let level = ctx.heading_level;
                ctx.heading_level = 0;
                ctx.open_block(BlockKind::Heading { level }, out);
            }
            _ => {
                abort_prefix(ctx, "", out);
                paragraph::process_char(ctx, ch, out);
            }
        }
    }

    fn flush_backticks(&self, ctx: &mut ParseContext, count: u8, out: &mut Vec<Diff>) {
        if heading_open(ctx) {
            ctx.append_text(&tick_run(count), out);
        } else {
            abort_prefix(ctx, &tick_run(count), out);
        }
    }

    fn close(&self, ctx: &mut ParseContext, out: &mut Vec<Diff>) {
        if !heading_open(ctx) && ctx.heading_level > 0 {
            abort_prefix(ctx, "", out);
        }
    }
}

fn heading_open(ctx: &ParseContext) -> bool {
    matches!(
        ctx.current_block().map(|b| &b.kind),
        Some(BlockKind::Heading { .. })
    )
}

/// Abandons an unresolved heading prefix: the `#` run (plus `extra`)
/// becomes paragraph text and the mode drops back to Paragraph.
pub(crate) fn abort_prefix(ctx: &mut ParseContext, extra: &str, out: &mut Vec<Diff>) {
    let mut text: String =
        std::iter::repeat_n(HeadingReducer::MARKER, ctx.heading_level as usize).collect();
    text.push_str(extra);
    ctx.heading_level = 0;
    ctx.mode = Mode::Paragraph;
    paragraph::append_literal(ctx, &text, out);
}
