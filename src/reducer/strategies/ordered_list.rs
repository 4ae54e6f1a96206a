use crate::blocks::{BlockKind, Diff};
use crate::reducer::context::{Mode, ParseContext};

use super::{ModeStrategy, StartTrigger, paragraph, tick_run};

/// Ordered list items: digits, a period, then a space.
///
/// The marker accumulator in the context is sign-encoded: positive while
/// digits arrive, negated once the period is seen, zero when no marker is
/// pending. Anything that breaks the `digits.` + space shape aborts, and
/// the consumed marker characters are replayed as paragraph text.
pub(crate) struct OrderedListReducer;

impl OrderedListReducer {
    pub(crate) const PERIOD: char = '.';
    pub(crate) const SEPARATOR: char = ' ';
}

impl StartTrigger for OrderedListReducer {
    fn can_start(&self, ctx: &ParseContext, ch: char) -> bool {
        // zero is the inactive sentinel, and numbering starts at 1, so a
        // leading `0` stays literal text
        ch.is_ascii_digit()
            && ch != '0'
            && ctx.mode == Mode::Paragraph
            && ctx.pending_backticks == 0
            && ctx.at_line_start()
    }

    fn start(&self, ctx: &mut ParseContext, ch: char, _out: &mut Vec<Diff>) -> bool {
        ctx.mode = Mode::OrderedList;
        ctx.ordered_list_number = digit_value(ch);
        true
    }
}

impl ModeStrategy for OrderedListReducer {
    fn process(&self, ctx: &mut ParseContext, ch: char, out: &mut Vec<Diff>) {
        if ctx.ordered_list_number > 0 {
            // collecting digits
            if ch.is_ascii_digit() {
                ctx.ordered_list_number = ctx
                    .ordered_list_number
                    .saturating_mul(10)
                    .saturating_add(digit_value(ch));
            } else if ch == Self::PERIOD {
                ctx.ordered_list_number = -ctx.ordered_list_number;
            } else {
                abort_marker(ctx, "", out);
                paragraph::process_char(ctx, ch, out);
            }
            return;
        }

        if ctx.ordered_list_number < 0 {
            // period seen, awaiting the separator
            if ch == Self::SEPARATOR {
                let number = ctx.ordered_list_number.unsigned_abs();
                ctx.ordered_list_number = 0;
                ctx.open_block(BlockKind::OrderedListItem { number }, out);
            } else {
                abort_marker(ctx, "", out);
                paragraph::process_char(ctx, ch, out);
            }
            return;
        }

        // marker resolved, the item block is current
        if ch == '\n' {
            ctx.end_current();
            ctx.mode = Mode::Paragraph;
            return;
        }
        let mut buf = [0u8; 4];
        ctx.append_text(ch.encode_utf8(&mut buf), out);
    }

    fn flush_backticks(&self, ctx: &mut ParseContext, count: u8, out: &mut Vec<Diff>) {
        if ctx.ordered_list_number != 0 {
            abort_marker(ctx, &tick_run(count), out);
        } else {
            ctx.append_text(&tick_run(count), out);
        }
    }

    fn close(&self, ctx: &mut ParseContext, out: &mut Vec<Diff>) {
        if ctx.ordered_list_number != 0 {
            abort_marker(ctx, "", out);
        }
    }
}

/// Replays a consumed marker (`12`, `12.`) as paragraph text when the line
/// turns out not to be an ordered list item.
pub(crate) fn abort_marker(ctx: &mut ParseContext, extra: &str, out: &mut Vec<Diff>) {
    let n = ctx.ordered_list_number;
    ctx.ordered_list_number = 0;
    ctx.mode = Mode::Paragraph;
    let mut text = n.unsigned_abs().to_string();
    if n < 0 {
        text.push(OrderedListReducer::PERIOD);
    }
    text.push_str(extra);
    paragraph::append_literal(ctx, &text, out);
}

fn digit_value(ch: char) -> i64 {
    ch.to_digit(10).map(i64::from).unwrap_or(0)
}
