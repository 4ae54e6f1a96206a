use crate::blocks::{BlockKind, Diff};
use crate::reducer::context::{Mode, ParseContext};

use super::{ModeStrategy, StartTrigger, tick_run};

/// Unordered list items: a `-` at line start.
///
/// The bullet is consumed by the trigger; the item block is created by the
/// first content character, so a bullet on an otherwise empty line produces
/// nothing.
pub(crate) struct ListReducer;

impl ListReducer {
    pub(crate) const BULLET: char = '-';
    pub(crate) const SEPARATOR: char = ' ';
}

impl StartTrigger for ListReducer {
    fn can_start(&self, ctx: &ParseContext, ch: char) -> bool {
        ch == Self::BULLET
            && ctx.mode == Mode::Paragraph
            && ctx.pending_backticks == 0
            && ctx.at_line_start()
    }

    fn start(&self, ctx: &mut ParseContext, _ch: char, _out: &mut Vec<Diff>) -> bool {
        ctx.mode = Mode::List;
        true // the bullet is consumed; the block waits for content
    }
}

impl ModeStrategy for ListReducer {
    fn process(&self, ctx: &mut ParseContext, ch: char, out: &mut Vec<Diff>) {
        if ch == '\n' {
            ctx.end_current();
            ctx.mode = Mode::Paragraph;
            return;
        }
        if !item_open(ctx) {
            ctx.open_block(BlockKind::ListItem, out);
            if ch == Self::SEPARATOR {
                return; // separator between bullet and content, not content
            }
        }
        let mut buf = [0u8; 4];
        ctx.append_text(ch.encode_utf8(&mut buf), out);
    }

    fn flush_backticks(&self, ctx: &mut ParseContext, count: u8, out: &mut Vec<Diff>) {
        if !item_open(ctx) {
            ctx.open_block(BlockKind::ListItem, out);
        }
        ctx.append_text(&tick_run(count), out);
    }
}

fn item_open(ctx: &ParseContext) -> bool {
    matches!(
        ctx.current_block().map(|b| &b.kind),
        Some(BlockKind::ListItem)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_ctx() -> ParseContext {
        let mut ctx = ParseContext::new();
        ctx.mode = Mode::List;
        ctx
    }

    #[test]
    fn separator_after_the_bullet_is_not_content() {
        let mut ctx = list_ctx();
        let mut out = vec![];
        ListReducer.process(&mut ctx, ' ', &mut out);

        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Diff::Append { .. }));
        assert_eq!(ctx.blocks[0].text, "");
    }

    #[test]
    fn content_without_a_separator_starts_the_item() {
        let mut ctx = list_ctx();
        let mut out = vec![];
        ListReducer.process(&mut ctx, 'x', &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(ctx.blocks[0].kind, BlockKind::ListItem);
        assert_eq!(ctx.blocks[0].text, "x");
    }

    #[test]
    fn only_the_first_space_is_consumed() {
        let mut ctx = list_ctx();
        let mut out = vec![];
        ListReducer.process(&mut ctx, ' ', &mut out);
        ListReducer.process(&mut ctx, ' ', &mut out);
        ListReducer.process(&mut ctx, 'x', &mut out);

        assert_eq!(ctx.blocks[0].text, " x");
    }

    #[test]
    fn newline_ends_the_item() {
        let mut ctx = list_ctx();
        let mut out = vec![];
        ListReducer.process(&mut ctx, ' ', &mut out);
        ListReducer.process(&mut ctx, 'x', &mut out);
        ListReducer.process(&mut ctx, '\n', &mut out);

        assert_eq!(ctx.mode, Mode::Paragraph);
        assert!(ctx.current_block().is_none());
    }

    #[test]
    fn bullet_alone_produces_no_block() {
        let mut ctx = list_ctx();
        let mut out = vec![];
        ListReducer.process(&mut ctx, '\n', &mut out);

        assert!(out.is_empty());
        assert!(ctx.blocks.is_empty());
        assert_eq!(ctx.mode, Mode::Paragraph);
    }

    #[test]
    fn bullet_requires_a_line_start() {
        let mut ctx = ParseContext::new();
        let mut out = vec![];
        super::super::paragraph::process_char(&mut ctx, 'a', &mut out);

        assert!(!ListReducer.can_start(&ctx, '-'));
    }
}
