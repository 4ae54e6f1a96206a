//! The character-driven reducer.
//!
//! [`Reducer::push`] is the sole entry point for stream content. Each call
//! moves through three phases:
//!
//! 1. **Backtick accumulation**: backticks are only counted; a run of three
//!    makes a fence immediately, shorter runs wait for a non-backtick to
//!    disambiguate them.
//! 2. **Backtick flush**: a settled short run is handed to the current
//!    mode, which decides whether it is literal text or a span terminator.
//! 3. **Trigger scan and dispatch**: the registered triggers may switch the
//!    mode (heading, inline code, list, ordered list, in that order); the
//!    current mode's strategy then consumes the character.
//!
//! Every phase pushes diffs into one list, returned to the caller in
//! emission order. [`Reducer::close`] finalizes the stream: pending
//! backticks are flushed, unresolved prefixes are salvaged, a half-open
//! inline code span is demoted to paragraph text and repaired, and the
//! context resets so the instance can serve another stream.

pub(crate) mod context;
pub(crate) mod strategies;

use crate::blocks::{Block, BlockKind, Diff};
use crate::repair;

use context::{Mode, ParseContext};
use strategies::{CodeFenceReducer, InlineCodeReducer, StrategyRegistry};

/// Streaming Markdown block reducer.
///
/// Feed characters with [`push`](Self::push) as they arrive, forward the
/// returned diffs to the view, and call [`close`](Self::close) when the
/// stream ends. One instance serves one stream at a time.
pub struct Reducer {
    ctx: ParseContext,
    registry: StrategyRegistry,
}

impl Reducer {
    pub fn new() -> Self {
        Self {
            ctx: ParseContext::new(),
            registry: StrategyRegistry::with_defaults(),
        }
    }

    /// Feeds one character and returns the diffs it produced.
    pub fn push(&mut self, ch: char) -> Vec<Diff> {
        let mut out = Vec::new();
        let ctx = &mut self.ctx;

        // Phase 1: backtick runs are counted before anything else sees
        // them; three in a row always make a fence.
        if ch == CodeFenceReducer::TICK {
            ctx.pending_backticks += 1;
            if ctx.pending_backticks == CodeFenceReducer::FENCE_LEN {
                ctx.pending_backticks = 0;
                strategies::toggle_fence(ctx, &mut out);
            }
            return out;
        }

        // Phase 2: a shorter run is settled by the current mode, unless a
        // lone backtick is about to become an inline-code opener (the
        // trigger below consumes it instead).
        if ctx.pending_backticks > 0 && !strategies::wants_entry(ctx) {
            let count = std::mem::take(&mut ctx.pending_backticks);
            self.registry
                .strategy(ctx.mode)
                .flush_backticks(ctx, count, &mut out);
        }

        // Phase 3: mode-entry triggers in priority order (at most one
        // fires), then the current mode handles the character.
        for trigger in self.registry.triggers() {
            if trigger.can_start(ctx, ch) {
                if trigger.start(ctx, ch, &mut out) {
                    return out;
                }
                break;
            }
        }
        self.registry.strategy(ctx.mode).process(ctx, ch, &mut out);
        out
    }

    /// Feeds a chunk character by character and returns all diffs in order.
    pub fn push_str(&mut self, chunk: &str) -> Vec<Diff> {
        let mut out = Vec::new();
        for ch in chunk.chars() {
            out.extend(self.push(ch));
        }
        out
    }

    /// Finalizes the stream, returns the closing diffs and resets the
    /// reducer for the next stream. Block ids restart at zero afterwards.
    pub fn close(&mut self) -> Vec<Diff> {
        let mut out = Vec::new();
        let ctx = &mut self.ctx;

        // A trailing short run is flushed into the open block; with nothing
        // open it is discarded.
        let pending = std::mem::take(&mut ctx.pending_backticks);
        if pending > 0 && ctx.current.is_some() {
            self.registry
                .strategy(ctx.mode)
                .flush_backticks(ctx, pending, &mut out);
        }

        self.registry.strategy(ctx.mode).close(ctx, &mut out);

        // A half-open inline code span is demoted to paragraph text,
        // reinstating the opening backtick the entry consumed.
        let mut changed = false;
        if ctx.mode == Mode::InlineCode {
            if let Some(b) = ctx.current_block_mut()
                && matches!(b.kind, BlockKind::InlineCode)
            {
                b.kind = BlockKind::Paragraph;
                b.text.insert(0, InlineCodeReducer::TICK);
                changed = true;
            }
            ctx.mode = Mode::Paragraph;
        }

        // A trailing paragraph that reads as an unterminated inline code
        // run gets its closing backtick appended.
        if let Some(b) = ctx.current_block_mut()
            && matches!(b.kind, BlockKind::Paragraph)
        {
            if let Some(repaired) = repair::close_unterminated_code(&b.text) {
                b.text = repaired;
                changed = true;
            }
            if changed {
                ctx.patch_current(&mut out);
            }
        }

        self.ctx = ParseContext::new();
        out
    }

    /// The blocks appended so far in this stream, in emission order.
    pub fn blocks(&self) -> &[Block] {
        &self.ctx.blocks
    }
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockId;

    fn feed(input: &str) -> (Reducer, Vec<Diff>) {
        let mut reducer = Reducer::new();
        let diffs = reducer.push_str(input);
        (reducer, diffs)
    }

    #[test]
    fn backticks_alone_emit_nothing() {
        let (reducer, diffs) = feed("``");
        assert!(diffs.is_empty());
        assert!(reducer.blocks().is_empty());
    }

    #[test]
    fn third_backtick_opens_a_fence() {
        let (reducer, diffs) = feed("```");
        assert_eq!(diffs.len(), 1);
        assert!(matches!(
            reducer.blocks()[0].kind,
            BlockKind::Code { lang: None }
        ));
    }

    #[test]
    fn double_backticks_flush_as_literals() {
        let (reducer, _) = feed("a``b");
        assert_eq!(reducer.blocks().len(), 1);
        assert_eq!(reducer.blocks()[0].text, "a``b");
    }

    #[test]
    fn lone_backtick_opens_an_inline_span_on_the_next_character() {
        let (reducer, _) = feed("a`b");
        let blocks = reducer.blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "a");
        assert_eq!(blocks[1].kind, BlockKind::InlineCode);
        assert_eq!(blocks[1].text, "b");
    }

    #[test]
    fn inline_span_trigger_outranks_structural_markers() {
        // `#` after a lone backtick is span content, not a heading
        let (reducer, _) = feed("`#x");
        let blocks = reducer.blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::InlineCode);
        assert_eq!(blocks[0].text, "#x");
    }

    #[test]
    fn fence_wins_over_inline_code() {
        let (reducer, _) = feed("```rust");
        assert_eq!(reducer.blocks().len(), 1);
        assert!(matches!(reducer.blocks()[0].kind, BlockKind::Code { .. }));
    }

    #[test]
    fn heading_marker_mid_paragraph_is_literal() {
        let (reducer, _) = feed("a # b");
        assert_eq!(reducer.blocks().len(), 1);
        assert_eq!(reducer.blocks()[0].text, "a # b");
    }

    #[test]
    fn close_discards_a_trailing_backtick_with_nothing_open() {
        let mut reducer = Reducer::new();
        assert!(reducer.push('`').is_empty());
        assert!(reducer.close().is_empty());
    }

    #[test]
    fn close_flushes_a_trailing_backtick_into_the_open_block() {
        let mut reducer = Reducer::new();
        reducer.push_str("```\nx`");
        let closing = reducer.close();
        assert_eq!(closing.len(), 1);
        assert_eq!(closing[0].block().text, "x`");
    }

    #[test]
    fn close_demotes_a_half_open_span_and_repairs_it() {
        let mut reducer = Reducer::new();
        reducer.push_str("`foo");
        let closing = reducer.close();

        assert_eq!(closing.len(), 1);
        assert!(matches!(
            &closing[0],
            Diff::Patch { id: BlockId(0), block }
                if block.kind == BlockKind::Paragraph && block.text == "`foo`"
        ));
    }

    #[test]
    fn close_terminates_a_span_whose_closing_backtick_is_pending() {
        let mut reducer = Reducer::new();
        reducer.push_str("`a`");
        let snapshot = reducer.blocks().to_vec();
        let closing = reducer.close();

        assert!(closing.is_empty());
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].kind, BlockKind::InlineCode);
        assert_eq!(snapshot[0].text, "a");
    }

    #[test]
    fn close_salvages_an_unfinished_ordered_marker() {
        let mut reducer = Reducer::new();
        reducer.push_str("12");
        let closing = reducer.close();

        assert_eq!(closing.len(), 2);
        assert_eq!(closing[1].block().kind, BlockKind::Paragraph);
        assert_eq!(closing[1].block().text, "12");
    }

    #[test]
    fn close_resets_ids_for_the_next_stream() {
        let mut reducer = Reducer::new();
        reducer.push_str("one\n");
        reducer.close();

        let diffs = reducer.push_str("two");
        assert_eq!(diffs[0].block_id(), BlockId(0));
    }

    #[test]
    fn close_is_idempotent_after_the_reset() {
        let mut reducer = Reducer::new();
        reducer.push_str("# half");
        reducer.close();
        assert!(reducer.close().is_empty());
        assert!(reducer.close().is_empty());
    }

    #[test]
    fn fence_interrupting_an_ordered_marker_salvages_the_digits() {
        let (reducer, _) = feed("12```");
        let blocks = reducer.blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].text, "12");
        assert!(matches!(blocks[1].kind, BlockKind::Code { .. }));
    }

    #[test]
    fn fence_interrupting_a_heading_prefix_salvages_the_run() {
        let (reducer, _) = feed("##```");
        let blocks = reducer.blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "##");
        assert!(matches!(blocks[1].kind, BlockKind::Code { .. }));
    }
}
