//! Shared mutable parse state.
//!
//! All state lives here; the mode strategies themselves are stateless and
//! receive a `&mut ParseContext` for the duration of one call. `current` is
//! an index into `blocks` rather than a reference, since the vector grows
//! while a block is being built.

use crate::blocks::{Block, BlockId, BlockKind, Diff};

/// Parse mode: which strategy owns the next character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Mode {
    Paragraph,
    Heading,
    /// Between an opening fence and its newline (language line).
    FenceStart,
    /// Inside a fenced code block body.
    Code,
    InlineCode,
    List,
    OrderedList,
}

/// All mutable parse state shared by the dispatcher and the strategies.
#[derive(Debug)]
pub(crate) struct ParseContext {
    /// Every block appended so far, in emission order. Append-only; blocks
    /// are mutated in place only while current.
    pub blocks: Vec<Block>,
    /// Index of the block being built, if any.
    pub current: Option<usize>,
    /// Next id to hand out.
    pub next_id: u64,
    pub mode: Mode,
    /// Consecutive backticks seen but not yet committed. Stays in `0..=2`
    /// between calls; a third triggers a fence and resets the count.
    pub pending_backticks: u8,
    /// Characters collected between an opening fence and its newline.
    pub language_buffer: String,
    /// Length of the `#` run while a heading prefix is unresolved; 0 once
    /// the heading block exists.
    pub heading_level: u8,
    /// Ordered-list marker accumulator: positive while collecting digits,
    /// negated once the `.` is seen, 0 when no marker is pending.
    pub ordered_list_number: i64,
}

impl ParseContext {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            current: None,
            next_id: 0,
            mode: Mode::Paragraph,
            pending_backticks: 0,
            language_buffer: String::new(),
            heading_level: 0,
            ordered_list_number: 0,
        }
    }

    pub fn current_block(&self) -> Option<&Block> {
        self.current.map(|i| &self.blocks[i])
    }

    pub fn current_block_mut(&mut self) -> Option<&mut Block> {
        self.current.map(|i| &mut self.blocks[i])
    }

    /// True where `#`, `-` and digits carry structural meaning: nothing is
    /// being built, or the block being built has no text yet.
    pub fn at_line_start(&self) -> bool {
        self.current_block().is_none_or(|b| b.text.is_empty())
    }

    /// Appends a new empty block, makes it current and announces it.
    pub fn open_block(&mut self, kind: BlockKind, out: &mut Vec<Diff>) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        let block = Block {
            id,
            kind,
            text: String::new(),
        };
        out.push(Diff::Append {
            block: block.clone(),
        });
        self.blocks.push(block);
        self.current = Some(self.blocks.len() - 1);
        id
    }

    /// Stops building the current block. It stays in `blocks` and is not
    /// touched again, except by the end-of-stream repair pass.
    pub fn end_current(&mut self) {
        self.current = None;
    }

    /// Announces the current block's state as a patch.
    pub fn patch_current(&mut self, out: &mut Vec<Diff>) {
        if let Some(b) = self.current_block() {
            out.push(Diff::Patch {
                id: b.id,
                block: b.clone(),
            });
        }
    }

    /// Appends text to the current block and announces the change.
    pub fn append_text(&mut self, text: &str, out: &mut Vec<Diff>) {
        if let Some(b) = self.current_block_mut() {
            b.text.push_str(text);
        }
        self.patch_current(out);
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new()
    }
}
