//! Block and diff records emitted by the reducer.
//!
//! Blocks are the structured output of the stream: one record per rendered
//! element, identified by a stable id. Diffs are the change feed: a view
//! that applies every diff in order holds exactly the block sequence the
//! reducer holds, with no other communication channel needed.

use serde::{Deserialize, Serialize};

/// Stable identifier for a block, unique within one reducer stream.
///
/// Ids are handed out monotonically starting at zero, so a view can use
/// them directly as insertion-ordered keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u64);

/// Block type with associated metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Default leaf block: a plain run of text.
    Paragraph,
    /// ATX heading, `level` in `1..=6`.
    Heading { level: u8 },
    /// Fenced code block with an optional language tag.
    Code { lang: Option<String> },
    /// Single-backtick code span, emitted as its own block.
    InlineCode,
    /// Unordered list item (the leading `-` is consumed, not stored).
    ListItem,
    /// Ordered list item carrying its 1-based marker number.
    OrderedListItem { number: u64 },
}

/// One structured chunk of rendered output.
///
/// `text` accumulates while the block is being built; every change is
/// announced through a [`Diff`], so the in-memory block and a view's copy
/// only ever differ in the middle of a `push` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Stable identity, assigned at creation.
    pub id: BlockId,
    /// Block type plus per-kind metadata.
    pub kind: BlockKind,
    /// Accumulated content, markers stripped.
    pub text: String,
}

/// Incremental instruction to an external view.
///
/// Diffs carry by-value snapshots of the block at emission time, which
/// decouples the emitted history from later mutation of the live block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diff {
    /// A new block was added; `block` carries its full initial state.
    Append { block: Block },
    /// The block with `id` changed; `block` carries its full new state and
    /// the view replaces its copy wholesale.
    Patch { id: BlockId, block: Block },
}

impl Diff {
    /// The id of the block this diff concerns.
    pub fn block_id(&self) -> BlockId {
        match self {
            Diff::Append { block } => block.id,
            Diff::Patch { id, .. } => *id,
        }
    }

    /// The block snapshot carried by this diff.
    pub fn block(&self) -> &Block {
        match self {
            Diff::Append { block } => block,
            Diff::Patch { block, .. } => block,
        }
    }
}
