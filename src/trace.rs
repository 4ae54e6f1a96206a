//! Diff-stream rendering and invariant support used by the test suites.
//!
//! `trace_stream` renders a whole run (per-character feed plus close) into
//! a stable one-line-per-diff form suitable for snapshot assertions, and
//! `check` replays a diff stream against the block sequence it should
//! reproduce.

use std::collections::BTreeMap;

use crate::blocks::{Block, BlockKind, Diff};
use crate::reducer::Reducer;

/// Feeds `input` one character at a time, then closes, recording the diffs
/// of every call. Returns the rendered trace alongside the raw diff stream.
pub fn trace_stream(input: &str) -> (String, Vec<Diff>) {
    let mut reducer = Reducer::new();
    let mut lines = Vec::new();
    let mut all = Vec::new();
    for ch in input.chars() {
        let diffs = reducer.push(ch);
        for diff in &diffs {
            lines.push(format!("{ch:?} {}", render_diff(diff)));
        }
        all.extend(diffs);
    }
    let diffs = reducer.close();
    for diff in &diffs {
        lines.push(format!("close {}", render_diff(diff)));
    }
    all.extend(diffs);
    (lines.join("\n"), all)
}

/// Stable single-line form of one diff.
pub fn render_diff(diff: &Diff) -> String {
    match diff {
        Diff::Append { block } => format!("append #{} {}", block.id.0, render_block(block)),
        Diff::Patch { id, block } => format!("patch #{} {}", id.0, render_block(block)),
    }
}

fn render_block(block: &Block) -> String {
    let kind = match &block.kind {
        BlockKind::Paragraph => "paragraph".to_string(),
        BlockKind::Heading { level } => format!("heading[{level}]"),
        BlockKind::Code { lang: Some(lang) } => format!("code[{lang}]"),
        BlockKind::Code { lang: None } => "code".to_string(),
        BlockKind::InlineCode => "inline-code".to_string(),
        BlockKind::ListItem => "list-item".to_string(),
        BlockKind::OrderedListItem { number } => format!("ordered-item[{number}]"),
    };
    format!("{kind} {:?}", block.text)
}

/// Asserts the structural rules every diff stream obeys: each block is
/// announced by exactly one append before any patch, appended ids increase
/// from zero, and replaying the stream reproduces `expected`.
pub fn check(diffs: &[Diff], expected: &[Block]) {
    let mut view: BTreeMap<u64, Block> = BTreeMap::new();
    let mut next_append = 0u64;
    for diff in diffs {
        match diff {
            Diff::Append { block } => {
                assert_eq!(block.id.0, next_append, "append ids must increase from zero");
                next_append += 1;
                let previous = view.insert(block.id.0, block.clone());
                assert!(previous.is_none(), "block {} appended twice", block.id.0);
            }
            Diff::Patch { id, block } => {
                assert_eq!(*id, block.id, "patch id must match its snapshot");
                let slot = view
                    .get_mut(&id.0)
                    .unwrap_or_else(|| panic!("patch for unannounced block {}", id.0));
                *slot = block.clone();
            }
        }
    }
    let replayed: Vec<Block> = view.into_values().collect();
    assert_eq!(
        replayed, expected,
        "diff replay must reproduce the block sequence"
    );
}
