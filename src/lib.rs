/*!
 * # livemark
 *
 * A streaming incremental Markdown block reducer for live-rendering
 * scenarios where text arrives one character (or small chunk) at a time
 * from a language model or a network stream.
 *
 * ## Architecture Overview
 *
 * The engine converts the incoming character stream into an append-only
 * sequence of structured [`Block`] records and emits a stream of [`Diff`]s
 * describing how an external view should mutate its state after every
 * character:
 *
 * - **Character-driven state machine**: [`Reducer::push`] takes exactly one
 *   character and returns the diffs it produced; truncating the stream at
 *   any character never yields invalid output.
 * - **Mode strategies**: each parse mode (paragraph, heading, code fence,
 *   inline code, list item, ordered list item) has its own handler, and the
 *   delimiters live with the handler that understands them. The dispatcher
 *   resolves modes through a registry, so new block types plug in without
 *   touching the dispatch loop.
 * - **Minimal diffs**: a block is announced once with `Append`, then every
 *   content change is a `Patch` carrying the full new state. A view that
 *   replaces blocks by id stays in sync with no other channel.
 * - **End-of-stream repair**: [`Reducer::close`] settles pending backticks,
 *   demotes a half-open inline code span to paragraph text, and appends the
 *   missing closer where the text plausibly reads as code.
 *
 * ## Supported Constructs
 *
 * Paragraphs, ATX headings 1–6, fenced code blocks with an optional
 * language tag, single-backtick inline code spans, `-` list items, and
 * `1.`-style ordered list items. Everything else flows through as literal
 * text; invalid or incomplete Markdown degrades to best-effort output
 * rather than an error.
 *
 * ## Usage Pattern
 *
 * ```rust
 * use livemark::{BlockKind, Reducer};
 *
 * let mut reducer = Reducer::new();
 * let mut diffs = Vec::new();
 * for ch in "# Title\nbody".chars() {
 *     diffs.extend(reducer.push(ch));
 * }
 *
 * assert_eq!(reducer.blocks().len(), 2);
 * assert!(matches!(
 *     reducer.blocks()[0].kind,
 *     BlockKind::Heading { level: 1 }
 * ));
 *
 * diffs.extend(reducer.close());
 * ```
 *
 * For fan-out to several view listeners, wrap the reducer in a
 * [`MarkdownStream`] and `subscribe`.
 */

pub mod blocks;
pub mod reducer;
pub mod repair;
pub mod stream;
pub mod trace;

pub use blocks::{Block, BlockId, BlockKind, Diff};
pub use reducer::Reducer;
pub use stream::{MarkdownStream, SubscriptionId};
