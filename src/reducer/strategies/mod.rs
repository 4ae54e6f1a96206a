//! One strategy per parse mode.
//!
//! Each strategy owns the delimiters it understands (the bullet lives with
//! the list reducer, the fence length with the code fence reducer) and
//! mutates the shared [`ParseContext`] through a small set of helpers. The
//! dispatcher never names a concrete strategy: it resolves the current mode
//! through the [`StrategyRegistry`] and scans the registered triggers in
//! priority order, so a new block type plugs in without dispatcher changes.

mod code_fence;
mod heading;
mod inline_code;
mod list;
mod ordered_list;
mod paragraph;

pub(crate) use code_fence::CodeFenceReducer;
pub(crate) use heading::HeadingReducer;
pub(crate) use inline_code::InlineCodeReducer;
pub(crate) use list::ListReducer;
pub(crate) use ordered_list::OrderedListReducer;
pub(crate) use paragraph::ParagraphReducer;

pub(crate) use code_fence::toggle_fence;
pub(crate) use inline_code::wants_entry;

use std::collections::HashMap;

use crate::blocks::Diff;

use super::context::{Mode, ParseContext};

/// Handler for one parse mode.
pub(crate) trait ModeStrategy {
    /// Consumes one character in this mode.
    fn process(&self, ctx: &mut ParseContext, ch: char, out: &mut Vec<Diff>);

    /// Settles a run of one or two backticks that did not become a fence.
    fn flush_backticks(&self, ctx: &mut ParseContext, count: u8, out: &mut Vec<Diff>);

    /// End-of-stream hook.
    fn close(&self, _ctx: &mut ParseContext, _out: &mut Vec<Diff>) {}
}

/// Decides whether an arriving character switches the parse mode before the
/// current mode gets to process it.
pub(crate) trait StartTrigger {
    fn can_start(&self, ctx: &ParseContext, ch: char) -> bool;

    /// Performs the switch. Returns true when the character was consumed by
    /// the transition, false to defer it to the new mode's `process`.
    fn start(&self, ctx: &mut ParseContext, ch: char, out: &mut Vec<Diff>) -> bool;
}

/// Maps modes to strategies and keeps the ordered trigger list.
pub(crate) struct StrategyRegistry {
    strategies: HashMap<Mode, Box<dyn ModeStrategy>>,
    triggers: Vec<Box<dyn StartTrigger>>,
}

impl StrategyRegistry {
    /// Registry with every built-in strategy and trigger registered.
    ///
    /// Trigger order is significant: heading, inline code, list, ordered
    /// list. The code fence reducer serves both of its modes.
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            strategies: HashMap::new(),
            triggers: Vec::new(),
        };
        registry.register(Mode::Paragraph, Box::new(ParagraphReducer));
        registry.register(Mode::Heading, Box::new(HeadingReducer));
        registry.register(Mode::FenceStart, Box::new(CodeFenceReducer));
        registry.register(Mode::Code, Box::new(CodeFenceReducer));
        registry.register(Mode::InlineCode, Box::new(InlineCodeReducer));
        registry.register(Mode::List, Box::new(ListReducer));
        registry.register(Mode::OrderedList, Box::new(OrderedListReducer));
        registry.add_trigger(Box::new(HeadingReducer));
        registry.add_trigger(Box::new(InlineCodeReducer));
        registry.add_trigger(Box::new(ListReducer));
        registry.add_trigger(Box::new(OrderedListReducer));
        registry
    }

    pub fn register(&mut self, mode: Mode, strategy: Box<dyn ModeStrategy>) {
        self.strategies.insert(mode, strategy);
    }

    pub fn add_trigger(&mut self, trigger: Box<dyn StartTrigger>) {
        self.triggers.push(trigger);
    }

    /// Every mode is registered at construction, so the lookup is total.
    pub fn strategy(&self, mode: Mode) -> &dyn ModeStrategy {
        self.strategies[&mode].as_ref()
    }

    pub fn triggers(&self) -> impl Iterator<Item = &dyn StartTrigger> {
        self.triggers.iter().map(|t| t.as_ref())
    }
}

/// A literal run of backticks.
pub(crate) fn tick_run(count: u8) -> String {
    std::iter::repeat_n(InlineCodeReducer::TICK, count as usize).collect()
}

/// An unresolved heading or ordered-list prefix becomes paragraph text
/// before another construct takes over the line.
pub(crate) fn salvage_pending_prefix(ctx: &mut ParseContext, out: &mut Vec<Diff>) {
    match ctx.mode {
        Mode::Heading if ctx.heading_level > 0 => heading::abort_prefix(ctx, "", out),
        Mode::OrderedList if ctx.ordered_list_number != 0 => {
            ordered_list::abort_marker(ctx, "", out)
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_every_mode() {
        let registry = StrategyRegistry::with_defaults();
        for mode in [
            Mode::Paragraph,
            Mode::Heading,
            Mode::FenceStart,
            Mode::Code,
            Mode::InlineCode,
            Mode::List,
            Mode::OrderedList,
        ] {
            // A missing registration would panic here.
            let _ = registry.strategy(mode);
        }
        assert_eq!(registry.triggers().count(), 4);
    }

    #[test]
    fn tick_run_repeats_the_backtick() {
        assert_eq!(tick_run(0), "");
        assert_eq!(tick_run(1), "`");
        assert_eq!(tick_run(2), "``");
    }
}
