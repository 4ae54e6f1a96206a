//! Subscription fan-out around a [`Reducer`].
//!
//! The reducer itself is a pure state machine; this wrapper is the small
//! collaborator that distributes its diffs to view listeners. Listeners
//! observe every diff in emission order, which is all a view needs to
//! reconstruct the block sequence.

use crate::blocks::{Block, Diff};
use crate::reducer::Reducer;

/// Handle returned by [`MarkdownStream::subscribe`], consumed by
/// [`MarkdownStream::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Diff)>;

/// One reducer, many diff listeners.
pub struct MarkdownStream {
    reducer: Reducer,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl MarkdownStream {
    pub fn new() -> Self {
        Self {
            reducer: Reducer::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Registers a listener for every subsequent diff.
    pub fn subscribe(&mut self, listener: impl FnMut(&Diff) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false when the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Feeds one character; listeners see the diffs before they are
    /// returned.
    pub fn push(&mut self, ch: char) -> Vec<Diff> {
        let diffs = self.reducer.push(ch);
        self.fan_out(&diffs);
        diffs
    }

    /// Feeds a chunk character by character.
    pub fn push_str(&mut self, chunk: &str) -> Vec<Diff> {
        let diffs = self.reducer.push_str(chunk);
        self.fan_out(&diffs);
        diffs
    }

    /// Finalizes the stream and resets the underlying reducer.
    pub fn close(&mut self) -> Vec<Diff> {
        let diffs = self.reducer.close();
        self.fan_out(&diffs);
        diffs
    }

    /// The blocks of the stream in progress.
    pub fn blocks(&self) -> &[Block] {
        self.reducer.blocks()
    }

    fn fan_out(&mut self, diffs: &[Diff]) {
        for diff in diffs {
            for (_, listener) in &mut self.listeners {
                listener(diff);
            }
        }
    }
}

impl Default for MarkdownStream {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_observe_diffs_in_emission_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut stream = MarkdownStream::new();
        stream.subscribe(move |diff| sink.borrow_mut().push(diff.clone()));
        let returned = stream.push_str("hi");

        assert_eq!(*seen.borrow(), returned);
        assert_eq!(seen.borrow().len(), 3); // append + two patches
    }

    #[test]
    fn every_listener_sees_every_diff() {
        let first = Rc::new(RefCell::new(0usize));
        let second = Rc::new(RefCell::new(0usize));
        let a = Rc::clone(&first);
        let b = Rc::clone(&second);

        let mut stream = MarkdownStream::new();
        stream.subscribe(move |_| *a.borrow_mut() += 1);
        stream.subscribe(move |_| *b.borrow_mut() += 1);
        stream.push('x');

        assert_eq!(*first.borrow(), 2);
        assert_eq!(*second.borrow(), 2);
    }

    #[test]
    fn unsubscribed_listeners_stop_observing() {
        let count = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&count);

        let mut stream = MarkdownStream::new();
        let id = stream.subscribe(move |_| *sink.borrow_mut() += 1);
        stream.push('x');
        assert!(stream.unsubscribe(id));
        stream.push('y');

        assert_eq!(*count.borrow(), 2); // only the first push was observed
        assert!(!stream.unsubscribe(id));
    }

    #[test]
    fn closing_diffs_reach_listeners_too() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut stream = MarkdownStream::new();
        stream.subscribe(move |diff| sink.borrow_mut().push(diff.clone()));
        stream.push_str("`foo");
        stream.close();

        let last = seen.borrow().last().cloned().unwrap();
        assert_eq!(last.block().text, "`foo`");
    }
}
