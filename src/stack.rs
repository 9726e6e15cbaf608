//! Chronological backtracking over generation snapshots.
//!
//! Level 0 holds the seeded and fully grown board (crop 1 is planted at
//! seeding), levels 1 through 4 hold the boards with crops 2 through 5.
//! Each level has a retry budget; exhausting it drops the level and charges
//! one failed try to its parent, whose blacklist remembers the dead child so
//! the same board is not accepted again from there.

use std::collections::HashSet;

use log::debug;

use crate::cell::Crop;

/// Anything that can be pushed on a [`StateStack`].
pub trait Snapshot {
    /// Content key, equal for equal content.
    fn snapshot_hash(&self) -> String;
}

struct Step<S> {
    state: S,
    tries: usize,
    /// Hashes of children proven to lead nowhere.
    blacklist: HashSet<String>,
}

pub struct StateStack<S> {
    steps: Vec<Step<S>>,
    step_max_tries: usize,
}

impl<S: Snapshot> StateStack<S> {
    pub fn new(step_max_tries: usize) -> Self {
        Self {
            steps: Vec::with_capacity(Crop::MAX as usize),
            step_max_tries,
        }
    }

    /// True once backtracking has unwound past the root: this attempt failed.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True once every crop level is filled: the top state is complete.
    pub fn is_full(&self) -> bool {
        self.steps.len() >= Crop::MAX as usize
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    pub fn last_state(&self) -> Option<&S> {
        self.steps.last().map(|step| &step.state)
    }

    /// Consume the stack and return the top state.
    pub fn into_last_state(mut self) -> Option<S> {
        self.steps.pop().map(|step| step.state)
    }

    /// The crop the next level must plant, `None` once the stack is full.
    pub fn next_crop(&self) -> Option<Crop> {
        u8::try_from(self.steps.len() + 1)
            .ok()
            .and_then(|value| Crop::try_from(value).ok())
    }

    /// True when `candidate` was already proven dead from the top state.
    pub fn is_blacklisted(&self, candidate: &S) -> bool {
        self.steps
            .last()
            .is_some_and(|step| step.blacklist.contains(&candidate.snapshot_hash()))
    }

    pub fn last_blacklist(&self) -> Option<&HashSet<String>> {
        self.steps.last().map(|step| &step.blacklist)
    }

    pub fn push_valid(&mut self, state: S) {
        self.steps.push(Step {
            state,
            tries: 0,
            blacklist: HashSet::new(),
        });
    }

    /// Push `candidate` as the next level, or charge the top state a try
    /// when there is no candidate or it was already proven dead from here.
    pub fn offer(&mut self, candidate: Option<S>) {
        match candidate {
            Some(state) if !self.is_blacklisted(&state) => self.push_valid(state),
            Some(_) => {
                debug!("Rejected a blacklisted candidate at level {}", self.steps.len());
                self.mark_invalid();
            }
            None => self.mark_invalid(),
        }
    }

    /// Charge one failed try to the top state.
    ///
    /// When its budget runs out the top state is dropped, its hash goes on the
    /// parent's blacklist and the parent is charged in turn.
    pub fn mark_invalid(&mut self) {
        while let Some(top) = self.steps.last_mut() {
            top.tries += 1;
            if top.tries < self.step_max_tries {
                return;
            }

            let Some(dead) = self.steps.pop() else {
                return;
            };
            debug!(
                "Level {} exhausted after {} tries, backtracking",
                self.steps.len(),
                dead.tries
            );
            if let Some(parent) = self.steps.last_mut() {
                parent.blacklist.insert(dead.state.snapshot_hash());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct MockState(&'static str);

    impl Snapshot for MockState {
        fn snapshot_hash(&self) -> String {
            self.0.to_string()
        }
    }

    fn stack() -> StateStack<MockState> {
        StateStack::new(2)
    }

    #[test]
    fn test_stores_valid_state() {
        let mut s = stack();
        s.push_valid(MockState("state1"));
        assert_eq!(s.last_state(), Some(&MockState("state1")));
    }

    #[test]
    fn test_invalidates_only_after_max_tries() {
        let mut s = stack();
        s.push_valid(MockState("state1"));
        s.mark_invalid();
        assert_eq!(s.last_state(), Some(&MockState("state1")));
        assert!(!s.is_empty());
        s.mark_invalid();
        assert!(s.is_empty());
    }

    #[test]
    fn test_stores_invalidated_hash_in_parent() {
        let mut s = stack();
        s.push_valid(MockState("state1"));
        s.push_valid(MockState("state2"));
        s.mark_invalid();
        s.mark_invalid();
        assert_eq!(s.depth(), 1);
        let blacklist = s.last_blacklist().unwrap();
        assert_eq!(blacklist.len(), 1);
        assert!(blacklist.contains("state2"));
        assert!(s.is_blacklisted(&MockState("state2")));
        assert!(!s.is_blacklisted(&MockState("state3")));
    }

    #[test]
    fn test_propagates_errors_to_parents() {
        let mut s = stack();
        s.push_valid(MockState("state1"));
        s.push_valid(MockState("state2"));
        // the child's exhaustion costs the parent one try, so three in total
        s.mark_invalid();
        s.mark_invalid();
        assert_eq!(s.depth(), 1);
        s.mark_invalid();
        assert!(s.is_empty());
    }

    #[test]
    fn test_cascade_with_larger_budget() {
        let mut s: StateStack<MockState> = StateStack::new(3);
        s.push_valid(MockState("a"));
        s.push_valid(MockState("b"));
        s.push_valid(MockState("c"));
        for _ in 0..3 {
            s.mark_invalid();
        }
        // "c" evicted, "b" charged once
        assert_eq!(s.depth(), 2);
        assert!(s.is_blacklisted(&MockState("c")));
        s.mark_invalid();
        s.mark_invalid();
        // "b" evicted, "a" charged once
        assert_eq!(s.depth(), 1);
        assert!(s.is_blacklisted(&MockState("b")));
        s.mark_invalid();
        s.mark_invalid();
        assert!(s.is_empty());
    }

    #[test]
    fn test_offer_pushes_fresh_candidate() {
        let mut s = stack();
        s.push_valid(MockState("state1"));
        s.offer(Some(MockState("state2")));
        assert_eq!(s.depth(), 2);
        assert_eq!(s.last_state(), Some(&MockState("state2")));
    }

    #[test]
    fn test_offer_charges_missing_candidate() {
        let mut s = stack();
        s.push_valid(MockState("state1"));
        s.offer(None);
        assert_eq!(s.depth(), 1);
        s.offer(None);
        assert!(s.is_empty());
    }

    #[test]
    fn test_offer_rejects_blacklisted_candidate() {
        let mut s: StateStack<MockState> = StateStack::new(3);
        s.push_valid(MockState("root"));
        s.push_valid(MockState("dead"));
        for _ in 0..3 {
            s.mark_invalid();
        }
        // "dead" evicted, root charged once
        assert!(s.is_blacklisted(&MockState("dead")));

        s.offer(Some(MockState("dead")));
        assert_eq!(s.depth(), 1);
        assert_eq!(s.last_state(), Some(&MockState("root")));
        // root's third try evicts it
        s.offer(Some(MockState("dead")));
        assert!(s.is_empty());
    }

    #[test]
    fn test_mark_invalid_on_empty_is_noop() {
        let mut s = stack();
        s.mark_invalid();
        assert!(s.is_empty());
        assert!(s.last_state().is_none());
        assert!(s.last_blacklist().is_none());
    }

    #[test]
    fn test_next_crop_follows_depth() {
        let mut s = stack();
        assert_eq!(s.next_crop(), Some(Crop::One));
        s.push_valid(MockState("state1"));
        assert_eq!(s.next_crop(), Some(Crop::Two));
        s.push_valid(MockState("state2"));
        assert_eq!(s.next_crop(), Some(Crop::Three));
    }

    #[test]
    fn test_full_after_five_steps() {
        let mut s = stack();
        for _ in 0..4 {
            s.push_valid(MockState("state"));
            assert!(!s.is_full());
        }
        assert_eq!(s.next_crop(), Some(Crop::Five));
        s.push_valid(MockState("state"));
        assert!(s.is_full());
        assert_eq!(s.next_crop(), None);
        assert_eq!(s.into_last_state(), Some(MockState("state")));
    }
}
