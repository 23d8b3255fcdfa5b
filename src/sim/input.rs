//! Logical input actions
//!
//! The host's input layer maps raw keys and touch zones onto three actions
//! and publishes them through an `InputHandle`. The simulation only ever sees
//! an `ActionSet` captured once at the start of a tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use bitflags::bitflags;

bitflags! {
    /// Set of logical actions held during a tick
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct ActionSet: u8 {
        const MOVE_LEFT  = 1 << 0;
        const MOVE_RIGHT = 1 << 1;
        const JUMP       = 1 << 2;
    }
}

/// A single logical action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Action {
    pub fn flag(self) -> ActionSet {
        match self {
            Action::MoveLeft => ActionSet::MOVE_LEFT,
            Action::MoveRight => ActionSet::MOVE_RIGHT,
            Action::Jump => ActionSet::JUMP,
        }
    }
}

impl ActionSet {
    /// Membership test for a single action
    #[inline]
    pub fn is_active(self, action: Action) -> bool {
        self.contains(action.flag())
    }
}

impl From<Action> for ActionSet {
    fn from(action: Action) -> Self {
        action.flag()
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ActionSet::empty(), |set, action| set | action.flag())
    }
}

/// Shared, lock-free input slot
///
/// Writers (event listeners) update individual bits; the engine reads the
/// whole set with a single atomic load so a tick never sees a half-applied
/// change. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct InputHandle {
    bits: Arc<AtomicU8>,
}

impl InputHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, action: Action) {
        self.bits.fetch_or(action.flag().bits(), Ordering::AcqRel);
    }

    pub fn release(&self, action: Action) {
        self.bits.fetch_and(!action.flag().bits(), Ordering::AcqRel);
    }

    pub fn set(&self, action: Action, pressed: bool) {
        if pressed {
            self.press(action);
        } else {
            self.release(action);
        }
    }

    /// Replace the whole set at once (e.g. touch zones re-evaluated)
    pub fn replace(&self, actions: ActionSet) {
        self.bits.store(actions.bits(), Ordering::Release);
    }

    pub fn clear(&self) {
        self.replace(ActionSet::empty());
    }

    /// Capture the current set
    pub fn snapshot(&self) -> ActionSet {
        ActionSet::from_bits_truncate(self.bits.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let input = InputHandle::new();
        input.press(Action::MoveRight);
        input.press(Action::Jump);

        let snap = input.snapshot();
        assert!(snap.is_active(Action::MoveRight));
        assert!(snap.is_active(Action::Jump));
        assert!(!snap.is_active(Action::MoveLeft));

        input.release(Action::Jump);
        assert_eq!(input.snapshot(), ActionSet::MOVE_RIGHT);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let input = InputHandle::new();
        input.press(Action::MoveLeft);
        let snap = input.snapshot();

        input.replace(ActionSet::JUMP);
        // Earlier capture is unaffected
        assert_eq!(snap, ActionSet::MOVE_LEFT);
        assert_eq!(input.snapshot(), ActionSet::JUMP);
    }

    #[test]
    fn test_clones_share_slot() {
        let input = InputHandle::new();
        let listener = input.clone();
        listener.set(Action::MoveRight, true);
        assert!(input.snapshot().is_active(Action::MoveRight));
        listener.clear();
        assert!(input.snapshot().is_empty());
    }

    #[test]
    fn test_writes_from_another_thread() {
        let input = InputHandle::new();
        let listener = input.clone();
        std::thread::spawn(move || listener.press(Action::Jump))
            .join()
            .unwrap();
        assert!(input.snapshot().is_active(Action::Jump));
    }

    #[test]
    fn test_collect_actions() {
        let set: ActionSet = [Action::MoveLeft, Action::Jump].into_iter().collect();
        assert_eq!(set, ActionSet::MOVE_LEFT | ActionSet::JUMP);
        assert_eq!(ActionSet::from(Action::MoveRight), ActionSet::MOVE_RIGHT);
    }
}
