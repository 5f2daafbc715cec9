use enum_iterator::IntoEnumIterator;
use serde::Serialize;

use std::marker::Copy;
use std::sync::Arc;
use std::sync::atomic::{ AtomicU8, Ordering, };


#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, IntoEnumIterator)]
pub enum TileState {
    Initial = 0,
    Ready,
    Obsolete,
}

const FLAG_INITIAL: u8 = TileState::Initial as u8;
const FLAG_READY: u8 = TileState::Ready as u8;

fn state_of_flag(value: u8) -> TileState {
    match value {
        FLAG_INITIAL => TileState::Initial,
        FLAG_READY => TileState::Ready,
        _ => TileState::Obsolete,
    }
}

/// Lifecycle state shared between the owning tile and its cancellation
/// handles. Acquire loads pair with the release stores of the transitions,
/// so a `Ready` observation also publishes the decoded vertices.
#[derive(Clone)]
pub struct LifecycleFlag {
    state: Arc<AtomicU8>,
}

impl LifecycleFlag {
    pub fn new() -> LifecycleFlag {
        LifecycleFlag {
            state: Arc::new(AtomicU8::new(FLAG_INITIAL)),
        }
    }

    pub fn state(&self) -> TileState {
        state_of_flag(self.state.load(Ordering::Acquire))
    }

    /// Transitions `Initial` to `Ready`. Returns false when the flag was
    /// already obsolete, in which case the state is left untouched.
    pub fn mark_ready(&self) -> bool {
        self.state.compare_exchange(
            FLAG_INITIAL,
            FLAG_READY,
            Ordering::AcqRel,
            Ordering::Acquire,
        ).is_ok()
    }

    /// Transitions to `Obsolete` regardless of the current state and
    /// returns the state that was replaced.
    pub fn mark_obsolete(&self) -> TileState {
        state_of_flag(self.state.swap(TileState::Obsolete as u8, Ordering::AcqRel))
    }

    pub fn cancellation(&self) -> TileCancellation {
        TileCancellation {
            flag: self.clone(),
        }
    }
}

/// Cloneable handle for requesting and observing cancellation from
/// another thread.
#[derive(Clone)]
pub struct TileCancellation {
    flag: LifecycleFlag,
}

impl TileCancellation {
    pub fn is_cancelled(&self) -> bool {
        self.flag.state() == TileState::Obsolete
    }

    /// Cancelling an already obsolete tile is a programming error.
    pub fn cancel(&self) -> () {
        let previous = self.flag.mark_obsolete();
        assert!(previous != TileState::Obsolete, "Tile was already obsolete when cancelled");
    }
}
