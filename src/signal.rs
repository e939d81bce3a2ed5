//! The signal vocabulary shared by the engine and all state handlers

use std::fmt;

/// A signal tag delivered to state handlers.
///
/// Tags 0 through 4 belong to the engine; application signals start at
/// [`SIG_USER`]. The numeric values are part of the handler contract and
/// never change.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signal(pub i32);

/// Probes a state for its parent. Handlers must not perform side effects
/// when receiving this signal.
pub const SIG_NULL: Signal = Signal(0);

/// Asks a freshly entered composite state to descend into its default
/// substate via [`StateMachine::init_transition_state`].
///
/// [`StateMachine::init_transition_state`]: crate::StateMachine::init_transition_state
pub const SIG_INIT: Signal = Signal(1);

/// Entry notification; the state runs its entry actions.
pub const SIG_ENTRY: Signal = Signal(2);

/// Probes a state for a deep history pseudostate; claimants answer with
/// [`Response::DeepHist`].
///
/// [`Response::DeepHist`]: crate::Response::DeepHist
#[cfg(feature = "deep-history")]
#[cfg_attr(docsrs, doc(cfg(feature = "deep-history")))]
pub const SIG_DEEPHIST: Signal = Signal(3);

/// Exit notification; the state runs its exit actions.
pub const SIG_EXIT: Signal = Signal(4);

/// First tag available to application signals.
pub const SIG_USER: Signal = Signal(5);

impl Signal {
    /// Returns the application signal `offset` places above [`SIG_USER`].
    ///
    /// `Signal::user(0)` is the first application signal.
    pub const fn user(offset: i32) -> Self {
        Signal(SIG_USER.0 + offset)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "null"),
            1 => write!(f, "init"),
            2 => write!(f, "entry"),
            3 => write!(f, "deephist"),
            4 => write!(f, "exit"),
            n => write!(f, "user({})", n - SIG_USER.0),
        }
    }
}
