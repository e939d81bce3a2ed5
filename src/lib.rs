//! # Signal HSM
//!
//! A minimal hierarchical state machine (HSM) engine with signal bubbling,
//! statechart transition semantics, and optional deep history, built on
//! plain function pointers instead of a registered state tree.
//!
//! Each state is one `fn`. A state reports its parent by return value, so
//! the engine never owns the hierarchy; it walks it by asking. That keeps
//! machines cheap enough for resource-constrained and real-time software
//! while preserving nested states, shared entry/exit behavior, and history
//! pseudostates.
//!
//! ## Features
//!
//! - 🌳 **Hierarchical States**: handlers name their parent, the engine walks the implicit tree
//! - 📨 **Signal Bubbling**: signals a substate declines climb to its ancestors
//! - 🔀 **Statechart Transitions**: exit and entry actions sequenced through the least common ancestor
//! - ⏪ **Deep History**: resume the last active substate (`deep-history` feature)
//! - 🧰 **No Allocation**: fixed-capacity storage only, friendly to embedded targets
//! - 🛡️ **Type Safety**: Leverages Rust's type system for compile-time guarantees
//!
//! ## Quick Start
//!
//! ```rust
//! use signal_hsm::prelude::*;
//!
//! const SIG_TOGGLE: Signal = Signal::user(0);
//!
//! #[derive(Default)]
//! struct Lamp {
//!     lit: bool,
//! }
//!
//! type Machine = StateMachine<Lamp, ()>;
//! type Outcome = SignalResult<Lamp, ()>;
//!
//! fn top(hsm: &mut Machine, signal: Signal, _param: Option<&()>) -> Outcome {
//!     match signal {
//!         SIG_INIT => {
//!             hsm.init_transition_state(off)?;
//!             Ok(Response::Handled)
//!         }
//!         _ => Ok(Response::Handled),
//!     }
//! }
//!
//! fn off(hsm: &mut Machine, signal: Signal, _param: Option<&()>) -> Outcome {
//!     match signal {
//!         SIG_ENTRY => {
//!             hsm.context_mut().lit = false;
//!             Ok(Response::Handled)
//!         }
//!         SIG_TOGGLE => {
//!             hsm.transition_state(on)?;
//!             Ok(Response::Handled)
//!         }
//!         _ => Ok(Response::Parent(top)),
//!     }
//! }
//!
//! fn on(hsm: &mut Machine, signal: Signal, _param: Option<&()>) -> Outcome {
//!     match signal {
//!         SIG_ENTRY => {
//!             hsm.context_mut().lit = true;
//!             Ok(Response::Handled)
//!         }
//!         SIG_TOGGLE => {
//!             hsm.transition_state(off)?;
//!             Ok(Response::Handled)
//!         }
//!         _ => Ok(Response::Parent(top)),
//!     }
//! }
//!
//! # fn main() -> Result<(), HsmError> {
//! let mut lamp = Machine::new(top, Lamp::default());
//! lamp.init()?;
//! assert!(!lamp.context().lit);
//!
//! lamp.signal_current_state(SIG_TOGGLE, None)?;
//! assert!(lamp.context().lit);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

mod error;
mod hsm;
mod signal;

#[cfg(feature = "deep-history")]
mod history;

pub use error::{HsmError, HsmResult};
pub use hsm::{
    same_state, Response, SignalResult, StateFn, StateMachine, DEFAULT_HISTORY_CAPACITY,
    MAX_NESTING,
};
pub use signal::{Signal, SIG_ENTRY, SIG_EXIT, SIG_INIT, SIG_NULL, SIG_USER};

#[cfg(feature = "deep-history")]
#[cfg_attr(docsrs, doc(cfg(feature = "deep-history")))]
pub use signal::SIG_DEEPHIST;

pub mod prelude {
    //! Prelude module for convenient imports
    pub use crate::{
        same_state, HsmError, HsmResult, Response, Signal, SignalResult, StateFn, StateMachine,
        SIG_ENTRY, SIG_EXIT, SIG_INIT, SIG_NULL, SIG_USER,
    };

    #[cfg(feature = "deep-history")]
    pub use crate::SIG_DEEPHIST;
}
