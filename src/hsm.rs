//! The state machine engine: signal delivery, transition sequencing, and
//! hierarchy walks over handler-reported parent links

use log::{debug, trace};

#[cfg(feature = "deep-history")]
use log::warn;

use crate::error::{HsmError, HsmResult};
#[cfg(feature = "deep-history")]
use crate::history::HistoryTable;
#[cfg(feature = "deep-history")]
use crate::signal::SIG_DEEPHIST;
use crate::signal::{Signal, SIG_ENTRY, SIG_EXIT, SIG_INIT, SIG_NULL};

/// Default capacity of the deep history table.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Upper bound on state nesting depth. Parent chains longer than this are
/// rejected with [`HsmError::HierarchyTooDeep`].
pub const MAX_NESTING: usize = 16;

/// A state handler function.
///
/// One `fn` item per state. Handlers receive the machine, the signal, and an
/// optional parameter, and answer with how the signal was received. The
/// engine compares handlers by address (see [`same_state`]), so a state's
/// identity is its function.
pub type StateFn<CTX, E, const MAX_HISTORY: usize = DEFAULT_HISTORY_CAPACITY> = fn(
    &mut StateMachine<CTX, E, MAX_HISTORY>,
    Signal,
    Option<&E>,
) -> SignalResult<CTX, E, MAX_HISTORY>;

/// Result of delivering one signal to one state handler.
pub type SignalResult<CTX, E, const MAX_HISTORY: usize = DEFAULT_HISTORY_CAPACITY> =
    std::result::Result<Response<CTX, E, MAX_HISTORY>, HsmError>;

/// Scratch space for one ancestor chain, leaf first.
type AncestorChain<CTX, E, const MAX_HISTORY: usize> =
    heapless::Vec<StateFn<CTX, E, MAX_HISTORY>, MAX_NESTING>;

/// Response type for state handlers, indicating how a signal was received.
#[derive(Debug)]
pub enum Response<CTX, E, const MAX_HISTORY: usize = DEFAULT_HISTORY_CAPACITY> {
    /// Signal was consumed, or the state is the hierarchy root
    Handled,
    /// Signal was declined; the named parent state should see it instead
    Parent(StateFn<CTX, E, MAX_HISTORY>),
    /// The state owns a deep history pseudostate (answer to [`SIG_DEEPHIST`])
    #[cfg(feature = "deep-history")]
    #[cfg_attr(docsrs, doc(cfg(feature = "deep-history")))]
    DeepHist,
}

/// Whether two handler references denote the same state.
///
/// Comparison is by function address. Each state must be its own `fn` item;
/// note that the compiler may fold two functions with identical bodies into
/// one address.
pub fn same_state<CTX, E, const MAX_HISTORY: usize>(
    a: StateFn<CTX, E, MAX_HISTORY>,
    b: StateFn<CTX, E, MAX_HISTORY>,
) -> bool {
    std::ptr::fn_addr_eq(a, b)
}

/// A hierarchical state machine driven by plain function pointers.
///
/// The machine never stores the state tree. Each state is a [`StateFn`] and
/// parent links are discovered by sending [`SIG_NULL`] probes, so the whole
/// hierarchy lives in the handlers' return values.
///
/// # Type Parameters
/// - `CTX`: Context type shared across states, owned by the machine.
/// - `E`: Parameter type handlers receive alongside each [`Signal`].
/// - `MAX_HISTORY`: Capacity of the deep history table (meaningful with the
///   `deep-history` feature). Defaults to [`DEFAULT_HISTORY_CAPACITY`].
///
/// # Usage
/// 1. Write one handler function per state, following the signal contract.
/// 2. Create the machine with [`StateMachine::new`], naming the top state.
/// 3. Call [`StateMachine::init`] to enter the initial state configuration.
/// 4. Feed it signals with [`StateMachine::signal_current_state`].
///
/// # Example
/// ```ignore
/// // See crate-level documentation for a full example.
/// ```
pub struct StateMachine<CTX, E, const MAX_HISTORY: usize = DEFAULT_HISTORY_CAPACITY> {
    current_state: StateFn<CTX, E, MAX_HISTORY>,
    top_state: StateFn<CTX, E, MAX_HISTORY>,
    context: CTX,

    #[cfg(feature = "deep-history")]
    deep_history: HistoryTable<CTX, E, MAX_HISTORY>,
}

impl<CTX, E, const MAX_HISTORY: usize> StateMachine<CTX, E, MAX_HISTORY> {
    /// Create a new machine with the given top state and context.
    ///
    /// The current state starts at `top_state` and the history table starts
    /// empty. No handler is invoked yet; call [`StateMachine::init`] to
    /// enter the initial state configuration.
    pub fn new(top_state: StateFn<CTX, E, MAX_HISTORY>, context: CTX) -> Self {
        Self {
            current_state: top_state,
            top_state,
            context,

            #[cfg(feature = "deep-history")]
            deep_history: HistoryTable::new(),
        }
    }

    /// Perform the very first transition, entering the top state and
    /// descending into its default substates.
    pub fn init(&mut self) -> HsmResult<()> {
        self.init_transition_state(self.top_state)
    }

    /// Deliver one signal to one state handler.
    fn signal_state(
        &mut self,
        state: StateFn<CTX, E, MAX_HISTORY>,
        signal: Signal,
        param: Option<&E>,
    ) -> SignalResult<CTX, E, MAX_HISTORY> {
        trace!("signal {} -> {:p}", signal, state);
        state(self, signal, param)
    }

    /// Ask a state for its parent. `None` for a hierarchy root.
    fn parent_of(
        &mut self,
        state: StateFn<CTX, E, MAX_HISTORY>,
    ) -> HsmResult<Option<StateFn<CTX, E, MAX_HISTORY>>> {
        match self.signal_state(state, SIG_NULL, None)? {
            Response::Parent(parent) => Ok(Some(parent)),
            _ => Ok(None),
        }
    }

    /// Collect `state` and its ancestors, leaf first.
    ///
    /// The chain must end at this machine's top state; a chain rooted
    /// elsewhere is rejected before any action runs.
    fn ancestor_path(
        &mut self,
        state: StateFn<CTX, E, MAX_HISTORY>,
    ) -> HsmResult<AncestorChain<CTX, E, MAX_HISTORY>> {
        let mut path = AncestorChain::new();
        let mut cursor = state;
        loop {
            if path.push(cursor).is_err() {
                return Err(HsmError::HierarchyTooDeep);
            }
            match self.parent_of(cursor)? {
                Some(parent) => cursor = parent,
                None => break,
            }
        }
        if !same_state(cursor, self.top_state) {
            return Err(HsmError::NotInHierarchy);
        }
        Ok(path)
    }

    /// Transition from the current state to `new_state`.
    ///
    /// Exit actions run from the current state up to (not including) the
    /// least common ancestor of both states, entry actions run from just
    /// below that ancestor down to `new_state`, and finally `new_state`
    /// receives [`SIG_INIT`] so a composite target can descend into its
    /// default substate. A transition targeting the current state exits and
    /// re-enters it.
    ///
    /// With the `deep-history` feature enabled, every state about to be
    /// exited is probed with `SIG_DEEPHIST` and, for each claimant, the
    /// state the transition started from is recorded as its deep history.
    pub fn transition_state(&mut self, new_state: StateFn<CTX, E, MAX_HISTORY>) -> HsmResult<()> {
        debug!("transition {:p} -> {:p}", self.current_state, new_state);
        let entry_path = self.ancestor_path(new_state)?;

        #[cfg(feature = "deep-history")]
        let source = self.current_state;

        // Exit phase. Climb from the current state until standing on a
        // state of the target's ancestor chain, exiting every state passed
        // on the way. The break index is where the entry phase starts.
        let pivot = if same_state(self.current_state, new_state) {
            #[cfg(feature = "deep-history")]
            self.capture_deephist(new_state, source)?;
            self.signal_state(new_state, SIG_EXIT, None)?;
            1
        } else {
            let mut climbed = 0;
            loop {
                let cursor = self.current_state;
                if let Some(idx) = entry_path.iter().position(|&s| same_state(s, cursor)) {
                    break idx;
                }
                #[cfg(feature = "deep-history")]
                self.capture_deephist(cursor, source)?;
                self.signal_state(cursor, SIG_EXIT, None)?;
                match self.parent_of(cursor)? {
                    Some(parent) => self.current_state = parent,
                    None => return Err(HsmError::NotInHierarchy),
                }
                climbed += 1;
                if climbed > MAX_NESTING {
                    return Err(HsmError::HierarchyTooDeep);
                }
            }
        };

        // Entry phase: enter the remaining chain outermost first, down to
        // and including the target.
        for &state in entry_path[..pivot].iter().rev() {
            self.current_state = state;
            self.signal_state(state, SIG_ENTRY, None)?;
        }

        // Descent phase: a composite target picks its default substate.
        self.signal_state(new_state, SIG_INIT, None)?;
        Ok(())
    }

    /// Like [`StateMachine::transition_state`], but with `to_deep_hist` set
    /// the transition resumes the deep history recorded under `new_state`
    /// instead of entering its default substate.
    ///
    /// Without a recorded descendant the call behaves exactly like
    /// [`StateMachine::transition_state`].
    #[cfg(feature = "deep-history")]
    #[cfg_attr(docsrs, doc(cfg(feature = "deep-history")))]
    pub fn transition_state_ex(
        &mut self,
        new_state: StateFn<CTX, E, MAX_HISTORY>,
        to_deep_hist: bool,
    ) -> HsmResult<()> {
        let target = if to_deep_hist {
            self.retrieve_deephist(new_state).unwrap_or(new_state)
        } else {
            new_state
        };
        self.transition_state(target)
    }

    /// Enter `new_state` directly and let it descend into its default
    /// substate chain. No exit actions run.
    ///
    /// This is the operation a composite state calls from its [`SIG_INIT`]
    /// handling to name the default substate; [`StateMachine::init`] uses it
    /// for the very first transition.
    pub fn init_transition_state(
        &mut self,
        new_state: StateFn<CTX, E, MAX_HISTORY>,
    ) -> HsmResult<()> {
        self.current_state = new_state;
        self.signal_state(new_state, SIG_ENTRY, None)?;
        self.signal_state(new_state, SIG_INIT, None)?;
        Ok(())
    }

    /// Send a signal to the current state, letting it bubble up the
    /// hierarchy until a handler consumes it.
    ///
    /// A signal nobody consumes reaches the hierarchy root, which has no
    /// parent to decline to, and is silently dropped. That is normal
    /// operation, not an error.
    pub fn signal_current_state(&mut self, signal: Signal, param: Option<&E>) -> HsmResult<()> {
        let mut state = self.current_state;
        let mut depth = 0;
        loop {
            match self.signal_state(state, signal, param)? {
                Response::Handled => return Ok(()),
                #[cfg(feature = "deep-history")]
                Response::DeepHist => return Ok(()),
                Response::Parent(parent) => {
                    depth += 1;
                    if depth > MAX_NESTING {
                        return Err(HsmError::HierarchyTooDeep);
                    }
                    state = parent;
                }
            }
        }
    }

    /// Whether the machine currently occupies `candidate`, either directly
    /// or through a descendant of it.
    ///
    /// Walks parent links from the current state; the probes involved are
    /// side-effect-free by contract, so the machine is logically unchanged.
    pub fn is_in_state(&mut self, candidate: StateFn<CTX, E, MAX_HISTORY>) -> HsmResult<bool> {
        let mut cursor = self.current_state;
        let mut depth = 0;
        loop {
            if same_state(cursor, candidate) {
                return Ok(true);
            }
            match self.parent_of(cursor)? {
                Some(parent) => cursor = parent,
                None => return Ok(false),
            }
            depth += 1;
            if depth > MAX_NESTING {
                return Err(HsmError::HierarchyTooDeep);
            }
        }
    }

    /// Record `descendant` as the deep history of `ancestor`.
    ///
    /// Handlers rarely call this themselves: the engine records
    /// automatically whenever a state claiming [`SIG_DEEPHIST`] is exited.
    #[cfg(feature = "deep-history")]
    #[cfg_attr(docsrs, doc(cfg(feature = "deep-history")))]
    pub fn record_deephist(
        &mut self,
        ancestor: StateFn<CTX, E, MAX_HISTORY>,
        descendant: StateFn<CTX, E, MAX_HISTORY>,
    ) -> HsmResult<()> {
        self.deep_history.record(ancestor, descendant)
    }

    /// The deep history recorded under `ancestor`, or `None` if nothing was
    /// recorded yet. `None` means the default substate applies.
    #[cfg(feature = "deep-history")]
    #[cfg_attr(docsrs, doc(cfg(feature = "deep-history")))]
    pub fn retrieve_deephist(
        &self,
        ancestor: StateFn<CTX, E, MAX_HISTORY>,
    ) -> Option<StateFn<CTX, E, MAX_HISTORY>> {
        self.deep_history.retrieve(ancestor)
    }

    /// Probe a state on the exit path for a deep history pseudostate and
    /// record the transition source under it. A full table drops the record
    /// but never aborts the transition.
    #[cfg(feature = "deep-history")]
    fn capture_deephist(
        &mut self,
        leaving: StateFn<CTX, E, MAX_HISTORY>,
        source: StateFn<CTX, E, MAX_HISTORY>,
    ) -> HsmResult<()> {
        let claimed = matches!(
            self.signal_state(leaving, SIG_DEEPHIST, None)?,
            Response::DeepHist
        );
        if claimed && self.record_deephist(leaving, source).is_err() {
            warn!("deep history table full, not recording {:p}", leaving);
        }
        Ok(())
    }

    /// The current (innermost active) state.
    pub fn current_state(&self) -> StateFn<CTX, E, MAX_HISTORY> {
        self.current_state
    }

    /// The top state this machine was created with.
    pub fn top_state(&self) -> StateFn<CTX, E, MAX_HISTORY> {
        self.top_state
    }

    /// Get a reference to the context
    pub fn context(&self) -> &CTX {
        &self.context
    }

    /// Get a mutable reference to the context
    pub fn context_mut(&mut self) -> &mut CTX {
        &mut self.context
    }
}
