#![cfg(feature = "deep-history")]

use signal_hsm::{
    same_state, HsmError, Response, Signal, SignalResult, StateMachine, SIG_DEEPHIST, SIG_ENTRY,
    SIG_EXIT, SIG_INIT,
};

// Washing machine with a deep history pseudostate on the wash program:
//
//   appliance ─┬─ washing ─┬─ rinsing
//              │           └─ spinning
//              └─ standby
//
// A power cut drops the machine to standby; restoring power resumes the
// interrupted cycle through the recorded history.

const SIG_POWER: Signal = Signal::user(0);
const SIG_CUT: Signal = Signal::user(1);
const SIG_ADVANCE: Signal = Signal::user(2);

#[derive(Debug, Default)]
struct WashContext {
    entries: Vec<&'static str>,
    exits: Vec<&'static str>,
}

type Machine = StateMachine<WashContext, ()>;
type Outcome = SignalResult<WashContext, ()>;

fn appliance(hsm: &mut Machine, signal: Signal, _param: Option<&()>) -> Outcome {
    match signal {
        SIG_INIT => {
            hsm.init_transition_state(standby)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Handled),
    }
}

fn standby(hsm: &mut Machine, signal: Signal, _param: Option<&()>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            hsm.context_mut().entries.push("standby");
            Ok(Response::Handled)
        }
        SIG_EXIT => {
            hsm.context_mut().exits.push("standby");
            Ok(Response::Handled)
        }
        SIG_POWER => {
            hsm.transition_state_ex(washing, true)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(appliance)),
    }
}

fn washing(hsm: &mut Machine, signal: Signal, _param: Option<&()>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            hsm.context_mut().entries.push("washing");
            Ok(Response::Handled)
        }
        SIG_EXIT => {
            hsm.context_mut().exits.push("washing");
            Ok(Response::Handled)
        }
        SIG_INIT => {
            hsm.init_transition_state(rinsing)?;
            Ok(Response::Handled)
        }
        SIG_DEEPHIST => Ok(Response::DeepHist),
        SIG_CUT => {
            hsm.transition_state(standby)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(appliance)),
    }
}

fn rinsing(hsm: &mut Machine, signal: Signal, _param: Option<&()>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            hsm.context_mut().entries.push("rinsing");
            Ok(Response::Handled)
        }
        SIG_EXIT => {
            hsm.context_mut().exits.push("rinsing");
            Ok(Response::Handled)
        }
        SIG_ADVANCE => {
            hsm.transition_state(spinning)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(washing)),
    }
}

fn spinning(hsm: &mut Machine, signal: Signal, _param: Option<&()>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            hsm.context_mut().entries.push("spinning");
            Ok(Response::Handled)
        }
        SIG_EXIT => {
            hsm.context_mut().exits.push("spinning");
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(washing)),
    }
}

fn create_machine() -> Machine {
    let mut hsm = Machine::new(appliance, WashContext::default());
    hsm.init().unwrap();
    hsm
}

fn clear(hsm: &mut Machine) {
    let ctx = hsm.context_mut();
    ctx.entries.clear();
    ctx.exits.clear();
}

#[test]
fn test_history_round_trip() {
    let mut hsm = create_machine();

    hsm.record_deephist(washing, spinning).unwrap();

    assert!(same_state(hsm.retrieve_deephist(washing).unwrap(), spinning));
    assert!(hsm.retrieve_deephist(appliance).is_none());
}

#[test]
fn test_new_machine_starts_with_empty_history() {
    let hsm = Machine::new(appliance, WashContext::default());

    assert!(hsm.retrieve_deephist(washing).is_none());
}

#[test]
fn test_power_on_without_history_enters_the_default_cycle() {
    let mut hsm = create_machine();

    hsm.signal_current_state(SIG_POWER, None).unwrap();

    assert!(same_state(hsm.current_state(), rinsing));
}

#[test]
fn test_power_cut_records_the_interrupted_cycle() {
    let mut hsm = create_machine();

    hsm.signal_current_state(SIG_POWER, None).unwrap();
    hsm.signal_current_state(SIG_ADVANCE, None).unwrap();
    assert!(same_state(hsm.current_state(), spinning));

    hsm.signal_current_state(SIG_CUT, None).unwrap();

    assert!(same_state(hsm.current_state(), standby));
    assert!(same_state(hsm.retrieve_deephist(washing).unwrap(), spinning));
}

#[test]
fn test_power_restore_resumes_the_recorded_cycle() {
    let mut hsm = create_machine();

    hsm.signal_current_state(SIG_POWER, None).unwrap();
    hsm.signal_current_state(SIG_ADVANCE, None).unwrap();
    hsm.signal_current_state(SIG_CUT, None).unwrap();
    clear(&mut hsm);

    hsm.signal_current_state(SIG_POWER, None).unwrap();

    // The machine lands on the recorded leaf, not the default cycle, and
    // the entry chain still runs outermost first.
    assert!(same_state(hsm.current_state(), spinning));
    assert_eq!(hsm.context().entries, vec!["washing", "spinning"]);
    assert_eq!(hsm.context().exits, vec!["standby"]);
}

#[test]
fn test_capture_overwrites_the_previous_record() {
    let mut hsm = create_machine();

    // Interrupt while rinsing, then while spinning.
    hsm.signal_current_state(SIG_POWER, None).unwrap();
    hsm.signal_current_state(SIG_CUT, None).unwrap();
    assert!(same_state(hsm.retrieve_deephist(washing).unwrap(), rinsing));

    hsm.signal_current_state(SIG_POWER, None).unwrap();
    hsm.signal_current_state(SIG_ADVANCE, None).unwrap();
    hsm.signal_current_state(SIG_CUT, None).unwrap();

    assert!(same_state(hsm.retrieve_deephist(washing).unwrap(), spinning));
}

#[test]
fn test_resume_flag_off_enters_the_default_cycle() {
    let mut hsm = create_machine();

    hsm.record_deephist(washing, spinning).unwrap();
    hsm.transition_state_ex(washing, false).unwrap();

    assert!(same_state(hsm.current_state(), rinsing));
}

#[test]
fn test_plain_transition_ignores_history() {
    let mut hsm = create_machine();

    hsm.record_deephist(washing, spinning).unwrap();
    hsm.transition_state(washing).unwrap();

    assert!(same_state(hsm.current_state(), rinsing));
}

// Capacity is a type parameter; this machine only has two history slots.

const SIG_GO: Signal = Signal::user(7);

type Tiny = StateMachine<WashContext, (), 2>;
type TinyOutcome = SignalResult<WashContext, (), 2>;

fn t_top(hsm: &mut Tiny, signal: Signal, _param: Option<&()>) -> TinyOutcome {
    match signal {
        SIG_INIT => {
            hsm.init_transition_state(t_a)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Handled),
    }
}

fn t_a(hsm: &mut Tiny, signal: Signal, _param: Option<&()>) -> TinyOutcome {
    match signal {
        SIG_DEEPHIST => Ok(Response::DeepHist),
        SIG_GO => {
            hsm.transition_state(t_b)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(t_top)),
    }
}

fn t_b(_hsm: &mut Tiny, signal: Signal, _param: Option<&()>) -> TinyOutcome {
    match signal {
        SIG_ENTRY => Ok(Response::Handled),
        _ => Ok(Response::Parent(t_top)),
    }
}

fn t_c(_hsm: &mut Tiny, signal: Signal, _param: Option<&()>) -> TinyOutcome {
    match signal {
        SIG_EXIT => Ok(Response::Handled),
        _ => Ok(Response::Parent(t_top)),
    }
}

#[test]
fn test_small_table_rejects_a_third_ancestor() {
    let mut hsm = Tiny::new(t_top, WashContext::default());
    hsm.init().unwrap();

    hsm.record_deephist(t_b, t_c).unwrap();
    hsm.record_deephist(t_c, t_b).unwrap();

    let err = hsm.record_deephist(t_top, t_a).unwrap_err();
    assert!(matches!(err, HsmError::HistoryFull));

    // Updates still work and nothing was disturbed.
    hsm.record_deephist(t_b, t_a).unwrap();
    assert!(same_state(hsm.retrieve_deephist(t_b).unwrap(), t_a));
    assert!(same_state(hsm.retrieve_deephist(t_c).unwrap(), t_b));
    assert!(hsm.retrieve_deephist(t_top).is_none());
}

#[test]
fn test_full_table_does_not_block_transitions() {
    let mut hsm = Tiny::new(t_top, WashContext::default());
    hsm.init().unwrap();

    hsm.record_deephist(t_b, t_c).unwrap();
    hsm.record_deephist(t_c, t_b).unwrap();

    // t_a claims deep history on exit but the table has no slot left; the
    // transition must still complete.
    hsm.signal_current_state(SIG_GO, None).unwrap();

    assert!(same_state(hsm.current_state(), t_b));
    assert!(hsm.retrieve_deephist(t_a).is_none());
    assert!(same_state(hsm.retrieve_deephist(t_b).unwrap(), t_c));
}
