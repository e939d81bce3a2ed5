//! Toaster oven state machine example
//!
//! This example demonstrates a nested oven control panel:
//! - DoorClosed: the door is shut and the program buttons work
//!   - Off: no program is running
//!   - Heating: the heater element is energized
//!     - Toasting: fixed high heat for toast
//!     - Baking: configurable moderate heat
//! - DoorOpen: the lamp is on and the heater is cut
//!
//! The example shows:
//! - Nested states with entry/exit actions
//! - Signal bubbling from leaf states to their ancestors
//! - Default substates entered through init signals
//! - Passing a parameter (the bake setpoint) along with a signal
//!
//! Run with `RUST_LOG=trace` to watch every signal delivery.

use signal_hsm::{
    HsmResult, Response, Signal, SignalResult, StateMachine, SIG_ENTRY, SIG_EXIT, SIG_INIT,
};

const SIG_OPEN_DOOR: Signal = Signal::user(0);
const SIG_CLOSE_DOOR: Signal = Signal::user(1);
const SIG_TOAST: Signal = Signal::user(2);
const SIG_BAKE: Signal = Signal::user(3);
const SIG_OFF: Signal = Signal::user(4);

const TOAST_SETPOINT: u16 = 500;
const DEFAULT_BAKE_SETPOINT: u16 = 350;

#[derive(Debug)]
struct OvenContext {
    heater_on: bool,
    light_on: bool,
    setpoint: u16,
}

impl OvenContext {
    fn new() -> Self {
        Self {
            heater_on: false,
            light_on: false,
            setpoint: 0,
        }
    }
}

type Oven = StateMachine<OvenContext, u16>;
type Outcome = SignalResult<OvenContext, u16>;

fn oven(hsm: &mut Oven, signal: Signal, _param: Option<&u16>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            println!("🔌 Oven controller online");
            Ok(Response::Handled)
        }
        SIG_INIT => {
            hsm.init_transition_state(door_closed)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Handled),
    }
}

fn door_closed(hsm: &mut Oven, signal: Signal, param: Option<&u16>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            println!("🚪 Door closed");
            Ok(Response::Handled)
        }
        SIG_INIT => {
            hsm.init_transition_state(off)?;
            Ok(Response::Handled)
        }
        SIG_OPEN_DOOR => {
            hsm.transition_state(door_open)?;
            Ok(Response::Handled)
        }
        SIG_TOAST => {
            hsm.transition_state(toasting)?;
            Ok(Response::Handled)
        }
        SIG_BAKE => {
            hsm.context_mut().setpoint = param.copied().unwrap_or(DEFAULT_BAKE_SETPOINT);
            hsm.transition_state(baking)?;
            Ok(Response::Handled)
        }
        SIG_OFF => {
            hsm.transition_state(off)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(oven)),
    }
}

fn off(hsm: &mut Oven, signal: Signal, _param: Option<&u16>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            hsm.context_mut().setpoint = 0;
            println!("⏹️  All programs stopped");
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(door_closed)),
    }
}

fn heating(hsm: &mut Oven, signal: Signal, _param: Option<&u16>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            hsm.context_mut().heater_on = true;
            println!("🔥 Heater energized");
            Ok(Response::Handled)
        }
        SIG_EXIT => {
            hsm.context_mut().heater_on = false;
            println!("🧯 Heater cut");
            Ok(Response::Handled)
        }
        SIG_INIT => {
            hsm.init_transition_state(toasting)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(door_closed)),
    }
}

fn toasting(hsm: &mut Oven, signal: Signal, _param: Option<&u16>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            hsm.context_mut().setpoint = TOAST_SETPOINT;
            println!("🍞 Toasting at {TOAST_SETPOINT}°F");
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(heating)),
    }
}

fn baking(hsm: &mut Oven, signal: Signal, _param: Option<&u16>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            let setpoint = hsm.context().setpoint;
            println!("🎂 Baking at {setpoint}°F");
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(heating)),
    }
}

fn door_open(hsm: &mut Oven, signal: Signal, _param: Option<&u16>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            hsm.context_mut().light_on = true;
            println!("💡 Door open, lamp on");
            Ok(Response::Handled)
        }
        SIG_EXIT => {
            hsm.context_mut().light_on = false;
            println!("🌑 Lamp off");
            Ok(Response::Handled)
        }
        SIG_CLOSE_DOOR => {
            hsm.transition_state(door_closed)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(oven)),
    }
}

fn create_oven() -> HsmResult<Oven> {
    let mut hsm = Oven::new(oven, OvenContext::new());
    hsm.init()?;
    Ok(hsm)
}

fn main() -> HsmResult<()> {
    env_logger::init();

    println!("🎯 Starting oven simulation...\n");
    let mut oven_machine = create_oven()?;
    println!();

    let script: Vec<(Signal, Option<u16>, &str)> = vec![
        (SIG_TOAST, None, "Pressing the toast button"),
        (SIG_OPEN_DOOR, None, "Opening the door mid-toast"),
        (SIG_CLOSE_DOOR, None, "Closing the door again"),
        (SIG_BAKE, Some(425), "Dialing in a 425°F bake"),
        (SIG_BAKE, None, "Pressing bake without a setpoint"),
        (SIG_OFF, None, "Turning the oven off"),
        (SIG_OPEN_DOOR, None, "Opening the door to take the food out"),
    ];

    for (signal, param, description) in script {
        println!("📋 {description}");
        oven_machine.signal_current_state(signal, param.as_ref())?;

        let ctx = oven_machine.context();
        println!("🔥 Heater: {}", if ctx.heater_on { "on" } else { "off" });
        println!("💡 Lamp: {}", if ctx.light_on { "on" } else { "off" });
        println!("🌡️  Setpoint: {}°F", ctx.setpoint);
        println!();
    }

    if oven_machine.is_in_state(door_open)? {
        println!("✅ Simulation finished with the door open");
    }

    Ok(())
}
