//! Washing machine example with deep history
//!
//! This example demonstrates a wash program that survives a power cut:
//! - Standby: plugged out or waiting for a program
//! - Running: a wash program is in progress
//!   - Filling: water is entering the drum
//!   - Agitating: the drum rocks back and forth
//!   - Spinning: high speed water extraction
//!
//! The running state answers the deep history query, so whenever it is
//! exited the engine remembers which cycle was active. Restoring power
//! transitions back through the recorded history and the program resumes
//! right where it left off instead of starting over.
//!
//! Requires the `deep-history` feature:
//!
//! ```text
//! cargo run --example washing_machine --features deep-history
//! ```

use signal_hsm::{
    HsmResult, Response, Signal, SignalResult, StateMachine, SIG_DEEPHIST, SIG_ENTRY, SIG_EXIT,
    SIG_INIT,
};

const SIG_POWER: Signal = Signal::user(0);
const SIG_UNPLUG: Signal = Signal::user(1);
const SIG_STEP: Signal = Signal::user(2);

#[derive(Debug, Default)]
struct WasherContext {
    water_level: u8,
    drum_rpm: u16,
}

type Washer = StateMachine<WasherContext, ()>;
type Outcome = SignalResult<WasherContext, ()>;

fn washer(hsm: &mut Washer, signal: Signal, _param: Option<&()>) -> Outcome {
    match signal {
        SIG_INIT => {
            hsm.init_transition_state(standby)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Handled),
    }
}

fn standby(hsm: &mut Washer, signal: Signal, _param: Option<&()>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            println!("😴 Standby");
            Ok(Response::Handled)
        }
        SIG_POWER => {
            hsm.transition_state_ex(running, true)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(washer)),
    }
}

fn running(hsm: &mut Washer, signal: Signal, _param: Option<&()>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            println!("▶️  Wash program engaged");
            Ok(Response::Handled)
        }
        SIG_EXIT => {
            println!("⏹️  Wash program suspended");
            Ok(Response::Handled)
        }
        SIG_INIT => {
            hsm.init_transition_state(filling)?;
            Ok(Response::Handled)
        }
        SIG_DEEPHIST => Ok(Response::DeepHist),
        SIG_UNPLUG => {
            println!("⚡ Power cut!");
            hsm.transition_state(standby)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(washer)),
    }
}

fn filling(hsm: &mut Washer, signal: Signal, _param: Option<&()>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            hsm.context_mut().water_level = 80;
            println!("🚰 Filling the drum");
            Ok(Response::Handled)
        }
        SIG_STEP => {
            hsm.transition_state(agitating)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(running)),
    }
}

fn agitating(hsm: &mut Washer, signal: Signal, _param: Option<&()>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            hsm.context_mut().drum_rpm = 60;
            println!("🌀 Agitating the load");
            Ok(Response::Handled)
        }
        SIG_EXIT => {
            hsm.context_mut().drum_rpm = 0;
            Ok(Response::Handled)
        }
        SIG_STEP => {
            hsm.transition_state(spinning)?;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(running)),
    }
}

fn spinning(hsm: &mut Washer, signal: Signal, _param: Option<&()>) -> Outcome {
    match signal {
        SIG_ENTRY => {
            hsm.context_mut().drum_rpm = 1200;
            hsm.context_mut().water_level = 0;
            println!("💨 Spinning at full speed");
            Ok(Response::Handled)
        }
        SIG_EXIT => {
            hsm.context_mut().drum_rpm = 0;
            Ok(Response::Handled)
        }
        _ => Ok(Response::Parent(running)),
    }
}

fn main() -> HsmResult<()> {
    env_logger::init();

    println!("🎯 Starting washing machine simulation...\n");
    let mut washer_machine = Washer::new(washer, WasherContext::default());
    washer_machine.init()?;
    println!();

    let script = vec![
        (SIG_POWER, "Plugging in and starting the wash"),
        (SIG_STEP, "First cycle finishes"),
        (SIG_UNPLUG, "Someone trips over the cord"),
        (SIG_POWER, "Plugging the machine back in"),
        (SIG_STEP, "Next cycle finishes"),
    ];

    for (signal, description) in script {
        println!("📋 {description}");
        washer_machine.signal_current_state(signal, None)?;

        let ctx = washer_machine.context();
        println!("💧 Water: {}% | Drum: {} rpm", ctx.water_level, ctx.drum_rpm);
        if washer_machine.retrieve_deephist(running).is_some() {
            println!("💾 Interrupted cycle on record");
        }
        println!();
    }

    if washer_machine.is_in_state(spinning)? {
        println!("✅ Resumed mid-program and carried on to the spin cycle");
    }

    Ok(())
}
