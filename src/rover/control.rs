//! Control loop
//!
//! One call to [`ControlLoop::run_once`] is one cooperative iteration:
//!
//! 1. Button: sample the pin and classify gestures
//! 2. Consoles: drain single-character commands from the primary console,
//!    then from the auxiliary one if attached
//! 3. Anchors: drain both UARTs and re-estimate the fix
//! 4. Mode: run the active mode against the fix from step 3
//!
//! Nothing in the iteration blocks. The loop never halts on an error; read
//! failures are logged and retried on the next iteration.

use crate::devices::{ButtonInput, UwbAnchorPair};
use crate::platform::traits::{GpioInterface, UartInterface};
use crate::platform::Result;
use uwb_follow_core::input::{Command, Gesture, HELP_LINES};
use uwb_follow_core::mode::{Collaborators, Mode, ModeStateMachine, ModeTransition};
use uwb_follow_core::parameters::ControlConfig;
use uwb_follow_core::traits::TimeSource;

/// Bytes pulled from the console per read call
const CONSOLE_CHUNK: usize = 32;

pub struct ControlLoop<T, U0, U1, C, G>
where
    T: TimeSource,
    U0: UartInterface,
    U1: UartInterface,
    C: UartInterface,
    G: GpioInterface,
{
    time: T,
    anchors: UwbAnchorPair<U0, U1>,
    console: C,
    aux_console: Option<C>,
    button: ButtonInput<G>,
    machine: ModeStateMachine,
    connected: bool,
}

impl<T, U0, U1, C, G> ControlLoop<T, U0, U1, C, G>
where
    T: TimeSource,
    U0: UartInterface,
    U1: UartInterface,
    C: UartInterface,
    G: GpioInterface,
{
    /// Build the loop from raw peripherals and the loaded configuration
    ///
    /// # Arguments
    ///
    /// * `time` - Monotonic clock
    /// * `left` / `right` - Anchor UARTs
    /// * `console` - Command channel; help text is written back here
    /// * `button_pin` - Mode button, active-low
    /// * `config` - Configuration loaded from the parameter store
    ///
    /// # Errors
    ///
    /// Returns the platform error if the button pin cannot be configured.
    pub fn new(
        time: T,
        left: U0,
        right: U1,
        console: C,
        button_pin: G,
        config: &ControlConfig,
    ) -> Result<Self> {
        let button = ButtonInput::new(button_pin, config.button.clone())?;
        let anchors = UwbAnchorPair::new(left, right, config.ranging.tracker_config());

        crate::log_info!("Control loop ready in {} mode", Mode::Standby.name());

        Ok(Self {
            time,
            anchors,
            console,
            aux_console: None,
            button,
            machine: ModeStateMachine::new(config),
            connected: false,
        })
    }

    /// Attach a second command channel, such as a Bluetooth serial link
    ///
    /// Commands from both consoles drive the same state machine. Help text
    /// goes back to the console that asked for it.
    pub fn with_aux_console(mut self, console: C) -> Self {
        self.aux_console = Some(console);
        self
    }

    /// Run one iteration
    ///
    /// Returns the last mode transition committed during the iteration.
    pub fn run_once(&mut self, io: &mut Collaborators<'_>) -> Option<ModeTransition> {
        let now_ms = self.time.now_ms();
        let mut last = None;

        if let Some(gesture) = self.button.poll(now_ms) {
            if gesture == Gesture::LongPress {
                crate::log_info!("Long press: toggling lights");
            }
            if let Some(t) = self.machine.handle_gesture(gesture, now_ms, io) {
                report_requested(&t, &self.machine);
                last = Some(t);
            }
        }

        if let Some(t) = drain_console(&mut self.console, &mut self.machine, now_ms, io) {
            last = Some(t);
        }
        if let Some(aux) = self.aux_console.as_mut() {
            if let Some(t) = drain_console(aux, &mut self.machine, now_ms, io) {
                last = Some(t);
            }
        }

        self.anchors.poll(now_ms);
        let connected = self.anchors.is_connected(now_ms);
        if connected != self.connected {
            if connected {
                crate::log_info!("UWB ranging connected");
            } else {
                crate::log_warn!("UWB ranging lost");
            }
            self.connected = connected;
        }

        let fix = self.anchors.tracker().fix();
        if let Some(t) = self.machine.tick(now_ms, &fix, connected, io) {
            if t.from == Mode::Returning && t.fallback.is_none() {
                crate::log_info!("Return complete");
            }
            report_transition(&t, &self.machine);
            last = Some(t);
        }

        last
    }

    pub fn machine(&self) -> &ModeStateMachine {
        &self.machine
    }

    pub fn anchors(&self) -> &UwbAnchorPair<U0, U1> {
        &self.anchors
    }

    pub fn anchors_mut(&mut self) -> &mut UwbAnchorPair<U0, U1> {
        &mut self.anchors
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn aux_console_mut(&mut self) -> Option<&mut C> {
        self.aux_console.as_mut()
    }

    pub fn button_mut(&mut self) -> &mut ButtonInput<G> {
        &mut self.button
    }
}

/// Read every buffered command from `console` and execute it in order
fn drain_console<C: UartInterface>(
    console: &mut C,
    machine: &mut ModeStateMachine,
    now_ms: u64,
    io: &mut Collaborators<'_>,
) -> Option<ModeTransition> {
    let mut buf = [0u8; CONSOLE_CHUNK];
    let mut last = None;

    while console.available() {
        let count = match console.read(&mut buf) {
            Ok(0) => break,
            Ok(count) => count,
            Err(e) => {
                crate::log_warn!("Console read failed: {}", e);
                break;
            }
        };

        for &byte in &buf[..count] {
            let Some(command) = Command::parse(byte) else {
                continue;
            };
            if let Some(t) = execute(command, console, machine, now_ms, io) {
                last = Some(t);
            }
        }
    }
    last
}

fn execute<C: UartInterface>(
    command: Command,
    console: &mut C,
    machine: &mut ModeStateMachine,
    now_ms: u64,
    io: &mut Collaborators<'_>,
) -> Option<ModeTransition> {
    match command {
        Command::Help => {
            for line in HELP_LINES {
                if let Err(e) = console.write_line(line) {
                    crate::log_warn!("Console write failed: {}", e);
                    break;
                }
            }
            return None;
        }
        Command::Tare => crate::log_info!("Taring load cell"),
        Command::Calibrate => crate::log_info!("Posture calibration started"),
        _ => crate::log_debug!("Command: {}", command.name()),
    }

    let transition = machine.handle_command(command, now_ms, io)?;
    report_requested(&transition, machine);
    Some(transition)
}

fn report_transition(t: &ModeTransition, machine: &ModeStateMachine) {
    match t.fallback {
        Some(err) => crate::log_warn!(
            "Mode {} refused ({}), {} -> {}",
            t.requested.name(),
            err.as_str(),
            t.from.name(),
            t.to.name()
        ),
        None => crate::log_info!("Mode transition: {} -> {}", t.from.name(), t.to.name()),
    }

    if t.from == Mode::Teaching && t.to != Mode::Teaching {
        crate::log_info!("Path recorded: {} steps", machine.path().step_count());
    }
    match t.to {
        Mode::Teaching => crate::log_info!("Path recording started"),
        Mode::Returning => {
            crate::log_info!("Returning along {} steps", machine.status().remaining_steps)
        }
        _ => {}
    }
}

/// Log a transition asked for by the operator
fn report_requested(t: &ModeTransition, machine: &ModeStateMachine) {
    if t.from == Mode::Returning {
        crate::log_info!("Return cancelled");
    }
    report_transition(t, machine);
}
