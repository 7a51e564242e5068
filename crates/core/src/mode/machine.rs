//! Mode state machine
//!
//! Every transition stops the motors and silences alerts before the new
//! mode is committed, so two modes never issue conflicting commands inside
//! the same tick. Teaching and Returning activity is cancelled synchronously
//! when their mode is left.

use super::collaborators::Collaborators;
use super::Mode;
use crate::follow::FollowController;
use crate::input::{Command, Gesture};
use crate::motion::MotionCommand;
use crate::parameters::{ControlConfig, DriveParams, SafetyParams};
use crate::path::{ReturnError, TaughtPath};
use crate::position::PositionFix;

/// Result of a mode change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: Mode,
    /// Mode that was asked for
    pub requested: Mode,
    /// Mode actually committed
    pub to: Mode,
    /// Why `to` differs from `requested`
    pub fallback: Option<ReturnError>,
}

/// Snapshot for displays and status reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlStatus {
    pub mode: Mode,
    pub step_count: usize,
    pub recording: bool,
    pub remaining_steps: usize,
}

#[derive(Debug, Clone)]
pub struct ModeStateMachine {
    mode: Mode,
    follow: FollowController,
    path: TaughtPath,
    safety: SafetyParams,
    drive: DriveParams,
    posture_alert: bool,
    last_overload_warn_ms: Option<u64>,
}

impl ModeStateMachine {
    pub fn new(config: &ControlConfig) -> Self {
        Self {
            mode: Mode::Standby,
            follow: FollowController::new(config.follow.clone()),
            path: TaughtPath::new(&config.path),
            safety: config.safety.clone(),
            drive: config.drive.clone(),
            posture_alert: false,
            last_overload_warn_ms: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn follow(&self) -> &FollowController {
        &self.follow
    }

    pub fn path(&self) -> &TaughtPath {
        &self.path
    }

    pub fn status(&self) -> ControlStatus {
        ControlStatus {
            mode: self.mode,
            step_count: self.path.step_count(),
            recording: self.path.is_recording(),
            remaining_steps: self.path.remaining_steps(),
        }
    }

    /// Switch to `next`, running exit and entry actions
    pub fn set_mode(&mut self, next: Mode, now_ms: u64, io: &mut Collaborators<'_>) -> ModeTransition {
        let from = self.mode;

        io.motion.stop();
        io.alert.stop_alert();
        self.posture_alert = false;

        if from == Mode::Teaching && self.path.is_recording() {
            self.path.stop_recording(now_ms);
        }
        if from == Mode::Returning && self.path.is_returning() {
            self.path.cancel_returning(io.motion);
        }

        self.mode = next;
        io.motion.set_profile(self.drive.profile(next));
        let mut fallback = None;

        match next {
            Mode::Teaching => self.path.start_recording(now_ms, io.motion),
            Mode::Returning => {
                if let Err(err) = self.path.start_returning(now_ms, io.motion) {
                    self.mode = Mode::Standby;
                    io.motion.set_profile(self.drive.profile(Mode::Standby));
                    fallback = Some(err);
                }
            }
            Mode::Following => self.follow.reset(io.motion, now_ms),
            _ => {}
        }

        io.display.show_mode(self.mode);

        ModeTransition {
            from,
            requested: next,
            to: self.mode,
            fallback,
        }
    }

    /// Advance to the next mode in the cycle
    pub fn cycle_mode(&mut self, now_ms: u64, io: &mut Collaborators<'_>) -> ModeTransition {
        self.set_mode(self.mode.next(), now_ms, io)
    }

    /// Single click cycles, double click returns, long press toggles lights
    pub fn handle_gesture(
        &mut self,
        gesture: Gesture,
        now_ms: u64,
        io: &mut Collaborators<'_>,
    ) -> Option<ModeTransition> {
        match gesture {
            Gesture::SingleClick => Some(self.cycle_mode(now_ms, io)),
            Gesture::DoubleClick => Some(self.set_mode(Mode::Returning, now_ms, io)),
            Gesture::LongPress => {
                io.lights.toggle();
                None
            }
        }
    }

    /// Execute a text command. `Help` is left to the caller, which owns the
    /// channel the reply goes to.
    pub fn handle_command(
        &mut self,
        command: Command,
        now_ms: u64,
        io: &mut Collaborators<'_>,
    ) -> Option<ModeTransition> {
        match command {
            Command::Move(action) => {
                io.motion.apply(action);
                if self.mode == Mode::Teaching && self.path.is_recording() {
                    self.path.record_step(action, now_ms);
                }
                None
            }
            Command::CycleMode => Some(self.cycle_mode(now_ms, io)),
            Command::Tare => {
                io.load.tare();
                None
            }
            Command::Calibrate => {
                io.posture.calibrate();
                None
            }
            Command::Help => None,
            Command::Teach => Some(self.set_mode(Mode::Teaching, now_ms, io)),
            Command::Return => Some(self.set_mode(Mode::Returning, now_ms, io)),
        }
    }

    /// Run the current mode for one iteration.
    ///
    /// `fix` must be the fix estimated earlier in this same iteration.
    /// Returns a transition when Returning completes.
    pub fn tick(
        &mut self,
        now_ms: u64,
        fix: &PositionFix,
        connected: bool,
        io: &mut Collaborators<'_>,
    ) -> Option<ModeTransition> {
        match self.mode {
            Mode::Standby => {
                self.check_overload(now_ms, io);
                None
            }
            Mode::Carrying => {
                let warning = io.posture.check_posture();
                if !warning.is_ok() && !self.posture_alert {
                    io.alert.start_alert();
                    self.posture_alert = true;
                } else if warning.is_ok() && self.posture_alert {
                    io.alert.stop_alert();
                    self.posture_alert = false;
                }
                None
            }
            Mode::Following => {
                if connected {
                    self.follow.update(fix.distance, fix.angle, now_ms, io.motion);
                } else {
                    io.motion.stop();
                }
                None
            }
            Mode::Pulling => {
                io.motion.stop();
                None
            }
            Mode::Returning => {
                if self.path.update_returning(now_ms, io.motion) {
                    None
                } else {
                    Some(self.set_mode(Mode::Standby, now_ms, io))
                }
            }
            Mode::Teaching => None,
        }
    }

    /// Last command the follow controller issued
    pub fn follow_command(&self) -> MotionCommand {
        self.follow.last_command()
    }

    fn check_overload(&mut self, now_ms: u64, io: &mut Collaborators<'_>) {
        if io.load.weight_grams() <= self.safety.warn_grams || io.alert.is_busy() {
            return;
        }
        let cooled = self
            .last_overload_warn_ms
            .map_or(true, |last| now_ms.saturating_sub(last) > self.safety.cooldown_ms);
        if cooled {
            io.alert.beep_pattern(self.safety.warn_beeps);
            self.last_overload_warn_ms = Some(now_ms);
        }
    }
}

impl Default for ModeStateMachine {
    fn default() -> Self {
        Self::new(&ControlConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::mock::{MockAlert, MockDisplay, MockLights, MockLoad, MockPosture};
    use crate::mode::PostureWarning;
    use crate::motion::RecordingMotion;

    #[derive(Default)]
    struct Rig {
        motion: RecordingMotion,
        alert: MockAlert,
        posture: MockPosture,
        load: MockLoad,
        display: MockDisplay,
        lights: MockLights,
    }

    impl Rig {
        fn io(&mut self) -> Collaborators<'_> {
            Collaborators {
                motion: &mut self.motion,
                alert: &mut self.alert,
                posture: &mut self.posture,
                load: &mut self.load,
                display: &mut self.display,
                lights: &mut self.lights,
            }
        }
    }

    fn fix(distance: f32, angle: f32) -> PositionFix {
        PositionFix {
            distance,
            angle,
            valid: true,
            timestamp_ms: 0,
        }
    }

    #[test]
    fn test_transition_stops_and_silences_first() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        rig.alert.alerting = true;

        let t = machine.set_mode(Mode::Pulling, 0, &mut rig.io());
        assert_eq!(t.to, Mode::Pulling);
        assert_eq!(rig.motion.last(), Some(MotionCommand::Stop));
        assert!(!rig.alert.alerting);
        assert_eq!(rig.display.shown, Some(Mode::Pulling));
    }

    #[test]
    fn test_returning_with_empty_path_falls_back() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        let t = machine.set_mode(Mode::Returning, 0, &mut rig.io());
        assert_eq!(t.requested, Mode::Returning);
        assert_eq!(t.to, Mode::Standby);
        assert_eq!(t.fallback, Some(ReturnError::EmptyPath));
        assert_eq!(machine.mode(), Mode::Standby);
        assert_eq!(rig.display.shown, Some(Mode::Standby));
        assert_eq!(rig.motion.profile(), Some(DriveParams::default().manual));
    }

    #[test]
    fn test_each_mode_selects_its_speed_profile() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        let drive = DriveParams::default();

        machine.set_mode(Mode::Following, 0, &mut rig.io());
        assert_eq!(rig.motion.profile(), Some(drive.follow));

        machine.set_mode(Mode::Teaching, 10, &mut rig.io());
        assert_eq!(rig.motion.profile(), Some(drive.path));

        machine.set_mode(Mode::Standby, 20, &mut rig.io());
        assert_eq!(rig.motion.profile(), Some(drive.manual));
        assert_ne!(drive.follow, drive.manual);
        assert_ne!(drive.path, drive.manual);
    }

    #[test]
    fn test_cycle_skips_returning_without_path() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        let modes: [Mode; 4] = core::array::from_fn(|i| {
            machine.cycle_mode(i as u64 * 10, &mut rig.io()).to
        });
        assert_eq!(
            modes,
            [Mode::Carrying, Mode::Following, Mode::Pulling, Mode::Standby]
        );
    }

    #[test]
    fn test_following_requires_connectivity() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        machine.set_mode(Mode::Following, 0, &mut rig.io());

        machine.tick(10, &fix(300.0, 0.0), true, &mut rig.io());
        assert_eq!(rig.motion.last(), Some(MotionCommand::Forward));

        machine.tick(20, &fix(300.0, 0.0), false, &mut rig.io());
        assert_eq!(rig.motion.last(), Some(MotionCommand::Stop));
    }

    #[test]
    fn test_carrying_alert_follows_posture() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        machine.set_mode(Mode::Carrying, 0, &mut rig.io());

        rig.posture.warning = PostureWarning::BentForward;
        machine.tick(10, &PositionFix::default(), false, &mut rig.io());
        assert!(rig.alert.alerting);

        rig.posture.warning = PostureWarning::Ok;
        machine.tick(20, &PositionFix::default(), false, &mut rig.io());
        assert!(!rig.alert.alerting);
    }

    #[test]
    fn test_standby_overload_beeps_with_cooldown() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        rig.load.grams = 1500.0;

        machine.tick(0, &PositionFix::default(), false, &mut rig.io());
        assert_eq!(rig.alert.patterns, 1);
        assert_eq!(rig.alert.last_pattern, Some(3));

        machine.tick(3000, &PositionFix::default(), false, &mut rig.io());
        assert_eq!(rig.alert.patterns, 1);
        machine.tick(3001, &PositionFix::default(), false, &mut rig.io());
        assert_eq!(rig.alert.patterns, 2);

        rig.load.grams = 500.0;
        machine.tick(9000, &PositionFix::default(), false, &mut rig.io());
        assert_eq!(rig.alert.patterns, 2);
    }

    #[test]
    fn test_overload_waits_for_busy_alert() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        rig.load.grams = 1500.0;
        rig.alert.busy = true;
        machine.tick(0, &PositionFix::default(), false, &mut rig.io());
        assert_eq!(rig.alert.patterns, 0);
    }

    #[test]
    fn test_movement_commands_recorded_only_while_teaching() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();

        machine.handle_command(Command::Move(MotionCommand::Forward), 0, &mut rig.io());
        assert_eq!(rig.motion.last(), Some(MotionCommand::Forward));
        assert_eq!(machine.status().step_count, 0);

        machine.handle_command(Command::Teach, 1000, &mut rig.io());
        machine.handle_command(Command::Move(MotionCommand::Forward), 1000, &mut rig.io());
        machine.handle_command(Command::Move(MotionCommand::Stop), 1500, &mut rig.io());
        let status = machine.status();
        assert_eq!(status.mode, Mode::Teaching);
        assert!(status.recording);
        assert_eq!(status.step_count, 1);
    }

    #[test]
    fn test_leaving_teaching_flushes_recording() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        machine.handle_command(Command::Teach, 0, &mut rig.io());
        machine.handle_command(Command::Move(MotionCommand::Forward), 0, &mut rig.io());
        machine.set_mode(Mode::Standby, 800, &mut rig.io());
        assert!(!machine.path().is_recording());
        assert_eq!(machine.status().step_count, 1);
    }

    #[test]
    fn test_returning_completes_to_standby() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        machine.handle_command(Command::Teach, 0, &mut rig.io());
        machine.handle_command(Command::Move(MotionCommand::Forward), 0, &mut rig.io());
        machine.handle_command(Command::Move(MotionCommand::Stop), 500, &mut rig.io());

        let t = machine.handle_gesture(Gesture::DoubleClick, 1000, &mut rig.io()).unwrap();
        assert_eq!(t.to, Mode::Returning);
        assert_eq!(machine.status().remaining_steps, 1);
        assert_eq!(rig.motion.last(), Some(MotionCommand::Backward));

        assert_eq!(machine.tick(1499, &PositionFix::default(), false, &mut rig.io()), None);
        let done = machine.tick(1500, &PositionFix::default(), false, &mut rig.io()).unwrap();
        assert_eq!(done.from, Mode::Returning);
        assert_eq!(done.to, Mode::Standby);
        assert_eq!(rig.motion.last(), Some(MotionCommand::Stop));
    }

    #[test]
    fn test_leaving_returning_cancels_replay() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        machine.handle_command(Command::Teach, 0, &mut rig.io());
        machine.handle_command(Command::Move(MotionCommand::Left), 0, &mut rig.io());
        machine.handle_command(Command::Return, 700, &mut rig.io());
        assert!(machine.path().is_returning());

        machine.handle_gesture(Gesture::SingleClick, 800, &mut rig.io());
        assert_eq!(machine.mode(), Mode::Teaching);
        assert!(!machine.path().is_returning());
    }

    #[test]
    fn test_long_press_toggles_lights_only() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        assert_eq!(machine.handle_gesture(Gesture::LongPress, 0, &mut rig.io()), None);
        assert!(rig.lights.on);
        assert_eq!(machine.mode(), Mode::Standby);
        assert_eq!(rig.motion.total_calls(), 0);
    }

    #[test]
    fn test_tare_and_calibrate_reach_collaborators() {
        let mut rig = Rig::default();
        let mut machine = ModeStateMachine::default();
        machine.handle_command(Command::Tare, 0, &mut rig.io());
        machine.handle_command(Command::Calibrate, 0, &mut rig.io());
        assert_eq!(rig.load.tares, 1);
        assert_eq!(rig.posture.calibrations, 1);
        assert_eq!(machine.handle_command(Command::Help, 0, &mut rig.io()), None);
    }
}
