//! Hysteretic bang-bang follow controller
//!
//! Turns a noisy distance/angle fix into discrete motion commands. Two
//! layers keep the cart from oscillating:
//!
//! - **Turn hysteresis**: a turn starts only above `turn_on_angle` and ends
//!   only below `turn_off_angle`.
//! - **Command hold**: once a non-Stop command is issued, a different
//!   decision is ignored until `hold_ms` has elapsed.
//!
//! The safety stop (too close, or inside the enable distance) bypasses both
//! layers and always takes effect on the tick it is detected.

use crate::motion::{MotionCommand, MotionSink};
use crate::parameters::FollowParams;

/// Exponential moving average over distance and angle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterState {
    pub distance: f32,
    pub angle: f32,
    pub initialized: bool,
}

impl FilterState {
    /// Blend a raw reading in; the first reading seeds the filter
    fn update(&mut self, alpha: f32, distance: f32, angle: f32) {
        if !self.initialized {
            self.distance = distance;
            self.angle = angle;
            self.initialized = true;
        }
        self.distance += alpha * (distance - self.distance);
        self.angle += alpha * (angle - self.angle);
    }
}

#[derive(Debug, Clone)]
pub struct FollowController {
    params: FollowParams,
    filter: FilterState,
    last_command: MotionCommand,
    last_change_ms: u64,
}

impl FollowController {
    pub fn new(params: FollowParams) -> Self {
        Self {
            params,
            filter: FilterState::default(),
            last_command: MotionCommand::Stop,
            last_change_ms: 0,
        }
    }

    pub fn params(&self) -> &FollowParams {
        &self.params
    }

    pub fn filtered_distance(&self) -> f32 {
        self.filter.distance
    }

    pub fn filtered_angle(&self) -> f32 {
        self.filter.angle
    }

    pub fn filter(&self) -> FilterState {
        self.filter
    }

    pub fn last_command(&self) -> MotionCommand {
        self.last_command
    }

    pub fn last_change_ms(&self) -> u64 {
        self.last_change_ms
    }

    /// Currently executing a Left or Right turn
    pub fn is_turning(&self) -> bool {
        self.last_command.is_turn()
    }

    /// Forget filter history and command state, and stop
    pub fn reset<M: MotionSink + ?Sized>(&mut self, motion: &mut M, now_ms: u64) {
        self.filter = FilterState::default();
        self.set_last(MotionCommand::Stop, now_ms);
        motion.stop();
    }

    /// Run one control step and drive `motion` with the accepted command
    pub fn update<M: MotionSink + ?Sized>(
        &mut self,
        raw_distance: f32,
        raw_angle: f32,
        now_ms: u64,
        motion: &mut M,
    ) -> MotionCommand {
        if raw_distance <= 0.0 {
            return self.force_stop(motion, now_ms);
        }

        self.filter.update(self.params.alpha, raw_distance, raw_angle);
        let distance = self.filter.distance;
        let angle = self.filter.angle;

        if distance <= self.params.enable_distance || distance < self.params.min_distance {
            return self.force_stop(motion, now_ms);
        }

        let turning = if self.is_turning() {
            angle.abs() > self.params.turn_off_angle
        } else {
            angle.abs() > self.params.turn_on_angle
        };

        let decided = if turning {
            if angle >= 0.0 {
                MotionCommand::Right
            } else {
                MotionCommand::Left
            }
        } else if distance > self.params.target_distance + self.params.deadzone {
            MotionCommand::Forward
        } else {
            MotionCommand::Stop
        };

        let held = decided != self.last_command
            && self.last_command != MotionCommand::Stop
            && now_ms.saturating_sub(self.last_change_ms) < self.params.hold_ms;
        let command = if held { self.last_command } else { decided };

        motion.apply(command);
        self.set_last(command, now_ms);
        command
    }

    fn force_stop<M: MotionSink + ?Sized>(&mut self, motion: &mut M, now_ms: u64) -> MotionCommand {
        motion.stop();
        self.set_last(MotionCommand::Stop, now_ms);
        MotionCommand::Stop
    }

    fn set_last(&mut self, command: MotionCommand, now_ms: u64) {
        if command != self.last_command {
            self.last_command = command;
            self.last_change_ms = now_ms;
        }
    }
}

impl Default for FollowController {
    fn default() -> Self {
        Self::new(FollowParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::RecordingMotion;

    fn unfiltered() -> FollowController {
        FollowController::new(FollowParams {
            alpha: 1.0,
            ..FollowParams::default()
        })
    }

    #[test]
    fn test_invalid_distance_stops_without_touching_filter() {
        let mut follow = unfiltered();
        let mut motion = RecordingMotion::new();
        follow.update(300.0, 0.0, 0, &mut motion);
        assert_eq!(follow.last_command(), MotionCommand::Forward);

        let cmd = follow.update(0.0, 10.0, 1000, &mut motion);
        assert_eq!(cmd, MotionCommand::Stop);
        assert_eq!(motion.last(), Some(MotionCommand::Stop));
        assert!((follow.filtered_distance() - 300.0).abs() < 0.001);
        assert_eq!(follow.last_change_ms(), 1000);
    }

    #[test]
    fn test_filter_seeded_from_first_reading() {
        let mut follow = FollowController::default();
        let mut motion = RecordingMotion::new();
        follow.update(250.0, 12.0, 0, &mut motion);
        assert!((follow.filtered_distance() - 250.0).abs() < 0.001);
        assert!((follow.filtered_angle() - 12.0).abs() < 0.001);

        follow.update(350.0, 12.0, 10, &mut motion);
        // 250 + 0.1 * (350 - 250)
        assert!((follow.filtered_distance() - 260.0).abs() < 0.001);
    }

    #[test]
    fn test_within_enable_distance_always_stops() {
        let mut follow = unfiltered();
        let mut motion = RecordingMotion::new();
        for (i, angle) in [0.0, 50.0, -80.0, 20.0].iter().enumerate() {
            let cmd = follow.update(90.0, *angle, i as u64 * 1000, &mut motion);
            assert_eq!(cmd, MotionCommand::Stop);
        }
    }

    #[test]
    fn test_deadzone() {
        let mut follow = FollowController::new(FollowParams {
            alpha: 1.0,
            enable_distance: 50.0,
            ..FollowParams::default()
        });
        let mut motion = RecordingMotion::new();
        // target 80 + deadzone 15
        assert_eq!(follow.update(95.0, 0.0, 0, &mut motion), MotionCommand::Stop);
        assert_eq!(follow.update(96.0, 0.0, 10, &mut motion), MotionCommand::Forward);
    }

    #[test]
    fn test_turn_direction() {
        let mut follow = unfiltered();
        let mut motion = RecordingMotion::new();
        assert_eq!(follow.update(300.0, 40.0, 0, &mut motion), MotionCommand::Right);
        let mut follow = unfiltered();
        assert_eq!(follow.update(300.0, -40.0, 0, &mut motion), MotionCommand::Left);
    }

    #[test]
    fn test_exactly_one_primitive_per_update() {
        let mut follow = unfiltered();
        let mut motion = RecordingMotion::new();
        follow.update(300.0, 0.0, 0, &mut motion);
        follow.update(300.0, 0.0, 10, &mut motion);
        assert_eq!(motion.total_calls(), 2);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut follow = unfiltered();
        let mut motion = RecordingMotion::new();
        follow.update(300.0, 40.0, 0, &mut motion);
        assert!(follow.is_turning());

        follow.reset(&mut motion, 50);
        assert!(!follow.filter().initialized);
        assert_eq!(follow.last_command(), MotionCommand::Stop);
        assert_eq!(motion.last(), Some(MotionCommand::Stop));
    }
}
