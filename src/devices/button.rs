//! Mode button driver
//!
//! The button pulls its pin low while held. On hardware the falling edge
//! arrives from a GPIO interrupt that calls [`ButtonInput::on_falling_edge`];
//! [`ButtonInput::poll`] also samples the level each iteration and latches
//! any edge it sees, so a missed interrupt only costs one loop period.

use crate::platform::{traits::GpioInterface, Result};
use uwb_follow_core::input::{ButtonGestureClassifier, Gesture};
use uwb_follow_core::parameters::ButtonParams;

pub struct ButtonInput<G: GpioInterface> {
    pin: G,
    classifier: ButtonGestureClassifier,
    was_pressed: bool,
}

impl<G: GpioInterface> ButtonInput<G> {
    /// Enable the pin's pull-up and wrap it
    ///
    /// # Errors
    ///
    /// Returns the platform error if the pull-up cannot be enabled.
    pub fn new(mut pin: G, params: ButtonParams) -> Result<Self> {
        pin.enable_pull_up()?;
        Ok(Self {
            pin,
            classifier: ButtonGestureClassifier::new(params),
            was_pressed: false,
        })
    }

    /// Interrupt hook: a press edge was seen
    pub fn on_falling_edge(&mut self) {
        self.classifier.notify_press();
    }

    /// Button is held (active-low)
    pub fn is_pressed(&self) -> bool {
        !self.pin.read()
    }

    /// Sample the pin and advance the gesture classifier
    pub fn poll(&mut self, now_ms: u64) -> Option<Gesture> {
        let pressed = self.is_pressed();
        if pressed && !self.was_pressed {
            self.classifier.notify_press();
        }
        self.was_pressed = pressed;

        let gesture = self.classifier.tick(now_ms, pressed);
        if let Some(g) = gesture {
            crate::log_debug!("Button gesture: {}", g.name());
        }
        gesture
    }

    pub fn pin_mut(&mut self) -> &mut G {
        &mut self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockGpio;

    fn button() -> ButtonInput<MockGpio> {
        ButtonInput::new(MockGpio::new(), ButtonParams::default()).unwrap()
    }

    /// Hold the button from `at` for `held` ms, polling every 10 ms
    fn press(b: &mut ButtonInput<MockGpio>, at: u64, held: u64) -> Option<Gesture> {
        let mut fired = None;
        b.pin_mut().set_level(false);
        let mut t = at;
        while t < at + held {
            fired = fired.or(b.poll(t));
            t += 10;
        }
        b.pin_mut().set_level(true);
        fired.or(b.poll(at + held))
    }

    #[test]
    fn test_new_configures_pull_up() {
        let b = button();
        assert!(b.pin.pull_up_enabled());
        assert!(!b.is_pressed());
    }

    #[test]
    fn test_new_fails_without_pull_up() {
        let result = ButtonInput::new(MockGpio::without_pull_up(), ButtonParams::default());
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("GPIO error: PullUpUnavailable".to_string())
        );
    }

    #[test]
    fn test_single_click_after_window() {
        let mut b = button();
        b.pin_mut().set_level(true);
        assert_eq!(press(&mut b, 1000, 100), None);
        assert_eq!(b.poll(1400), None);
        assert_eq!(b.poll(1501), Some(Gesture::SingleClick));
        assert_eq!(b.poll(1600), None);
    }

    #[test]
    fn test_double_click() {
        let mut b = button();
        b.pin_mut().set_level(true);
        assert_eq!(press(&mut b, 1000, 80), None);
        assert_eq!(b.poll(1200), None);
        assert_eq!(press(&mut b, 1300, 80), Some(Gesture::DoubleClick));
        assert_eq!(b.poll(2000), None);
    }

    #[test]
    fn test_long_press_while_held() {
        let mut b = button();
        b.pin_mut().set_level(true);
        assert_eq!(press(&mut b, 1000, 1200), Some(Gesture::LongPress));
        assert_eq!(b.poll(3000), None);
    }

    #[test]
    fn test_interrupt_edge_with_low_level() {
        let mut b = button();
        b.pin_mut().set_level(false);
        b.on_falling_edge();
        assert_eq!(b.poll(500), None);
        assert!(b.is_pressed());
    }
}
