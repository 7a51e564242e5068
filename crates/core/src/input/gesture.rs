//! Button gesture classifier
//!
//! Turns press edges and the pin level into exactly one of
//! [`Gesture::SingleClick`], [`Gesture::DoubleClick`] or
//! [`Gesture::LongPress`] per physical gesture.
//!
//! A single click is only reported once the double-click window expires
//! without a second press, so a double click never also produces a single
//! click. Reaching the long-press threshold while held fires once and
//! suppresses click handling for that press.

use crate::parameters::ButtonParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    SingleClick,
    DoubleClick,
    LongPress,
}

impl Gesture {
    pub fn name(self) -> &'static str {
        match self {
            Gesture::SingleClick => "single click",
            Gesture::DoubleClick => "double click",
            Gesture::LongPress => "long press",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ButtonGestureClassifier {
    params: ButtonParams,
    edge_latched: bool,
    last_accepted_ms: Option<u64>,
    down_since_ms: Option<u64>,
    long_fired: bool,
    pending_click_ms: Option<u64>,
}

impl ButtonGestureClassifier {
    pub fn new(params: ButtonParams) -> Self {
        Self {
            params,
            edge_latched: false,
            last_accepted_ms: None,
            down_since_ms: None,
            long_fired: false,
            pending_click_ms: None,
        }
    }

    pub fn params(&self) -> &ButtonParams {
        &self.params
    }

    /// Latch a press edge; consumed by the next `tick`
    pub fn notify_press(&mut self) {
        self.edge_latched = true;
    }

    /// A press is being tracked
    pub fn is_down(&self) -> bool {
        self.down_since_ms.is_some()
    }

    /// A single click is waiting for its double-click window to expire
    pub fn has_pending_click(&self) -> bool {
        self.pending_click_ms.is_some()
    }

    /// Advance the classifier; `pressed` is the current pin level (true while held).
    ///
    /// Returns at most one gesture per call.
    pub fn tick(&mut self, now_ms: u64, pressed: bool) -> Option<Gesture> {
        let double_ms = self.params.double_click_ms;

        let mut expired = None;
        if let Some(clicked) = self.pending_click_ms {
            if now_ms.saturating_sub(clicked) > double_ms {
                self.pending_click_ms = None;
                expired = Some(Gesture::SingleClick);
            }
        }

        if self.edge_latched {
            self.edge_latched = false;
            let debounced = self
                .last_accepted_ms
                .map_or(true, |last| now_ms.saturating_sub(last) > self.params.debounce_ms);
            if debounced && pressed {
                self.last_accepted_ms = Some(now_ms);
                self.down_since_ms = Some(now_ms);
                self.long_fired = false;
            }
        }

        // A press latched alongside the expiry stays tracked for the next tick
        if expired.is_some() {
            return expired;
        }

        let down_since = self.down_since_ms?;

        if !pressed {
            self.down_since_ms = None;
            if self.long_fired {
                return None;
            }
            return match self.pending_click_ms {
                Some(clicked) if now_ms.saturating_sub(clicked) <= double_ms => {
                    self.pending_click_ms = None;
                    Some(Gesture::DoubleClick)
                }
                _ => {
                    self.pending_click_ms = Some(now_ms);
                    None
                }
            };
        }

        if !self.long_fired && now_ms.saturating_sub(down_since) >= self.params.long_press_ms {
            self.long_fired = true;
            self.pending_click_ms = None;
            return Some(Gesture::LongPress);
        }

        None
    }
}

impl Default for ButtonGestureClassifier {
    fn default() -> Self {
        Self::new(ButtonParams::default())
    }
}
