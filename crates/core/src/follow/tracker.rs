//! Sticky lead tracking

use crate::constants::CRUISING_SPEED;

/// Remembers whether a lead was seen while moving.
///
/// The flag only changes while the car is above `CRUISING_SPEED`, so a lead
/// acquired on the move stays tracked through a stop, and a lead that
/// vanishes while crawling is not forgotten until the car moves again.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadTracker {
    tracking: bool,
}

impl LeadTracker {
    pub const fn new() -> Self {
        Self { tracking: false }
    }

    /// Refresh from this cycle's lead presence
    pub fn refresh(&mut self, v_ego: f32, lead_present: bool) {
        if v_ego > CRUISING_SPEED {
            self.tracking = lead_present;
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn reset(&mut self) {
        self.tracking = false;
    }
}
