//! Acceleration limit selection
//!
//! Picks the max / min acceleration the planner may command this cycle.
//!
//! Max bound, first match wins:
//! 1. aggressive acceleration with a tracked lead: follow the lead's own
//!    acceleration, floored at the sport curve and capped by a speed-dependent
//!    ceiling
//! 2. map acceleration with eco / sport gear engaged: that gear's curve
//! 3. configured acceleration profile
//! 4. experimental mode: `ACCEL_MAX`
//! 5. stock curve
//!
//! Min bound, first match wins:
//! 1. experimental mode: `ACCEL_MIN`
//! 2. cruise target not yet reached: stock bound
//! 3. map deceleration with eco / sport gear engaged: that gear's bound
//! 4. configured deceleration profile
//! 5. stock bound

use serde::{Deserialize, Serialize};

use super::tables::{AccelTables, ProfileTables};
use crate::constants::{ACCEL_MAX, ACCEL_MIN};
use crate::error::ConfigError;
use crate::math::clip;
use crate::vehicle::LeadState;

/// Source of the max-acceleration bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlProfile {
    #[default]
    Default,
    Eco,
    Sport,
    Aggressive,
    Custom,
}

/// Configured acceleration profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccelerationProfile {
    #[default]
    Stock,
    Eco,
    Sport,
    Custom,
}

impl AccelerationProfile {
    /// Map a stored integer to a profile (unknown values → Stock)
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => AccelerationProfile::Eco,
            2 => AccelerationProfile::Sport,
            3 => AccelerationProfile::Custom,
            _ => AccelerationProfile::Stock,
        }
    }
}

/// Configured deceleration profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecelerationProfile {
    #[default]
    Stock,
    Eco,
    Sport,
    Custom,
}

impl DecelerationProfile {
    /// Map a stored integer to a profile (unknown values → Stock)
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => DecelerationProfile::Eco,
            2 => DecelerationProfile::Sport,
            3 => DecelerationProfile::Custom,
            _ => DecelerationProfile::Stock,
        }
    }
}

/// Acceleration selection settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelSettings {
    pub acceleration_profile: AccelerationProfile,
    pub deceleration_profile: DecelerationProfile,
    /// Follow a faster lead's acceleration
    pub aggressive_acceleration: bool,
    /// Use the eco / sport curve while the car reports that gear
    pub map_acceleration: bool,
    /// Use the eco / sport bound while the car reports that gear
    pub map_deceleration: bool,
    /// Aggressive ceiling below `aggressive_ceiling_speed` (m/s²)
    pub aggressive_ceiling_low: f32,
    /// Aggressive ceiling at or above `aggressive_ceiling_speed` (m/s²)
    pub aggressive_ceiling_high: f32,
    /// Speed (m/s) switching between the two ceilings
    pub aggressive_ceiling_speed: f32,
}

impl Default for AccelSettings {
    fn default() -> Self {
        Self {
            acceleration_profile: AccelerationProfile::Stock,
            deceleration_profile: DecelerationProfile::Stock,
            aggressive_acceleration: false,
            map_acceleration: false,
            map_deceleration: false,
            aggressive_ceiling_low: 4.0,
            aggressive_ceiling_high: 2.0,
            aggressive_ceiling_speed: 20.0,
        }
    }
}

/// Per-cycle inputs to the selector
#[derive(Debug, Clone, Copy, Default)]
pub struct AccelInputs {
    /// Ego speed (m/s, non-negative)
    pub v_ego: f32,
    pub eco_gear: bool,
    pub sport_gear: bool,
    pub experimental_mode: bool,
    pub lead: LeadState,
    /// The turn-speed target is still below the set speed
    pub cruise_target_pending: bool,
}

/// Selected acceleration bounds, `min <= max` guaranteed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelLimits {
    min: f32,
    max: f32,
    profile: ControlProfile,
}

impl AccelLimits {
    /// Pair two bounds; `speed` is reported in the error if they cross.
    pub fn new(min: f32, max: f32, profile: ControlProfile, speed: f32) -> Result<Self, ConfigError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(ConfigError::InvertedBounds { speed, min, max });
        }
        Ok(Self { min, max, profile })
    }

    /// Minimum acceleration (m/s²)
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Maximum acceleration (m/s²)
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Source of the max bound
    pub fn profile(&self) -> ControlProfile {
        self.profile
    }
}

/// Chooses acceleration bounds from validated tables
#[derive(Debug, Clone)]
pub struct AccelerationLimitSelector {
    tables: AccelTables,
}

impl AccelerationLimitSelector {
    /// Create a selector, validating the tables first.
    pub fn new(tables: AccelTables) -> Result<Self, ConfigError> {
        tables.validate()?;
        Ok(Self { tables })
    }

    /// Tables in use
    pub fn tables(&self) -> &AccelTables {
        &self.tables
    }

    /// Select this cycle's bounds.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvertedBounds` if the chosen min exceeds the chosen max.
    /// Callers are expected to fall back to [`Self::stock`].
    pub fn select(
        &self,
        settings: &AccelSettings,
        inputs: &AccelInputs,
    ) -> Result<AccelLimits, ConfigError> {
        let v = inputs.v_ego;
        let (max, profile) = self.select_max(settings, inputs);
        let min = self.select_min(settings, inputs);
        AccelLimits::new(min, max, profile, v)
    }

    /// Stock bounds at `v_ego`, the most conservative choice
    pub fn stock(&self, v_ego: f32) -> AccelLimits {
        let max = self.tables.stock.max.eval(v_ego);
        let min = self.tables.stock.min.eval(v_ego).min(max);
        AccelLimits {
            min,
            max,
            profile: ControlProfile::Default,
        }
    }

    fn select_max(&self, settings: &AccelSettings, inputs: &AccelInputs) -> (f32, ControlProfile) {
        let v = inputs.v_ego;

        if settings.aggressive_acceleration {
            if let Some(lead_accel) = inputs.lead.accel_estimate() {
                let ceiling = if v >= settings.aggressive_ceiling_speed {
                    settings.aggressive_ceiling_high
                } else {
                    settings.aggressive_ceiling_low
                };
                let floor = self.tables.sport.max.eval(v);
                return (clip(lead_accel, floor, ceiling), ControlProfile::Aggressive);
            }
        }

        if settings.map_acceleration && (inputs.eco_gear || inputs.sport_gear) {
            return if inputs.eco_gear {
                (self.tables.eco.max.eval(v), ControlProfile::Eco)
            } else {
                (self.tables.sport.max.eval(v), ControlProfile::Sport)
            };
        }

        match (settings.acceleration_profile, &self.tables.custom) {
            (AccelerationProfile::Eco, _) => (self.tables.eco.max.eval(v), ControlProfile::Eco),
            (AccelerationProfile::Custom, Some(custom)) => {
                (custom.max.eval(v), ControlProfile::Custom)
            }
            (AccelerationProfile::Sport | AccelerationProfile::Custom, _) => {
                (self.tables.sport.max.eval(v), ControlProfile::Sport)
            }
            (AccelerationProfile::Stock, _) if inputs.experimental_mode => {
                (ACCEL_MAX, ControlProfile::Default)
            }
            (AccelerationProfile::Stock, _) => {
                (self.tables.stock.max.eval(v), ControlProfile::Default)
            }
        }
    }

    fn select_min(&self, settings: &AccelSettings, inputs: &AccelInputs) -> f32 {
        let v = inputs.v_ego;

        if inputs.experimental_mode {
            return ACCEL_MIN;
        }
        if inputs.cruise_target_pending {
            return self.tables.stock.min.eval(v);
        }
        if settings.map_deceleration && (inputs.eco_gear || inputs.sport_gear) {
            return if inputs.eco_gear {
                self.tables.eco.min.eval(v)
            } else {
                self.tables.sport.min.eval(v)
            };
        }

        let tables: &ProfileTables = match settings.deceleration_profile {
            DecelerationProfile::Eco => &self.tables.eco,
            DecelerationProfile::Sport => &self.tables.sport,
            DecelerationProfile::Custom => self.tables.custom.as_ref().unwrap_or(&self.tables.sport),
            DecelerationProfile::Stock => &self.tables.stock,
        };
        tables.min.eval(v)
    }
}

impl Default for AccelerationLimitSelector {
    fn default() -> Self {
        // Built-in tables always validate
        Self {
            tables: AccelTables::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::A_CRUISE_MIN;
    use crate::table::InterpTable;

    fn lead(accel: f32) -> LeadState {
        LeadState::Present {
            distance: 30.0,
            rel_velocity: 2.0,
            velocity: 12.0,
            accel_estimate: accel,
        }
    }

    fn inputs(v_ego: f32) -> AccelInputs {
        AccelInputs {
            v_ego,
            ..Default::default()
        }
    }

    #[test]
    fn test_stock_bounds() {
        let selector = AccelerationLimitSelector::default();
        let limits = selector
            .select(&AccelSettings::default(), &inputs(10.0))
            .unwrap();
        assert!((limits.max() - 1.2).abs() < 1e-6);
        assert!((limits.min() - A_CRUISE_MIN).abs() < 1e-6);
        assert_eq!(limits.profile(), ControlProfile::Default);
    }

    #[test]
    fn test_min_never_exceeds_max_across_domain() {
        let selector = AccelerationLimitSelector::default();
        let mut settings = AccelSettings::default();
        for profile in 0..4 {
            settings.acceleration_profile = AccelerationProfile::from_i32(profile);
            settings.deceleration_profile = DecelerationProfile::from_i32(profile);
            for step in 0..=50 {
                let v = step as f32;
                let limits = selector.select(&settings, &inputs(v)).unwrap();
                assert!(limits.min() <= limits.max());
            }
        }
    }

    #[test]
    fn test_aggressive_override_clamps_lead_accel() {
        let selector = AccelerationLimitSelector::default();
        let settings = AccelSettings {
            aggressive_acceleration: true,
            ..Default::default()
        };

        // Lead accelerating hard at low speed: capped at 4.0
        let mut input = inputs(5.0);
        input.lead = lead(6.0);
        let limits = selector.select(&settings, &input).unwrap();
        assert!((limits.max() - 4.0).abs() < 1e-6);
        assert_eq!(limits.profile(), ControlProfile::Aggressive);

        // Same lead above 20 m/s: capped at 2.0
        input.v_ego = 22.0;
        let limits = selector.select(&settings, &input).unwrap();
        assert!((limits.max() - 2.0).abs() < 1e-6);

        // Decelerating lead: floored at the sport curve (3.0 at 5 m/s)
        input.v_ego = 5.0;
        input.lead = lead(-1.0);
        let limits = selector.select(&settings, &input).unwrap();
        assert!((limits.max() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_aggressive_needs_lead() {
        let selector = AccelerationLimitSelector::default();
        let settings = AccelSettings {
            aggressive_acceleration: true,
            ..Default::default()
        };
        let limits = selector.select(&settings, &inputs(10.0)).unwrap();
        assert_eq!(limits.profile(), ControlProfile::Default);
    }

    #[test]
    fn test_map_acceleration_follows_gear() {
        let selector = AccelerationLimitSelector::default();
        let settings = AccelSettings {
            map_acceleration: true,
            acceleration_profile: AccelerationProfile::Sport,
            ..Default::default()
        };
        let mut input = inputs(10.0);
        input.eco_gear = true;
        let limits = selector.select(&settings, &input).unwrap();
        assert_eq!(limits.profile(), ControlProfile::Eco);
        assert!((limits.max() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_custom_profile_falls_back_to_sport() {
        let selector = AccelerationLimitSelector::default();
        let settings = AccelSettings {
            acceleration_profile: AccelerationProfile::Custom,
            ..Default::default()
        };
        let limits = selector.select(&settings, &inputs(10.0)).unwrap();
        assert_eq!(limits.profile(), ControlProfile::Sport);
        assert!((limits.max() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_custom_profile_uses_custom_tables() {
        let custom = ProfileTables::new(
            InterpTable::new(&[0.0, 30.0], &[2.5, 0.5]).unwrap(),
            InterpTable::constant(-0.8),
        )
        .unwrap();
        let selector =
            AccelerationLimitSelector::new(AccelTables::default().with_custom(custom)).unwrap();
        let settings = AccelSettings {
            acceleration_profile: AccelerationProfile::Custom,
            deceleration_profile: DecelerationProfile::Custom,
            ..Default::default()
        };
        let limits = selector.select(&settings, &inputs(15.0)).unwrap();
        assert_eq!(limits.profile(), ControlProfile::Custom);
        assert!((limits.max() - 1.5).abs() < 1e-5);
        assert!((limits.min() + 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_experimental_mode_widens_bounds() {
        let selector = AccelerationLimitSelector::default();
        let mut input = inputs(10.0);
        input.experimental_mode = true;
        let limits = selector.select(&AccelSettings::default(), &input).unwrap();
        assert_eq!(limits.max(), ACCEL_MAX);
        assert_eq!(limits.min(), ACCEL_MIN);
    }

    #[test]
    fn test_profile_wins_over_experimental_max() {
        let selector = AccelerationLimitSelector::default();
        let settings = AccelSettings {
            acceleration_profile: AccelerationProfile::Eco,
            ..Default::default()
        };
        let mut input = inputs(10.0);
        input.experimental_mode = true;
        let limits = selector.select(&settings, &input).unwrap();
        assert_eq!(limits.profile(), ControlProfile::Eco);
        assert_eq!(limits.min(), ACCEL_MIN);
    }

    #[test]
    fn test_pending_cruise_target_forces_stock_min() {
        let selector = AccelerationLimitSelector::default();
        let settings = AccelSettings {
            deceleration_profile: DecelerationProfile::Eco,
            ..Default::default()
        };
        let mut input = inputs(10.0);
        let eco = selector.select(&settings, &input).unwrap();
        assert!((eco.min() + 0.24).abs() < 1e-6);

        input.cruise_target_pending = true;
        let pending = selector.select(&settings, &input).unwrap();
        assert!((pending.min() - A_CRUISE_MIN).abs() < 1e-6);
    }

    #[test]
    fn test_map_deceleration_follows_gear() {
        let selector = AccelerationLimitSelector::default();
        let settings = AccelSettings {
            map_deceleration: true,
            ..Default::default()
        };
        let mut input = inputs(10.0);
        input.sport_gear = true;
        let limits = selector.select(&settings, &input).unwrap();
        assert!((limits.min() + 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_inverted_selection_is_an_error() {
        // Each profile is consistent on its own; mixing the custom max with
        // the stock min is not.
        let custom = ProfileTables {
            max: InterpTable::constant(-2.0),
            min: InterpTable::constant(-3.0),
        };
        let selector = AccelerationLimitSelector {
            tables: AccelTables::default().with_custom(custom),
        };
        let settings = AccelSettings {
            acceleration_profile: AccelerationProfile::Custom,
            ..Default::default()
        };
        // Stock min (-1.2) against custom max (-2.0)
        let err = selector.select(&settings, &inputs(10.0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedBounds { .. }));

        let stock = selector.stock(10.0);
        assert!(stock.min() <= stock.max());
    }

    #[test]
    fn test_new_rejects_invalid_tables() {
        let tables = AccelTables::default().with_custom(ProfileTables {
            max: InterpTable::constant(0.0),
            min: InterpTable::constant(1.0),
        });
        assert!(AccelerationLimitSelector::new(tables).is_err());
    }
}
