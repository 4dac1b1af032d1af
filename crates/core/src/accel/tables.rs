//! Acceleration bound tables per driving profile

use crate::constants::A_CRUISE_MIN;
use crate::error::ConfigError;
use crate::table::InterpTable;

/// Speed breakpoints (m/s) of the stock max-acceleration curve
pub const STOCK_MAX_BP: [f32; 4] = [0.0, 10.0, 25.0, 40.0];
/// Stock max acceleration (m/s²)
pub const STOCK_MAX_VALS: [f32; 4] = [1.6, 1.2, 0.8, 0.6];

/// Speed breakpoints (m/s) shared by the eco and sport curves
//                             MPH = [0, 11, 22, 34, 45, 56, 89]
pub const PROFILE_MAX_BP: [f32; 7] = [0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 40.0];
/// Eco max acceleration (m/s²)
pub const ECO_MAX_VALS: [f32; 7] = [1.4, 1.2, 1.0, 0.8, 0.6, 0.4, 0.2];
/// Sport max acceleration (m/s²)
pub const SPORT_MAX_VALS: [f32; 7] = [4.0, 3.0, 2.0, 1.0, 0.9, 0.8, 0.7];

/// Eco deceleration bound (m/s²)
pub const ECO_MIN: f32 = A_CRUISE_MIN / 5.0;
/// Sport deceleration bound (m/s²)
pub const SPORT_MIN: f32 = A_CRUISE_MIN / 2.0;

/// Max / min acceleration curves of one profile
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTables {
    /// Max acceleration vs ego speed
    pub max: InterpTable,
    /// Min acceleration vs ego speed
    pub min: InterpTable,
}

impl ProfileTables {
    /// Pair two tables, rejecting the pair if `min` ever exceeds `max`.
    pub fn new(max: InterpTable, min: InterpTable) -> Result<Self, ConfigError> {
        let tables = Self { max, min };
        tables.check_bounds()?;
        Ok(tables)
    }

    /// Verify `min(v) <= max(v)` for every speed.
    ///
    /// Both curves are piecewise linear and constant outside their domain,
    /// so checking every breakpoint of either table covers all speeds.
    pub fn check_bounds(&self) -> Result<(), ConfigError> {
        let breakpoints = self
            .max
            .breakpoints()
            .iter()
            .chain(self.min.breakpoints().iter());
        for &speed in breakpoints {
            let max = self.max.eval(speed);
            let min = self.min.eval(speed);
            if min > max {
                return Err(ConfigError::InvertedBounds { speed, min, max });
            }
        }
        Ok(())
    }
}

/// Tables for every selectable profile
#[derive(Debug, Clone, PartialEq)]
pub struct AccelTables {
    pub stock: ProfileTables,
    pub eco: ProfileTables,
    pub sport: ProfileTables,
    /// User-supplied curves, if any
    pub custom: Option<ProfileTables>,
}

impl AccelTables {
    /// Validate every profile.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvertedBounds` for the first profile whose
    /// min curve crosses its max curve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.stock.check_bounds()?;
        self.eco.check_bounds()?;
        self.sport.check_bounds()?;
        if let Some(custom) = &self.custom {
            custom.check_bounds()?;
        }
        Ok(())
    }

    /// Replace the custom profile
    pub fn with_custom(mut self, custom: ProfileTables) -> Self {
        self.custom = Some(custom);
        self
    }
}

impl Default for AccelTables {
    fn default() -> Self {
        Self {
            stock: ProfileTables {
                max: InterpTable::builtin(&STOCK_MAX_BP, &STOCK_MAX_VALS, 0.6),
                min: InterpTable::constant(A_CRUISE_MIN),
            },
            eco: ProfileTables {
                max: InterpTable::builtin(&PROFILE_MAX_BP, &ECO_MAX_VALS, 0.2),
                min: InterpTable::constant(ECO_MIN),
            },
            sport: ProfileTables {
                max: InterpTable::builtin(&PROFILE_MAX_BP, &SPORT_MAX_VALS, 0.7),
                min: InterpTable::constant(SPORT_MIN),
            },
            custom: None,
        }
    }
}
