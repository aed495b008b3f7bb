//! Game balance and playfield tuning
//!
//! Defaults come from [`crate::consts`]. A host can override any subset of
//! fields with a JSON document; missing fields keep their defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Playfield width (units)
    pub playfield_width: f32,
    /// Playfield height (units)
    pub playfield_height: f32,
    /// Ground band at the bottom of the playfield
    pub ground_height: f32,
    /// Launch speed per power percent
    pub speed_per_power: f32,
    /// Score awarded per hit
    pub points_per_hit: u64,
    /// Seconds the target stays gone after a hit
    pub respawn_delay: f32,
    /// Seconds between projectile removal and re-arm
    pub rearm_delay: f32,
    /// Minimum travel between recorded trail points
    pub trail_spacing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            speed_per_power: SPEED_PER_POWER,
            points_per_hit: POINTS_PER_HIT,
            respawn_delay: RESPAWN_DELAY,
            rearm_delay: REARM_DELAY,
            trail_spacing: TRAIL_SPACING,
        }
    }
}

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    /// The tuning file could not be read
    Io(std::io::Error),
    /// Not valid JSON, or a field had the wrong type
    Parse(serde_json::Error),
    /// A field parsed but is out of range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read tuning: {err}"),
            Self::Parse(err) => write!(f, "failed to parse tuning: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: gravity={}, playfield={}x{}",
            tuning.gravity,
            tuning.playfield_width,
            tuning.playfield_height
        );
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        log::debug!("Reading tuning from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON (for dumping the active config)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Check that every field is in a range the simulation can run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be zero or greater",
                })
            }
        }

        positive("gravity", self.gravity)?;
        positive("playfield_width", self.playfield_width)?;
        positive("playfield_height", self.playfield_height)?;
        non_negative("ground_height", self.ground_height)?;
        positive("speed_per_power", self.speed_per_power)?;
        non_negative("respawn_delay", self.respawn_delay)?;
        non_negative("rearm_delay", self.rearm_delay)?;
        non_negative("trail_spacing", self.trail_spacing)?;

        if self.ground_height >= self.playfield_height {
            return Err(TuningError::Invalid {
                field: "ground_height",
                reason: "must be smaller than the playfield height",
            });
        }
        // The target spawns anywhere in [TARGET_MIN_X, TARGET_MIN_X + TARGET_X_SPAN]
        if self.playfield_width < TARGET_MIN_X + TARGET_X_SPAN {
            return Err(TuningError::Invalid {
                field: "playfield_width",
                reason: "too narrow for the target spawn band",
            });
        }
        Ok(())
    }

    /// Y coordinate of the top of the ground band
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.playfield_height - self.ground_height
    }
}
