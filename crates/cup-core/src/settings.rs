use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::FieldGeometry;

/// How a robot touching a line is steered back into play.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryMode {
    /// Classify the contact points and head for the field centre
    #[default]
    CenterSeek,
    /// Escape along the touched lines, choosing signs from the TOF readings
    TofEscape,
}

/// Settings for the role programs.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramSettings {
    /// Run the dribble resolver for the own attacker every tick
    pub own_attack_auto_dribble: bool,
    /// Run the dribble resolver for the own defender every tick
    pub own_defend_auto_dribble: bool,
    /// Run the dribble resolver for the opponent attacker every tick
    pub opp_attack_auto_dribble: bool,
    /// Run the dribble resolver for the opponent defender every tick
    pub opp_defend_auto_dribble: bool,
    pub recovery: RecoveryMode,
}

impl Default for ProgramSettings {
    fn default() -> Self {
        Self {
            own_attack_auto_dribble: true,
            own_defend_auto_dribble: true,
            opp_attack_auto_dribble: true,
            opp_defend_auto_dribble: false,
            recovery: RecoveryMode::CenterSeek,
        }
    }
}

/// Limits of the servos that couple a robot to its commanded motion.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServoSettings {
    /// Maximum linear acceleration in units/s²
    pub max_acceleration: f64,
    /// Maximum linear speed in units/s
    pub max_speed: f64,
    /// Maximum angular velocity in rad/s
    pub max_angular_velocity: f64,
    /// Linear damping of the ball (rolling friction)
    pub ball_damping: f64,
}

impl Default for ServoSettings {
    fn default() -> Self {
        Self {
            max_acceleration: 3300.0,
            max_speed: 1000.0,
            max_angular_velocity: 4.0 * std::f64::consts::TAU,
            ball_damping: 0.6,
        }
    }
}

/// Settings for a whole run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CupSettings {
    pub program: ProgramSettings,
    pub servo: ServoSettings,
    pub field: FieldGeometry,
}

impl CupSettings {
    /// Load the settings from the given file, or write the defaults to it if it
    /// does not exist yet.
    ///
    /// Missing fields take their defaults. A file that does not parse is an
    /// error and is left untouched.
    pub fn load_or_insert(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse settings {}", path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.store(path)?;
                log::info!("Wrote default settings to {}", path.display());
                Ok(settings)
            }
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read settings {}", path.display()))
            }
        }
    }

    /// Store the settings in the given file.
    pub fn store(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings {}", path.display()))
    }
}
