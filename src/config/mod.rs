//! Configuration for gymfis.
//!
//! Two kinds of configuration live here:
//!
//! 1. **Static tables** - universe ranges and steps, the hand-tuned
//!    membership breakpoints, the derived-center tables, input defaults
//!    and validation bounds. These define the control problem itself and
//!    are not runtime-negotiated.
//! 2. **Runtime settings** ([`GymFisConfig`]) - the membership-function
//!    family, logging verbosity and default input overrides used by the
//!    command-line driver, loaded from a TOML file with environment
//!    variable overrides.
//!
//! # Configuration File Locations
//!
//! Runtime configuration files are searched in order (first found wins):
//! 1. `./gymfis.toml` - Project-local configuration
//! 2. `~/.config/gymfis/config.toml` - User configuration (XDG)
//! 3. `/etc/gymfis/config.toml` - System-wide configuration
//!
//! # Environment Variables
//!
//! - `GYMFIS_FAMILY` - membership-function family
//!   (triangular, gaussian, bell, sigmoid)
//! - `GYMFIS_LOG_LEVEL` - logging verbosity (quiet, normal, verbose, debug)
//!
//! # Example Configuration
//!
//! ```toml
//! # gymfis.toml
//!
//! [general]
//! log_level = "normal"
//!
//! [engine]
//! family = "triangular"
//!
//! [defaults]
//! force = 250.0
//! speed = 0.7
//! phase = 50.0
//! fatigue = 20.0
//! mode = 2.0
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, FisError, FisResult};
use crate::membership::{MfFamily, MfShape};
use crate::terms::{
    FatigueLevel, FeedbackSignal, ForceLevel, MovementPhase, ResistanceLevel, SpeedLevel,
    TrainingMode, VariableId,
};
use crate::universe::Universe;

// ============================================================================
// Static tables: universes
// ============================================================================

/// `(min, max, step)` of every variable's universe.
pub fn universe_spec(id: VariableId) -> (f64, f64, f64) {
    match id {
        VariableId::Force => (0.0, 500.0, 1.0),
        VariableId::Speed => (0.0, 1.5, 0.01),
        VariableId::Phase => (0.0, 100.0, 1.0),
        VariableId::Fatigue => (0.0, 100.0, 1.0),
        VariableId::Mode => (1.0, 3.0, 0.01),
        VariableId::Resistance => (0.0, 100.0, 1.0),
        VariableId::Feedback => (1.0, 5.0, 0.01),
    }
}

/// Build the discretized universe of a variable.
pub fn universe_of(id: VariableId) -> FisResult<Universe> {
    let (min, max, step) = universe_spec(id);
    Universe::new(min, max, step)
}

/// Declared `[min, max]` validation bounds of an input variable.
pub fn input_bounds(id: VariableId) -> (f64, f64) {
    let (min, max, _) = universe_spec(id);
    (min, max)
}

// ============================================================================
// Static tables: hand-tuned production breakpoints
// ============================================================================

pub fn force_shapes() -> Vec<(ForceLevel, MfShape)> {
    vec![
        (
            ForceLevel::VeryLow,
            MfShape::Trapezoid {
                a: 0.0,
                b: 0.0,
                c: 50.0,
                d: 100.0,
            },
        ),
        (
            ForceLevel::Low,
            MfShape::Triangle {
                a: 50.0,
                b: 125.0,
                c: 200.0,
            },
        ),
        (
            ForceLevel::Medium,
            MfShape::Triangle {
                a: 150.0,
                b: 250.0,
                c: 350.0,
            },
        ),
        (
            ForceLevel::High,
            MfShape::Triangle {
                a: 300.0,
                b: 375.0,
                c: 450.0,
            },
        ),
        (
            ForceLevel::VeryHigh,
            MfShape::Trapezoid {
                a: 400.0,
                b: 450.0,
                c: 500.0,
                d: 500.0,
            },
        ),
    ]
}

pub fn speed_shapes() -> Vec<(SpeedLevel, MfShape)> {
    vec![
        (
            SpeedLevel::VerySlow,
            MfShape::Trapezoid {
                a: 0.0,
                b: 0.0,
                c: 0.1,
                d: 0.25,
            },
        ),
        (
            SpeedLevel::Slow,
            MfShape::Triangle {
                a: 0.15,
                b: 0.35,
                c: 0.55,
            },
        ),
        (
            SpeedLevel::Moderate,
            MfShape::Triangle {
                a: 0.45,
                b: 0.7,
                c: 0.95,
            },
        ),
        (
            SpeedLevel::Fast,
            MfShape::Triangle {
                a: 0.85,
                b: 1.1,
                c: 1.35,
            },
        ),
        (
            SpeedLevel::VeryFast,
            MfShape::Trapezoid {
                a: 1.2,
                b: 1.35,
                c: 1.5,
                d: 1.5,
            },
        ),
    ]
}

pub fn phase_shapes() -> Vec<(MovementPhase, MfShape)> {
    vec![
        (
            MovementPhase::Initial,
            MfShape::Trapezoid {
                a: 0.0,
                b: 0.0,
                c: 10.0,
                d: 25.0,
            },
        ),
        (
            MovementPhase::Lower,
            MfShape::Triangle {
                a: 15.0,
                b: 30.0,
                c: 45.0,
            },
        ),
        (
            MovementPhase::Middle,
            MfShape::Triangle {
                a: 35.0,
                b: 50.0,
                c: 65.0,
            },
        ),
        (
            MovementPhase::Upper,
            MfShape::Triangle {
                a: 55.0,
                b: 70.0,
                c: 85.0,
            },
        ),
        (
            MovementPhase::Final,
            MfShape::Trapezoid {
                a: 75.0,
                b: 90.0,
                c: 100.0,
                d: 100.0,
            },
        ),
    ]
}

pub fn fatigue_shapes() -> Vec<(FatigueLevel, MfShape)> {
    vec![
        (
            FatigueLevel::Fresh,
            MfShape::Trapezoid {
                a: 0.0,
                b: 0.0,
                c: 5.0,
                d: 15.0,
            },
        ),
        (
            FatigueLevel::Light,
            MfShape::Triangle {
                a: 10.0,
                b: 25.0,
                c: 40.0,
            },
        ),
        (
            FatigueLevel::Moderate,
            MfShape::Triangle {
                a: 30.0,
                b: 50.0,
                c: 70.0,
            },
        ),
        (
            FatigueLevel::High,
            MfShape::Triangle {
                a: 60.0,
                b: 75.0,
                c: 90.0,
            },
        ),
        (
            FatigueLevel::Exhausted,
            MfShape::Trapezoid {
                a: 80.0,
                b: 90.0,
                c: 100.0,
                d: 100.0,
            },
        ),
    ]
}

pub fn mode_shapes() -> Vec<(TrainingMode, MfShape)> {
    vec![
        (
            TrainingMode::Strength,
            MfShape::Triangle {
                a: 1.0,
                b: 1.0,
                c: 1.8,
            },
        ),
        (
            TrainingMode::Hypertrophy,
            MfShape::Triangle {
                a: 1.5,
                b: 2.0,
                c: 2.5,
            },
        ),
        (
            TrainingMode::Endurance,
            MfShape::Triangle {
                a: 2.2,
                b: 3.0,
                c: 3.0,
            },
        ),
    ]
}

pub fn resistance_shapes() -> Vec<(ResistanceLevel, MfShape)> {
    vec![
        (
            ResistanceLevel::Minimal,
            MfShape::Trapezoid {
                a: 0.0,
                b: 0.0,
                c: 10.0,
                d: 20.0,
            },
        ),
        (
            ResistanceLevel::Low,
            MfShape::Triangle {
                a: 15.0,
                b: 30.0,
                c: 45.0,
            },
        ),
        (
            ResistanceLevel::Medium,
            MfShape::Triangle {
                a: 35.0,
                b: 50.0,
                c: 65.0,
            },
        ),
        (
            ResistanceLevel::High,
            MfShape::Triangle {
                a: 55.0,
                b: 70.0,
                c: 85.0,
            },
        ),
        (
            ResistanceLevel::Maximal,
            MfShape::Trapezoid {
                a: 75.0,
                b: 90.0,
                c: 100.0,
                d: 100.0,
            },
        ),
    ]
}

pub fn feedback_shapes() -> Vec<(FeedbackSignal, MfShape)> {
    vec![
        (
            FeedbackSignal::SlowDown,
            MfShape::Triangle {
                a: 1.0,
                b: 1.0,
                c: 2.0,
            },
        ),
        (
            FeedbackSignal::Good,
            MfShape::Triangle {
                a: 1.5,
                b: 2.5,
                c: 3.5,
            },
        ),
        (
            FeedbackSignal::Perfect,
            MfShape::Triangle {
                a: 2.5,
                b: 3.0,
                c: 3.5,
            },
        ),
        (
            FeedbackSignal::PushHarder,
            MfShape::Triangle {
                a: 3.0,
                b: 3.5,
                c: 4.5,
            },
        ),
        (
            FeedbackSignal::Stop,
            MfShape::Triangle {
                a: 4.0,
                b: 5.0,
                c: 5.0,
            },
        ),
    ]
}

// ============================================================================
// Static tables: derived-center construction
// ============================================================================

pub fn force_centers() -> [(ForceLevel, f64); 5] {
    [
        (ForceLevel::VeryLow, 50.0),
        (ForceLevel::Low, 125.0),
        (ForceLevel::Medium, 250.0),
        (ForceLevel::High, 375.0),
        (ForceLevel::VeryHigh, 450.0),
    ]
}

pub fn speed_centers() -> [(SpeedLevel, f64); 5] {
    [
        (SpeedLevel::VerySlow, 0.1),
        (SpeedLevel::Slow, 0.35),
        (SpeedLevel::Moderate, 0.7),
        (SpeedLevel::Fast, 1.1),
        (SpeedLevel::VeryFast, 1.4),
    ]
}

pub fn phase_centers() -> [(MovementPhase, f64); 5] {
    [
        (MovementPhase::Initial, 10.0),
        (MovementPhase::Lower, 30.0),
        (MovementPhase::Middle, 50.0),
        (MovementPhase::Upper, 70.0),
        (MovementPhase::Final, 90.0),
    ]
}

pub fn fatigue_centers() -> [(FatigueLevel, f64); 5] {
    [
        (FatigueLevel::Fresh, 5.0),
        (FatigueLevel::Light, 25.0),
        (FatigueLevel::Moderate, 50.0),
        (FatigueLevel::High, 75.0),
        (FatigueLevel::Exhausted, 90.0),
    ]
}

pub fn resistance_centers() -> [(ResistanceLevel, f64); 5] {
    [
        (ResistanceLevel::Minimal, 10.0),
        (ResistanceLevel::Low, 30.0),
        (ResistanceLevel::Medium, 50.0),
        (ResistanceLevel::High, 70.0),
        (ResistanceLevel::Maximal, 90.0),
    ]
}

// ============================================================================
// Static tables: input defaults
// ============================================================================

pub const DEFAULT_FORCE: f64 = 250.0;
pub const DEFAULT_SPEED: f64 = 0.7;
pub const DEFAULT_PHASE: f64 = 50.0;
pub const DEFAULT_FATIGUE: f64 = 20.0;
pub const DEFAULT_MODE: f64 = 2.0;

// ============================================================================
// Runtime configuration
// ============================================================================

/// Logging verbosity for the command-line driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl LogLevel {
    /// Directive string for the tracing subscriber.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "warn",
            LogLevel::Verbose => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Logging verbosity.
    pub log_level: LogLevel,
}

/// Engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Membership-function family to build the system under.
    pub family: MfFamily,
}

/// Default crisp inputs used when the caller supplies none.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultInputs {
    pub force: f64,
    pub speed: f64,
    pub phase: f64,
    pub fatigue: f64,
    pub mode: f64,
}

impl Default for DefaultInputs {
    fn default() -> Self {
        Self {
            force: DEFAULT_FORCE,
            speed: DEFAULT_SPEED,
            phase: DEFAULT_PHASE,
            fatigue: DEFAULT_FATIGUE,
            mode: DEFAULT_MODE,
        }
    }
}

/// Runtime configuration, loaded from TOML with env-var overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GymFisConfig {
    pub general: GeneralConfig,
    pub engine: EngineConfig,
    pub defaults: DefaultInputs,
}

impl GymFisConfig {
    /// Candidate config file locations, most specific first.
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("gymfis.toml")];
        if let Ok(home) = env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/gymfis/config.toml"));
        }
        paths.push(PathBuf::from("/etc/gymfis/config.toml"));
        paths
    }

    /// Load configuration: first config file found, then environment
    /// overrides on top. Missing files are not an error; a malformed file
    /// is.
    pub fn load() -> FisResult<Self> {
        let mut config = Self::default();
        for path in Self::search_paths() {
            if path.is_file() {
                config = Self::from_path(&path)?;
                break;
            }
        }
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from an explicit file, then apply environment
    /// overrides.
    pub fn load_from(path: &PathBuf) -> FisResult<Self> {
        let mut config = Self::from_path(path)?;
        config.apply_env()?;
        Ok(config)
    }

    fn from_path(path: &PathBuf) -> FisResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| FisError::from(e).with_context("path", path.display().to_string()))?;
        Self::from_toml(&text)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> FisResult<Self> {
        let config: Self = toml::from_str(text)?;
        Ok(config)
    }

    /// Apply `GYMFIS_*` environment variable overrides.
    pub fn apply_env(&mut self) -> FisResult<()> {
        if let Ok(family) = env::var("GYMFIS_FAMILY") {
            self.engine.family = family.parse()?;
        }
        if let Ok(level) = env::var("GYMFIS_LOG_LEVEL") {
            self.general.log_level = match level.to_ascii_lowercase().as_str() {
                "quiet" => LogLevel::Quiet,
                "normal" => LogLevel::Normal,
                "verbose" => LogLevel::Verbose,
                "debug" => LogLevel::Debug,
                other => {
                    return Err(FisError::new(
                        ErrorCode::InvalidConfigValue,
                        format!("Unknown log level '{}'", other),
                    )
                    .with_hint("Expected one of: quiet, normal, verbose, debug"));
                }
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variable_has_a_universe() {
        for id in VariableId::ALL {
            let u = universe_of(id).unwrap();
            assert!(u.len() > 1, "{} universe too small", id);
        }
    }

    #[test]
    fn test_input_bounds_follow_universe_spec() {
        assert_eq!(input_bounds(VariableId::Force), (0.0, 500.0));
        assert_eq!(input_bounds(VariableId::Speed), (0.0, 1.5));
        assert_eq!(input_bounds(VariableId::Mode), (1.0, 3.0));
    }

    #[test]
    fn test_center_tables_are_ascending() {
        let centers = force_centers();
        for pair in centers.windows(2) {
            assert!(pair[0].1 < pair[1].1);
        }
        let centers = fatigue_centers();
        for pair in centers.windows(2) {
            assert!(pair[0].1 < pair[1].1);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = GymFisConfig::default();
        assert_eq!(config.engine.family, MfFamily::Triangular);
        assert_eq!(config.general.log_level, LogLevel::Normal);
        assert_eq!(config.defaults.force, 250.0);
        assert_eq!(config.defaults.mode, 2.0);
    }

    #[test]
    fn test_config_from_toml() {
        let config = GymFisConfig::from_toml(
            r#"
            [general]
            log_level = "debug"

            [engine]
            family = "gaussian"

            [defaults]
            fatigue = 35.0
            "#,
        )
        .unwrap();

        assert_eq!(config.general.log_level, LogLevel::Debug);
        assert_eq!(config.engine.family, MfFamily::Gaussian);
        assert_eq!(config.defaults.fatigue, 35.0);
        // unspecified sections keep their defaults
        assert_eq!(config.defaults.force, 250.0);
    }

    #[test]
    fn test_config_rejects_malformed_toml() {
        assert!(GymFisConfig::from_toml("[engine\nfamily = ").is_err());
        assert!(GymFisConfig::from_toml("[engine]\nfamily = \"spline\"").is_err());
    }
}
