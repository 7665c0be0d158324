//! gymfis - Adaptive Gym Machine Fuzzy Inference System
//!
//! A Mamdani-type fuzzy inference engine that maps five continuous sensor
//! inputs (generated force, movement speed, movement phase, fatigue index,
//! training mode) to two continuous control outputs (machine resistance,
//! feedback signal) for an adaptive resistance-training machine.
//!
//! # Architecture
//!
//! The crate is organized around an explicit inference pipeline:
//!
//! - [`universe::Universe`] - evenly-spaced discretization of a variable's
//!   domain
//! - [`membership::MfShape`] - membership function shapes, sampled once at
//!   construction
//! - [`variable::LinguisticVariable`] - a universe plus an ordered map
//!   from term to membership array
//! - [`rules::RuleSet`] - the hand-curated fuzzy rule tables
//! - [`inference::infer`] - the five-step Mamdani pass with call-local
//!   session state
//! - [`machine::GymMachine`] - the facade binding one variable set and
//!   rule base
//! - [`service::FisService`] - validation, family switching and the
//!   cached membership snapshot for presentation layers
//!
//! # Features
//!
//! - 30-rule production base plus a reduced 15-rule experimental base
//! - Four membership-function families (triangular, gaussian, generalized
//!   bell, sigmoid) rebuilt from derived center points
//! - Min/max Mamdani operators with centroid defuzzification and a
//!   documented midpoint fallback
//! - Membership snapshot and tabular dump for plotting and documentation
//! - No mutable per-call state: `compute` is a pure function of the
//!   engine configuration and the input vector
//!
//! # Example
//!
//! ```rust,ignore
//! use gymfis::{GymMachine, Inputs};
//!
//! let machine = GymMachine::production()?;
//! let result = machine.compute(&Inputs {
//!     force: 250.0,
//!     speed: 0.7,
//!     phase: 50.0,
//!     fatigue: 20.0,
//!     mode: 2.0,
//! });
//!
//! println!("resistance: {:.1}%", result.resistance);
//! println!("feedback:   {:.2} ({})", result.feedback, result.feedback_text.label());
//! ```

pub mod config;
pub mod error;
pub mod inference;
pub mod machine;
pub mod membership;
pub mod rules;
pub mod scenarios;
pub mod service;
pub mod terms;
pub mod universe;
pub mod variable;

// Re-export error types
pub use error::{ErrorCode, ErrorResponse, FisError, FisResult};

// Re-export the numeric core
pub use membership::{MfFamily, MfShape};
pub use universe::Universe;

// Re-export term enumerations and clause types
pub use terms::{
    Antecedent, Consequent, FatigueLevel, FeedbackSignal, ForceLevel, MovementPhase,
    ResistanceLevel, SpeedLevel, TermSet, TrainingMode, VariableId,
};

// Re-export variables and rules
pub use rules::{experimental_rules, production_rules, Rule, RuleSet};
pub use variable::{
    LinguisticVariable, TermPeak, TermShape, TermSnapshot, VariableSet, VariableSnapshot,
};

// Re-export the inference surface
pub use inference::{infer, InferenceOutcome, Inputs, RuleActivation};
pub use machine::{ComputeResult, GymMachine, MembershipSnapshot};
pub use service::FisService;

// Re-export configuration types
pub use config::{DefaultInputs, EngineConfig, GeneralConfig, GymFisConfig, LogLevel};
