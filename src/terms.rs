//! Closed term enumerations for every linguistic variable.
//!
//! Each variable's term set is a small `Copy` enum rather than a
//! string-keyed map, so a rule clause can only ever name a term that
//! exists. Definition order (low to high along the universe) is also the
//! display order.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A variable's closed set of linguistic terms.
pub trait TermSet: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Every term, ordered low to high along the universe.
    fn all() -> &'static [Self];

    /// Stable snake_case identifier, used in snapshots and reports.
    fn name(self) -> &'static str;
}

// ============================================================================
// Input variables
// ============================================================================

/// Generated force, N, universe [0, 500].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl TermSet for ForceLevel {
    fn all() -> &'static [Self] {
        &[
            ForceLevel::VeryLow,
            ForceLevel::Low,
            ForceLevel::Medium,
            ForceLevel::High,
            ForceLevel::VeryHigh,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            ForceLevel::VeryLow => "very_low",
            ForceLevel::Low => "low",
            ForceLevel::Medium => "medium",
            ForceLevel::High => "high",
            ForceLevel::VeryHigh => "very_high",
        }
    }
}

/// Movement speed, m/s, universe [0, 1.5].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedLevel {
    VerySlow,
    Slow,
    Moderate,
    Fast,
    VeryFast,
}

impl TermSet for SpeedLevel {
    fn all() -> &'static [Self] {
        &[
            SpeedLevel::VerySlow,
            SpeedLevel::Slow,
            SpeedLevel::Moderate,
            SpeedLevel::Fast,
            SpeedLevel::VeryFast,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            SpeedLevel::VerySlow => "very_slow",
            SpeedLevel::Slow => "slow",
            SpeedLevel::Moderate => "moderate",
            SpeedLevel::Fast => "fast",
            SpeedLevel::VeryFast => "very_fast",
        }
    }
}

/// Movement phase, % of range of motion, universe [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPhase {
    Initial,
    Lower,
    Middle,
    Upper,
    Final,
}

impl TermSet for MovementPhase {
    fn all() -> &'static [Self] {
        &[
            MovementPhase::Initial,
            MovementPhase::Lower,
            MovementPhase::Middle,
            MovementPhase::Upper,
            MovementPhase::Final,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            MovementPhase::Initial => "initial",
            MovementPhase::Lower => "lower",
            MovementPhase::Middle => "middle",
            MovementPhase::Upper => "upper",
            MovementPhase::Final => "final",
        }
    }
}

/// Fatigue index, %, universe [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatigueLevel {
    Fresh,
    Light,
    Moderate,
    High,
    Exhausted,
}

impl TermSet for FatigueLevel {
    fn all() -> &'static [Self] {
        &[
            FatigueLevel::Fresh,
            FatigueLevel::Light,
            FatigueLevel::Moderate,
            FatigueLevel::High,
            FatigueLevel::Exhausted,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            FatigueLevel::Fresh => "fresh",
            FatigueLevel::Light => "light",
            FatigueLevel::Moderate => "moderate",
            FatigueLevel::High => "high",
            FatigueLevel::Exhausted => "exhausted",
        }
    }
}

/// Training mode, dimensionless, universe [1, 3].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingMode {
    Strength,
    Hypertrophy,
    Endurance,
}

impl TrainingMode {
    /// Crisp input value selecting this mode (1, 2 or 3).
    pub fn crisp(self) -> f64 {
        match self {
            TrainingMode::Strength => 1.0,
            TrainingMode::Hypertrophy => 2.0,
            TrainingMode::Endurance => 3.0,
        }
    }
}

impl TermSet for TrainingMode {
    fn all() -> &'static [Self] {
        &[
            TrainingMode::Strength,
            TrainingMode::Hypertrophy,
            TrainingMode::Endurance,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            TrainingMode::Strength => "strength",
            TrainingMode::Hypertrophy => "hypertrophy",
            TrainingMode::Endurance => "endurance",
        }
    }
}

// ============================================================================
// Output variables
// ============================================================================

/// Machine resistance, %, universe [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResistanceLevel {
    Minimal,
    Low,
    Medium,
    High,
    Maximal,
}

impl TermSet for ResistanceLevel {
    fn all() -> &'static [Self] {
        &[
            ResistanceLevel::Minimal,
            ResistanceLevel::Low,
            ResistanceLevel::Medium,
            ResistanceLevel::High,
            ResistanceLevel::Maximal,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            ResistanceLevel::Minimal => "minimal",
            ResistanceLevel::Low => "low",
            ResistanceLevel::Medium => "medium",
            ResistanceLevel::High => "high",
            ResistanceLevel::Maximal => "maximal",
        }
    }
}

/// Feedback signal, dimensionless, universe [1, 5]. Doubles as the
/// categorical label attached to a crisp feedback value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSignal {
    SlowDown,
    Good,
    Perfect,
    PushHarder,
    Stop,
}

impl FeedbackSignal {
    /// Uppercase display label for the user-facing feedback channel.
    pub fn label(self) -> &'static str {
        match self {
            FeedbackSignal::SlowDown => "SLOW_DOWN",
            FeedbackSignal::Good => "GOOD",
            FeedbackSignal::Perfect => "PERFECT",
            FeedbackSignal::PushHarder => "PUSH_HARDER",
            FeedbackSignal::Stop => "STOP",
        }
    }

    /// Categorize a crisp feedback value from [1, 5].
    pub fn from_crisp(value: f64) -> Self {
        if value < 1.5 {
            FeedbackSignal::SlowDown
        } else if value < 2.5 {
            FeedbackSignal::Good
        } else if value < 3.5 {
            FeedbackSignal::Perfect
        } else if value < 4.5 {
            FeedbackSignal::PushHarder
        } else {
            FeedbackSignal::Stop
        }
    }
}

impl TermSet for FeedbackSignal {
    fn all() -> &'static [Self] {
        &[
            FeedbackSignal::SlowDown,
            FeedbackSignal::Good,
            FeedbackSignal::Perfect,
            FeedbackSignal::PushHarder,
            FeedbackSignal::Stop,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            FeedbackSignal::SlowDown => "slow_down",
            FeedbackSignal::Good => "good",
            FeedbackSignal::Perfect => "perfect",
            FeedbackSignal::PushHarder => "push_harder",
            FeedbackSignal::Stop => "stop",
        }
    }
}

// ============================================================================
// Variable identifiers and rule clauses
// ============================================================================

/// Identifier of one of the seven linguistic variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableId {
    Force,
    Speed,
    Phase,
    Fatigue,
    Mode,
    Resistance,
    Feedback,
}

impl VariableId {
    /// All variables in presentation order: inputs first, then outputs.
    pub const ALL: [VariableId; 7] = [
        VariableId::Force,
        VariableId::Speed,
        VariableId::Phase,
        VariableId::Fatigue,
        VariableId::Mode,
        VariableId::Resistance,
        VariableId::Feedback,
    ];

    /// The five antecedent variables.
    pub const INPUTS: [VariableId; 5] = [
        VariableId::Force,
        VariableId::Speed,
        VariableId::Phase,
        VariableId::Fatigue,
        VariableId::Mode,
    ];

    pub fn identifier(self) -> &'static str {
        match self {
            VariableId::Force => "force",
            VariableId::Speed => "speed",
            VariableId::Phase => "phase",
            VariableId::Fatigue => "fatigue",
            VariableId::Mode => "mode",
            VariableId::Resistance => "resistance",
            VariableId::Feedback => "feedback",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VariableId::Force => "Generated Force",
            VariableId::Speed => "Movement Speed",
            VariableId::Phase => "Movement Phase",
            VariableId::Fatigue => "Fatigue Index",
            VariableId::Mode => "Training Mode",
            VariableId::Resistance => "Machine Resistance",
            VariableId::Feedback => "Feedback Signal",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            VariableId::Force => "N",
            VariableId::Speed => "m/s",
            VariableId::Phase => "% ROM",
            VariableId::Fatigue => "%",
            VariableId::Mode => "-",
            VariableId::Resistance => "%",
            VariableId::Feedback => "-",
        }
    }

    pub fn is_output(self) -> bool {
        matches!(self, VariableId::Resistance | VariableId::Feedback)
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// One `variable = term` clause of a rule antecedent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Antecedent {
    Force(ForceLevel),
    Speed(SpeedLevel),
    Phase(MovementPhase),
    Fatigue(FatigueLevel),
    Mode(TrainingMode),
}

impl Antecedent {
    pub fn variable(self) -> VariableId {
        match self {
            Antecedent::Force(_) => VariableId::Force,
            Antecedent::Speed(_) => VariableId::Speed,
            Antecedent::Phase(_) => VariableId::Phase,
            Antecedent::Fatigue(_) => VariableId::Fatigue,
            Antecedent::Mode(_) => VariableId::Mode,
        }
    }

    pub fn term_name(self) -> &'static str {
        match self {
            Antecedent::Force(t) => t.name(),
            Antecedent::Speed(t) => t.name(),
            Antecedent::Phase(t) => t.name(),
            Antecedent::Fatigue(t) => t.name(),
            Antecedent::Mode(t) => t.name(),
        }
    }
}

/// One `variable = term` assignment of a rule consequent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consequent {
    Resistance(ResistanceLevel),
    Feedback(FeedbackSignal),
}

impl Consequent {
    pub fn variable(self) -> VariableId {
        match self {
            Consequent::Resistance(_) => VariableId::Resistance,
            Consequent::Feedback(_) => VariableId::Feedback,
        }
    }

    pub fn term_name(self) -> &'static str {
        match self {
            Consequent::Resistance(t) => t.name(),
            Consequent::Feedback(t) => t.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_sets_are_ordered_low_to_high() {
        assert_eq!(ForceLevel::all().len(), 5);
        assert_eq!(ForceLevel::all()[0], ForceLevel::VeryLow);
        assert_eq!(ForceLevel::all()[4], ForceLevel::VeryHigh);
        assert_eq!(TrainingMode::all().len(), 3);
        assert_eq!(FeedbackSignal::all().len(), 5);
    }

    #[test]
    fn test_feedback_thresholds() {
        assert_eq!(FeedbackSignal::from_crisp(1.0), FeedbackSignal::SlowDown);
        assert_eq!(FeedbackSignal::from_crisp(1.49), FeedbackSignal::SlowDown);
        assert_eq!(FeedbackSignal::from_crisp(1.5), FeedbackSignal::Good);
        assert_eq!(FeedbackSignal::from_crisp(2.5), FeedbackSignal::Perfect);
        assert_eq!(FeedbackSignal::from_crisp(3.5), FeedbackSignal::PushHarder);
        assert_eq!(FeedbackSignal::from_crisp(4.5), FeedbackSignal::Stop);
        assert_eq!(FeedbackSignal::from_crisp(5.0), FeedbackSignal::Stop);
    }

    #[test]
    fn test_clause_variable_mapping() {
        let a = Antecedent::Fatigue(FatigueLevel::Exhausted);
        assert_eq!(a.variable(), VariableId::Fatigue);
        assert_eq!(a.term_name(), "exhausted");

        let c = Consequent::Resistance(ResistanceLevel::Minimal);
        assert_eq!(c.variable(), VariableId::Resistance);
        assert_eq!(c.term_name(), "minimal");
    }

    #[test]
    fn test_mode_crisp_values() {
        assert_eq!(TrainingMode::Strength.crisp(), 1.0);
        assert_eq!(TrainingMode::Hypertrophy.crisp(), 2.0);
        assert_eq!(TrainingMode::Endurance.crisp(), 3.0);
    }
}
