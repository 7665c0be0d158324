//! The gym machine facade.
//!
//! [`GymMachine`] binds a fixed variable set and rule base to the Mamdani
//! inference pass and exposes the control surface the rest of the system
//! consumes: [`GymMachine::compute`], the membership snapshot for
//! rendering layers, and the tabular membership dump for documentation.
//!
//! Two configurations exist:
//! - [`GymMachine::production`] - hand-tuned triangular/trapezoidal terms
//!   and the full 30-rule base
//! - [`GymMachine::with_family`] - terms rebuilt from derived centers
//!   under the chosen family, with the reduced 15-rule base, for
//!   comparative study

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::FisResult;
use crate::inference::{infer, Inputs, RuleActivation};
use crate::membership::MfFamily;
use crate::rules::{experimental_rules, production_rules, RuleSet};
use crate::terms::FeedbackSignal;
use crate::variable::{VariableSet, VariableSnapshot};

/// Structurally complete result of one `compute` call.
///
/// Always carries usable output values; failures downgrade to the
/// documented fallback (resistance 50.0, feedback 3.0) and surface through
/// `error` instead of panicking or returning `Err`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeResult {
    /// Machine resistance, % of maximum, in [0, 100].
    pub resistance: f64,
    /// Feedback signal, in [1, 5].
    pub feedback: f64,
    /// Categorical label of `feedback` per the fixed thresholds.
    pub feedback_text: FeedbackSignal,
    /// Present when the engine had to fall back (no rule fired) or the
    /// service rejected the inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComputeResult {
    /// The documented safe fallback output.
    pub fn fallback(error: impl Into<String>) -> Self {
        let feedback = 3.0;
        Self {
            resistance: 50.0,
            feedback,
            feedback_text: FeedbackSignal::from_crisp(feedback),
            error: Some(error.into()),
        }
    }
}

/// Read-only copy of every variable's universe and term arrays, tagged
/// with the family it was built under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipSnapshot {
    pub family: MfFamily,
    pub variables: Vec<VariableSnapshot>,
}

/// Adaptive resistance-training controller: seven linguistic variables,
/// one rule base, one inference method. Immutable after construction; a
/// single instance may be shared across threads.
#[derive(Debug, Clone)]
pub struct GymMachine {
    family: MfFamily,
    variables: VariableSet,
    rules: RuleSet,
}

impl GymMachine {
    /// The production configuration: hand-tuned triangular/trapezoidal
    /// membership functions and the full 30-rule base.
    pub fn production() -> FisResult<Self> {
        let variables = VariableSet::hand_tuned()?;
        let rules = production_rules();
        info!(rules = rules.len(), "built production gym machine");
        Ok(Self {
            family: MfFamily::Triangular,
            variables,
            rules,
        })
    }

    /// An experimental configuration: variables rebuilt under `family`
    /// from derived center points, with the reduced 15-rule base.
    pub fn with_family(family: MfFamily) -> FisResult<Self> {
        let variables = VariableSet::derived(family)?;
        let rules = experimental_rules();
        info!(%family, rules = rules.len(), "built experimental gym machine");
        Ok(Self {
            family,
            variables,
            rules,
        })
    }

    pub fn family(&self) -> MfFamily {
        self.family
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    /// Map crisp sensor inputs to crisp control outputs.
    ///
    /// Performs no input validation (that is the calling layer's
    /// contract); out-of-universe values clamp to the boundary sample.
    /// Always returns a structurally complete result: when no rule fires
    /// for an output, its value falls back to the universe midpoint and
    /// `error` names the affected outputs.
    pub fn compute(&self, inputs: &Inputs) -> ComputeResult {
        let outcome = infer(&self.variables, &self.rules, inputs);

        let error = if outcome.degenerate.is_empty() {
            None
        } else {
            let names: Vec<&str> = outcome
                .degenerate
                .iter()
                .map(|id| id.identifier())
                .collect();
            let message = format!(
                "no rule fired for output(s): {}; returned fallback values",
                names.join(", ")
            );
            warn!(%message, ?inputs, "degenerate aggregation");
            Some(message)
        };

        ComputeResult {
            resistance: outcome.resistance,
            feedback: outcome.feedback,
            feedback_text: FeedbackSignal::from_crisp(outcome.feedback),
            error,
        }
    }

    /// Convenience wrapper over [`GymMachine::compute`] taking the five
    /// inputs positionally.
    pub fn compute_values(
        &self,
        force: f64,
        speed: f64,
        phase: f64,
        fatigue: f64,
        mode: f64,
    ) -> ComputeResult {
        self.compute(&Inputs {
            force,
            speed,
            phase,
            fatigue,
            mode,
        })
    }

    /// Per-rule firing strengths at `inputs`, for explanation and
    /// reporting. Rules that did not fire are omitted.
    pub fn activations(&self, inputs: &Inputs) -> Vec<RuleActivation> {
        infer(&self.variables, &self.rules, inputs).activations
    }

    /// Read-only copy of every variable's terms for plotting/GUI layers.
    pub fn membership_snapshot(&self) -> MembershipSnapshot {
        MembershipSnapshot {
            family: self.family,
            variables: self.variables.snapshots(),
        }
    }

    /// Tabular dump of each variable's terms with shape parameters
    /// recovered from the stored membership arrays.
    pub fn membership_table(&self) -> String {
        self.variables.table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::TrainingMode;

    fn machine() -> GymMachine {
        GymMachine::production().unwrap()
    }

    #[test]
    fn test_compute_returns_valid_ranges() {
        let result = machine().compute_values(250.0, 0.7, 50.0, 20.0, 2.0);

        assert!((0.0..=100.0).contains(&result.resistance));
        assert!((1.0..=5.0).contains(&result.feedback));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_feedback_text_matches_thresholds() {
        let m = machine();
        let inputs = [
            (250.0, 0.7, 50.0, 20.0, 2.0),
            (120.0, 0.15, 40.0, 90.0, 2.0),
            (200.0, 1.4, 90.0, 5.0, 2.0),
            (350.0, 0.4, 15.0, 5.0, 1.0),
            (0.0, 0.0, 0.0, 0.0, 1.0),
            (500.0, 1.5, 100.0, 100.0, 3.0),
        ];

        for (force, speed, phase, fatigue, mode) in inputs {
            let result = m.compute_values(force, speed, phase, fatigue, mode);
            assert_eq!(
                result.feedback_text,
                FeedbackSignal::from_crisp(result.feedback),
                "label drifted from value at force={}",
                force
            );
        }
    }

    #[test]
    fn test_compute_is_idempotent() {
        let m = machine();
        let first = m.compute_values(300.0, 0.9, 60.0, 35.0, 1.0);
        let second = m.compute_values(300.0, 0.9, 60.0, 35.0, 1.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_scenario_fresh_user_initial_phase() {
        // documented scenario: strong push at the very start of the
        // movement under strength mode; no dedicated rule covers it, so
        // the engine reports the fallback band
        let result = machine().compute_values(350.0, 0.4, 15.0, 5.0, 1.0);

        assert!(
            result.resistance >= 15.0 && result.resistance <= 65.0,
            "resistance {} outside low-to-medium band",
            result.resistance
        );
        assert!(result.feedback >= 1.5, "feedback {}", result.feedback);
    }

    #[test]
    fn test_scenario_exhaustion_stops_the_machine() {
        let result = machine().compute_values(120.0, 0.15, 40.0, 90.0, 2.0);

        assert!(
            result.resistance < 20.0,
            "resistance {} not minimal",
            result.resistance
        );
        assert_eq!(result.feedback_text, FeedbackSignal::Stop);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_scenario_too_fast_while_fresh() {
        let result = machine().compute_values(200.0, 1.4, 90.0, 5.0, 2.0);

        assert!(
            result.resistance >= 55.0 && result.resistance <= 85.0,
            "resistance {} not in high band",
            result.resistance
        );
        assert_eq!(result.feedback_text, FeedbackSignal::SlowDown);
    }

    #[test]
    fn test_boundary_inputs_do_not_panic() {
        let m = machine();
        for (force, speed, phase, fatigue, mode) in [
            (0.0, 0.0, 0.0, 0.0, 1.0),
            (500.0, 1.5, 100.0, 100.0, 3.0),
            (0.0, 1.5, 0.0, 100.0, 1.0),
            (500.0, 0.0, 100.0, 0.0, 3.0),
        ] {
            let result = m.compute_values(force, speed, phase, fatigue, mode);
            assert!((0.0..=100.0).contains(&result.resistance));
            assert!((1.0..=5.0).contains(&result.feedback));
        }
    }

    #[test]
    fn test_family_switch_changes_arrays_but_not_structure() {
        let triangular = GymMachine::with_family(MfFamily::Triangular).unwrap();
        let gaussian = GymMachine::with_family(MfFamily::Gaussian).unwrap();

        let a = triangular.membership_snapshot();
        let b = gaussian.membership_snapshot();

        assert_eq!(a.variables.len(), b.variables.len());
        let mut some_array_differs = false;
        for (va, vb) in a.variables.iter().zip(b.variables.iter()) {
            assert_eq!(va.identifier, vb.identifier);
            assert_eq!(va.terms.len(), vb.terms.len());
            for (ta, tb) in va.terms.iter().zip(vb.terms.iter()) {
                assert_eq!(ta.name, tb.name);
                if ta.degrees != tb.degrees {
                    some_array_differs = true;
                }
            }
        }
        assert!(some_array_differs);
    }

    #[test]
    fn test_coverage_invariant_across_snapshot() {
        for snapshot in [
            machine().membership_snapshot(),
            GymMachine::with_family(MfFamily::Sigmoid)
                .unwrap()
                .membership_snapshot(),
        ] {
            for variable in &snapshot.variables {
                for i in 0..variable.universe.len() {
                    let covered = variable.terms.iter().any(|t| t.degrees[i] > 0.0);
                    assert!(
                        covered,
                        "{} uncovered at {}",
                        variable.identifier, variable.universe[i]
                    );
                }
            }
        }
    }

    #[test]
    fn test_activations_report_fired_rules() {
        let m = machine();
        let inputs = Inputs {
            force: 120.0,
            speed: 0.15,
            phase: 40.0,
            fatigue: 90.0,
            mode: TrainingMode::Hypertrophy.crisp(),
        };

        let activations = m.activations(&inputs);
        assert_eq!(activations.len(), 1);
        assert_eq!(activations[0].rule, 15);
    }

    #[test]
    fn test_fallback_result_shape() {
        let result = ComputeResult::fallback("bad input");
        assert_eq!(result.resistance, 50.0);
        assert_eq!(result.feedback, 3.0);
        assert_eq!(result.feedback_text, FeedbackSignal::from_crisp(3.0));
        assert!(result.error.is_some());
    }

    #[test]
    fn test_result_serializes_to_json() {
        let result = machine().compute_values(250.0, 0.7, 50.0, 20.0, 2.0);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("resistance"));
        assert!(json.contains("feedback_text"));
        // no error field when nothing went wrong
        assert!(!json.contains("error"));
    }
}
