//! The Mamdani inference pass.
//!
//! Implements the five-step algorithm explicitly, instead of delegating to
//! an opaque solver:
//!
//! 1. Fuzzify: membership degree of each antecedent clause at the crisp
//!    input, by linear interpolation of the stored term array
//! 2. Firing strength per rule: minimum over its clause degrees (fuzzy AND)
//! 3. Clip each fired consequent term at the rule's firing strength
//! 4. Aggregate per output variable: elementwise maximum across all
//!    clipped arrays
//! 5. Defuzzify via centroid, falling back to the universe midpoint when
//!    an output received no contribution at all
//!
//! All scratch state lives in a call-local [`Session`], created and
//! discarded inside [`infer`]. The engine holds no mutable per-call state,
//! so repeated calls cannot leak aggregation from one inference into the
//! next, and a single engine may be shared across threads.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rules::RuleSet;
use crate::terms::{Antecedent, Consequent, VariableId};
use crate::variable::VariableSet;

/// Crisp input assignment for one inference call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    /// Generated force, N.
    pub force: f64,
    /// Movement speed, m/s.
    pub speed: f64,
    /// Movement phase, % of range of motion.
    pub phase: f64,
    /// Fatigue index, %.
    pub fatigue: f64,
    /// Training mode, 1 (strength) to 3 (endurance).
    pub mode: f64,
}

/// Firing strength of one rule, by rule index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleActivation {
    pub rule: usize,
    pub strength: f64,
}

/// Crisp result of one inference pass.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceOutcome {
    pub resistance: f64,
    pub feedback: f64,
    /// Output variables whose aggregate was zero everywhere and fell back
    /// to the universe midpoint.
    pub degenerate: Vec<VariableId>,
    /// Rules that fired (strength > 0), in rule order.
    pub activations: Vec<RuleActivation>,
}

/// Per-call scratch space: the aggregated membership array of each output
/// variable plus the activation record. Never stored on the engine.
struct Session<'a> {
    vars: &'a VariableSet,
    inputs: &'a Inputs,
    resistance_agg: Vec<f64>,
    feedback_agg: Vec<f64>,
    activations: Vec<RuleActivation>,
}

impl<'a> Session<'a> {
    fn new(vars: &'a VariableSet, inputs: &'a Inputs) -> Self {
        Self {
            vars,
            inputs,
            resistance_agg: vec![0.0; vars.resistance.universe().len()],
            feedback_agg: vec![0.0; vars.feedback.universe().len()],
            activations: Vec::new(),
        }
    }

    /// Membership degree of one antecedent clause at the crisp input.
    fn clause_degree(&self, clause: Antecedent) -> f64 {
        match clause {
            Antecedent::Force(term) => self.vars.force.degree(term, self.inputs.force),
            Antecedent::Speed(term) => self.vars.speed.degree(term, self.inputs.speed),
            Antecedent::Phase(term) => self.vars.phase.degree(term, self.inputs.phase),
            Antecedent::Fatigue(term) => self.vars.fatigue.degree(term, self.inputs.fatigue),
            Antecedent::Mode(term) => self.vars.mode.degree(term, self.inputs.mode),
        }
    }

    /// Clip `consequent`'s term array at `strength` and merge it into the
    /// output's aggregate via elementwise maximum.
    fn clip_into_aggregate(&mut self, consequent: Consequent, strength: f64) {
        let (term_degrees, aggregate) = match consequent {
            Consequent::Resistance(term) => (
                self.vars.resistance.degrees(term),
                &mut self.resistance_agg,
            ),
            Consequent::Feedback(term) => {
                (self.vars.feedback.degrees(term), &mut self.feedback_agg)
            }
        };

        let term_degrees = match term_degrees {
            Some(d) => d,
            None => return,
        };

        for (agg, &d) in aggregate.iter_mut().zip(term_degrees.iter()) {
            let clipped = d.min(strength);
            if clipped > *agg {
                *agg = clipped;
            }
        }
    }

    fn run(mut self, rules: &RuleSet) -> InferenceOutcome {
        for (index, rule) in rules.iter().enumerate() {
            let strength = rule
                .antecedents()
                .iter()
                .map(|&clause| self.clause_degree(clause))
                .fold(1.0, f64::min);

            if strength <= 0.0 {
                continue;
            }
            self.activations.push(RuleActivation {
                rule: index,
                strength,
            });

            for &consequent in rule.consequents() {
                self.clip_into_aggregate(consequent, strength);
            }
        }

        let mut degenerate = Vec::new();

        let resistance = match self.vars.resistance.universe().centroid(&self.resistance_agg) {
            Some(value) => value,
            None => {
                degenerate.push(VariableId::Resistance);
                self.vars.resistance.universe().midpoint()
            }
        };
        let feedback = match self.vars.feedback.universe().centroid(&self.feedback_agg) {
            Some(value) => value,
            None => {
                degenerate.push(VariableId::Feedback);
                self.vars.feedback.universe().midpoint()
            }
        };

        debug!(
            fired = self.activations.len(),
            resistance, feedback, "inference pass complete"
        );

        InferenceOutcome {
            resistance,
            feedback,
            degenerate,
            activations: self.activations,
        }
    }
}

/// Run one full inference pass. Pure in the engine configuration and the
/// input vector; every invocation builds and discards its own session.
pub fn infer(vars: &VariableSet, rules: &RuleSet, inputs: &Inputs) -> InferenceOutcome {
    Session::new(vars, inputs).run(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::MfFamily;
    use crate::rules::{experimental_rules, production_rules};

    fn production() -> (VariableSet, RuleSet) {
        (VariableSet::hand_tuned().unwrap(), production_rules())
    }

    #[test]
    fn test_exhausted_input_fires_the_safety_rule_fully() {
        let (vars, rules) = production();
        let inputs = Inputs {
            force: 120.0,
            speed: 0.15,
            phase: 40.0,
            fatigue: 90.0,
            mode: 2.0,
        };

        let outcome = infer(&vars, &rules, &inputs);

        // only the single-clause exhaustion rule fires, at full strength
        assert_eq!(outcome.activations.len(), 1);
        assert!((outcome.activations[0].strength - 1.0).abs() < 1e-9);
        assert!(outcome.degenerate.is_empty());

        // centroid of the full "minimal" trapezoid
        assert!(outcome.resistance < 15.0, "resistance {}", outcome.resistance);
        // centroid of the full "stop" triangle
        assert!(outcome.feedback > 4.5, "feedback {}", outcome.feedback);
    }

    #[test]
    fn test_no_fired_rule_falls_back_to_midpoints() {
        let (vars, rules) = production();
        // high force in the initial phase matches no production rule
        let inputs = Inputs {
            force: 350.0,
            speed: 0.4,
            phase: 15.0,
            fatigue: 5.0,
            mode: 1.0,
        };

        let outcome = infer(&vars, &rules, &inputs);

        assert!(outcome.activations.is_empty());
        assert_eq!(
            outcome.degenerate,
            vec![VariableId::Resistance, VariableId::Feedback]
        );
        assert!((outcome.resistance - 50.0).abs() < 1e-9);
        assert!((outcome.feedback - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_firing_strength_is_minimum_over_clauses() {
        let (vars, rules) = production();
        // middle phase fully active, medium force at half activation:
        // the conjunction fires at the weaker degree
        let inputs = Inputs {
            force: 200.0,
            speed: 0.7,
            phase: 50.0,
            fatigue: 20.0,
            mode: 2.0,
        };

        let outcome = infer(&vars, &rules, &inputs);
        let rule4 = outcome
            .activations
            .iter()
            .find(|a| a.rule == 3)
            .expect("middle/medium rule fired");
        assert!((rule4.strength - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_outputs_stay_inside_their_universes() {
        let (vars, rules) = production();
        let grid_force = [0.0, 100.0, 250.0, 400.0, 500.0];
        let grid_speed = [0.0, 0.4, 0.8, 1.2, 1.5];
        let grid_fatigue = [0.0, 25.0, 50.0, 75.0, 100.0];

        for &force in &grid_force {
            for &speed in &grid_speed {
                for &fatigue in &grid_fatigue {
                    let inputs = Inputs {
                        force,
                        speed,
                        phase: 50.0,
                        fatigue,
                        mode: 2.0,
                    };
                    let outcome = infer(&vars, &rules, &inputs);
                    assert!(
                        (0.0..=100.0).contains(&outcome.resistance),
                        "resistance {} at {:?}",
                        outcome.resistance,
                        inputs
                    );
                    assert!(
                        (1.0..=5.0).contains(&outcome.feedback),
                        "feedback {} at {:?}",
                        outcome.feedback,
                        inputs
                    );
                }
            }
        }
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let (vars, rules) = production();
        let inputs = Inputs {
            force: 250.0,
            speed: 0.7,
            phase: 50.0,
            fatigue: 20.0,
            mode: 2.0,
        };

        let first = infer(&vars, &rules, &inputs);
        let second = infer(&vars, &rules, &inputs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_experimental_families_produce_in_range_outputs() {
        let rules = experimental_rules();
        for family in MfFamily::ALL {
            let vars = VariableSet::derived(family).unwrap();
            let inputs = Inputs {
                force: 250.0,
                speed: 0.7,
                phase: 50.0,
                fatigue: 20.0,
                mode: 2.0,
            };

            let outcome = infer(&vars, &rules, &inputs);
            assert!(
                (0.0..=100.0).contains(&outcome.resistance),
                "family {}: resistance {}",
                family,
                outcome.resistance
            );
            assert!(
                (1.0..=5.0).contains(&outcome.feedback),
                "family {}: feedback {}",
                family,
                outcome.feedback
            );
            assert!(!outcome.activations.is_empty(), "family {}", family);
        }
    }
}
