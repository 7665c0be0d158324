//! The fuzzy rule base.
//!
//! Rules are a fixed, hand-curated table of biomechanical domain
//! knowledge, supplied as static configuration. Each rule ANDs one to
//! three antecedent clauses (firing strength = minimum of the clause
//! degrees) and fires one or two consequent assignments together.
//!
//! Rule order has no effect on the inference result (aggregation is an
//! order-independent maximum) but is preserved for deterministic display.

use crate::terms::{
    Antecedent, Consequent, FatigueLevel, FeedbackSignal, ForceLevel, MovementPhase,
    ResistanceLevel, SpeedLevel, TrainingMode,
};

/// One fuzzy rule: an AND-conjunction of antecedent clauses and the
/// consequent assignments it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    antecedents: Vec<Antecedent>,
    consequents: Vec<Consequent>,
}

impl Rule {
    pub fn new(antecedents: Vec<Antecedent>, consequents: Vec<Consequent>) -> Self {
        debug_assert!(!antecedents.is_empty());
        debug_assert!(!consequents.is_empty());
        Self {
            antecedents,
            consequents,
        }
    }

    pub fn antecedents(&self) -> &[Antecedent] {
        &self.antecedents
    }

    pub fn consequents(&self) -> &[Consequent] {
        &self.consequents
    }

    /// `IF a AND b THEN x, y` rendering for reports.
    pub fn describe(&self) -> String {
        let ifs: Vec<String> = self
            .antecedents
            .iter()
            .map(|a| format!("{} is {}", a.variable(), a.term_name()))
            .collect();
        let thens: Vec<String> = self
            .consequents
            .iter()
            .map(|c| format!("{} is {}", c.variable(), c.term_name()))
            .collect();
        format!("IF {} THEN {}", ifs.join(" AND "), thens.join(", "))
    }
}

/// An ordered, immutable collection of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }
}

/// The production rule base: 30 rules.
///
/// Grouped the way the domain experts authored them: accommodating
/// resistance over the movement phase, speed control, fatigue management,
/// training-mode profiles, safety floors, and combined three-clause
/// refinements.
pub fn production_rules() -> RuleSet {
    use Antecedent::{Fatigue, Force, Mode, Phase, Speed};
    use Consequent::{Feedback, Resistance};

    let rules = vec![
        // Accommodating resistance across the movement phase
        Rule::new(
            vec![Phase(MovementPhase::Initial), Force(ForceLevel::Medium)],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::Good),
            ],
        ),
        Rule::new(
            vec![Phase(MovementPhase::Lower), Force(ForceLevel::Medium)],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Good),
            ],
        ),
        Rule::new(
            vec![Phase(MovementPhase::Middle), Force(ForceLevel::Low)],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::PushHarder),
            ],
        ),
        Rule::new(
            vec![Phase(MovementPhase::Middle), Force(ForceLevel::Medium)],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![Phase(MovementPhase::Upper), Force(ForceLevel::High)],
            vec![
                Resistance(ResistanceLevel::High),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![Phase(MovementPhase::Final), Force(ForceLevel::VeryHigh)],
            vec![
                Resistance(ResistanceLevel::Maximal),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        // Speed control
        Rule::new(
            vec![Speed(SpeedLevel::VeryFast), Fatigue(FatigueLevel::Fresh)],
            vec![
                Resistance(ResistanceLevel::High),
                Feedback(FeedbackSignal::SlowDown),
            ],
        ),
        Rule::new(
            vec![Speed(SpeedLevel::Fast), Mode(TrainingMode::Strength)],
            vec![
                Resistance(ResistanceLevel::High),
                Feedback(FeedbackSignal::Good),
            ],
        ),
        Rule::new(
            vec![Speed(SpeedLevel::Moderate), Mode(TrainingMode::Hypertrophy)],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![Speed(SpeedLevel::Slow), Fatigue(FatigueLevel::Light)],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Good),
            ],
        ),
        Rule::new(
            vec![Speed(SpeedLevel::VerySlow), Fatigue(FatigueLevel::High)],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::Stop),
            ],
        ),
        // Fatigue management
        Rule::new(
            vec![Fatigue(FatigueLevel::Fresh), Force(ForceLevel::VeryHigh)],
            vec![
                Resistance(ResistanceLevel::Maximal),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![Fatigue(FatigueLevel::Light), Force(ForceLevel::Medium)],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Good),
            ],
        ),
        Rule::new(
            vec![Fatigue(FatigueLevel::Moderate), Force(ForceLevel::Medium)],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::Good),
            ],
        ),
        Rule::new(
            vec![Fatigue(FatigueLevel::High), Force(ForceLevel::Low)],
            vec![
                Resistance(ResistanceLevel::Minimal),
                Feedback(FeedbackSignal::Stop),
            ],
        ),
        Rule::new(
            vec![Fatigue(FatigueLevel::Exhausted)],
            vec![
                Resistance(ResistanceLevel::Minimal),
                Feedback(FeedbackSignal::Stop),
            ],
        ),
        // Training-mode profiles
        Rule::new(
            vec![
                Mode(TrainingMode::Strength),
                Force(ForceLevel::VeryHigh),
                Fatigue(FatigueLevel::Fresh),
            ],
            vec![
                Resistance(ResistanceLevel::Maximal),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![
                Mode(TrainingMode::Strength),
                Force(ForceLevel::Medium),
                Phase(MovementPhase::Upper),
            ],
            vec![
                Resistance(ResistanceLevel::High),
                Feedback(FeedbackSignal::PushHarder),
            ],
        ),
        Rule::new(
            vec![
                Mode(TrainingMode::Hypertrophy),
                Speed(SpeedLevel::Moderate),
                Fatigue(FatigueLevel::Light),
            ],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![
                Mode(TrainingMode::Hypertrophy),
                Fatigue(FatigueLevel::Moderate),
            ],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::PushHarder),
            ],
        ),
        Rule::new(
            vec![Mode(TrainingMode::Endurance), Speed(SpeedLevel::Fast)],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![
                Mode(TrainingMode::Endurance),
                Fatigue(FatigueLevel::Moderate),
            ],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::Good),
            ],
        ),
        // Safety floors for very low force
        Rule::new(
            vec![Force(ForceLevel::VeryLow), Phase(MovementPhase::Initial)],
            vec![
                Resistance(ResistanceLevel::Minimal),
                Feedback(FeedbackSignal::PushHarder),
            ],
        ),
        Rule::new(
            vec![Force(ForceLevel::VeryLow), Fatigue(FatigueLevel::High)],
            vec![
                Resistance(ResistanceLevel::Minimal),
                Feedback(FeedbackSignal::Stop),
            ],
        ),
        Rule::new(
            vec![Force(ForceLevel::VeryHigh), Fatigue(FatigueLevel::Exhausted)],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::Stop),
            ],
        ),
        // Combined three-clause refinements
        Rule::new(
            vec![
                Phase(MovementPhase::Initial),
                Speed(SpeedLevel::VerySlow),
                Force(ForceLevel::Low),
            ],
            vec![
                Resistance(ResistanceLevel::Minimal),
                Feedback(FeedbackSignal::PushHarder),
            ],
        ),
        Rule::new(
            vec![
                Phase(MovementPhase::Middle),
                Speed(SpeedLevel::Moderate),
                Force(ForceLevel::Medium),
            ],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![
                Phase(MovementPhase::Final),
                Speed(SpeedLevel::Fast),
                Force(ForceLevel::High),
            ],
            vec![
                Resistance(ResistanceLevel::Maximal),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![
                Phase(MovementPhase::Upper),
                Mode(TrainingMode::Strength),
                Force(ForceLevel::High),
            ],
            vec![
                Resistance(ResistanceLevel::High),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![
                Phase(MovementPhase::Lower),
                Speed(SpeedLevel::Slow),
                Mode(TrainingMode::Hypertrophy),
            ],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
    ];

    RuleSet::new(rules)
}

/// The reduced rule base used by the alternate-family configurations:
/// 15 rules.
pub fn experimental_rules() -> RuleSet {
    use Antecedent::{Fatigue, Force, Mode, Phase, Speed};
    use Consequent::{Feedback, Resistance};

    let rules = vec![
        // Accommodating resistance
        Rule::new(
            vec![Phase(MovementPhase::Initial), Force(ForceLevel::Medium)],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::Good),
            ],
        ),
        Rule::new(
            vec![Phase(MovementPhase::Lower), Force(ForceLevel::Medium)],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Good),
            ],
        ),
        Rule::new(
            vec![Phase(MovementPhase::Middle), Force(ForceLevel::Low)],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::PushHarder),
            ],
        ),
        Rule::new(
            vec![Phase(MovementPhase::Middle), Force(ForceLevel::Medium)],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![Phase(MovementPhase::Upper), Force(ForceLevel::High)],
            vec![
                Resistance(ResistanceLevel::High),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![Phase(MovementPhase::Final), Force(ForceLevel::VeryHigh)],
            vec![
                Resistance(ResistanceLevel::Maximal),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        // Speed
        Rule::new(
            vec![Speed(SpeedLevel::VeryFast), Fatigue(FatigueLevel::Fresh)],
            vec![
                Resistance(ResistanceLevel::High),
                Feedback(FeedbackSignal::SlowDown),
            ],
        ),
        Rule::new(
            vec![Speed(SpeedLevel::VerySlow), Fatigue(FatigueLevel::Fresh)],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::PushHarder),
            ],
        ),
        Rule::new(
            vec![Speed(SpeedLevel::Slow), Fatigue(FatigueLevel::Light)],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Good),
            ],
        ),
        // Fatigue
        Rule::new(
            vec![Fatigue(FatigueLevel::Exhausted)],
            vec![
                Resistance(ResistanceLevel::Minimal),
                Feedback(FeedbackSignal::Stop),
            ],
        ),
        Rule::new(
            vec![Fatigue(FatigueLevel::High), Force(ForceLevel::Low)],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::PushHarder),
            ],
        ),
        Rule::new(
            vec![
                Fatigue(FatigueLevel::Moderate),
                Mode(TrainingMode::Hypertrophy),
            ],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        // Modes
        Rule::new(
            vec![Mode(TrainingMode::Strength), Force(ForceLevel::VeryHigh)],
            vec![
                Resistance(ResistanceLevel::Maximal),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
        Rule::new(
            vec![Mode(TrainingMode::Endurance)],
            vec![
                Resistance(ResistanceLevel::Low),
                Feedback(FeedbackSignal::Good),
            ],
        ),
        // Default posture
        Rule::new(
            vec![
                Force(ForceLevel::Medium),
                Speed(SpeedLevel::Moderate),
                Fatigue(FatigueLevel::Light),
            ],
            vec![
                Resistance(ResistanceLevel::Medium),
                Feedback(FeedbackSignal::Perfect),
            ],
        ),
    ];

    RuleSet::new(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::VariableId;

    #[test]
    fn test_production_base_has_30_rules() {
        assert_eq!(production_rules().len(), 30);
    }

    #[test]
    fn test_experimental_base_has_15_rules() {
        assert_eq!(experimental_rules().len(), 15);
    }

    #[test]
    fn test_rule_arity_bounds() {
        for set in [production_rules(), experimental_rules()] {
            for rule in set.iter() {
                assert!((1..=3).contains(&rule.antecedents().len()), "{:?}", rule);
                assert!((1..=2).contains(&rule.consequents().len()), "{:?}", rule);
            }
        }
    }

    #[test]
    fn test_no_rule_repeats_a_variable_in_its_antecedent() {
        use std::collections::HashSet;

        for set in [production_rules(), experimental_rules()] {
            for rule in set.iter() {
                let vars: HashSet<VariableId> =
                    rule.antecedents().iter().map(|a| a.variable()).collect();
                assert_eq!(vars.len(), rule.antecedents().len(), "{}", rule.describe());
            }
        }
    }

    #[test]
    fn test_every_rule_drives_both_outputs() {
        // the curated tables always assign resistance and feedback together
        for set in [production_rules(), experimental_rules()] {
            for rule in set.iter() {
                let outputs: Vec<VariableId> =
                    rule.consequents().iter().map(|c| c.variable()).collect();
                assert!(outputs.contains(&VariableId::Resistance), "{}", rule.describe());
                assert!(outputs.contains(&VariableId::Feedback), "{}", rule.describe());
            }
        }
    }

    #[test]
    fn test_exhaustion_rule_is_single_clause() {
        let set = production_rules();
        let exhausted = set
            .iter()
            .find(|r| {
                r.antecedents().len() == 1
                    && r.antecedents()[0] == Antecedent::Fatigue(FatigueLevel::Exhausted)
            })
            .expect("exhaustion safety rule present");
        assert_eq!(
            exhausted.consequents()[0],
            Consequent::Resistance(ResistanceLevel::Minimal)
        );
        assert_eq!(
            exhausted.consequents()[1],
            Consequent::Feedback(FeedbackSignal::Stop)
        );
    }

    #[test]
    fn test_describe_renders_if_then() {
        let rule = Rule::new(
            vec![Antecedent::Fatigue(FatigueLevel::Exhausted)],
            vec![Consequent::Resistance(ResistanceLevel::Minimal)],
        );
        assert_eq!(
            rule.describe(),
            "IF fatigue is exhausted THEN resistance is minimal"
        );
    }
}
