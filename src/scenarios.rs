//! Biomechanical inference scenarios.
//!
//! A fixed table of named training situations with domain expectations,
//! plus a plausibility check over the computed outputs and a comparison
//! driver that tabulates the scenario set under every membership-function
//! family. Consumed by the command-line driver; carries no inference
//! logic of its own.

use crate::error::FisResult;
use crate::inference::Inputs;
use crate::machine::ComputeResult;
use crate::membership::MfFamily;
use crate::service::FisService;

/// One named training situation with its domain expectation.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub inputs: Inputs,
    pub expectation: &'static str,
    pub rationale: &'static str,
}

/// Outcome of running one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub result: ComputeResult,
    pub plausible: bool,
}

/// The fixed scenario table, in presentation order.
pub fn scenario_suite() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "Fresh user, start of movement, strength mode",
            inputs: Inputs {
                force: 350.0,
                speed: 0.4,
                phase: 15.0,
                fatigue: 5.0,
                mode: 1.0,
            },
            expectation: "Low/medium resistance (weak mechanical position), positive feedback",
            rationale: "In the initial (stretched) position the moment arm is unfavorable.",
        },
        Scenario {
            name: "Sticking point - mid movement, force drop",
            inputs: Inputs {
                force: 180.0,
                speed: 0.25,
                phase: 50.0,
                fatigue: 30.0,
                mode: 2.0,
            },
            expectation: "Low resistance (help through the sticking point), push-harder feedback",
            rationale: "The sticking point is where the available torque is lowest.",
        },
        Scenario {
            name: "Lockout - end of movement, high force",
            inputs: Inputs {
                force: 420.0,
                speed: 0.8,
                phase: 90.0,
                fatigue: 20.0,
                mode: 1.0,
            },
            expectation: "High/maximal resistance (favorable leverage), perfect feedback",
            rationale: "At lockout the mechanical leverage is optimal.",
        },
        Scenario {
            name: "Fatigued user, hypertrophy",
            inputs: Inputs {
                force: 200.0,
                speed: 0.5,
                phase: 60.0,
                fatigue: 65.0,
                mode: 2.0,
            },
            expectation: "Low resistance (automatic drop-set under fatigue)",
            rationale: "Hypertrophy training reduces the load as fatigue accumulates.",
        },
        Scenario {
            name: "Exhaustion - final repetition",
            inputs: Inputs {
                force: 120.0,
                speed: 0.15,
                phase: 40.0,
                fatigue: 90.0,
                mode: 2.0,
            },
            expectation: "Minimal resistance, STOP signal (safety)",
            rationale: "Exhaustion with very low force is a dangerous situation.",
        },
        Scenario {
            name: "Endurance mode, fast tempo",
            inputs: Inputs {
                force: 180.0,
                speed: 1.1,
                phase: 70.0,
                fatigue: 40.0,
                mode: 3.0,
            },
            expectation: "Low resistance (endurance training profile)",
            rationale: "Endurance training is characterized by low resistance.",
        },
        Scenario {
            name: "Movement too fast - resistance should rise",
            inputs: Inputs {
                force: 280.0,
                speed: 1.4,
                phase: 50.0,
                fatigue: 10.0,
                mode: 2.0,
            },
            expectation: "High resistance (load too light), slow-down feedback",
            rationale: "Very fast movement at low fatigue indicates the load is too light.",
        },
        Scenario {
            name: "Controlled eccentric",
            inputs: Inputs {
                force: 300.0,
                speed: 0.3,
                phase: 30.0,
                fatigue: 25.0,
                mode: 2.0,
            },
            expectation: "Medium resistance (controlled eccentric phase), perfect feedback",
            rationale: "Slow movement in the lower phase suggests a controlled eccentric.",
        },
    ]
}

/// Domain plausibility check over a computed result.
///
/// Encodes the hard expectations that hold regardless of rule shading;
/// scenarios outside these regions are always considered plausible.
pub fn check_plausibility(scenario: &Scenario, result: &ComputeResult) -> bool {
    let s = &scenario.inputs;
    let r = result;

    if s.fatigue >= 80.0 {
        return r.resistance < 30.0 && r.feedback > 4.0;
    }
    if s.speed > 1.3 && s.fatigue < 20.0 {
        return r.resistance > 50.0;
    }
    if s.phase > 80.0 && s.force > 350.0 {
        return r.resistance > 60.0;
    }
    if s.phase < 25.0 && s.force < 200.0 {
        return r.resistance < 40.0;
    }

    true
}

/// Run the full scenario suite against `service`.
pub fn run_suite(service: &FisService) -> Vec<ScenarioOutcome> {
    scenario_suite()
        .into_iter()
        .map(|scenario| {
            let result = service.compute(&scenario.inputs);
            let plausible = check_plausibility(&scenario, &result);
            ScenarioOutcome {
                scenario,
                result,
                plausible,
            }
        })
        .collect()
}

/// Text report of a suite run.
pub fn format_report(outcomes: &[ScenarioOutcome]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str("INFERENCE SCENARIOS WITH PLAUSIBILITY ANALYSIS\n");
    out.push_str(&format!("{}\n", "=".repeat(80)));

    for (i, outcome) in outcomes.iter().enumerate() {
        let s = &outcome.scenario;
        let r = &outcome.result;
        out.push_str(&format!("\n[{}] {}\n", i + 1, s.name));
        out.push_str(&format!(
            "    inputs: force={} N, speed={} m/s, phase={}%, fatigue={}%, mode={}\n",
            s.inputs.force, s.inputs.speed, s.inputs.phase, s.inputs.fatigue, s.inputs.mode
        ));
        out.push_str(&format!("    expectation: {}\n", s.expectation));
        out.push_str(&format!(
            "    result: resistance={:.1}%, feedback={:.2} ({})\n",
            r.resistance,
            r.feedback,
            r.feedback_text.label()
        ));
        if let Some(ref e) = r.error {
            out.push_str(&format!("    note: {}\n", e));
        }
        out.push_str(&format!(
            "    plausibility: {}\n",
            if outcome.plausible { "OK" } else { "MISMATCH" }
        ));
    }

    let plausible = outcomes.iter().filter(|o| o.plausible).count();
    out.push_str(&format!(
        "\n{}\nPlausible: {}/{}\n",
        "-".repeat(80),
        plausible,
        outcomes.len()
    ));
    out
}

/// Run the scenario suite under every membership-function family and
/// tabulate resistance/feedback side by side.
pub fn comparison_table() -> FisResult<String> {
    let scenarios = scenario_suite();
    let mut columns = Vec::with_capacity(MfFamily::ALL.len());

    for family in MfFamily::ALL {
        let service = FisService::with_family(family)?;
        let results: Vec<ComputeResult> = scenarios
            .iter()
            .map(|s| service.compute(&s.inputs))
            .collect();
        columns.push((family, results));
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", "=".repeat(100)));
    out.push_str("MEMBERSHIP-FUNCTION FAMILY COMPARISON (resistance % / feedback)\n");
    out.push_str(&format!("{}\n", "=".repeat(100)));

    out.push_str(&format!("{:<38}", "Scenario"));
    for (family, _) in &columns {
        out.push_str(&format!("{:>15}", family.name()));
    }
    out.push('\n');
    out.push_str(&format!("{}\n", "-".repeat(100)));

    for (i, scenario) in scenarios.iter().enumerate() {
        let mut name = scenario.name.to_string();
        if name.len() > 36 {
            name.truncate(33);
            name.push_str("...");
        }
        out.push_str(&format!("{:<38}", name));
        for (_, results) in &columns {
            let r = &results[i];
            out.push_str(&format!(
                "{:>15}",
                format!("{:.1}/{:.2}", r.resistance, r.feedback)
            ));
        }
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::FeedbackSignal;

    #[test]
    fn test_suite_has_eight_scenarios() {
        assert_eq!(scenario_suite().len(), 8);
    }

    #[test]
    fn test_suite_inputs_are_within_declared_bounds() {
        let service = FisService::new().unwrap();
        for scenario in scenario_suite() {
            assert!(
                service.validate(&scenario.inputs).is_ok(),
                "{} has out-of-range inputs",
                scenario.name
            );
        }
    }

    #[test]
    fn test_run_suite_produces_structurally_valid_results() {
        let service = FisService::new().unwrap();
        for outcome in run_suite(&service) {
            let r = &outcome.result;
            assert!((0.0..=100.0).contains(&r.resistance), "{}", outcome.scenario.name);
            assert!((1.0..=5.0).contains(&r.feedback), "{}", outcome.scenario.name);
            assert_eq!(r.feedback_text, FeedbackSignal::from_crisp(r.feedback));
        }
    }

    #[test]
    fn test_exhaustion_scenario_is_plausible() {
        let service = FisService::new().unwrap();
        let outcomes = run_suite(&service);
        let exhaustion = outcomes
            .iter()
            .find(|o| o.scenario.name.starts_with("Exhaustion"))
            .unwrap();
        assert!(exhaustion.plausible);
        assert_eq!(exhaustion.result.feedback_text, FeedbackSignal::Stop);
    }

    #[test]
    fn test_report_mentions_every_scenario() {
        let service = FisService::new().unwrap();
        let report = format_report(&run_suite(&service));
        for scenario in scenario_suite() {
            assert!(report.contains(scenario.name));
        }
        assert!(report.contains("Plausible:"));
    }

    #[test]
    fn test_comparison_covers_all_families() {
        let table = comparison_table().unwrap();
        for family in MfFamily::ALL {
            assert!(table.contains(family.name()));
        }
    }
}
