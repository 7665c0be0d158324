//! Linguistic variables and their term membership arrays.
//!
//! A [`LinguisticVariable`] binds a [`VariableId`] to a [`Universe`] and an
//! insertion-ordered map from term to its sampled membership array. Two
//! construction paths exist:
//!
//! - [`LinguisticVariable::from_shapes`] - hand-tuned breakpoints, used by
//!   the production configuration
//! - [`LinguisticVariable::from_centers`] - shape parameters derived from
//!   ordered center points and adjacent spacing, used when rebuilding the
//!   system under an alternate membership-function family
//!
//! Both paths enforce the coverage invariant at construction: every point
//! of the universe must belong to at least one term with positive degree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{ErrorCode, FisError, FisResult};
use crate::membership::{MfFamily, MfShape};
use crate::terms::{
    FatigueLevel, FeedbackSignal, ForceLevel, MovementPhase, ResistanceLevel, SpeedLevel, TermSet,
    TrainingMode, VariableId,
};
use crate::universe::Universe;

/// Degrees this close to 1.0 count as saturated when inspecting arrays.
const SATURATION_EPS: f64 = 1e-9;

/// Where a term's membership reaches its maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TermPeak {
    /// Single-peak (triangular-like) term.
    Single(f64),
    /// Plateaued (trapezoidal-like) term, `(start, end)` of the plateau.
    Plateau(f64, f64),
}

/// Shape parameters recovered from a stored membership array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermShape {
    /// First and last universe points with positive membership.
    pub support: (f64, f64),
    pub peak: TermPeak,
}

/// Read-only copy of one term's membership array, for plotting/GUI layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSnapshot {
    pub name: String,
    pub degrees: Vec<f64>,
}

/// Read-only copy of one variable's universe and term arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSnapshot {
    pub identifier: String,
    pub label: String,
    pub unit: String,
    pub universe: Vec<f64>,
    pub terms: Vec<TermSnapshot>,
}

/// A named quantity with a discretized universe and a fixed term set.
///
/// Immutable after construction; membership arrays are sampled once and
/// never recomputed per inference call.
#[derive(Debug, Clone)]
pub struct LinguisticVariable<T: TermSet> {
    id: VariableId,
    universe: Universe,
    terms: IndexMap<T, Vec<f64>>,
}

impl<T: TermSet> LinguisticVariable<T> {
    /// Build a variable from explicit per-term shapes.
    pub fn from_shapes(
        id: VariableId,
        universe: Universe,
        shapes: &[(T, MfShape)],
    ) -> FisResult<Self> {
        let mut terms = IndexMap::with_capacity(shapes.len());
        for (term, shape) in shapes {
            terms.insert(*term, shape.sample(&universe));
        }

        let variable = Self {
            id,
            universe,
            terms,
        };
        variable.check_coverage()?;
        Ok(variable)
    }

    /// Build a variable under `family` from ordered term centers; each
    /// term's spread is derived from the spacing to its neighbors.
    pub fn from_centers(
        id: VariableId,
        universe: Universe,
        family: MfFamily,
        centers: &[(T, f64)],
    ) -> FisResult<Self> {
        let shapes = derive_shapes(family, &universe, centers);
        Self::from_shapes(id, universe, &shapes)
    }

    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// The stored membership array of `term`, if it is defined.
    pub fn degrees(&self, term: T) -> Option<&[f64]> {
        self.terms.get(&term).map(|v| v.as_slice())
    }

    /// Membership degree of `term` at crisp `x`, linearly interpolated
    /// between the two adjacent universe samples.
    pub fn degree(&self, term: T, x: f64) -> f64 {
        match self.terms.get(&term) {
            Some(degrees) => self.universe.interpolate(degrees, x),
            None => 0.0,
        }
    }

    /// Every universe point must be covered by some term; a gap would let
    /// inputs fall through the rule base entirely.
    fn check_coverage(&self) -> FisResult<()> {
        for (i, &x) in self.universe.samples().iter().enumerate() {
            let covered = self.terms.values().any(|degrees| degrees[i] > 0.0);
            if !covered {
                return Err(FisError::new(
                    ErrorCode::CoverageGap,
                    format!(
                        "Variable '{}' has no term with positive membership at {}",
                        self.id, x
                    ),
                )
                .with_context("variable", self.id.identifier()));
            }
        }
        Ok(())
    }

    /// Recover shape parameters from a stored array: support extent plus
    /// either the plateau (trapezoid-like) or the single peak location.
    /// Derived from the arrays, not from remembered construction
    /// parameters, so it reflects what the engine actually evaluates.
    pub fn inspect(&self, term: T) -> Option<TermShape> {
        let degrees = self.terms.get(&term)?;
        let samples = self.universe.samples();

        let first = degrees.iter().position(|&d| d > 0.0)?;
        let last = degrees.iter().rposition(|&d| d > 0.0)?;

        let mut sat_first = None;
        let mut sat_last = None;
        for (i, &d) in degrees.iter().enumerate() {
            if d >= 1.0 - SATURATION_EPS {
                if sat_first.is_none() {
                    sat_first = Some(i);
                }
                sat_last = Some(i);
            }
        }

        let peak = match (sat_first, sat_last) {
            (Some(a), Some(b)) if b > a => TermPeak::Plateau(samples[a], samples[b]),
            (Some(a), _) => TermPeak::Single(samples[a]),
            _ => {
                // No saturated point (smooth families near the boundary):
                // report the argmax instead.
                let argmax = degrees
                    .iter()
                    .enumerate()
                    .max_by(|a, b| a.1.partial_cmp(b.1).expect("degrees are finite"))
                    .map(|(i, _)| i)
                    .unwrap_or(first);
                TermPeak::Single(samples[argmax])
            }
        };

        Some(TermShape {
            support: (samples[first], samples[last]),
            peak,
        })
    }

    /// Copy out the universe and every term array for rendering layers.
    pub fn snapshot(&self) -> VariableSnapshot {
        VariableSnapshot {
            identifier: self.id.identifier().to_string(),
            label: self.id.label().to_string(),
            unit: self.id.unit().to_string(),
            universe: self.universe.samples().to_vec(),
            terms: self
                .terms
                .iter()
                .map(|(term, degrees)| TermSnapshot {
                    name: term.name().to_string(),
                    degrees: degrees.clone(),
                })
                .collect(),
        }
    }

    /// One section of the membership documentation table.
    pub fn table_section(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "=".repeat(80)));
        out.push_str(&format!("Variable: {}\n", self.id.label()));
        out.push_str(&format!(
            "Unit: {} | Range: {}-{}\n",
            self.id.unit(),
            self.universe.min(),
            self.universe.max()
        ));
        out.push_str(&format!("{}\n", "=".repeat(80)));
        out.push_str(&format!(
            "{:<20} {:<12} {:<30}\n",
            "Term", "Shape", "Parameters (a, b, c, d)"
        ));
        out.push_str(&format!("{}\n", "-".repeat(80)));

        for term in self.terms.keys() {
            let (kind, params) = match self.inspect(*term) {
                Some(shape) => match shape.peak {
                    TermPeak::Plateau(b, c) => (
                        "trapezoid",
                        format!(
                            "({:.2}, {:.2}, {:.2}, {:.2})",
                            shape.support.0, b, c, shape.support.1
                        ),
                    ),
                    TermPeak::Single(b) => (
                        "triangle",
                        format!("({:.2}, {:.2}, {:.2}, -)", shape.support.0, b, shape.support.1),
                    ),
                },
                None => ("unknown", "-".to_string()),
            };
            out.push_str(&format!("{:<20} {:<12} {:<30}\n", term.name(), kind, params));
        }

        out
    }
}

/// Derive per-term shapes for `family` from ordered centers.
///
/// The spread of each term is 0.6x the gap to its neighboring center;
/// interior terms take the smaller of the two gaps, boundary terms the
/// single adjacent gap. Boundary terms saturate at the universe edge
/// instead of decaying, so the universe stays fully covered.
pub fn derive_shapes<T: TermSet>(
    family: MfFamily,
    universe: &Universe,
    centers: &[(T, f64)],
) -> Vec<(T, MfShape)> {
    let n = centers.len();
    let mut shapes = Vec::with_capacity(n);

    for (i, &(term, center)) in centers.iter().enumerate() {
        let width = if i == 0 {
            (centers[1].1 - centers[0].1) * 0.6
        } else if i == n - 1 {
            (centers[n - 1].1 - centers[n - 2].1) * 0.6
        } else {
            let left = center - centers[i - 1].1;
            let right = centers[i + 1].1 - center;
            left.min(right) * 0.6
        };

        let shape = match family {
            MfFamily::Triangular => {
                if i == 0 {
                    MfShape::Trapezoid {
                        a: universe.min(),
                        b: universe.min(),
                        c: center,
                        d: center + width * 1.5,
                    }
                } else if i == n - 1 {
                    MfShape::Trapezoid {
                        a: center - width * 1.5,
                        b: center,
                        c: universe.max(),
                        d: universe.max(),
                    }
                } else {
                    MfShape::Triangle {
                        a: center - width * 1.5,
                        b: center,
                        c: center + width * 1.5,
                    }
                }
            }
            MfFamily::Gaussian => MfShape::Gaussian {
                center,
                sigma: width * 0.8,
            },
            MfFamily::Bell => MfShape::Bell {
                width: width * 1.2,
                slope: 2.5,
                center,
            },
            MfFamily::Sigmoid => {
                let steepness = if width > 0.0 { 0.5 / width } else { 0.5 };
                if i == 0 {
                    MfShape::Sigmoid {
                        center: center + width,
                        steepness: -steepness,
                    }
                } else if i == n - 1 {
                    MfShape::Sigmoid {
                        center: center - width,
                        steepness,
                    }
                } else {
                    MfShape::SigmoidPair {
                        rise: center - width,
                        fall: center + width,
                        steepness,
                    }
                }
            }
        };

        shapes.push((term, shape));
    }

    shapes
}

/// The complete, immutable set of the machine's seven linguistic variables.
#[derive(Debug, Clone)]
pub struct VariableSet {
    pub force: LinguisticVariable<ForceLevel>,
    pub speed: LinguisticVariable<SpeedLevel>,
    pub phase: LinguisticVariable<MovementPhase>,
    pub fatigue: LinguisticVariable<FatigueLevel>,
    pub mode: LinguisticVariable<TrainingMode>,
    pub resistance: LinguisticVariable<ResistanceLevel>,
    pub feedback: LinguisticVariable<FeedbackSignal>,
}

impl VariableSet {
    /// Production variables: the hand-tuned trapezoid/triangle breakpoints.
    pub fn hand_tuned() -> FisResult<Self> {
        Ok(Self {
            force: LinguisticVariable::from_shapes(
                VariableId::Force,
                config::universe_of(VariableId::Force)?,
                &config::force_shapes(),
            )?,
            speed: LinguisticVariable::from_shapes(
                VariableId::Speed,
                config::universe_of(VariableId::Speed)?,
                &config::speed_shapes(),
            )?,
            phase: LinguisticVariable::from_shapes(
                VariableId::Phase,
                config::universe_of(VariableId::Phase)?,
                &config::phase_shapes(),
            )?,
            fatigue: LinguisticVariable::from_shapes(
                VariableId::Fatigue,
                config::universe_of(VariableId::Fatigue)?,
                &config::fatigue_shapes(),
            )?,
            mode: LinguisticVariable::from_shapes(
                VariableId::Mode,
                config::universe_of(VariableId::Mode)?,
                &config::mode_shapes(),
            )?,
            resistance: LinguisticVariable::from_shapes(
                VariableId::Resistance,
                config::universe_of(VariableId::Resistance)?,
                &config::resistance_shapes(),
            )?,
            feedback: LinguisticVariable::from_shapes(
                VariableId::Feedback,
                config::universe_of(VariableId::Feedback)?,
                &config::feedback_shapes(),
            )?,
        })
    }

    /// Variables rebuilt under `family` from derived center points. Mode
    /// and feedback keep their hand-tuned triangular terms in every
    /// family, matching the production definitions.
    pub fn derived(family: MfFamily) -> FisResult<Self> {
        Ok(Self {
            force: LinguisticVariable::from_centers(
                VariableId::Force,
                config::universe_of(VariableId::Force)?,
                family,
                &config::force_centers(),
            )?,
            speed: LinguisticVariable::from_centers(
                VariableId::Speed,
                config::universe_of(VariableId::Speed)?,
                family,
                &config::speed_centers(),
            )?,
            phase: LinguisticVariable::from_centers(
                VariableId::Phase,
                config::universe_of(VariableId::Phase)?,
                family,
                &config::phase_centers(),
            )?,
            fatigue: LinguisticVariable::from_centers(
                VariableId::Fatigue,
                config::universe_of(VariableId::Fatigue)?,
                family,
                &config::fatigue_centers(),
            )?,
            mode: LinguisticVariable::from_shapes(
                VariableId::Mode,
                config::universe_of(VariableId::Mode)?,
                &config::mode_shapes(),
            )?,
            resistance: LinguisticVariable::from_centers(
                VariableId::Resistance,
                config::universe_of(VariableId::Resistance)?,
                family,
                &config::resistance_centers(),
            )?,
            feedback: LinguisticVariable::from_shapes(
                VariableId::Feedback,
                config::universe_of(VariableId::Feedback)?,
                &config::feedback_shapes(),
            )?,
        })
    }

    /// Snapshots of all seven variables, in presentation order.
    pub fn snapshots(&self) -> Vec<VariableSnapshot> {
        vec![
            self.force.snapshot(),
            self.speed.snapshot(),
            self.phase.snapshot(),
            self.fatigue.snapshot(),
            self.mode.snapshot(),
            self.resistance.snapshot(),
            self.feedback.snapshot(),
        ]
    }

    /// Membership documentation table across all variables.
    pub fn table(&self) -> String {
        [
            self.force.table_section(),
            self.speed.table_section(),
            self.phase.table_section(),
            self.fatigue.table_section(),
            self.mode.table_section(),
            self.resistance.table_section(),
            self.feedback.table_section(),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_tuned_variables_cover_their_universes() {
        // from_shapes enforces coverage; constructing is the assertion
        let vars = VariableSet::hand_tuned().unwrap();
        assert_eq!(vars.force.term_count(), 5);
        assert_eq!(vars.mode.term_count(), 3);
        assert_eq!(vars.feedback.term_count(), 5);
    }

    #[test]
    fn test_derived_variables_cover_their_universes_in_every_family() {
        for family in MfFamily::ALL {
            let vars = VariableSet::derived(family).unwrap();
            assert_eq!(vars.force.term_count(), 5, "family {}", family);
            assert_eq!(vars.resistance.term_count(), 5, "family {}", family);
        }
    }

    #[test]
    fn test_degree_peaks_at_term_center() {
        let vars = VariableSet::hand_tuned().unwrap();

        // medium force is trimf(150, 250, 350)
        assert!((vars.force.degree(ForceLevel::Medium, 250.0) - 1.0).abs() < 1e-9);
        assert!((vars.force.degree(ForceLevel::Medium, 200.0) - 0.5).abs() < 1e-9);
        assert!(vars.force.degree(ForceLevel::Medium, 400.0) == 0.0);

        // boundary term saturates at the universe edge
        assert!((vars.force.degree(ForceLevel::VeryLow, 0.0) - 1.0).abs() < 1e-9);
        assert!((vars.force.degree(ForceLevel::VeryHigh, 500.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolated_degree_between_samples() {
        let vars = VariableSet::hand_tuned().unwrap();
        // force universe has step 1; 200.5 sits between two samples on the
        // rising edge of medium: trimf(150, 250, 350)
        let d = vars.force.degree(ForceLevel::Medium, 200.5);
        assert!((d - 0.505).abs() < 1e-9);
    }

    #[test]
    fn test_inspect_distinguishes_plateau_from_peak() {
        let vars = VariableSet::hand_tuned().unwrap();

        let very_low = vars.force.inspect(ForceLevel::VeryLow).unwrap();
        match very_low.peak {
            TermPeak::Plateau(start, end) => {
                assert!((start - 0.0).abs() < 1e-9);
                assert!((end - 50.0).abs() < 1e-9);
            }
            TermPeak::Single(_) => panic!("very_low is trapezoidal"),
        }

        let medium = vars.force.inspect(ForceLevel::Medium).unwrap();
        match medium.peak {
            TermPeak::Single(at) => assert!((at - 250.0).abs() < 1e-9),
            TermPeak::Plateau(..) => panic!("medium is triangular"),
        }
        assert!((medium.support.0 - 151.0).abs() < 1e-9);
        assert!((medium.support.1 - 349.0).abs() < 1e-9);
    }

    #[test]
    fn test_derived_shapes_overlap_adjacent_terms() {
        for family in MfFamily::ALL {
            let vars = VariableSet::derived(family).unwrap();
            // between adjacent force centers both terms must be active
            let x = 187.5; // midway between low (125) and medium (250)
            let low = vars.force.degree(ForceLevel::Low, x);
            let medium = vars.force.degree(ForceLevel::Medium, x);
            assert!(low > 0.0, "family {}: low inactive at {}", family, x);
            assert!(medium > 0.0, "family {}: medium inactive at {}", family, x);
        }
    }

    #[test]
    fn test_snapshot_arrays_match_universe_length() {
        let vars = VariableSet::hand_tuned().unwrap();
        for snapshot in vars.snapshots() {
            for term in &snapshot.terms {
                assert_eq!(term.degrees.len(), snapshot.universe.len());
            }
        }
    }

    #[test]
    fn test_table_lists_every_term() {
        let vars = VariableSet::hand_tuned().unwrap();
        let table = vars.table();
        assert!(table.contains("Generated Force"));
        assert!(table.contains("very_low"));
        assert!(table.contains("trapezoid"));
        assert!(table.contains("triangle"));
        assert!(table.contains("stop"));
    }
}
