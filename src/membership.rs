//! Membership function shapes.
//!
//! Each shape evaluates pointwise to a degree in `[0, 1]` and is sampled
//! once over a variable's universe at construction time. Supported shapes:
//! - Trapezoid `(a, b, c, d)` - degenerates to a shoulder when `a == b` or
//!   `c == d`, and to a triangle when `b == c`
//! - Triangle `(a, b, c)`
//! - Gaussian `(center, sigma)`
//! - Generalized bell `(width, slope, center)`
//! - Sigmoid `(center, steepness)`
//! - Sigmoid pair - product of two opposing sigmoids forming a bump

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FisError;
use crate::universe::Universe;

/// A membership function shape with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MfShape {
    /// Zero below `a`, ramp to 1 over `a..b`, plateau over `b..c`, ramp to
    /// zero over `c..d`. `a == b` (or `c == d`) saturates that side.
    Trapezoid { a: f64, b: f64, c: f64, d: f64 },
    /// Zero at/below `a`, peak 1 at `b`, zero at/above `c`. `a == b` (or
    /// `b == c`) makes the peak sit on that edge.
    Triangle { a: f64, b: f64, c: f64 },
    /// `exp(-(x - center)^2 / (2 * sigma^2))`.
    Gaussian { center: f64, sigma: f64 },
    /// `1 / (1 + |(x - center) / width|^(2 * slope))`.
    Bell { width: f64, slope: f64, center: f64 },
    /// `1 / (1 + exp(-steepness * (x - center)))`; negative steepness
    /// mirrors the curve.
    Sigmoid { center: f64, steepness: f64 },
    /// Product of a rising sigmoid at `rise` and a falling sigmoid at
    /// `fall`, forming a symmetric bump between them.
    SigmoidPair { rise: f64, fall: f64, steepness: f64 },
}

impl MfShape {
    /// Evaluate the membership degree at a crisp `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            MfShape::Trapezoid { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x >= b && x <= c {
                    1.0
                } else if x < b {
                    // a < b here: x in [a, b) is unreachable when a == b
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            }
            MfShape::Triangle { a, b, c } => {
                if x < a || x > c {
                    0.0
                } else if x == b {
                    1.0
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            }
            MfShape::Gaussian { center, sigma } => {
                (-((x - center).powi(2)) / (2.0 * sigma.powi(2))).exp()
            }
            MfShape::Bell {
                width,
                slope,
                center,
            } => 1.0 / (1.0 + ((x - center) / width).abs().powf(2.0 * slope)),
            MfShape::Sigmoid { center, steepness } => {
                1.0 / (1.0 + (-steepness * (x - center)).exp())
            }
            MfShape::SigmoidPair {
                rise,
                fall,
                steepness,
            } => {
                let up = 1.0 / (1.0 + (-steepness * (x - rise)).exp());
                let down = 1.0 / (1.0 + (steepness * (x - fall)).exp());
                up * down
            }
        }
    }

    /// Sample the shape over every point of `universe`.
    pub fn sample(&self, universe: &Universe) -> Vec<f64> {
        universe.samples().iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// The membership-function family an engine is built under.
///
/// `Triangular` is the production default; the remaining families exist for
/// comparative study and rebuild every variable from derived center points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MfFamily {
    #[default]
    Triangular,
    Gaussian,
    Bell,
    Sigmoid,
}

impl MfFamily {
    /// All families, in presentation order.
    pub const ALL: [MfFamily; 4] = [
        MfFamily::Triangular,
        MfFamily::Gaussian,
        MfFamily::Bell,
        MfFamily::Sigmoid,
    ];

    /// Stable identifier used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            MfFamily::Triangular => "triangular",
            MfFamily::Gaussian => "gaussian",
            MfFamily::Bell => "bell",
            MfFamily::Sigmoid => "sigmoid",
        }
    }

    /// Human-readable label for reports.
    pub fn label(self) -> &'static str {
        match self {
            MfFamily::Triangular => "Triangular (default)",
            MfFamily::Gaussian => "Gaussian",
            MfFamily::Bell => "Generalized Bell",
            MfFamily::Sigmoid => "Sigmoid",
        }
    }
}

impl fmt::Display for MfFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MfFamily {
    type Err = FisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triangular" => Ok(MfFamily::Triangular),
            "gaussian" => Ok(MfFamily::Gaussian),
            // "gbell" is the historical name for the generalized bell family
            "bell" | "gbell" => Ok(MfFamily::Bell),
            "sigmoid" => Ok(MfFamily::Sigmoid),
            other => Err(FisError::unknown_family(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trapezoid_shoulder_saturates_at_edge() {
        let mf = MfShape::Trapezoid {
            a: 0.0,
            b: 0.0,
            c: 50.0,
            d: 100.0,
        };

        assert!((mf.evaluate(0.0) - 1.0).abs() < 1e-12);
        assert!((mf.evaluate(50.0) - 1.0).abs() < 1e-12);
        assert!((mf.evaluate(75.0) - 0.5).abs() < 1e-12);
        assert!((mf.evaluate(100.0) - 0.0).abs() < 1e-12);
        assert!((mf.evaluate(150.0) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangle_edges_and_peak() {
        let mf = MfShape::Triangle {
            a: 0.0,
            b: 5.0,
            c: 10.0,
        };

        assert!((mf.evaluate(0.0) - 0.0).abs() < 1e-12);
        assert!((mf.evaluate(2.5) - 0.5).abs() < 1e-12);
        assert!((mf.evaluate(5.0) - 1.0).abs() < 1e-12);
        assert!((mf.evaluate(7.5) - 0.5).abs() < 1e-12);
        assert!((mf.evaluate(10.0) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangle_with_peak_on_edge() {
        // trimf(1, 1, 2) style boundary term
        let left = MfShape::Triangle {
            a: 1.0,
            b: 1.0,
            c: 2.0,
        };
        assert!((left.evaluate(1.0) - 1.0).abs() < 1e-12);
        assert!((left.evaluate(1.5) - 0.5).abs() < 1e-12);
        assert!((left.evaluate(2.0) - 0.0).abs() < 1e-12);

        let right = MfShape::Triangle {
            a: 2.2,
            b: 3.0,
            c: 3.0,
        };
        assert!((right.evaluate(3.0) - 1.0).abs() < 1e-12);
        assert!((right.evaluate(2.6) - 0.5).abs() < 1e-12);
        assert!((right.evaluate(2.2) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_peak_and_spread() {
        let mf = MfShape::Gaussian {
            center: 5.0,
            sigma: 1.0,
        };

        assert!((mf.evaluate(5.0) - 1.0).abs() < 1e-12);
        let one_sigma = mf.evaluate(6.0);
        assert!(one_sigma < 1.0 && one_sigma > 0.5);
        assert!(mf.evaluate(5.0 - 3.0) < one_sigma);
    }

    #[test]
    fn test_bell_is_symmetric_around_center() {
        let mf = MfShape::Bell {
            width: 2.0,
            slope: 2.5,
            center: 10.0,
        };

        assert!((mf.evaluate(10.0) - 1.0).abs() < 1e-12);
        assert!((mf.evaluate(8.0) - mf.evaluate(12.0)).abs() < 1e-12);
        assert!((mf.evaluate(8.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sigmoid_pair_forms_a_bump() {
        let mf = MfShape::SigmoidPair {
            rise: 4.0,
            fall: 6.0,
            steepness: 5.0,
        };

        let peak = mf.evaluate(5.0);
        assert!(peak > 0.9);
        assert!(mf.evaluate(0.0) < 0.01);
        assert!(mf.evaluate(10.0) < 0.01);
        assert!((mf.evaluate(4.0) - mf.evaluate(6.0)).abs() < 1e-9);
    }

    #[test]
    fn test_family_parsing() {
        assert_eq!("triangular".parse::<MfFamily>().unwrap(), MfFamily::Triangular);
        assert_eq!("GAUSSIAN".parse::<MfFamily>().unwrap(), MfFamily::Gaussian);
        assert_eq!("gbell".parse::<MfFamily>().unwrap(), MfFamily::Bell);
        assert_eq!("sigmoid".parse::<MfFamily>().unwrap(), MfFamily::Sigmoid);
        assert!("spline".parse::<MfFamily>().is_err());
    }

    #[test]
    fn test_all_shapes_stay_in_unit_interval() {
        let universe = Universe::new(0.0, 100.0, 1.0).unwrap();
        let shapes = [
            MfShape::Trapezoid {
                a: 10.0,
                b: 20.0,
                c: 40.0,
                d: 60.0,
            },
            MfShape::Triangle {
                a: 30.0,
                b: 50.0,
                c: 70.0,
            },
            MfShape::Gaussian {
                center: 50.0,
                sigma: 12.0,
            },
            MfShape::Bell {
                width: 18.0,
                slope: 2.5,
                center: 50.0,
            },
            MfShape::Sigmoid {
                center: 50.0,
                steepness: 0.3,
            },
            MfShape::SigmoidPair {
                rise: 35.0,
                fall: 65.0,
                steepness: 0.3,
            },
        ];

        for shape in shapes {
            for d in shape.sample(&universe) {
                assert!((0.0..=1.0).contains(&d), "{:?} left [0,1]: {}", shape, d);
            }
        }
    }
}
