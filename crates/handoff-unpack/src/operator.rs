//! Symmetry operator parsing and evaluation
//!
//! An operator string such as `"-x,y+1/2,-z"` holds three comma-separated
//! components, one per output coordinate. Each component is a sum of
//! signed terms: a coordinate variable (`x`, `y`, `z`) or a single-digit
//! fraction (`1/2`, `3/4`). The string is parsed once into terms and
//! evaluated arithmetically; no dynamic code execution is involved.

use crate::error::OperatorError;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Coordinate variable within a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// One signed term of a component
#[derive(Debug, Clone, Copy, PartialEq)]
enum Term {
    /// A coordinate variable with its sign
    Axis { sign: f64, axis: Axis },
    /// A constant with the sign folded in
    Constant(f64),
}

/// One output coordinate of an operator
#[derive(Debug, Clone, PartialEq)]
struct Component {
    terms: Vec<Term>,
}

impl Component {
    /// Evaluate against a location, wrapped into the unit interval
    fn evaluate(&self, location: [f64; 3]) -> f64 {
        let total: f64 = self
            .terms
            .iter()
            .map(|term| match term {
                Term::Axis { sign, axis } => sign * location[axis.index()],
                Term::Constant(value) => *value,
            })
            .sum();
        let wrapped = total.rem_euclid(1.0);
        // rem_euclid can yield -0.0, and rounds to exactly 1.0 for tiny
        // negative totals; both fold back to 0.0 to keep [0, 1)
        if wrapped >= 1.0 || wrapped == 0.0 {
            0.0
        } else {
            wrapped
        }
    }
}

/// A parsed crystallographic symmetry operator
///
/// # Invariants
/// - Exactly three components, one per output coordinate
/// - Evaluation wraps every coordinate into `[0, 1)`
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryOperator {
    components: [Component; 3],
    source: String,
}

impl SymmetryOperator {
    /// Apply the operator to a fractional location
    ///
    /// Each output coordinate is the component sum wrapped into `[0, 1)`.
    #[must_use]
    pub fn apply(&self, location: [f64; 3]) -> [f64; 3] {
        [
            self.components[0].evaluate(location),
            self.components[1].evaluate(location),
            self.components[2].evaluate(location),
        ]
    }

    /// The operator string this was parsed from
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl FromStr for SymmetryOperator {
    type Err = OperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err(OperatorError::ComponentCount(parts.len()));
        }
        let mut components = Vec::with_capacity(3);
        for part in &parts {
            components.push(parse_component(part)?);
        }
        let components = match <[Component; 3]>::try_from(components) {
            Ok(array) => array,
            Err(_) => return Err(OperatorError::ComponentCount(parts.len())),
        };
        Ok(Self {
            components,
            source: s.to_string(),
        })
    }
}

impl Display for SymmetryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Parse one component into signed terms
///
/// The sign set by `+`/`-` stays in effect until the next sign character,
/// matching the conventional `y+1/2` / `-x` operator notation.
fn parse_component(component: &str) -> Result<Component, OperatorError> {
    let chars: Vec<char> = component.chars().collect();
    let mut terms = Vec::new();
    let mut sign = 1.0;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '+' => sign = 1.0,
            '-' => sign = -1.0,
            'x' => terms.push(Term::Axis { sign, axis: Axis::X }),
            'y' => terms.push(Term::Axis { sign, axis: Axis::Y }),
            'z' => terms.push(Term::Axis { sign, axis: Axis::Z }),
            c if c.is_ascii_digit() => {
                let numerator = f64::from(c as u8 - b'0');
                match (chars.get(i + 1), chars.get(i + 2)) {
                    (Some(&'/'), Some(&d)) if d.is_ascii_digit() && d != '0' => {
                        let denominator = f64::from(d as u8 - b'0');
                        terms.push(Term::Constant(sign * numerator / denominator));
                        i += 2;
                    }
                    _ => {
                        return Err(OperatorError::BadFraction {
                            component: component.to_string(),
                        })
                    }
                }
            }
            c if c.is_whitespace() => {}
            other => {
                return Err(OperatorError::UnexpectedChar {
                    component: component.to_string(),
                    found: other,
                })
            }
        }
        i += 1;
    }

    Ok(Component { terms })
}
