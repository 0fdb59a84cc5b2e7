use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PerceptronError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationFunction {
    Sigmoid,
    /// Unit step, closed on the right at zero: `linear >= 0` maps to 1.
    Heaviside,
}

impl ActivationFunction {
    /// Every registered activation, in the order the UI lists them.
    pub const ALL: [ActivationFunction; 2] = [ActivationFunction::Sigmoid, ActivationFunction::Heaviside];

    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::Heaviside => if x >= 0.0 { 1.0 } else { 0.0 },
        }
    }

    /// Registered name, as accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::Heaviside => "heaviside",
        }
    }
}

/// Logistic function split on the sign of `x` so `exp` only ever sees a
/// non-positive argument and cannot overflow.
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ActivationFunction {
    type Err = PerceptronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivationFunction::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| PerceptronError::UnknownActivation { name: s.to_owned() })
    }
}
