use rand::prelude::*;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{PerceptronError, Result};
use crate::perceptron::spec::PerceptronSpec;

/// The `(weights, bias, activation)` triple a perceptron evaluates with.
///
/// Always replaced as a whole; there is no way to patch a single weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub activation: ActivationFunction,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration { weights: Vec::new(), bias: 0.0, activation: ActivationFunction::Sigmoid }
    }
}

impl Configuration {
    /// Weighted sum plus bias. Callers must have checked the length.
    fn linear(&self, vector: &[f64]) -> f64 {
        vector.iter().zip(self.weights.iter()).map(|(x, w)| x * w).sum::<f64>() + self.bias
    }

    fn check_dimension(&self, vector: &[f64], index: usize) -> Result<()> {
        if vector.len() != self.weights.len() {
            return Err(PerceptronError::DimensionMismatch {
                expected: self.weights.len(),
                actual: vector.len(),
                index,
            });
        }
        Ok(())
    }

    /// Weighted sum for the vector at `index`, rejected if it is not finite.
    fn checked_linear(&self, vector: &[f64], index: usize) -> Result<f64> {
        self.check_dimension(vector, index)?;
        let linear = self.linear(vector);
        if !linear.is_finite() {
            return Err(PerceptronError::NonFiniteLinear { index });
        }
        Ok(linear)
    }

    /// Runs a whole batch against this configuration.
    ///
    /// Every vector is checked before any output is computed, so a mismatch
    /// or an overflowing sum anywhere yields an error and no partial results.
    pub fn evaluate(&self, vectors: &[Vec<f64>]) -> Result<Vec<f64>> {
        for (index, vector) in vectors.iter().enumerate() {
            self.check_dimension(vector, index)?;
        }
        let linears = vectors
            .iter()
            .enumerate()
            .map(|(index, v)| self.checked_linear(v, index))
            .collect::<Result<Vec<f64>>>()?;
        Ok(linears.into_iter().map(|l| self.activation.function(l)).collect())
    }
}

/// A single perceptron with user-supplied, fixed weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Perceptron {
    config: Configuration,
}

impl Perceptron {
    pub fn new(weights: Vec<f64>, bias: f64, activation: ActivationFunction) -> Perceptron {
        Perceptron { config: Configuration { weights, bias, activation } }
    }

    /// Replaces weights, bias and activation together.
    ///
    /// The activation name is resolved first; if it is unknown the current
    /// configuration is left untouched.
    pub fn configure(&mut self, weights: Vec<f64>, bias: f64, activation_name: &str) -> Result<()> {
        let activation = activation_name.parse::<ActivationFunction>()?;
        self.config = Configuration { weights, bias, activation };
        Ok(())
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Owned copy of the current triple, for evaluating outside a lock.
    pub fn snapshot(&self) -> Configuration {
        self.config.clone()
    }

    /// Number of components every input vector must have.
    pub fn dimension(&self) -> usize {
        self.config.weights.len()
    }

    /// One output per vector, in input order.
    pub fn evaluate(&self, vectors: &[Vec<f64>]) -> Result<Vec<f64>> {
        self.config.evaluate(vectors)
    }

    /// `dot(vector, weights) + bias` for a single vector.
    pub fn linear(&self, vector: &[f64]) -> Result<f64> {
        self.config.checked_linear(vector, 0)
    }

    pub fn predict(&self, vector: &[f64]) -> Result<f64> {
        let linear = self.linear(vector)?;
        Ok(self.config.activation.function(linear))
    }

    pub fn from_spec(spec: &PerceptronSpec) -> Result<Perceptron> {
        let mut perceptron = Perceptron::default();
        perceptron.configure(spec.weights.clone(), spec.bias, &spec.activation)?;
        Ok(perceptron)
    }

    pub fn to_spec(&self, name: impl Into<String>) -> PerceptronSpec {
        PerceptronSpec {
            name: name.into(),
            weights: self.config.weights.clone(),
            bias: self.config.bias,
            activation: self.config.activation.name().to_owned(),
            description: None,
        }
    }
}

/// `len` weights drawn uniformly from [-1, 1).
pub fn random_weights(len: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen::<f64>() * 2.0 - 1.0).collect()
}
