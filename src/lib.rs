pub mod activation;
pub mod error;
pub mod io;
pub mod logging;
pub mod perceptron;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use error::{ParseError, PerceptronError};
pub use perceptron::{random_weights, Configuration, Perceptron, PerceptronSpec};
