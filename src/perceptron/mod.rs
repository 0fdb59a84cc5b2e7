pub mod perceptron;
pub mod spec;

pub use perceptron::{random_weights, Configuration, Perceptron};
pub use spec::PerceptronSpec;
