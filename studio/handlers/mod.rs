pub mod config;
pub mod perceptron;
pub mod vectors;
