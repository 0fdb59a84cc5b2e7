use std::sync::{Arc, Mutex};
use perceptron_studio::{ActivationFunction, Configuration, Perceptron};

// ---------------------------------------------------------------------------
// Form inputs
// ---------------------------------------------------------------------------

/// The raw text of the editor fields, echoed back on every render so the
/// user never loses what they typed when a run is rejected.
#[derive(Debug, Clone)]
pub struct FormInputs {
    pub activation: String,
    pub bias:       String,
    pub weights:    String,
    pub vectors:    String,
}

impl Default for FormInputs {
    fn default() -> Self {
        FormInputs {
            activation: ActivationFunction::Sigmoid.name().to_owned(),
            bias:       String::new(),
            weights:    String::new(),
            vectors:    String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Run results
// ---------------------------------------------------------------------------

/// Outputs of the most recent successful run, paired with their vectors.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub activation: ActivationFunction,
    pub rows:       Vec<(Vec<f64>, f64)>,
}

// ---------------------------------------------------------------------------
// Flash messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum FlashKind { Success, Error }

#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Success, text: text.into() }
    }
    pub fn error(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Error, text: text.into() }
    }
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

pub struct StudioState {
    /// `None` until a configuration has been applied successfully.
    pub perceptron:  Option<Perceptron>,
    /// Path of the configuration line file read at startup and on reload.
    pub config_path: String,
    pub form:        FormInputs,
    pub last_run:    Option<RunResult>,
    /// One-shot flash message for the next page render.
    pub flash:       Option<FlashMessage>,
}

impl StudioState {
    pub fn new(config_path: impl Into<String>) -> Self {
        StudioState {
            perceptron:  None,
            config_path: config_path.into(),
            form:        FormInputs::default(),
            last_run:    None,
            flash:       None,
        }
    }

    /// Applies a configuration and returns a snapshot of it.
    ///
    /// On `UnknownActivation` the previous perceptron (if any) is unchanged.
    pub fn configure(
        &mut self,
        weights: Vec<f64>,
        bias: f64,
        activation: &str,
    ) -> Result<Configuration, perceptron_studio::PerceptronError> {
        let mut next = self.perceptron.clone().unwrap_or_default();
        next.configure(weights, bias, activation)?;
        let snapshot = next.snapshot();
        self.perceptron = Some(next);
        Ok(snapshot)
    }

    /// Takes and returns the current flash message, clearing it.
    pub fn take_flash(&mut self) -> Option<FlashMessage> {
        self.flash.take()
    }
}

/// Shared state type: an `Arc<Mutex<StudioState>>` passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_configure_keeps_previous_perceptron() {
        let mut st = StudioState::new("config.txt");
        st.configure(vec![1.0, 1.0], -1.5, "heaviside").unwrap();
        assert!(st.configure(vec![2.0], 0.0, "softmax").is_err());
        let p = st.perceptron.as_ref().unwrap();
        assert_eq!(p.dimension(), 2);
        assert_eq!(p.configuration().bias, -1.5);
    }

    #[test]
    fn failed_first_configure_leaves_state_unset() {
        let mut st = StudioState::new("config.txt");
        assert!(st.configure(vec![1.0], 0.0, "relu").is_err());
        assert!(st.perceptron.is_none());
    }

    #[test]
    fn flash_is_one_shot() {
        let mut st = StudioState::new("config.txt");
        st.flash = Some(FlashMessage::success("ok"));
        assert!(st.take_flash().is_some());
        assert!(st.take_flash().is_none());
    }
}
