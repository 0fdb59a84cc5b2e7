use serde::{Serialize, Deserialize};

use crate::error::Result;

/// A fully serializable description of a perceptron configuration.
///
/// The activation is stored by name and only resolved when a `PerceptronSpec` is turned
/// into a `Perceptron`, so a hand-edited file with an unknown activation is
/// reported as `UnknownActivation` rather than a JSON error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptronSpec {
    /// Human-readable name, also used as the export file stem.
    pub name: String,
    pub weights: Vec<f64>,
    pub bias: f64,
    pub activation: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl PerceptronSpec {
    /// Serializes this configuration to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `PerceptronSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<PerceptronSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PerceptronError;
    use crate::perceptron::Perceptron;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("perceptron-spec-{}-{}", std::process::id(), name))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn save_then_load() {
        let spec = PerceptronSpec {
            name: "and".into(),
            weights: vec![1.0, 1.0],
            bias: -1.5,
            activation: "heaviside".into(),
            description: Some("logical AND".into()),
        };
        let path = temp_path("and.json");
        spec.save_json(&path).unwrap();
        let loaded = PerceptronSpec::load_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, spec);
    }

    #[test]
    fn description_is_optional() {
        let json = r#"{"name":"x","weights":[0.5],"bias":0.0,"activation":"sigmoid"}"#;
        let spec: PerceptronSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.description, None);
    }

    #[test]
    fn unknown_activation_surfaces_on_build() {
        let json = r#"{"name":"x","weights":[0.5],"bias":0.0,"activation":"tanh"}"#;
        let spec: PerceptronSpec = serde_json::from_str(json).unwrap();
        assert!(matches!(
            Perceptron::from_spec(&spec),
            Err(PerceptronError::UnknownActivation { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PerceptronSpec::load_json(&temp_path("missing.json")).unwrap_err();
        assert!(matches!(err, PerceptronError::Io(_)));
    }
}
