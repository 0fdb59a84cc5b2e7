use std::io::Cursor;
use tiny_http::Response;
use tracing::{info, warn};

use perceptron_studio::io::load_config;

use crate::handlers::perceptron::format_row;
use crate::state::{FlashMessage, SharedState, StudioState};

/// Loads the configuration line file into the editor and the perceptron.
///
/// On failure the perceptron is left as it was (unset at startup) and the
/// error is queued as a flash message.
pub fn apply_config_file(st: &mut StudioState) {
    let config = match load_config(&st.config_path) {
        Ok(c)  => c,
        Err(e) => {
            warn!(path = %st.config_path, "failed to load configuration: {}", e);
            st.flash = Some(FlashMessage::error(format!(
                "Failed to load configuration '{}': {}", st.config_path, e
            )));
            return;
        }
    };

    st.form.bias    = format!("{}", config.bias);
    st.form.weights = format_row(&config.weights);

    let activation = st.form.activation.clone();
    match st.configure(config.weights, config.bias, &activation) {
        Ok(c) => {
            info!(path = %st.config_path, weights = c.weights.len(), bias = c.bias, "configuration loaded");
            st.flash = Some(FlashMessage::success(format!("Loaded configuration from '{}'.", st.config_path)));
        }
        Err(e) => st.flash = Some(FlashMessage::error(e.to_string())),
    }
}

// ---------------------------------------------------------------------------
// POST /config/reload
// ---------------------------------------------------------------------------

pub fn handle_reload(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    apply_config_file(&mut st);
    drop(st);

    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// GET /config/export
// ---------------------------------------------------------------------------

pub fn handle_export(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    let spec = match st.perceptron.as_ref().map(|p| p.to_spec("perceptron")) {
        Some(spec) => spec,
        None => {
            st.flash = Some(FlashMessage::error("Run the perceptron once before exporting its configuration."));
            return crate::routes::redirect("/");
        }
    };
    drop(st);

    match spec.to_json_pretty() {
        Ok(json) => crate::routes::json_download_response(json, "perceptron.json"),
        Err(e) => {
            let mut st = state.lock().unwrap();
            st.flash = Some(FlashMessage::error(e.to_string()));
            crate::routes::redirect("/")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FlashKind;

    fn temp_config(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir()
            .join(format!("studio-config-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn valid_file_fills_form_and_configures() {
        let path = temp_config("ok.txt", "-1.5,1,1\n");
        let mut st = StudioState::new(path.clone());
        apply_config_file(&mut st);
        let _ = std::fs::remove_file(&path);

        assert_eq!(st.form.bias, "-1.5");
        assert_eq!(st.form.weights, "1, 1");
        assert_eq!(st.perceptron.as_ref().unwrap().dimension(), 2);
    }

    #[test]
    fn malformed_file_leaves_perceptron_unset() {
        let path = temp_config("bad.txt", "1,two,3\n");
        let mut st = StudioState::new(path.clone());
        apply_config_file(&mut st);
        let _ = std::fs::remove_file(&path);

        assert!(st.perceptron.is_none());
        assert!(matches!(st.flash, Some(FlashMessage { kind: FlashKind::Error, .. })));
    }

    #[test]
    fn missing_file_is_reported() {
        let mut st = StudioState::new("/nonexistent/perceptron/config.txt");
        apply_config_file(&mut st);
        assert!(st.perceptron.is_none());
        assert!(st.flash.as_ref().unwrap().text.contains("config.txt"));
    }
}
