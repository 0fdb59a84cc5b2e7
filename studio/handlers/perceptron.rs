use std::io::Cursor;
use tiny_http::{Request, Response};
use tracing::{info, warn};

use perceptron_studio::io::{parse_row, parse_vectors};
use perceptron_studio::{random_weights, ActivationFunction, ParseError, PerceptronError};

use crate::render::{html_escape, render_page};
use crate::state::{FlashMessage, FormInputs, RunResult, SharedState, StudioState};
use crate::util::form::{form_get, parse_form};

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    let flash = st.take_flash();
    let page  = build_page(&st, flash);
    drop(st);

    crate::routes::html_response(page)
}

// ---------------------------------------------------------------------------
// POST /run
// ---------------------------------------------------------------------------

pub fn handle_run(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let form = read_form(request);
    run_form(&state, form);
    crate::routes::redirect("/")
}

/// Parses, configures and evaluates one submitted form.
///
/// Any rejection clears the previous results so a stale table never sits
/// next to an error banner.
pub fn run_form(state: &SharedState, form: FormInputs) {
    // Parse everything before touching the perceptron: a bad line must never
    // leave a half-applied configuration behind.
    let parsed = parse_inputs(&form);

    let mut st = state.lock().unwrap();
    st.form = form.clone();
    let (weights, bias, vectors) = match parsed {
        Ok(p)  => p,
        Err(e) => {
            st.flash    = Some(FlashMessage::error(e.to_string()));
            st.last_run = None;
            return;
        }
    };

    let snapshot = match st.configure(weights, bias, &form.activation) {
        Ok(s)  => s,
        Err(e) => {
            warn!("{}", e);
            st.flash    = Some(FlashMessage::error(e.to_string()));
            st.last_run = None;
            return;
        }
    };
    drop(st);

    // Evaluate outside the lock against the snapshot taken above.
    let outcome = snapshot.evaluate(&vectors);

    let mut st = state.lock().unwrap();
    match outcome {
        Ok(outputs) => {
            info!(vectors = vectors.len(), activation = %snapshot.activation, "run complete");
            st.flash = Some(FlashMessage::success(format!(
                "Evaluated {} vector{}.", vectors.len(), if vectors.len() == 1 { "" } else { "s" }
            )));
            st.last_run = Some(RunResult {
                activation: snapshot.activation,
                rows: vectors.into_iter().zip(outputs).collect(),
            });
        }
        Err(e) => {
            warn!("{}", e);
            st.flash    = Some(FlashMessage::error(e.to_string()));
            st.last_run = None;
        }
    }
}

// ---------------------------------------------------------------------------
// POST /weights/randomize
// ---------------------------------------------------------------------------

/// Fills the weights field with uniform values in [-1, 1).
///
/// The count follows the weights already typed, or the first vector when the
/// field is empty.  The perceptron itself is only reconfigured on the next run.
pub fn handle_randomize(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut form = read_form(request);

    let count = match weight_count(&form) {
        Ok(n) if n > 0 => n,
        Ok(_) => {
            let mut st = state.lock().unwrap();
            st.form  = form;
            st.flash = Some(FlashMessage::error(
                "Enter weights or at least one vector so the weight count is known."));
            return crate::routes::redirect("/");
        }
        Err(e) => {
            let mut st = state.lock().unwrap();
            st.form  = form;
            st.flash = Some(FlashMessage::error(e.to_string()));
            return crate::routes::redirect("/");
        }
    };

    form.weights = format_row(&random_weights(count));

    let mut st = state.lock().unwrap();
    st.form  = form;
    st.flash = Some(FlashMessage::success(format!("Randomized {} weights.", count)));
    drop(st);

    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// POST /vectors/clear
// ---------------------------------------------------------------------------

pub fn handle_clear(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut form = read_form(request);
    form.vectors.clear();

    let mut st = state.lock().unwrap();
    st.form     = form;
    st.last_run = None;
    drop(st);

    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// Form handling
// ---------------------------------------------------------------------------

fn read_form(request: &mut Request) -> FormInputs {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let pairs = parse_form(&body);

    FormInputs {
        activation: form_get(&pairs, "activation").unwrap_or("").trim().to_owned(),
        bias:       form_get(&pairs, "bias").unwrap_or("").trim().to_owned(),
        weights:    form_get(&pairs, "weights").unwrap_or("").trim().to_owned(),
        vectors:    form_get(&pairs, "vectors").unwrap_or("").to_owned(),
    }
}

/// Turns the raw form text into `(weights, bias, vectors)`.
pub fn parse_inputs(form: &FormInputs) -> Result<(Vec<f64>, f64, Vec<Vec<f64>>), PerceptronError> {
    let bias = match form.bias.parse::<f64>() {
        Ok(b) if b.is_finite() => b,
        _ => return Err(ParseError::new(1, form.bias.as_str(), "bias must be a number").into()),
    };
    let weights = parse_row(&form.weights, 1)?;
    let vectors = parse_vectors(&form.vectors)?;
    Ok((weights, bias, vectors))
}

fn weight_count(form: &FormInputs) -> Result<usize, PerceptronError> {
    let weights = parse_row(&form.weights, 1)?;
    if !weights.is_empty() {
        return Ok(weights.len());
    }
    let vectors = parse_vectors(&form.vectors)?;
    Ok(vectors.first().map(|v| v.len()).unwrap_or(0))
}

/// Formats a vector the way the input fields expect it: `1, -0.5, 2`.
pub fn format_row(values: &[f64]) -> String {
    values.iter().map(|v| format!("{}", v)).collect::<Vec<_>>().join(", ")
}

// ---------------------------------------------------------------------------
// Page builder
// ---------------------------------------------------------------------------

fn build_page(st: &StudioState, flash: Option<FlashMessage>) -> String {
    let activation_options = ActivationFunction::ALL.iter().map(|a| {
        let sel = if a.name() == st.form.activation { " selected" } else { "" };
        format!("<option value=\"{name}\"{sel}>{name}</option>", name = a.name(), sel = sel)
    }).collect::<Vec<_>>().join("\n");

    let config_status = match &st.perceptron {
        Some(p) => {
            let c = p.configuration();
            format!(
                "Active: {} weight{}, bias {}, {}.",
                c.weights.len(), if c.weights.len() == 1 { "" } else { "s" }, c.bias, c.activation
            )
        }
        None => "No configuration applied yet.".to_owned(),
    };

    let results = st.last_run.as_ref().map(build_results_html).unwrap_or_default();

    render_page(flash, |tmpl| {
        tmpl
            .replace("{{ACTIVATION_OPTIONS}}", &activation_options)
            .replace("{{BIAS}}", &html_escape(&st.form.bias))
            .replace("{{WEIGHTS}}", &html_escape(&st.form.weights))
            .replace("{{VECTORS}}", &html_escape(&st.form.vectors))
            .replace("{{CONFIG_STATUS}}", &html_escape(&config_status))
            .replace("{{CONFIG_PATH}}", &html_escape(&st.config_path))
            .replace("{{RESULTS}}", &results)
    })
}

fn build_results_html(run: &RunResult) -> String {
    let rows: String = run.rows.iter().enumerate().map(|(i, (vector, output))| {
        let shown = match run.activation {
            ActivationFunction::Heaviside => format!("{}", output),
            ActivationFunction::Sigmoid   => format!("{:.6}", output),
        };
        format!(
            "<tr><td>{}</td><td>[{}]</td><td class=\"out\">{}</td></tr>",
            i + 1, format_row(vector), shown
        )
    }).collect();

    format!(
        r#"<div class="card"><h2>Results ({activation})</h2>
<table class="results">
  <thead><tr><th>#</th><th>Vector</th><th>Output</th></tr></thead>
  <tbody>{rows}</tbody>
</table>
</div>"#,
        activation = run.activation, rows = rows
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use crate::state::FlashKind;

    fn shared_with_previous_run() -> SharedState {
        let state = Arc::new(Mutex::new(StudioState::new("config.txt")));
        run_form(&state, form("0", "0.5, -0.5", "1,1\n2,0"));
        assert!(state.lock().unwrap().last_run.is_some());
        state
    }

    fn assert_rejected_without_results(state: &SharedState) {
        let st = state.lock().unwrap();
        assert!(st.last_run.is_none());
        assert!(matches!(st.flash, Some(FlashMessage { kind: FlashKind::Error, .. })));
    }

    fn form(bias: &str, weights: &str, vectors: &str) -> FormInputs {
        FormInputs {
            activation: "heaviside".into(),
            bias: bias.into(),
            weights: weights.into(),
            vectors: vectors.into(),
        }
    }

    #[test]
    fn parses_complete_form() {
        let (w, b, v) = parse_inputs(&form("0", "0.5, -0.5", "1,1\n2,0\n")).unwrap();
        assert_eq!(w, vec![0.5, -0.5]);
        assert_eq!(b, 0.0);
        assert_eq!(v, vec![vec![1.0, 1.0], vec![2.0, 0.0]]);
    }

    #[test]
    fn bad_bias_or_vector_is_a_parse_error() {
        assert!(matches!(parse_inputs(&form("x", "1", "1")), Err(PerceptronError::Parse(_))));
        assert!(matches!(parse_inputs(&form("", "1", "1")), Err(PerceptronError::Parse(_))));
        match parse_inputs(&form("0", "1", "1\nbad\n")) {
            Err(PerceptronError::Parse(e)) => assert_eq!((e.line, e.content.as_str()), (2, "bad")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn successful_run_stores_rows_in_order() {
        let state = shared_with_previous_run();
        let st = state.lock().unwrap();
        let run = st.last_run.as_ref().unwrap();
        assert_eq!(run.rows, vec![(vec![1.0, 1.0], 1.0), (vec![2.0, 0.0], 1.0)]);
    }

    #[test]
    fn parse_failure_clears_previous_results() {
        let state = shared_with_previous_run();
        run_form(&state, form("0", "0.5, -0.5", "1,1\noops"));
        assert_rejected_without_results(&state);
    }

    #[test]
    fn unknown_activation_clears_previous_results() {
        let state = shared_with_previous_run();
        let mut bad = form("0", "0.5, -0.5", "1,1");
        bad.activation = "relu".into();
        run_form(&state, bad);
        assert_rejected_without_results(&state);
        // The configuration from the earlier run is still in place.
        let st = state.lock().unwrap();
        assert_eq!(st.perceptron.as_ref().unwrap().configuration().activation,
                   ActivationFunction::Heaviside);
    }

    #[test]
    fn dimension_mismatch_clears_previous_results() {
        let state = shared_with_previous_run();
        run_form(&state, form("0", "0.5, -0.5", "1,1\n1"));
        assert_rejected_without_results(&state);
    }

    #[test]
    fn weight_count_falls_back_to_first_vector() {
        assert_eq!(weight_count(&form("0", "1,2,3", "")).unwrap(), 3);
        assert_eq!(weight_count(&form("0", "", "4,5\n6,7")).unwrap(), 2);
        assert_eq!(weight_count(&form("0", "", "")).unwrap(), 0);
    }

    #[test]
    fn results_table_lists_rows_in_order() {
        let run = RunResult {
            activation: ActivationFunction::Heaviside,
            rows: vec![(vec![1.0, 1.0], 1.0), (vec![-2.0, 0.0], 0.0)],
        };
        let html = build_results_html(&run);
        let first  = html.find("[1, 1]").unwrap();
        let second = html.find("[-2, 0]").unwrap();
        assert!(first < second);
        assert!(html.contains("Results (heaviside)"));
    }
}
