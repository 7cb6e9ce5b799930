//! Classifier session state
//!
//! Holds the query text, the loading flag, the latest result, the current
//! error line and the API health. Nothing here touches the network:
//! `submit` hands back a ticket describing the request to dispatch and the
//! caller reports the outcome through `apply_prediction`.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::api::{ApiError, PredictionResult};

/// Presets offered as quick examples
pub const EXAMPLE_SYMPTOMS: [&str; 4] = [
    "fever, cough, and difficulty breathing",
    "severe headache, nausea, and sensitivity to light",
    "chest pain, shortness of breath",
    "joint pain, fatigue, and muscle weakness",
];

/// Shown when the user submits a blank query
pub const VALIDATION_ERROR: &str = "Please enter symptoms";

/// Shown when a prediction fails and the server gave no message
pub const PREDICTION_FAILED: &str =
    "An error occurred while making predictions. Please try again.";

/// Guidance shown when the health check fails
pub fn connectivity_message(api_url: &str) -> String {
    format!(
        "Unable to connect to the API. Please ensure the backend server is running on {}",
        api_url
    )
}

/// Reachability of the classification service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    Checking,
    Healthy,
    Error,
}

impl ApiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Healthy => "connected",
            Self::Error => "disconnected",
        }
    }
}

/// A prediction the session wants dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictTicket {
    pub generation: u64,
    pub symptoms: String,
}

/// Interactive state of the classifier screen
#[derive(Debug)]
pub struct Session {
    symptoms: String,
    loading: bool,
    results: Option<PredictionResult>,
    error: String,
    api_status: ApiStatus,
    /// Bumped on every dispatched prediction; older responses are stale
    generation: u64,
    api_url: String,
    answered_at: Option<DateTime<Local>>,
}

impl Session {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            symptoms: String::new(),
            loading: false,
            results: None,
            error: String::new(),
            api_status: ApiStatus::Checking,
            generation: 0,
            api_url: api_url.into(),
            answered_at: None,
        }
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn results(&self) -> Option<&PredictionResult> {
        self.results.as_ref()
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn api_status(&self) -> ApiStatus {
        self.api_status
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// When the displayed result arrived
    pub fn answered_at(&self) -> Option<DateTime<Local>> {
        self.answered_at
    }

    /// Input, predict and example controls
    pub fn controls_enabled(&self) -> bool {
        !self.loading && self.api_status != ApiStatus::Error
    }

    /// Whether the predict hint should look active
    pub fn predict_enabled(&self) -> bool {
        self.controls_enabled() && !self.symptoms.trim().is_empty()
    }

    pub fn clear_enabled(&self) -> bool {
        !self.loading
    }

    /// Record the outcome of the mount-time health check. Only the first
    /// outcome counts; health never reverts.
    pub fn apply_health(&mut self, healthy: bool) -> bool {
        if self.api_status != ApiStatus::Checking {
            debug!("Ignoring health outcome, status already {:?}", self.api_status);
            return false;
        }
        if healthy {
            info!("Classification API reachable at {}", self.api_url);
            self.api_status = ApiStatus::Healthy;
        } else {
            warn!("Classification API unreachable at {}", self.api_url);
            self.api_status = ApiStatus::Error;
            self.error = connectivity_message(&self.api_url);
        }
        true
    }

    /// Start a prediction for the current query.
    ///
    /// Returns `None` without side effects when controls are disabled, and
    /// `None` with the validation error set when the query is blank.
    pub fn submit(&mut self) -> Option<PredictTicket> {
        if !self.controls_enabled() {
            return None;
        }
        if self.symptoms.trim().is_empty() {
            self.error = VALIDATION_ERROR.to_string();
            return None;
        }

        self.loading = true;
        self.error.clear();
        self.results = None;
        self.answered_at = None;
        self.generation += 1;
        debug!("Dispatching prediction #{}", self.generation);

        Some(PredictTicket {
            generation: self.generation,
            symptoms: self.symptoms.clone(),
        })
    }

    /// Record the outcome of a prediction. Outcomes for a superseded
    /// generation are dropped and leave the state untouched.
    pub fn apply_prediction(
        &mut self,
        generation: u64,
        result: Result<PredictionResult, ApiError>,
    ) -> bool {
        if generation != self.generation || !self.loading {
            warn!(
                "Dropping stale prediction #{} (current #{})",
                generation, self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(results) => {
                info!(
                    "Prediction #{} returned {} model results",
                    generation,
                    results.predictions.as_ref().map_or(0, |p| p.len())
                );
                self.results = Some(results);
                self.answered_at = Some(Local::now());
            }
            Err(e) => {
                self.error = e.server_message().unwrap_or(PREDICTION_FAILED).to_string();
            }
        }
        true
    }

    /// Reset the query, results and error. Health is left alone.
    pub fn clear(&mut self) -> bool {
        if !self.clear_enabled() {
            return false;
        }
        self.symptoms.clear();
        self.results = None;
        self.answered_at = None;
        self.error.clear();
        true
    }

    /// Replace the query with a preset without submitting it
    pub fn load_example(&mut self, index: usize) -> bool {
        let Some(example) = EXAMPLE_SYMPTOMS.get(index) else {
            return false;
        };
        if !self.controls_enabled() {
            return false;
        }
        self.symptoms = example.to_string();
        self.results = None;
        self.answered_at = None;
        self.error.clear();
        true
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        self.symptoms.push(c);
        true
    }

    pub fn insert_newline(&mut self) -> bool {
        self.insert_char('\n')
    }

    pub fn backspace(&mut self) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        self.symptoms.pop().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ModelPrediction;
    use std::collections::BTreeMap;

    fn healthy_session() -> Session {
        let mut session = Session::new("http://localhost:5000");
        session.apply_health(true);
        session
    }

    fn typed(session: &mut Session, text: &str) {
        for c in text.chars() {
            assert!(session.insert_char(c));
        }
    }

    fn flu_result() -> PredictionResult {
        let mut predictions = BTreeMap::new();
        predictions.insert(
            "m1".to_string(),
            ModelPrediction {
                model_name: "LSTM".to_string(),
                disease: "Flu".to_string(),
                confidence: 0.92,
            },
        );
        PredictionResult {
            symptoms: "fever".to_string(),
            predictions: Some(predictions),
        }
    }

    #[test]
    fn test_initial_state() {
        let session = Session::new("http://localhost:5000");
        assert_eq!(session.api_status(), ApiStatus::Checking);
        assert!(!session.is_loading());
        assert!(session.results().is_none());
        assert!(session.error().is_empty());
        // Checking does not block input
        assert!(session.controls_enabled());
    }

    #[test]
    fn test_blank_submit_sets_validation_error() {
        let mut session = healthy_session();
        typed(&mut session, "   \n ");
        assert!(session.submit().is_none());
        assert_eq!(session.error(), VALIDATION_ERROR);
        assert!(!session.is_loading());
        assert_eq!(session.generation, 0);
    }

    #[test]
    fn test_submit_sets_loading_and_clears_previous() {
        let mut session = healthy_session();
        typed(&mut session, "fever");
        let first = session.submit().unwrap();
        session.apply_prediction(first.generation, Ok(flu_result()));
        assert!(session.results().is_some());

        let ticket = session.submit().unwrap();
        assert!(session.is_loading());
        assert!(session.results().is_none());
        assert!(session.error().is_empty());
        assert_eq!(ticket.symptoms, "fever");
        assert_eq!(ticket.generation, 2);
    }

    #[test]
    fn test_success_clears_loading() {
        let mut session = healthy_session();
        typed(&mut session, "fever");
        let ticket = session.submit().unwrap();
        assert!(session.apply_prediction(ticket.generation, Ok(flu_result())));
        assert!(!session.is_loading());
        assert_eq!(session.results(), Some(&flu_result()));
        assert!(session.answered_at().is_some());
    }

    #[test]
    fn test_failure_uses_server_message() {
        let mut session = healthy_session();
        typed(&mut session, "fever");
        let ticket = session.submit().unwrap();
        let err = ApiError::Status {
            status: 400,
            message: Some("Symptoms text too short".to_string()),
        };
        assert!(session.apply_prediction(ticket.generation, Err(err)));
        assert!(!session.is_loading());
        assert_eq!(session.error(), "Symptoms text too short");
        assert_eq!(session.api_status(), ApiStatus::Healthy);
    }

    #[test]
    fn test_failure_without_server_message_uses_fallback() {
        let mut session = healthy_session();
        typed(&mut session, "fever");
        let ticket = session.submit().unwrap();
        let err = ApiError::Status {
            status: 503,
            message: None,
        };
        session.apply_prediction(ticket.generation, Err(err));
        assert_eq!(session.error(), PREDICTION_FAILED);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_stale_prediction_is_ignored() {
        let mut session = healthy_session();
        typed(&mut session, "fever");
        let first = session.submit().unwrap();
        session.apply_prediction(first.generation, Ok(flu_result()));
        let second = session.submit().unwrap();

        // A late duplicate of the first response must not end the second
        assert!(!session.apply_prediction(first.generation, Ok(flu_result())));
        assert!(session.is_loading());
        assert!(session.results().is_none());

        assert!(session.apply_prediction(second.generation, Ok(flu_result())));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_health_failure_disables_controls() {
        let mut session = Session::new("http://example.test:5000");
        assert!(session.apply_health(false));
        assert_eq!(session.api_status(), ApiStatus::Error);
        assert_eq!(session.error(), connectivity_message("http://example.test:5000"));
        assert!(!session.controls_enabled());
        assert!(!session.predict_enabled());
        assert!(!session.load_example(0));
        assert!(!session.insert_char('x'));
        assert!(session.submit().is_none());
        // Clear stays available
        assert!(session.clear_enabled());
    }

    #[test]
    fn test_health_never_reverts() {
        let mut session = Session::new("http://localhost:5000");
        session.apply_health(false);
        assert!(!session.apply_health(true));
        assert_eq!(session.api_status(), ApiStatus::Error);

        let mut session = healthy_session();
        assert!(!session.apply_health(false));
        assert_eq!(session.api_status(), ApiStatus::Healthy);
    }

    #[test]
    fn test_clear_after_prediction() {
        let mut session = healthy_session();
        typed(&mut session, "fever");
        let ticket = session.submit().unwrap();
        session.apply_prediction(ticket.generation, Ok(flu_result()));

        assert!(session.clear());
        assert!(session.results().is_none());
        assert!(session.symptoms().is_empty());
        assert!(session.error().is_empty());
        assert_eq!(session.api_status(), ApiStatus::Healthy);
    }

    #[test]
    fn test_clear_disabled_while_loading() {
        let mut session = healthy_session();
        typed(&mut session, "fever");
        session.submit().unwrap();
        assert!(!session.clear());
        assert_eq!(session.symptoms(), "fever");
    }

    #[test]
    fn test_load_example_does_not_submit() {
        let mut session = healthy_session();
        typed(&mut session, "x");
        session.submit();
        let generation = session.generation;
        session.apply_prediction(generation, Ok(flu_result()));

        assert!(session.load_example(2));
        assert_eq!(session.symptoms(), EXAMPLE_SYMPTOMS[2]);
        assert!(session.results().is_none());
        assert!(session.error().is_empty());
        assert!(!session.is_loading());
        assert_eq!(session.generation, generation);
        assert!(!session.load_example(EXAMPLE_SYMPTOMS.len()));
    }

    #[test]
    fn test_input_locked_while_loading() {
        let mut session = healthy_session();
        typed(&mut session, "cough");
        session.submit().unwrap();
        assert!(!session.insert_char('!'));
        assert!(!session.backspace());
        assert!(!session.load_example(0));
        assert!(session.submit().is_none());
        assert_eq!(session.generation, 1);
    }

    #[test]
    fn test_predict_enabled_tracks_input() {
        let mut session = healthy_session();
        assert!(!session.predict_enabled());
        typed(&mut session, "a");
        assert!(session.predict_enabled());
        assert!(session.backspace());
        assert!(!session.predict_enabled());
        assert!(!session.backspace());
    }

    #[test]
    fn test_newline_is_part_of_query() {
        let mut session = healthy_session();
        typed(&mut session, "fever");
        session.insert_newline();
        typed(&mut session, "cough");
        assert_eq!(session.submit().unwrap().symptoms, "fever\ncough");
    }
}
