//! Prediction service data structures
//!
//! Types for deserializing responses from the classification service.
//! The service has shipped more than one shape for some endpoints, so the
//! catalog and class list accept every shape observed so far.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Request body for both predict endpoints
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest<'a> {
    pub symptoms: &'a str,
}

/// A single model's answer for a symptom query
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelPrediction {
    pub model_name: String,
    pub disease: String,
    pub confidence: f64,
}

/// Response of the predict-all endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictionResult {
    /// Query text echoed back by the service
    #[serde(default)]
    pub symptoms: String,
    /// One entry per model, keyed by the service's model key
    #[serde(default)]
    pub predictions: Option<BTreeMap<String, ModelPrediction>>,
}

impl PredictionResult {
    /// Predictions in display order, or `None` when the field was absent
    pub fn entries(&self) -> Option<impl Iterator<Item = (&String, &ModelPrediction)>> {
        self.predictions.as_ref().map(|p| p.iter())
    }
}

/// One row of the model catalog
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    pub name: String,
    pub accuracy: Option<f64>,
}

impl ModelEntry {
    pub fn new(name: impl Into<String>, accuracy: Option<f64>) -> Self {
        Self {
            name: name.into(),
            accuracy,
        }
    }

    /// Accuracy as a display string: "22.92% accuracy", or "N/A" when
    /// missing or zero
    pub fn accuracy_label(&self) -> String {
        match self.accuracy {
            Some(acc) if acc > 0.0 => format!("{:.2}% accuracy", acc * 100.0),
            _ => "N/A".to_string(),
        }
    }
}

/// Available models and their reported accuracies
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCatalog {
    pub entries: Vec<ModelEntry>,
}

/// Accuracies from the latest training run, shown when the service
/// catalog is unavailable
pub const FALLBACK_ACCURACIES: [(&str, f64); 5] = [
    ("TF-IDF + XGBoost", 0.2286),
    ("Feed-Forward NN", 0.2288),
    ("RNN", 0.2284),
    ("LSTM", 0.2292),
    ("Ensemble", 0.2292),
];

impl ModelCatalog {
    /// Catalog built from the fixed accuracy table
    pub fn fallback() -> Self {
        Self {
            entries: FALLBACK_ACCURACIES
                .iter()
                .map(|(name, acc)| ModelEntry::new(*name, Some(*acc)))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Column-oriented model table (`{"Model": [...], "Accuracy": [...]}`)
#[derive(Debug, Clone, Deserialize)]
pub struct ModelTable {
    #[serde(rename = "Model", default)]
    pub model: Vec<String>,
    #[serde(rename = "Accuracy", default)]
    pub accuracy: Vec<f64>,
}

/// Row-oriented model description
#[derive(Debug, Clone, Deserialize)]
pub struct ModelRow {
    #[serde(alias = "model", alias = "model_name")]
    pub name: String,
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// Body of the `/models` response
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ModelsPayload {
    Table(ModelTable),
    Rows(Vec<ModelRow>),
    Names(Vec<String>),
}

/// Envelope of the `/models` response
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsResponse {
    pub models: ModelsPayload,
}

impl From<ModelsResponse> for ModelCatalog {
    fn from(resp: ModelsResponse) -> Self {
        let entries = match resp.models {
            ModelsPayload::Table(table) => {
                let mut accuracies = table.accuracy.into_iter();
                table
                    .model
                    .into_iter()
                    .map(|name| ModelEntry::new(name, accuracies.next()))
                    .collect()
            }
            ModelsPayload::Rows(rows) => rows
                .into_iter()
                .map(|row| ModelEntry::new(row.name, row.accuracy))
                .collect(),
            ModelsPayload::Names(names) => names
                .into_iter()
                .map(|name| ModelEntry::new(name, None))
                .collect(),
        };
        Self { entries }
    }
}

/// Body of the `/classes` response
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ClassesResponse {
    List(Vec<String>),
    Wrapped { classes: Vec<String> },
}

impl From<ClassesResponse> for Vec<String> {
    fn from(resp: ClassesResponse) -> Self {
        match resp {
            ClassesResponse::List(classes) | ClassesResponse::Wrapped { classes } => classes,
        }
    }
}

/// Error body returned by the service on failed requests
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
