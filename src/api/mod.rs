//! Prediction service API
//!
//! `PredictionService` is the contract the dashboard needs from the
//! classification backend. `ClassifierClient` implements it over HTTP.

use std::future::Future;

use serde_json::Value;

pub mod client;
pub mod error;
pub mod types;

pub use client::ClassifierClient;
pub use error::{ApiError, Result};
pub use types::{ModelCatalog, ModelEntry, ModelPrediction, PredictionResult};

/// Operations exposed by the classification service
pub trait PredictionService: Send + Sync + 'static {
    /// Liveness probe; callers only care whether it succeeds
    fn check_health(&self) -> impl Future<Output = Result<Value>> + Send;

    /// Available models and their reported accuracies
    fn get_models(&self) -> impl Future<Output = Result<ModelCatalog>> + Send;

    /// Disease labels the models can predict
    fn get_classes(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Run the query through every model
    fn predict_all(&self, symptoms: &str) -> impl Future<Output = Result<PredictionResult>> + Send;

    /// Run the query through one named model
    fn predict_single(
        &self,
        symptoms: &str,
        model_name: &str,
    ) -> impl Future<Output = Result<ModelPrediction>> + Send;
}
