//! HTTP client for the classification service
//!
//! One `reqwest::Client` and base URL shared by every endpoint. Failures are
//! logged here and handed back to the caller untouched; there is no retry
//! and no timeout beyond reqwest's defaults.

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use super::error::{ApiError, Result};
use super::types::{
    ClassesResponse, ErrorBody, ModelCatalog, ModelPrediction, ModelsResponse, PredictRequest,
    PredictionResult,
};
use super::PredictionService;

/// Client for the symptom classification API
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ClassifierClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed =
            Url::parse(base_url).map_err(|e| ApiError::Url(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::Url(format!("{}: not a base URL", base_url)));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed,
        })
    }

    /// Client for the URL configured in the environment
    pub fn from_env() -> Result<Self> {
        Self::new(&crate::config::api_url())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    /// Segments are percent-encoded individually.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        decode_body(status, &body)
    }

    /// `POST` carrying `{"symptoms": ...}` to the endpoint at `segments`
    fn post_request(&self, segments: &[&str], symptoms: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!("POST {}", url);
        Ok(self.http.post(url).json(&PredictRequest { symptoms }))
    }

    async fn post_json<T: DeserializeOwned>(&self, segments: &[&str], symptoms: &str) -> Result<T> {
        let resp = self.post_request(segments, symptoms)?.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        decode_body(status, &body)
    }
}

/// Turn a status and raw body into a typed result. Non-2xx statuses become
/// `ApiError::Status`, carrying the body's `error` field when it has one.
pub fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    check_status(status, body)?;
    Ok(serde_json::from_slice(body)?)
}

fn check_status(status: StatusCode, body: &[u8]) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.error);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

impl PredictionService for ClassifierClient {
    async fn check_health(&self) -> Result<Value> {
        let result: Result<Value> = async {
            let url = self.endpoint(&["health"])?;
            let resp = self.http.get(url).send().await?;
            let status = resp.status();
            let body = resp.bytes().await?;
            check_status(status, &body)?;
            // Only reachability matters; tolerate non-JSON health bodies
            Ok(serde_json::from_slice(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned())))
        }
        .await;
        result.inspect_err(|e| error!("Error checking health: {}", e))
    }

    async fn get_models(&self) -> Result<ModelCatalog> {
        self.get_json::<ModelsResponse>(&["models"])
            .await
            .map(ModelCatalog::from)
            .inspect_err(|e| error!("Error fetching models: {}", e))
    }

    async fn get_classes(&self) -> Result<Vec<String>> {
        self.get_json::<ClassesResponse>(&["classes"])
            .await
            .map(Vec::from)
            .inspect_err(|e| error!("Error fetching classes: {}", e))
    }

    async fn predict_all(&self, symptoms: &str) -> Result<PredictionResult> {
        self.post_json(&["predict"], symptoms)
            .await
            .inspect_err(|e| error!("Error predicting: {}", e))
    }

    async fn predict_single(&self, symptoms: &str, model_name: &str) -> Result<ModelPrediction> {
        self.post_json(&["predict", model_name], symptoms)
            .await
            .inspect_err(|e| error!("Error predicting with model {}: {}", model_name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn json_body(req: &reqwest::Request) -> Value {
        let bytes = req.body().and_then(|b| b.as_bytes()).expect("buffered body");
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_predict_all_request() {
        let client = ClassifierClient::new("http://localhost:5000").unwrap();
        let req = client
            .post_request(&["predict"], "fever, cough")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.url().as_str(), "http://localhost:5000/predict");
        assert_eq!(req.headers()["content-type"], "application/json");
        assert_eq!(json_body(&req), serde_json::json!({"symptoms": "fever, cough"}));
    }

    #[test]
    fn test_predict_single_request() {
        let client = ClassifierClient::new("http://localhost:5000/").unwrap();
        let req = client
            .post_request(&["predict", "Feed-Forward NN"], "chest pain")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.url().path(), "/predict/Feed-Forward%20NN");
        assert_eq!(json_body(&req), serde_json::json!({"symptoms": "chest pain"}));
    }

    #[test]
    fn test_endpoint_default_base() {
        let client = ClassifierClient::new("http://localhost:5000").unwrap();
        assert_eq!(
            client.endpoint(&["predict"]).unwrap().as_str(),
            "http://localhost:5000/predict"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = ClassifierClient::new("http://api.internal/v1/").unwrap();
        assert_eq!(
            client.endpoint(&["health"]).unwrap().as_str(),
            "http://api.internal/v1/health"
        );
    }

    #[test]
    fn test_endpoint_encodes_model_name() {
        let client = ClassifierClient::new("http://localhost:5000").unwrap();
        let url = client.endpoint(&["predict", "TF-IDF + XGBoost"]).unwrap();
        assert_eq!(url.path(), "/predict/TF-IDF%20+%20XGBoost");
        let url = client.endpoint(&["predict", "a/b"]).unwrap();
        assert_eq!(url.path(), "/predict/a%2Fb");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ClassifierClient::new("not a url"),
            Err(ApiError::Url(_))
        ));
        assert!(matches!(
            ClassifierClient::new("mailto:someone@example.com"),
            Err(ApiError::Url(_))
        ));
    }

    #[test]
    fn test_decode_success() {
        let body = br#"{"model_name": "LSTM", "disease": "Flu", "confidence": 0.92}"#;
        let pred: ModelPrediction = decode_body(StatusCode::OK, body).unwrap();
        assert_eq!(pred.model_name, "LSTM");
    }

    #[test]
    fn test_decode_error_with_server_message() {
        let body = br#"{"error": "Model not found: GRU"}"#;
        let err = decode_body::<ModelPrediction>(StatusCode::NOT_FOUND, body).unwrap_err();
        assert_eq!(err.server_message(), Some("Model not found: GRU"));
    }

    #[test]
    fn test_decode_error_without_json_body() {
        let err = decode_body::<Value>(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>")
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, message: None }));
    }

    #[test]
    fn test_decode_malformed_success_body() {
        let err = decode_body::<PredictionResult>(StatusCode::OK, b"not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
