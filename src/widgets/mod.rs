//! Widget modules for UI components

pub mod model_info;
pub mod prediction_results;

pub use model_info::ModelInfo;
pub use prediction_results::PredictionResults;
