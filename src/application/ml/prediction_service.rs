use crate::domain::errors::PredictionError;
use crate::domain::ml::encoder::{FeatureEncoder, PredictionRequest};
use crate::domain::ml::ensemble::ModelContribution;
use crate::domain::ml::model_package::ModelPackage;
use crate::infrastructure::observability::Metrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub predicted_sales: f64,
    /// Ensemble weights in base-model order
    pub weights: Vec<f64>,
    pub contributions: Vec<ModelContribution>,
    pub request: PredictionRequest,
}

/// Sales prediction over the shared model package.
///
/// When the package failed to load the service stays up in degraded mode and
/// every call returns [`PredictionError::ModelUnavailable`] without touching
/// the encoder.
pub struct PredictionService {
    package: Option<Arc<ModelPackage>>,
    encoder: FeatureEncoder,
    metrics: Metrics,
}

impl PredictionService {
    pub fn new(package: Option<Arc<ModelPackage>>, encoder: FeatureEncoder, metrics: Metrics) -> Self {
        metrics
            .model_loaded
            .set(if package.is_some() { 1.0 } else { 0.0 });
        Self {
            package,
            encoder,
            metrics,
        }
    }

    pub fn unavailable(encoder: FeatureEncoder, metrics: Metrics) -> Self {
        Self::new(None, encoder, metrics)
    }

    pub fn is_available(&self) -> bool {
        self.package.is_some()
    }

    pub fn package(&self) -> Option<&ModelPackage> {
        self.package.as_deref()
    }

    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError> {
        let Some(package) = &self.package else {
            self.metrics.inc_predictions("unavailable");
            return Err(PredictionError::ModelUnavailable);
        };

        let started = Instant::now();
        let outcome = self
            .encoder
            .encode(request)
            .and_then(|features| package.score(&features));
        self.metrics
            .observe_prediction_latency(started.elapsed().as_secs_f64());

        match outcome {
            Ok(prediction) => {
                self.metrics.inc_predictions("ok");
                debug!(
                    "Predicted {:.2} for {} {}g on {}",
                    prediction.value, request.category, request.net_weight, request.voucher_date
                );
                Ok(PredictionResult {
                    predicted_sales: prediction.value,
                    weights: prediction.weights(),
                    contributions: prediction.contributions,
                    request: request.clone(),
                })
            }
            Err(e) => {
                self.metrics.inc_predictions("error");
                warn!("Prediction failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ml::ensemble::NamedModel;
    use crate::domain::ml::feature_registry::Feature;
    use crate::domain::ml::regressor::Regressor;
    use crate::domain::ml::scaler::StandardScaler;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        output: f64,
        calls: Arc<AtomicUsize>,
    }

    impl Regressor for Counting {
        fn predict(&self, _row: &[f64]) -> Result<f64, PredictionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output)
        }

        fn kind(&self) -> &str {
            "counting"
        }
    }

    fn service(calls: Arc<AtomicUsize>) -> PredictionService {
        let columns: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
        let package = ModelPackage::new(
            &columns,
            StandardScaler::identity(columns.len()),
            vec![
                NamedModel::new(
                    "a",
                    Box::new(Counting {
                        output: 10.0,
                        calls: calls.clone(),
                    }),
                ),
                NamedModel::new(
                    "b",
                    Box::new(Counting {
                        output: 20.0,
                        calls,
                    }),
                ),
            ],
            vec![0.4, 0.6],
        )
        .unwrap();
        PredictionService::new(
            Some(Arc::new(package)),
            FeatureEncoder::default(),
            Metrics::new().unwrap(),
        )
    }

    #[test]
    fn test_predict_combines_models() {
        let calls = Arc::new(AtomicUsize::new(0));
        let svc = service(calls.clone());
        let request = PredictionRequest::new("ring", 6.0, "2024-02-29");

        let result = svc.predict(&request).unwrap();
        assert!((result.predicted_sales - 16.0).abs() < 1e-12);
        assert_eq!(result.weights, vec![0.4, 0.6]);
        assert_eq!(result.request, request);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalid_date_never_reaches_models() {
        let calls = Arc::new(AtomicUsize::new(0));
        let svc = service(calls.clone());

        let err = svc
            .predict(&PredictionRequest::new("ring", 6.0, "2024-13-01"))
            .unwrap_err();
        assert!(matches!(err, PredictionError::InvalidDate { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unrecognized_inputs_still_predict() {
        let svc = service(Arc::new(AtomicUsize::new(0)));
        let request = PredictionRequest::new("BANGLE", 6.0, "2024-02-29").with_store("STORE_9");
        assert!(svc.predict(&request).is_ok());
    }

    #[test]
    fn test_unavailable_service_reports_distinctly() {
        let metrics = Metrics::new().unwrap();
        let svc = PredictionService::unavailable(FeatureEncoder::default(), metrics.clone());
        assert!(!svc.is_available());

        // Even an invalid date reports unavailability, not a parse error.
        for date in ["2024-02-29", "2024-13-01"] {
            let err = svc
                .predict(&PredictionRequest::new("ring", 6.0, date))
                .unwrap_err();
            assert!(err.is_unavailable());
        }
        assert!(metrics.render().contains("jewelai_model_loaded 0"));
    }
}
