use super::dto::{
    HealthResponse, ItemsQuery, PredictionResponse, PredictionsQuery, RootResponse,
};
use super::error::ApiError;
use crate::application::bootstrap::ServicesHandle;
use crate::domain::inventory::EnsembleMetrics;
use crate::domain::inventory::analytics::{
    CategorySummary, ItemFilter, ItemsPage, KpiSummary, MarketTrend, PredictionPoint,
};
use crate::domain::ml::encoder::PredictionRequest;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;

pub async fn root(State(state): State<ServicesHandle>) -> Json<RootResponse> {
    state.metrics.inc_requests("root");
    Json(RootResponse::default())
}

pub async fn health(State(state): State<ServicesHandle>) -> Json<HealthResponse> {
    state.metrics.inc_requests("health");
    Json(HealthResponse {
        status: "healthy",
        data_loaded: true,
        model_loaded: state.predictor.is_available(),
        inventory_items: state.analytics.item_count(),
    })
}

pub async fn metrics(State(state): State<ServicesHandle>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub async fn kpi_summary(State(state): State<ServicesHandle>) -> Json<KpiSummary> {
    state.metrics.inc_requests("kpis");
    Json(state.analytics.kpis())
}

pub async fn inventory_categories(
    State(state): State<ServicesHandle>,
) -> Json<Vec<CategorySummary>> {
    state.metrics.inc_requests("categories");
    Json(state.analytics.categories())
}

pub async fn inventory_items(
    State(state): State<ServicesHandle>,
    Query(query): Query<ItemsQuery>,
) -> Json<ItemsPage> {
    state.metrics.inc_requests("items");
    let filter = ItemFilter::new(query.category, query.risk_min, query.risk_max);
    Json(state.analytics.items(&filter))
}

pub async fn analytics_performance(State(state): State<ServicesHandle>) -> Json<EnsembleMetrics> {
    state.metrics.inc_requests("performance");
    Json(state.analytics.performance().clone())
}

pub async fn prediction_comparison(
    State(state): State<ServicesHandle>,
    Query(query): Query<PredictionsQuery>,
) -> Json<Vec<PredictionPoint>> {
    state.metrics.inc_requests("predictions");
    Json(state.analytics.prediction_comparison(query.limit))
}

pub async fn market_trends(State(state): State<ServicesHandle>) -> Json<Vec<MarketTrend>> {
    state.metrics.inc_requests("market_trends");
    Json(state.analytics.market_trends())
}

pub async fn predict_sales(
    State(state): State<ServicesHandle>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    state.metrics.inc_requests("predict");
    let Json(request) = payload?;
    let result = state.predictor.predict(&request)?;
    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ml::PredictionService;
    use crate::application::ml::linear_regressor::LinearRegressor;
    use crate::domain::inventory::{
        EnsembleScores, InventoryItem, InventorySnapshot, PredictionRecord,
    };
    use crate::domain::ml::encoder::FeatureEncoder;
    use crate::domain::ml::ensemble::NamedModel;
    use crate::domain::ml::model_package::ModelPackage;
    use crate::domain::ml::scaler::StandardScaler;
    use crate::infrastructure::observability::Metrics;
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn snapshot() -> InventorySnapshot {
        let item = |label: &str, category: &str, days: f64, risk: f64| InventoryItem {
            label_no: label.to_string(),
            category: category.to_string(),
            predicted_potential_sales: 50_000.0,
            days_to_sell: days,
            inventory_risk_score: risk,
            turnover_category: "Fast".to_string(),
        };
        InventorySnapshot {
            items: vec![
                item("R-1", "GOLD RINGS", 5.0, 25.0),
                item("R-2", "GOLD RINGS", 6.0, 47.0),
                item("C-1", "GOLD CHAINS", 40.0, 60.0),
            ],
            predictions: vec![PredictionRecord {
                actual_sales: 1000.0,
                ensemble_prediction: 950.0,
                product_category: Some("GOLD RINGS".to_string()),
            }],
            metrics: EnsembleMetrics {
                ensemble: EnsembleScores {
                    r2_score: 0.88,
                    rmse: 10.0,
                    mae: 8.0,
                    mape: 3.0,
                },
                base_models: json!({"ridge": {"r2_score": 0.8}}),
                training_info: json!({"samples": 3}),
            },
        }
    }

    /// Two constant-output linear models over the net_weight column only.
    fn loaded_state() -> ServicesHandle {
        let package = ModelPackage::new(
            &["net_weight"],
            StandardScaler::identity(1),
            vec![
                NamedModel::new("low", Box::new(LinearRegressor::new(vec![0.0], 10.0))),
                NamedModel::new("high", Box::new(LinearRegressor::new(vec![0.0], 20.0))),
            ],
            vec![0.6, 0.4],
        )
        .unwrap();
        let metrics = Metrics::new().unwrap();
        let predictor = PredictionService::new(
            Some(Arc::new(package)),
            FeatureEncoder::default(),
            metrics.clone(),
        );
        ServicesHandle::new(snapshot(), predictor, metrics)
    }

    fn degraded_state() -> ServicesHandle {
        let metrics = Metrics::new().unwrap();
        let predictor = PredictionService::unavailable(FeatureEncoder::default(), metrics.clone());
        ServicesHandle::new(snapshot(), predictor, metrics)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_model_state() {
        let Json(loaded) = health(State(loaded_state())).await;
        assert!(loaded.model_loaded);
        assert_eq!(loaded.inventory_items, 3);

        let Json(degraded) = health(State(degraded_state())).await;
        assert!(!degraded.model_loaded);
        assert!(degraded.data_loaded);
    }

    #[tokio::test]
    async fn test_kpi_payload_is_camel_case() {
        let Json(kpis) = kpi_summary(State(loaded_state())).await;
        let value = serde_json::to_value(&kpis).unwrap();
        assert_eq!(value["totalStockValue"], json!(150_000.0));
        assert_eq!(value["ageingStock"], json!(2));
        assert_eq!(value["predictedDeadstock"], json!(1));
        assert_eq!(value["fastMovingItems"], json!(1));
        assert_eq!(value["totalItems"], json!(3));
    }

    #[tokio::test]
    async fn test_items_query_defaults() {
        let Json(page) = inventory_items(State(loaded_state()), Query(ItemsQuery::default())).await;
        assert_eq!(page.total, 3);

        let query = ItemsQuery {
            category: Some("gold rings".to_string()),
            risk_min: Some(30.0),
            risk_max: None,
        };
        let Json(page) = inventory_items(State(loaded_state()), Query(query)).await;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].label_no, "R-2");
    }

    #[tokio::test]
    async fn test_predict_sales_response_shape() {
        let request = PredictionRequest::new("GOLD RINGS", 6.5, "2024-02-29");
        let Json(response) = predict_sales(State(loaded_state()), Ok(Json(request.clone())))
            .await
            .unwrap();

        assert!((response.predicted_sales - 14.0).abs() < 1e-9);
        assert_eq!(response.confidence, vec![0.6, 0.4]);
        assert_eq!(response.category, "GOLD RINGS");
        assert_eq!(response.weight_grams, 6.5);
        assert_eq!(response.input, request);
    }

    #[tokio::test]
    async fn test_predict_sales_without_model_is_503() {
        let request = PredictionRequest::new("GOLD RINGS", 6.5, "2024-02-29");
        let err = predict_sales(State(degraded_state()), Ok(Json(request)))
            .await
            .unwrap_err();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await, json!({"detail": "Model not loaded"}));
    }

    #[tokio::test]
    async fn test_predict_sales_bad_date_is_500() {
        let request = PredictionRequest::new("GOLD RINGS", 6.5, "29/02/2024");
        let err = predict_sales(State(loaded_state()), Ok(Json(request)))
            .await
            .unwrap_err();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().starts_with("Prediction error:"));
    }

    #[tokio::test]
    async fn test_metrics_counts_requests() {
        let state = loaded_state();
        let _ = market_trends(State(state.clone())).await;
        let _ = market_trends(State(state.clone())).await;

        let response = metrics(State(state)).await.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("jewelai_api_requests_total{endpoint=\"market_trends\"} 2"));
        assert!(text.contains("jewelai_model_loaded 1"));
    }
}
