use crate::analysis::{analyze, AnalysisResponse, AnalyzeRequest};
use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::Utc;
use keyword_scout::error::AppError;
use keyword_scout::scoring::{export_csv, export_filename, KeywordQuery, ScoredKeyword};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct ExportRequest {
    pub(crate) keywords: Vec<ScoredKeyword>,
    #[serde(default)]
    pub(crate) currency: Option<String>,
    #[serde(default)]
    pub(crate) query: Option<KeywordQuery>,
}

pub(crate) fn keyword_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/keywords/analyze",
            axum::routing::post(analyze_endpoint),
        )
        .route(
            "/api/v1/keywords/export",
            axum::routing::post(export_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn analyze_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let response = analyze(payload, &state.defaults, Utc::now())?;
    Ok(Json(response))
}

pub(crate) async fn export_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ExportRequest {
        keywords,
        currency,
        query,
    } = payload;

    let currency = currency
        .map(|value| value.trim().to_uppercase())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| state.defaults.currency.clone());

    let csv = match query {
        Some(query) => export_csv(query.apply(&keywords), &currency)?,
        None => export_csv(&keywords, &currency)?,
    };

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(Utc::now().date_naive())
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use keyword_scout::config::CampaignDefaults;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            defaults: Arc::new(CampaignDefaults::default()),
        }
    }

    fn app() -> axum::Router {
        keyword_routes().layer(Extension(state(true)))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    fn analyze_body(price: f64) -> serde_json::Value {
        json!({
            "campaignConfig": {
                "goal": "conversions",
                "type": "search",
                "productPrice": price
            },
            "seedKeywords": ["zaino", "zaino"],
            "dataSource": "google_ads",
            "keywords": [
                {
                    "keyword": "zaino trekking",
                    "volume": 5400,
                    "competition": "medium",
                    "competitionIndex": 55,
                    "cpcLow": 0.6,
                    "cpcHigh": 1.4,
                    "cpcAvg": 1.0,
                    "trend": [60, 62, 65, 70, 72, 75, 80, 78, 74, 70, 66, 62]
                },
                {
                    "keyword": "zaino bambini",
                    "volume": 880,
                    "competition": "low",
                    "competitionIndex": 22,
                    "cpcLow": 0.2,
                    "cpcHigh": 0.6,
                    "cpcAvg": 0.4
                }
            ]
        })
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_flagged() {
        let response = readiness_endpoint(Extension(state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(Extension(state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn analyze_returns_ranked_keywords_and_summary() {
        let response = app()
            .oneshot(post_json("/api/v1/keywords/analyze", analyze_body(120.0)))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");

        assert_eq!(body["seedKeywords"], json!(["zaino"]));
        let keywords = body["keywords"].as_array().expect("keywords array");
        assert_eq!(keywords.len(), 2);
        let first = keywords[0]["profitabilityScore"].as_u64().expect("score");
        let second = keywords[1]["profitabilityScore"].as_u64().expect("score");
        assert!(first >= second);
        assert_eq!(body["summary"]["totalKeywords"], 2);
        assert_eq!(body["summary"]["dataSource"], "google_ads");
        assert_eq!(body["summary"]["campaignGoal"], "conversions");
    }

    #[tokio::test]
    async fn analyze_rejects_non_positive_price() {
        let response = app()
            .oneshot(post_json("/api/v1/keywords/analyze", analyze_body(-1.0)))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("productPrice")));
    }

    #[tokio::test]
    async fn export_filters_and_renders_csv() {
        let analyzed = app()
            .oneshot(post_json("/api/v1/keywords/analyze", analyze_body(120.0)))
            .await
            .expect("request handled");
        let bytes = to_bytes(analyzed.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");

        let export = json!({
            "keywords": body["keywords"],
            "currency": "usd",
            "query": { "search": "bambini" }
        });
        let before = export_filename(Utc::now().date_naive());
        let response = app()
            .oneshot(post_json("/api/v1/keywords/export", export))
            .await
            .expect("request handled");
        let after = export_filename(Utc::now().date_naive());

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .expect("ascii header");
        assert!(
            disposition == format!("attachment; filename=\"{before}\"")
                || disposition == format!("attachment; filename=\"{after}\"")
        );

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let csv = String::from_utf8(bytes.to_vec()).expect("utf-8 csv");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Avg CPC (USD)"));
        assert!(lines[1].starts_with("zaino bambini,"));
    }

    #[tokio::test]
    async fn health_is_static() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
