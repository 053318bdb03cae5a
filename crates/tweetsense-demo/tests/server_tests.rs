//! Router and page controller tests
//!
//! Every test loads the bundled `resources/app.yaml`, so they also check that
//! the shipped configuration and artifacts stay consistent.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use tweetsense_core::Sentiment;
use tweetsense_demo::config::AppConfig;
use tweetsense_demo::context::AppContext;
use tweetsense_demo::pages::{Page, PageBody, PageController, PageRequest, TabOutcome};
use tweetsense_demo::server::build_app;

const APP_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../resources/app.yaml");

fn context() -> Arc<AppContext> {
    let config = AppConfig::from_file(APP_CONFIG).unwrap();
    Arc::new(AppContext::load(config).unwrap())
}

fn app() -> Router {
    build_app(context())
}

async fn get(uri: &str) -> (StatusCode, String) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

async fn post_json(uri: &str, payload: Value) -> (StatusCode, Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

// ============================================================================
// Server-rendered pages
// ============================================================================

#[tokio::test]
async fn test_default_page_is_about_us() {
    let (status, html) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<option value=\"about\" selected>About Us</option>"));
    assert!(html.contains("GridSearch AI supports businesses"));
    assert!(html.contains("Team GridSearch AI Tweet Classifer"));
    assert!(html.contains("People&#39;s Sentiment on Climate Change"));
}

#[tokio::test]
async fn test_empty_page_param_falls_back_to_first_page() {
    let (status, html) = get("/?page=").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<option value=\"about\" selected>About Us</option>"));
}

#[tokio::test]
async fn test_each_page_renders_its_own_content() {
    let cases = [
        ("about", "over 3000 customers"),
        ("team", "Nnaemeka Onyebueke"),
        ("project", "carbon"),
        ("information", "Show raw data"),
        ("predictions", "Enter Text"),
    ];

    for (slug, marker) in cases {
        let (status, html) = get(&format!("/?page={slug}")).await;
        assert_eq!(status, StatusCode::OK, "page {slug}");
        assert!(html.contains(marker), "page {slug} should contain {marker:?}");
        for (other, other_marker) in cases {
            if other != slug {
                assert!(
                    !html.contains(other_marker),
                    "page {slug} should not contain {other_marker:?}"
                );
            }
        }
    }
}

#[tokio::test]
async fn test_pages_selectable_by_title() {
    let (status, html) = get("/?page=Model%20Predictions").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<option value=\"predictions\" selected>Model Predictions</option>"));
}

#[tokio::test]
async fn test_team_page_lists_every_member() {
    let (_, html) = get("/?page=team").await;
    for tab in ["Martha", "Nnaemeka", "Thepe", "Hafsa", "Orise", "Karabo"] {
        assert!(html.contains(&format!(">{tab}</a>")), "missing tab {tab}");
    }
    assert!(html.contains("Application Developer/Cloud Engineer"));
}

#[tokio::test]
async fn test_information_page_legend_and_raw_toggle() {
    let (_, hidden) = get("/?page=information").await;
    assert!(hidden.contains("[-1] - Anti:"));
    assert!(hidden.contains("[2] - News:"));
    assert!(!hidden.contains("<table class=\"raw\">"));

    let (status, shown) = get("/?page=information&show_raw=true").await;
    assert_eq!(status, StatusCode::OK);
    assert!(shown.contains("<table class=\"raw\">"));
    assert!(shown.contains("Hide raw data"));
}

#[tokio::test]
async fn test_predictions_page_waits_for_submission() {
    let (_, html) = get("/?page=predictions").await;
    assert!(html.contains(">Type Here</textarea>"));
    assert!(!html.contains("alert success"));
    for title in ["LinearSVC", "Logistic Regression", "Ridge Classifier"] {
        assert!(html.contains(title));
    }
}

#[tokio::test]
async fn test_predictions_page_shows_every_model() {
    let (status, html) =
        get("/?page=predictions&text=This%20is%20a%20hoax%20invented%20by%20corporations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches("alert success").count(), 3);
    assert!(html.contains("classified as <strong>anti</strong> climate change."));
    assert!(html.contains(">This is a hoax invented by corporations</textarea>"));
}

#[tokio::test]
async fn test_predictions_page_warns_on_empty_text() {
    let (status, html) = get("/?page=predictions&text=").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("alert warning"));
    assert_eq!(html.matches("alert success").count(), 3);
}

#[tokio::test]
async fn test_submitted_text_is_escaped() {
    let (_, html) = get("/?page=predictions&text=%3Cscript%3Ex%3C%2Fscript%3E").await;
    assert!(!html.contains("<script>x</script>"));
    assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let (status, html) = get("/?page=settings&text=hoax").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Unknown page"));
    assert!(!html.contains("alert success"));
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_list_pages_in_order() {
    let (_, body) = get_json("/api/pages").await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|page| page["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        ["About Us", "Team", "Project Description", "Information", "Model Predictions"]
    );
}

#[tokio::test]
async fn test_list_models() {
    let (status, body) = get_json("/api/models").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|model| model["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["lsvc", "logreg", "ridge"]);
    assert_eq!(body[0]["kind"], "linear_svc");
    assert_eq!(body[0]["classes"], json!([-1, 0, 1, 2]));
}

#[tokio::test]
async fn test_predict_all_models() {
    let (status, body) = post_json(
        "/api/predict",
        json!({ "text": "NASA confirms record temperatures this year" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("warning").is_none());

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    for result in results {
        assert_eq!(result["label"], 2);
        assert_eq!(
            result["display_text"],
            "The text entered above has been classified as **news about** climate change."
        );
        assert_eq!(result["scores"].as_array().unwrap().len(), 4);
    }
}

#[tokio::test]
async fn test_predict_single_model_with_placeholder_warning() {
    let (status, body) =
        post_json("/api/predict", json!({ "text": "Type Here", "model": "ridge" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["warning"]["kind"], "placeholder");
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["model"], "ridge");
}

#[tokio::test]
async fn test_predict_unknown_model() {
    let (status, body) =
        post_json("/api/predict", json!({ "text": "hoax", "model": "bert" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "unknown model: bert");
}

#[tokio::test]
async fn test_predict_without_text_is_json_error() {
    let (status, body) = post_json("/api/predict", json!({ "model": "ridge" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("text"));

    let (status, body) = post_json("/api/predict", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_predict_malformed_body_is_json_error() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_view_json_matches_page() {
    let (status, body) = get_json("/api/view?page=predictions&text=hoax").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], "model_predictions");
    assert_eq!(body["body"]["kind"], "predictions");
    assert_eq!(body["body"]["submitted"], true);
    assert_eq!(body["body"]["tabs"][0]["outcome"]["status"], "success");

    let (status, body) = get_json("/api/view?page=nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["body"]["kind"], "not_found");
}

#[tokio::test]
async fn test_dataset_limit_and_counts() {
    let (status, body) = get_json("/api/dataset?limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows"].as_array().unwrap().len(), 5);

    let counts = body["counts"].as_array().unwrap();
    assert_eq!(counts.len(), 4);
    let sum: u64 = counts.iter().map(|c| c["count"].as_u64().unwrap()).sum();
    assert_eq!(sum, body["total"].as_u64().unwrap());
}

#[tokio::test]
async fn test_dataset_bad_limit_is_json_error() {
    let (status, body) = get_json("/api/dataset?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "http://localhost:8501")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:8501"
    );
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (status, body) = get_json("/api/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

// ============================================================================
// Static files
// ============================================================================

#[tokio::test]
async fn test_embedded_stylesheet() {
    let response = app()
        .oneshot(Request::builder().uri("/static/style.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
}

#[tokio::test]
async fn test_logo_assets_served() {
    let (status, body) = get("/assets/logo/tweet.svg").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<svg"));
}

// ============================================================================
// Page controller
// ============================================================================

#[test]
fn test_controller_defaults_to_about() {
    let controller = PageController::new(context());
    let view = controller.view(&PageRequest::default());
    assert_eq!(view.page, Some(Page::AboutUs));
    assert!(matches!(view.body, PageBody::About { .. }));
}

#[test]
fn test_controller_runs_each_model_once_per_submission() {
    let controller = PageController::new(context());
    let view = controller.view(
        &PageRequest::for_page(Page::ModelPredictions)
            .with_text("We must fight for our planet, climate change is real"),
    );

    let PageBody::Predictions(predictions) = view.body else {
        panic!("expected predictions view");
    };
    assert!(predictions.submitted);
    assert_eq!(predictions.warning, None);
    assert_eq!(predictions.tabs.len(), 3);
    for tab in &predictions.tabs {
        match &tab.outcome {
            Some(TabOutcome::Success { label, .. }) => assert_eq!(*label, Sentiment::Pro),
            other => panic!("unexpected outcome for {}: {other:?}", tab.model_id),
        }
    }
}

#[test]
fn test_controller_unknown_page_skips_prediction() {
    let controller = PageController::new(context());
    let request = PageRequest {
        page: Some("Settings".to_string()),
        text: Some("hoax".to_string()),
        show_raw: None,
    };
    let view = controller.view(&request);
    assert!(view.is_not_found());
    assert_eq!(view.page, None);
}

#[test]
fn test_controller_raw_table_is_capped() {
    let mut config = AppConfig::from_file(APP_CONFIG).unwrap();
    config.max_raw_rows = 3;
    let controller = PageController::new(Arc::new(AppContext::load(config).unwrap()));

    let view = controller.view(&PageRequest::for_page(Page::Information).with_raw_data());
    let PageBody::Information { raw: Some(raw), total_examples, .. } = view.body else {
        panic!("expected raw table");
    };
    assert_eq!(raw.rows.len(), 3);
    assert_eq!(raw.total, total_examples);
    assert!(raw.is_truncated());
}
