use axum::{
    Router,
    extract::{Json, Path, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::analytics::{self, LeadGenStatus};
use crate::core::{CountryConfig, countries};
use crate::leads::{LeadRequest, LeadStore};

#[derive(Clone, Default)]
pub struct AppState {
    pub leads: LeadStore,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CountriesResponse {
    default_country: &'static str,
    countries: &'static [CountryConfig],
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/countries", get(countries_handler))
        .route("/api/countries/:code", get(country_handler))
        .route("/api/leads", post(lead_post_handler))
        .fallback(not_found_handler)
        .layer(middleware::map_response(no_store))
        .with_state(state)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let app = router(AppState::default());

    let listener = TcpListener::bind(addr).await?;
    info!("rental-yield HTTP API listening on http://{addr}");

    axum::serve(listener, app).await
}

async fn countries_handler() -> Response {
    analytics::track_view("countries");
    json_response(
        StatusCode::OK,
        CountriesResponse {
            default_country: countries::DEFAULT_COUNTRY,
            countries: &countries::COUNTRIES,
        },
    )
}

async fn country_handler(Path(code): Path<String>) -> Response {
    match countries::find(&code) {
        Some(country) => json_response(StatusCode::OK, country),
        None => error_response(StatusCode::NOT_FOUND, &format!("Unknown country: {code}")),
    }
}

async fn lead_post_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeadRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let msg = rejection.body_text();
            warn!(error = %msg, "lead payload rejected");
            analytics::track_event(
                "lead_generation",
                &[("type", "unknown"), ("status", LeadGenStatus::Fail.as_str())],
            );
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    let kind = request.kind;
    analytics::track_lead_gen(kind, LeadGenStatus::Start);

    match state.leads.submit(request).await {
        Ok(receipt) => {
            analytics::track_lead_gen(kind, LeadGenStatus::Success);
            json_response(StatusCode::CREATED, receipt)
        }
        Err(err) => {
            warn!(error = %err, "lead rejected");
            analytics::track_lead_gen(kind, LeadGenStatus::Fail);
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
    }
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn no_store(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be json")
    }

    async fn send(method: Method, uri: &str, body: Option<&str>) -> Response {
        let mut request = Request::builder().method(method).uri(uri);
        if body.is_some() {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        let request = request
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .expect("request should build");
        router(AppState::default())
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    fn assert_no_store(response: &Response) {
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..]),
            "missing no-store on {}",
            response.status()
        );
    }

    fn assert_json_content(response: &Response) {
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(
            content_type.starts_with("application/json"),
            "expected json, got {content_type:?}"
        );
    }

    fn lead_request_from_json(json: &str) -> LeadRequest {
        serde_json::from_str(json).expect("json should parse")
    }

    #[tokio::test]
    async fn countries_lists_catalogue_with_benchmarks() {
        let response = countries_handler().await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["defaultCountry"], "MA");
        let list = json["countries"].as_array().expect("countries array");
        assert_eq!(list.len(), 5);
        assert_eq!(list[0]["currencySymbol"], "MAD");
        assert_eq!(list[0]["benchmarks"]["average"], 6.0);
        assert_eq!(list[0]["defaultLanguage"], "fr");
    }

    #[tokio::test]
    async fn country_lookup_is_case_insensitive() {
        let response = country_handler(Path("us".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["code"], "US");
        assert_eq!(json["benchmarks"]["good"], 10.0);
    }

    #[tokio::test]
    async fn unknown_country_is_not_found() {
        let response = country_handler(Path("ZZ".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Unknown country: ZZ");
    }

    #[tokio::test]
    async fn valid_lead_is_created() {
        let state = AppState::default();
        let request = lead_request_from_json(
            r#"{"name":"Amina","email":"amina@example.com","phone":"0600","type":"list"}"#,
        );

        let response = lead_post_handler(State(state.clone()), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert!(json["id"].as_str().is_some());
        assert_eq!(state.leads.len().await, 1);
    }

    #[tokio::test]
    async fn invalid_lead_is_bad_request() {
        let state = AppState::default();
        let request =
            lead_request_from_json(r#"{"name":"Amina","email":"amina@example.com","type":"list"}"#);

        let response = lead_post_handler(State(state.clone()), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "phone is required for expert callback requests");
        assert!(state.leads.is_empty().await);
    }

    #[tokio::test]
    async fn fallback_is_json_not_found() {
        let response = not_found_handler().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Not found");
    }

    #[tokio::test]
    async fn router_serves_country_routes_with_no_store() {
        let response = send(Method::GET, "/api/countries", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_no_store(&response);

        let response = send(Method::GET, "/api/countries/gb", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_no_store(&response);
        assert_eq!(body_json(response).await["currencySymbol"], "£");

        let response = send(Method::GET, "/api/countries/zz", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_no_store(&response);
    }

    #[tokio::test]
    async fn router_creates_valid_lead() {
        let response = send(
            Method::POST,
            "/api/leads",
            Some(r#"{"name":"Sam","email":"sam@example.com","type":"report"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_no_store(&response);
        assert_eq!(body_json(response).await["success"], true);
    }

    #[tokio::test]
    async fn unknown_lead_type_is_json_bad_request() {
        let response = send(
            Method::POST,
            "/api/leads",
            Some(r#"{"name":"Sam","email":"sam@example.com","type":"vip"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_no_store(&response);
        assert_json_content(&response);
        assert!(body_json(response).await["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn malformed_lead_body_is_json_bad_request() {
        let response = send(Method::POST, "/api/leads", Some("not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_no_store(&response);
        assert_json_content(&response);
        assert!(body_json(response).await["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn lead_without_json_content_type_is_json_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/leads")
            .body(Body::from(r#"{"name":"Sam","email":"sam@example.com","type":"report"}"#))
            .expect("request should build");
        let response = router(AppState::default())
            .oneshot(request)
            .await
            .expect("router is infallible");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_no_store(&response);
        assert_json_content(&response);
    }

    #[tokio::test]
    async fn wrong_method_still_carries_no_store() {
        let response = send(Method::GET, "/api/leads", None).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_no_store(&response);
    }

    #[tokio::test]
    async fn unknown_path_hits_json_fallback() {
        let response = send(Method::GET, "/nope", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_no_store(&response);
        assert_eq!(body_json(response).await["error"], "Not found");
    }
}
