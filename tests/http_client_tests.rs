//! HTTP link client tests against a local actix-web server.

use std::time::Duration;

use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

use std::sync::Arc;

use tinylink::client::{HttpLinkApi, LinkApi};
use tinylink::errors::TinyLinkError;
use tinylink::models::LinkId;
use tinylink::registry::LinkRegistry;
use tinylink::storage::MemoryDocumentStore;

// =============================================================================
// Fake link API
// =============================================================================

#[derive(Clone, Copy)]
struct HealthVersion(Option<&'static str>);

fn record(code: &str, long_url: &str, clicks: Value) -> Value {
    json!({
        "id": 1,
        "short_code": code,
        "long_url": long_url,
        "clicks": clicks,
        "created_at": "2024-01-05T09:30:00Z",
        "last_clicked_at": null,
    })
}

async fn create(body: web::Json<Value>) -> HttpResponse {
    let (Some(code), Some(long_url)) = (body["shortCode"].as_str(), body["longUrl"].as_str())
    else {
        return HttpResponse::BadRequest().json(json!({ "error_msg": "longUrl and shortCode are required" }));
    };
    match code {
        "idonly1" => HttpResponse::Created().json(json!({ "id": 6 })),
        "naive01" => {
            let mut body = record(code, long_url, json!(0));
            body["id"] = json!(7);
            body["created_at"] = json!("2024-01-05 09:30:00");
            HttpResponse::Created().json(body)
        }
        "taken1" => HttpResponse::Conflict().json(json!({ "error_msg": "Short code already exists" })),
        "okay200" => HttpResponse::Ok().json(record(code, long_url, json!(0))),
        "broken" => HttpResponse::InternalServerError().finish(),
        _ => HttpResponse::Created().json(record(code, long_url, json!(0))),
    }
}

async fn list() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        record("abc123", "https://example.com/a", json!(4)),
        ({
            let mut odd = record("xyz789", "https://example.com/b", json!(null));
            odd["created_at"] = json!("2024-01-05 09:30:00");
            odd
        }),
    ]))
}

async fn fetch(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "abc123" => HttpResponse::Ok().json(record("abc123", "https://example.com/a", json!(4))),
        "boom01" => HttpResponse::InternalServerError().json(json!({})),
        "a b" => HttpResponse::Ok().json(record("a b", "https://example.com/space", json!(1))),
        _ => HttpResponse::NotFound().json(json!({ "error_msg": "URL not found" })),
    }
}

async fn delete(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "abc123" => HttpResponse::Ok().json(json!({ "message": "deleted" })),
        "locked1" => HttpResponse::Forbidden().finish(),
        _ => HttpResponse::NotFound().json(json!({ "error_msg": "Short code not found" })),
    }
}

async fn health(version: web::Data<HealthVersion>) -> HttpResponse {
    match version.0 {
        Some(v) => HttpResponse::Ok().json(json!({ "status": "ok", "version": v })),
        None => HttpResponse::Ok().json(json!({ "status": "ok" })),
    }
}

async fn unhealthy() -> HttpResponse {
    HttpResponse::ServiceUnavailable().finish()
}

/// Bind on an ephemeral port and return the base URL.
fn start_server(version: HealthVersion, healthy: bool) -> String {
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(version))
            .route("/api/links", web::post().to(create))
            .route("/api/links", web::get().to(list))
            .route("/api/links/{code}", web::get().to(fetch))
            .route("/api/links/{code}", web::delete().to(delete));
        if healthy {
            app.route("/healthz", web::get().to(health))
        } else {
            app.route("/healthz", web::get().to(unhealthy))
        }
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    format!("http://{}", addr)
}

fn client(base_url: &str) -> HttpLinkApi {
    HttpLinkApi::new(base_url, Duration::from_secs(5))
}

// =============================================================================
// create
// =============================================================================

#[actix_rt::test]
async fn test_create_accepts_201_and_sends_camel_case_body() {
    let base = start_server(HealthVersion(Some("2.3.1")), true);
    let created = client(&base)
        .create("https://example.com/page", "abc123")
        .await
        .unwrap();

    assert_eq!(created.id, LinkId::Numeric(1));
}

#[actix_rt::test]
async fn test_create_accepts_id_only_body() {
    let base = start_server(HealthVersion(None), true);
    let created = client(&base)
        .create("https://example.com/page", "idonly1")
        .await
        .unwrap();
    assert_eq!(created.id, LinkId::Numeric(6));
}

#[actix_rt::test]
async fn test_registry_records_link_from_minimal_create_responses() {
    let base = start_server(HealthVersion(None), true);
    let registry = LinkRegistry::new(
        Arc::new(client(&base)),
        Arc::new(MemoryDocumentStore::new()),
        "tinyLink_shortUrls",
    );

    let first = registry
        .create("https://example.com/page", "idonly1")
        .await
        .unwrap();
    let second = registry
        .create("https://example.com/other", "naive01")
        .await
        .unwrap();

    assert_eq!(first.id, LinkId::Numeric(6));
    assert_eq!(first.short_url, format!("{}/idonly1", base));
    assert_eq!(second.id, LinkId::Numeric(7));
    assert_eq!(registry.len(), 2);
}

#[actix_rt::test]
async fn test_create_rejection_uses_error_msg_verbatim() {
    let base = start_server(HealthVersion(None), true);
    let err = client(&base)
        .create("https://example.com", "taken1")
        .await
        .unwrap_err();
    assert_eq!(err, TinyLinkError::server("Short code already exists"));
}

#[actix_rt::test]
async fn test_create_without_error_body_uses_generic_message() {
    let base = start_server(HealthVersion(None), true);
    let err = client(&base)
        .create("https://example.com", "broken")
        .await
        .unwrap_err();
    assert_eq!(err, TinyLinkError::server("Something went wrong"));
}

#[actix_rt::test]
async fn test_create_only_succeeds_on_201() {
    let base = start_server(HealthVersion(None), true);
    let err = client(&base)
        .create("https://example.com", "okay200")
        .await
        .unwrap_err();
    assert!(matches!(err, TinyLinkError::Server(_)));
}

// =============================================================================
// fetch / list
// =============================================================================

#[actix_rt::test]
async fn test_fetch_by_code() {
    let base = start_server(HealthVersion(None), true);
    let api = client(&base);

    let record = api.fetch_by_code("abc123").await.unwrap();
    assert_eq!(record.clicks, 4);
    assert!(record.last_clicked_at.is_none());

    let spaced = api.fetch_by_code("a b").await.unwrap();
    assert_eq!(spaced.short_code, "a b");
}

#[actix_rt::test]
async fn test_fetch_missing_is_not_found() {
    let base = start_server(HealthVersion(None), true);
    let err = client(&base).fetch_by_code("missing1").await.unwrap_err();
    assert_eq!(err, TinyLinkError::not_found("URL not found"));
}

#[actix_rt::test]
async fn test_fetch_server_error() {
    let base = start_server(HealthVersion(None), true);
    let err = client(&base).fetch_by_code("boom01").await.unwrap_err();
    assert_eq!(err, TinyLinkError::server("Failed to fetch URL data"));
}

#[actix_rt::test]
async fn test_fetch_all_tolerates_null_clicks_and_zoneless_timestamps() {
    let base = start_server(HealthVersion(None), true);
    let records = client(&base).fetch_all().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].clicks, 4);
    assert_eq!(records[1].clicks, 0);
    // zone-less timestamp read as UTC
    assert_eq!(records[1].created_at, records[0].created_at);
}

// =============================================================================
// delete
// =============================================================================

#[actix_rt::test]
async fn test_delete_outcomes() {
    let base = start_server(HealthVersion(None), true);
    let api = client(&base);

    api.delete_by_code("abc123").await.unwrap();
    assert_eq!(
        api.delete_by_code("zzz999").await.unwrap_err(),
        TinyLinkError::not_found("Short code not found")
    );
    assert_eq!(
        api.delete_by_code("locked1").await.unwrap_err(),
        TinyLinkError::server("Delete failed")
    );
}

// =============================================================================
// health
// =============================================================================

#[actix_rt::test]
async fn test_health_reports_version() {
    let base = start_server(HealthVersion(Some("2.3.1")), true);
    let report = client(&base).health().await.unwrap();
    assert_eq!(report.version, "2.3.1");
    assert!(report.latency < Duration::from_secs(5));
}

#[actix_rt::test]
async fn test_health_defaults_version() {
    let base = start_server(HealthVersion(None), true);
    let report = client(&base).health().await.unwrap();
    assert_eq!(report.version, "1.0");
}

#[actix_rt::test]
async fn test_health_failure_status() {
    let base = start_server(HealthVersion(None), false);
    let err = client(&base).health().await.unwrap_err();
    assert_eq!(
        err,
        TinyLinkError::server("Health check failed with status: 503")
    );
}
