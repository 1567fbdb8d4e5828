//! HTTP client behaviour against a local stand-in registry server.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use model_registry_storage::{
    CancellationToken, Error, HttpRegistryApi, ListOptions, ModelReference, ModelResolver,
    RegistryApi, RegistryConfig,
};

type Params = Query<HashMap<String, String>>;

fn latest_first(params: &HashMap<String, String>) -> bool {
    params.get("orderBy").map(String::as_str) == Some("CREATE_TIME")
        && params.get("sortOrder").map(String::as_str) == Some("DESC")
}

async fn find_registered_model(Query(params): Params) -> impl IntoResponse {
    match params.get("name").map(String::as_str) {
        Some("iris") => (StatusCode::OK, Json(json!({"id": "1", "name": "iris"}))),
        Some("broken") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"code": "500", "message": "database unavailable"})),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"code": "404", "message": "no registered model found"})),
        ),
    }
}

async fn find_model_version(Query(params): Params) -> impl IntoResponse {
    let found = params.get("name").map(String::as_str) == Some("v1")
        && params.get("parentResourceId").map(String::as_str) == Some("1");
    if found {
        (
            StatusCode::OK,
            Json(json!({"id": "2", "name": "v1", "registeredModelId": "1"})),
        )
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"message": "not found"})))
    }
}

async fn registered_model_versions(Path(id): Path<String>, Query(params): Params) -> impl IntoResponse {
    if id != "1" || !latest_first(&params) {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "bad listing query"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "items": [
                {"id": "3", "name": "v2", "registeredModelId": "1", "createTimeSinceEpoch": "2000"},
                {"id": "2", "name": "v1", "registeredModelId": "1", "createTimeSinceEpoch": "1000"}
            ],
            "size": 2,
            "pageSize": 100,
            "nextPageToken": ""
        })),
    )
}

async fn model_artifact(Path(id): Path<String>) -> impl IntoResponse {
    if id == "7" {
        (
            StatusCode::OK,
            Json(json!({
                "artifactType": "model-artifact",
                "id": "7",
                "uri": "s3://models/iris/7"
            })),
        )
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"message": "not found"})))
    }
}

async fn model_version_artifacts(Path(id): Path<String>, Query(params): Params) -> impl IntoResponse {
    if !latest_first(&params) {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "bad listing query"})));
    }
    let items = match id.as_str() {
        "3" => json!([
            {"artifactType": "doc-artifact", "id": "8", "uri": "https://docs", "createTimeSinceEpoch": "3000"},
            {"artifactType": "model-artifact", "id": "9", "uri": "s3://models/iris/9", "createTimeSinceEpoch": "2500"}
        ]),
        _ => json!([]),
    };
    (
        StatusCode::OK,
        Json(json!({"items": items, "size": 2, "pageSize": 100, "nextPageToken": ""})),
    )
}

async fn spawn_registry() -> SocketAddr {
    let app = Router::new()
        .route("/api/model_registry/v1alpha3/registered_model", get(find_registered_model))
        .route("/api/model_registry/v1alpha3/model_version", get(find_model_version))
        .route(
            "/api/model_registry/v1alpha3/registered_models/:id/versions",
            get(registered_model_versions),
        )
        .route("/api/model_registry/v1alpha3/model_artifacts/:id", get(model_artifact))
        .route(
            "/api/model_registry/v1alpha3/model_versions/:id/artifacts",
            get(model_version_artifacts),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config_for(addr: SocketAddr) -> RegistryConfig {
    RegistryConfig {
        host: addr.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_http_lookups() {
    let addr = spawn_registry().await;
    let api = HttpRegistryApi::new(&config_for(addr)).unwrap();

    let model = api.find_registered_model("iris").await.unwrap();
    assert_eq!(model.id.as_deref(), Some("1"));

    let version = api.find_model_version("v1", "1").await.unwrap();
    assert_eq!(version.registered_model_id.as_deref(), Some("1"));

    let versions = api
        .get_registered_model_versions("1", &ListOptions::latest_first())
        .await
        .unwrap();
    assert_eq!(versions.size, 2);
    assert_eq!(versions.items[0].name, "v2");

    let artifact = api.get_model_artifact("7").await.unwrap();
    assert_eq!(artifact.uri.as_deref(), Some("s3://models/iris/7"));
}

#[tokio::test]
async fn test_http_error_mapping() {
    let addr = spawn_registry().await;
    let api = HttpRegistryApi::new(&config_for(addr)).unwrap();

    let err = api.find_registered_model("ghost").await.unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound { kind: "registered model", ref key } if key == "ghost"
    ));

    let err = api.find_registered_model("broken").await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("unexpected error: {}", other),
    }

    let err = api
        .get_registered_model_versions("1", &ListOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { status: 400, .. }));

    let err = api
        .get_model_version_artifacts("3", &ListOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { status: 400, .. }));

    let artifacts = api
        .get_model_version_artifacts("3", &ListOptions::latest_first())
        .await
        .unwrap();
    assert_eq!(artifacts.items.len(), 2);
}

#[tokio::test]
async fn test_resolver_over_http() {
    let addr = spawn_registry().await;
    let resolver = ModelResolver::with_config(&config_for(addr)).unwrap();
    let cancel = CancellationToken::new();

    let latest = resolver
        .find_model(&"model-registry://iris".parse::<ModelReference>().unwrap(), &cancel)
        .await
        .unwrap();
    assert_eq!(latest.uri.as_deref(), Some("s3://models/iris/9"));

    let pinned = resolver
        .find_model(&"model-registry://iris/v1/7".parse::<ModelReference>().unwrap(), &cancel)
        .await
        .unwrap();
    assert_eq!(pinned.uri.as_deref(), Some("s3://models/iris/7"));
}
