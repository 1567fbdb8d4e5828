//! Storage URI processing for inference services.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use model_registry_storage::processor::ModelSpec;
use model_registry_storage::{
    CancellationToken, CustomStorageProcessor, Error, InferenceService, ModelRegistryProcessor,
    NamespacedName, ProcessedStorage,
};
use url::Url;

use crate::fixture::{resolver_for, single_model_registry};

fn inference_service(storage_uri: &str) -> InferenceService {
    let mut isvc = InferenceService::default();
    isvc.metadata.name = Some("iris".to_string());
    isvc.metadata.namespace = Some("models".to_string());
    isvc.spec.predictor.model = Some(ModelSpec {
        storage_uri: Some(storage_uri.to_string()),
        runtime: Some("kserve-sklearnserver".to_string()),
        ..Default::default()
    });
    isvc
}

fn storage_result(model_path: &str) -> ProcessedStorage {
    ProcessedStorage {
        secret_key: Some("storage-config".to_string()),
        parameters: HashMap::from([("type".to_string(), "s3".to_string())]),
        model_path: model_path.to_string(),
        schema_path: None,
    }
}

#[tokio::test]
async fn test_rewrites_storage_uri_and_forwards() {
    let (_, resolver) = resolver_for(single_model_registry());
    let processor = ModelRegistryProcessor::new(resolver);

    let uri = Url::parse("model-registry://m1").unwrap();
    let original = inference_service("model-registry://m1");
    let nname = NamespacedName::new("models", "iris");
    let seen: Arc<Mutex<Option<(InferenceService, NamespacedName)>>> = Arc::new(Mutex::new(None));

    let seen_in_continuation = seen.clone();
    let result = processor
        .process_inference_service_storage(
            &uri,
            &original,
            &nname,
            &CancellationToken::new(),
            move |isvc, nname| async move {
                *seen_in_continuation.lock().unwrap() = Some((isvc, nname));
                Ok(storage_result("/mnt/models"))
            },
        )
        .await
        .unwrap();

    assert_eq!(result, storage_result("/mnt/models"));

    let (patched, forwarded_name) = seen.lock().unwrap().take().unwrap();
    assert_eq!(patched.storage_uri(), Some("s3://bucket/path"));
    assert_eq!(forwarded_name, nname);
    assert_eq!(
        patched.spec.predictor.model.as_ref().unwrap().runtime.as_deref(),
        Some("kserve-sklearnserver")
    );

    assert_eq!(original, inference_service("model-registry://m1"));
    assert_eq!(original.storage_uri(), Some("model-registry://m1"));
}

#[tokio::test]
async fn test_malformed_uri_fails_before_registry_calls() {
    let (api, resolver) = resolver_for(single_model_registry());
    let processor = ModelRegistryProcessor::new(resolver);

    let uri = Url::parse("model-registry://m1/v1/100/extra").unwrap();
    let called = Arc::new(Mutex::new(false));
    let called_in_continuation = called.clone();

    let err = processor
        .process_inference_service_storage(
            &uri,
            &inference_service("model-registry://m1/v1/100/extra"),
            &NamespacedName::new("models", "iris"),
            &CancellationToken::new(),
            move |_, _| async move {
                *called_in_continuation.lock().unwrap() = true;
                Ok(ProcessedStorage::default())
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidUri(_)));
    assert_eq!(api.calls(), 0);
    assert!(!*called.lock().unwrap());
}

#[tokio::test]
async fn test_resolution_failure_names_the_model() {
    let (_, resolver) = resolver_for(single_model_registry());
    let processor = ModelRegistryProcessor::new(resolver);

    let uri = Url::parse("model-registry://ghost/v1").unwrap();
    let err = processor
        .process_inference_service_storage(
            &uri,
            &inference_service("model-registry://ghost/v1"),
            &NamespacedName::new("models", "ghost"),
            &CancellationToken::new(),
            |_, _| async { Ok(ProcessedStorage::default()) },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ModelNotFound { ref model, .. } if model == "ghost"));
    assert!(err.is_not_found());
    assert!(err.to_string().starts_with("unable to find model ghost: "));
}

#[tokio::test]
async fn test_continuation_error_is_returned_unchanged() {
    let (_, resolver) = resolver_for(single_model_registry());
    let processor = ModelRegistryProcessor::new(resolver);

    let uri = Url::parse("model-registry://m1/latest-version/100").unwrap();
    let err = processor
        .process_inference_service_storage(
            &uri,
            &inference_service("model-registry://m1/latest-version/100"),
            &NamespacedName::new("models", "iris"),
            &CancellationToken::new(),
            |_, _| async { Err(Error::Storage("no storage secret".to_string())) },
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Storage processing error: no storage secret");
}
