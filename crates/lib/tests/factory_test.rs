//! # Factory Dispatch Tests

mod common;

use cardgen::errors::GeneratorError;
use cardgen::models::{AvailableModel, Capability};
use cardgen::providers::elevenlabs::ElevenlabsTtsGenerator;
use cardgen::providers::kandinsky::KandinskyImageGenerator;
use cardgen::providers::AnyGenerator;
use cardgen::{GeneratorConfig, GeneratorConfigs, GeneratorFactory, GeneratorSet};
use common::setup_tracing;
use wiremock::MockServer;

fn config(model: AvailableModel) -> GeneratorConfig {
    GeneratorConfig {
        model,
        api_key: "key".to_string(),
        secret_key: "secret".to_string(),
        language: "english".to_string(),
    }
}

#[test]
fn test_create_returns_the_declared_capability_for_every_model() {
    setup_tracing();
    for model in AvailableModel::all() {
        let generator = GeneratorFactory::create(config(model)).unwrap();
        let capability = match generator {
            AnyGenerator::Text(_) => Capability::Text,
            AnyGenerator::Image(_) => Capability::Image,
            AnyGenerator::Tts(_) => Capability::Tts,
        };
        assert_eq!(capability, model.capability(), "wrong variant for {model}");
    }
}

#[tokio::test]
async fn test_missing_credential_fails_before_any_network_call() {
    setup_tracing();
    // A server with no mounted mocks: any request against it would be
    // recorded, and there must be none.
    let server = MockServer::start().await;

    let mut no_api_key = config(AvailableModel::Kandinsky3);
    no_api_key.api_key = String::new();
    let result = KandinskyImageGenerator::new(server.uri(), no_api_key);
    assert!(matches!(result, Err(GeneratorError::MissingCredential(_))));

    let mut no_secret = config(AvailableModel::Kandinsky3);
    no_secret.secret_key = String::new();
    let result = KandinskyImageGenerator::new(server.uri(), no_secret);
    assert!(matches!(result, Err(GeneratorError::MissingCredential(_))));

    let mut no_voice_key = config(AvailableModel::Elevenlabs);
    no_voice_key.api_key = String::new();
    let result = ElevenlabsTtsGenerator::new(server.uri(), no_voice_key);
    assert!(matches!(result, Err(GeneratorError::MissingCredential(_))));

    let requests = server.received_requests().await.unwrap();
    assert!(
        requests.is_empty(),
        "constructor validation must not touch the network"
    );
}

#[test]
fn test_generator_set_rejects_a_capability_slot_mismatch() {
    setup_tracing();
    let configs = GeneratorConfigs {
        // A TTS identifier supplied in the text slot.
        text: config(AvailableModel::Elevenlabs),
        image: config(AvailableModel::Kandinsky3),
        tts: config(AvailableModel::Elevenlabs),
    };
    let result = GeneratorSet::from_configs(configs);
    assert!(
        matches!(result, Err(GeneratorError::UnsupportedProvider(_))),
        "expected UnsupportedProvider, got {result:?}"
    );
}

#[test]
fn test_generator_set_builds_from_matching_configs() {
    setup_tracing();
    let configs = GeneratorConfigs {
        text: config(AvailableModel::Cohere),
        image: config(AvailableModel::Kandinsky3),
        tts: config(AvailableModel::Elevenlabs),
    };
    assert!(GeneratorSet::from_configs(configs).is_ok());
}
