//! HttpGateway behaviour that needs no running backend.

use creativerse_core::{GatewayConfig, NarrativeControls};
use creativerse_error::{CreativerseErrorKind, GenerationErrorKind};
use creativerse_interface::{GenerationGateway, RoundRequestBuilder};
use creativerse_models::HttpGateway;

/// A gateway pointed at a port nothing listens on.
fn unreachable_gateway(max_retries: usize) -> HttpGateway {
    let config = GatewayConfig::default()
        .with_base_url("http://127.0.0.1:1".to_string())
        .with_timeout_secs(5)
        .with_max_retries(max_retries)
        .with_initial_backoff_ms(1)
        .with_max_backoff_secs(1);
    HttpGateway::new(&config).unwrap()
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let gateway = unreachable_gateway(0);
    let controls = NarrativeControls::builder().prompt("A lost kite").build().unwrap();
    let request = RoundRequestBuilder::default()
        .controls(controls)
        .round(1u32)
        .build()
        .unwrap();

    let err = gateway.generate_round(&request).await.unwrap_err();
    assert!(err.is_generation());
    match err.kind() {
        CreativerseErrorKind::Generation(e) => {
            assert!(matches!(e.kind, GenerationErrorKind::Network(_)))
        }
        other => panic!("Expected generation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_network_errors_are_retried_then_surface() {
    let gateway = unreachable_gateway(2).with_provider("gemini");
    let err = gateway.critique("Before", "After").await.unwrap_err();
    assert!(err.is_generation());
    assert_eq!(gateway.provider_name(), "http");
}
