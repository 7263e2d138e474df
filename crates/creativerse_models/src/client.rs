//! Generation gateway backed by the Creativerse HTTP backend.

use crate::dto::{
    ConceptBody, ErrorBody, FeedbackBody, IllustrationBody, PortraitBody, RoundBody,
    SymbolCharacter, SymbolImageBody,
};
use crate::GatewayMetrics;
use async_trait::async_trait;
use creativerse_core::{
    ChapterOption, GatewayConfig, IllustrationRef, RoundOptionSet, SymbolicRealization,
};
use creativerse_error::{CreativerseResult, GenerationError, GenerationErrorKind};
use creativerse_interface::{
    GenerationGateway, IllustrationRequest, PortraitRequest, RoundRequest, SymbolRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio_retry2::strategy::{jitter, ExponentialBackoff};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

const ROUND_ROUTE: &str = "/api/generate-story-and-images";
const ILLUSTRATION_ROUTE: &str = "/api/regenerate-image";
const FEEDBACK_ROUTE: &str = "/api/feedback";
const PORTRAIT_ROUTE: &str = "/api/character-image";
const CONCEPT_ROUTE: &str = "/api/symbolic-concept";
const SYMBOL_IMAGE_ROUTE: &str = "/api/symbolic-image";

/// Client for the Creativerse generation backend.
///
/// Each gateway operation is one JSON `POST` (two for symbolic characters:
/// concept, then image). Retryable failures are retried with exponential
/// backoff and jitter as configured in [`GatewayConfig`].
///
/// # Example
///
/// ```no_run
/// use creativerse_core::{CreativerseConfig, NarrativeControls};
/// use creativerse_interface::{GenerationGateway, RoundRequestBuilder};
/// use creativerse_models::HttpGateway;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CreativerseConfig::load()?;
/// let gateway = HttpGateway::new(&config.gateway)?;
///
/// let controls = NarrativeControls::builder().prompt("A lost kite").build()?;
/// let request = RoundRequestBuilder::default().controls(controls).round(1u32).build()?;
/// let options = gateway.generate_round(&request).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    provider: String,
    max_retries: usize,
    initial_backoff_ms: u64,
    max_backoff: Duration,
}

impl HttpGateway {
    /// Creates a gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(base_url = %config.base_url()))]
    pub fn new(config: &GatewayConfig) -> CreativerseResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Misconfigured(format!(
                    "HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            provider: config.provider().clone(),
            max_retries: *config.max_retries(),
            initial_backoff_ms: *config.initial_backoff_ms(),
            max_backoff: Duration::from_secs(*config.max_backoff_secs()),
        })
    }

    /// Ask the backend to use a specific model provider.
    ///
    /// Rounds use the provider carried by their [`NarrativeControls`]; this
    /// one names the provider for illustrations, feedback and characters.
    ///
    /// [`NarrativeControls`]: creativerse_core::NarrativeControls
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Provider named in non-round requests.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Backend base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    /// Send one request without retrying.
    async fn post_once<B, T>(&self, route: &str, body: &B) -> Result<T, GenerationError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(route);
        debug!(url = %url, "Sending backend request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Network(format!(
                    "Request failed: {}",
                    e
                )))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&error_text)
                .map(|body| body.error)
                .unwrap_or(error_text);
            return Err(GenerationError::new(GenerationErrorKind::HttpStatus {
                status_code: status.as_u16(),
                message,
            }));
        }

        response.json::<T>().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::MalformedResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }

    /// Send a request, retrying retryable failures.
    async fn post<B, T>(&self, route: &str, body: &B) -> CreativerseResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let strategy = ExponentialBackoff::from_millis(self.initial_backoff_ms)
            .factor(2)
            .max_delay(self.max_backoff)
            .map(jitter)
            .take(self.max_retries);

        let started = Instant::now();
        let result = Retry::spawn(strategy, || async move {
            match self.post_once(route, body).await {
                Ok(value) => Ok(value),
                Err(e) if e.kind.is_retryable() => {
                    warn!(route, error = %e, "Backend request failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => Err(RetryError::Permanent(e)),
            }
        })
        .await;

        let metrics = GatewayMetrics::get();
        match result {
            Ok(value) => {
                metrics.record_request(route, started.elapsed().as_secs_f64());
                Ok(value)
            }
            Err(e) => {
                warn!(route, error = %e, "Backend request failed");
                metrics.record_error(route, &e.kind);
                Err(e.into())
            }
        }
    }
}

/// Turn a backend image payload into an illustration reference.
///
/// URLs and `data:` URIs pass through; anything else is taken to be a bare
/// base64 JPEG.
pub(crate) fn normalize_image(payload: &str) -> Result<IllustrationRef, GenerationError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::MalformedResponse(
            "Backend returned an empty image".to_string(),
        )));
    }
    if payload.starts_with("http://") || payload.starts_with("https://") {
        Ok(IllustrationRef::new(payload))
    } else {
        Ok(IllustrationRef::from_base64_jpeg(payload))
    }
}

#[async_trait]
impl GenerationGateway for HttpGateway {
    #[instrument(skip(self, req), fields(round = *req.round()))]
    async fn generate_round(&self, req: &RoundRequest) -> CreativerseResult<RoundOptionSet> {
        let body = RoundBody {
            controls: req.controls(),
            current_round: *req.round(),
            previous_part_text: req.previous_chapter().as_deref(),
            characters: req.characters(),
            provider: req.controls().ai_provider(),
        };

        let options: Vec<ChapterOption> = self.post(ROUND_ROUTE, &body).await?;
        let options = options
            .into_iter()
            .map(|mut option| {
                option.illustration = normalize_image(option.illustration.as_str())?;
                Ok(option)
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;

        debug!(count = options.len(), "Received round options");
        Ok(options.into())
    }

    #[instrument(skip(self, req), fields(title = %req.title()))]
    async fn regenerate_illustration(
        &self,
        req: &IllustrationRequest,
    ) -> CreativerseResult<IllustrationRef> {
        let body = IllustrationBody {
            title: req.title(),
            body: req.body(),
            characters: req.characters(),
            style: req.style(),
            provider: self.provider(),
        };
        let image: String = self.post(ILLUSTRATION_ROUTE, &body).await?;
        Ok(normalize_image(&image)?)
    }

    #[instrument(skip_all)]
    async fn critique(&self, original: &str, edited: &str) -> CreativerseResult<String> {
        let body = FeedbackBody {
            original_text: original,
            edited_text: edited,
            provider: self.provider(),
        };
        self.post(FEEDBACK_ROUTE, &body).await
    }

    #[instrument(skip(self, req), fields(style = %req.style()))]
    async fn realize_portrait(&self, req: &PortraitRequest) -> CreativerseResult<IllustrationRef> {
        let body = PortraitBody {
            description: req.description(),
            style: req.style(),
            reference_image: req.reference_image().as_ref(),
            provider: self.provider(),
        };
        let image: String = self.post(PORTRAIT_ROUTE, &body).await?;
        Ok(normalize_image(&image)?)
    }

    #[instrument(skip(self, req), fields(name = %req.name(), theme = %req.theme()))]
    async fn realize_symbol(&self, req: &SymbolRequest) -> CreativerseResult<SymbolicRealization> {
        let concept_body = ConceptBody {
            character: SymbolCharacter {
                name: req.name(),
                description: req.description(),
            },
            theme: req.theme(),
            provider: self.provider(),
        };
        let concept: String = self.post(CONCEPT_ROUTE, &concept_body).await?;
        let concept = concept.trim().to_string();
        if concept.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::MalformedResponse(
                "Backend returned an empty symbolic concept".to_string(),
            ))
            .into());
        }
        debug!(concept = %concept, "Chose symbolic concept");

        let image_body = SymbolImageBody {
            concept: &concept,
            theme: req.theme(),
            style: req.style(),
            provider: self.provider(),
        };
        let image: String = self.post(SYMBOL_IMAGE_ROUTE, &image_body).await?;

        Ok(SymbolicRealization {
            illustration: normalize_image(&image)?,
            concept,
        })
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}
