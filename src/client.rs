//! Authenticated API client.

use bytes::Bytes;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::{Authenticator, Credentials, Token, TokenStore};
use crate::config::ClientConfig;
use crate::context::RequestContext;
use crate::error::{Result, SberChatError};
use crate::http::{bearer_headers, build_client};
use crate::types::{ChatRequest, ChatResponse, Model, ModelList};

const MODELS_PATH: &str = "models";
const CHAT_PATH: &str = "chat/completions";

/// Client for the chat-completion API.
///
/// Holds one set of credentials and one cached bearer token. Every operation
/// obtains a token first (reusing the cached one while it is valid) and then
/// sends the authenticated call. Share it behind an `Arc` for concurrent use.
///
/// # Example
/// ```no_run
/// use sberchat::{Client, Credentials};
/// use sberchat::config::ClientConfig;
/// use sberchat::types::{ChatRequest, Message};
///
/// # async fn example() -> sberchat::Result<()> {
/// let client = Client::new(Credentials::new("id", "secret"), ClientConfig::insecure())?;
/// client.authenticate().await?;
/// let request = ChatRequest::builder()
///     .model("GigaChat:latest")
///     .messages(vec![Message::user("Hello!")])
///     .max_tokens(256)
///     .build();
/// let response = client.chat(&request).await?;
/// println!("{}", response.first_content().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    credentials: Credentials,
    authenticator: Authenticator,
    tokens: TokenStore,
}

impl Client {
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let http = build_client(&config)?;
        Ok(Self::with_http_client(credentials, config, http))
    }

    /// Client with default endpoints and certificate verification disabled.
    pub fn insecure(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            Credentials::new(client_id, client_secret),
            ClientConfig::insecure(),
        )
    }

    /// Client over a caller-built transport. `config.insecure` and
    /// `config.timeout` are not applied to `http`.
    pub fn with_http_client(
        credentials: Credentials,
        config: ClientConfig,
        http: reqwest::Client,
    ) -> Self {
        let authenticator = Authenticator::new(http.clone(), &config.auth_url);
        Self {
            http,
            config,
            credentials,
            authenticator,
            tokens: TokenStore::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    /// Currently cached token, if any.
    pub async fn token(&self) -> Option<Token> {
        self.tokens.current().await
    }

    /// Drop the cached token so the next call authenticates again.
    pub async fn invalidate_token(&self) {
        self.tokens.clear().await;
    }

    pub async fn authenticate(&self) -> Result<()> {
        self.authenticate_with_context(&RequestContext::background())
            .await
    }

    /// Obtain a token unless a usable one is already cached.
    ///
    /// With a valid token present this returns immediately without network
    /// traffic. An expired token is replaced.
    pub async fn authenticate_with_context(&self, ctx: &RequestContext) -> Result<()> {
        self.access_token(ctx).await.map(|_| ())
    }

    pub async fn model(&self, id: &str) -> Result<Model> {
        self.model_with_context(&RequestContext::background(), id)
            .await
    }

    pub async fn model_with_context(&self, ctx: &RequestContext, id: &str) -> Result<Model> {
        let url = self.model_url(id)?;
        self.call(ctx, Method::GET, &url, None).await
    }

    /// `{base_url}/models/{id}` with `id` percent-encoded as one path segment.
    fn model_url(&self, id: &str) -> Result<String> {
        let endpoint = self.config.endpoint(MODELS_PATH);
        let mut url = reqwest::Url::parse(&endpoint).map_err(|e| {
            SberChatError::Configuration(format!("invalid base_url {endpoint}: {e}"))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                SberChatError::Configuration(format!("base_url cannot be a base: {endpoint}"))
            })?
            .push(id);
        Ok(url.into())
    }

    pub async fn models(&self) -> Result<ModelList> {
        self.models_with_context(&RequestContext::background())
            .await
    }

    pub async fn models_with_context(&self, ctx: &RequestContext) -> Result<ModelList> {
        let url = self.config.endpoint(MODELS_PATH);
        self.call(ctx, Method::GET, &url, None).await
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.chat_with_context(&RequestContext::background(), request)
            .await
    }

    pub async fn chat_with_context(
        &self,
        ctx: &RequestContext,
        request: &ChatRequest,
    ) -> Result<ChatResponse> {
        let body = serde_json::to_vec(request)?;
        let url = self.config.endpoint(CHAT_PATH);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "chat completion"
        );
        self.call(ctx, Method::POST, &url, Some(body)).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        let access_token = self.access_token(ctx).await?;
        let bytes = self.dispatch(ctx, &access_token, method, url, body).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Bearer token for the next call, fetching one if needed.
    ///
    /// The store lock is held across the exchange, so concurrent callers
    /// wait for a single in-flight authentication instead of racing.
    async fn access_token(&self, ctx: &RequestContext) -> Result<String> {
        let mut slot = ctx
            .run(async { Ok::<_, SberChatError>(self.tokens.lock().await) })
            .await?;

        if let Some(token) = slot.as_ref() {
            if token.is_usable(self.config.expiry_skew) {
                return Ok(token.access_token.clone());
            }
            debug!(expires_at = %token.expires_at, "cached access token expired");
        }

        let token = ctx
            .run(self.authenticator.fetch_token(&self.credentials))
            .await?;
        let access_token = token.access_token.clone();
        *slot = Some(token);
        Ok(access_token)
    }

    /// Send one bearer-authenticated request and return the raw 200 body.
    ///
    /// Any other status becomes [`SberChatError::Api`] with the body decoded
    /// as opaque JSON; an empty body decodes to `null`.
    async fn dispatch(
        &self,
        ctx: &RequestContext,
        access_token: &str,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Bytes> {
        let mut request = self
            .http
            .request(method.clone(), url)
            .headers(bearer_headers(access_token)?);
        if let Some(body) = body {
            request = request.body(body);
        }

        debug!(%method, url, "dispatching request");
        ctx.run(async {
            let resp = request.send().await?;
            let status = resp.status();
            let final_url = resp.url().to_string();
            let body = resp.bytes().await?;

            if status != StatusCode::OK {
                let payload = if body.is_empty() {
                    serde_json::Value::Null
                } else {
                    serde_json::from_slice(&body)?
                };
                warn!(status = status.as_u16(), url = %final_url, "API request failed");
                return Err(SberChatError::api(status, final_url, payload));
            }
            Ok::<_, SberChatError>(body)
        })
        .await
    }
}
