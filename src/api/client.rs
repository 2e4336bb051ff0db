//! HTTP client for the configured API

use reqwest::{Client, Request};
use tracing::debug;

use crate::api::endpoints::{build_endpoint, Action};
use crate::api::response::ApiResponse;
use crate::cli::flags::FlagMap;
use crate::config::{Authorization, Config};
use crate::error::{Result, UcliError};

/// Single-use client bound to one configuration
pub struct ApiClient<'a> {
    client: Client,
    config: &'a Config,
}

impl<'a> ApiClient<'a> {
    /// Create a new API client
    pub fn new(config: &'a Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ucli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UcliError::Transport)?;

        Ok(Self { client, config })
    }

    /// Build the request for an action without sending it.
    ///
    /// Configured headers are applied last and replace anything set
    /// before them, including the generated `Authorization` header.
    pub fn build_request<S: AsRef<str>>(
        &self,
        action: Action,
        resources: &[S],
        flags: &FlagMap,
    ) -> Result<Request> {
        let endpoint = build_endpoint(resources);
        debug!("Endpoint: {}", endpoint);

        let mut url = self.config.request_url(&endpoint)?;
        if action.sends_query() && !flags.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in flags {
                query.append_pair(key, &value.to_string());
            }
        }
        debug!("Performing {} on URL: {}", action.method(), url);

        let mut req = self.client.request(action.method(), url);

        if action.sends_body() {
            req = req.json(flags);
        }

        req = match self.config.authorization()? {
            Some(Authorization::Bearer(token)) => req.bearer_auth(token),
            Some(Authorization::Basic { username, password }) => {
                req.basic_auth(username, Some(password))
            }
            None => req,
        };

        let mut request = req.build().map_err(|e| {
            if e.is_builder() {
                UcliError::Build(e)
            } else {
                UcliError::Transport(e)
            }
        })?;
        self.config.apply_headers(request.headers_mut())?;

        debug!("Request headers: {:?}", request.headers());
        if let Some(query) = request.url().query() {
            debug!("Query parameters: {}", query);
        }
        if let Some(body) = request.body().and_then(|b| b.as_bytes()) {
            debug!("Data sent in request: {}", String::from_utf8_lossy(body));
        }

        Ok(request)
    }

    /// Send a request and read the whole response
    pub async fn send(&self, request: Request) -> Result<ApiResponse> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(UcliError::Transport)?;

        let status = response.status();
        debug!("Response Status: {}", status);
        debug!("Response Headers: {:?}", response.headers());

        let body = response.bytes().await.map_err(UcliError::Body)?;

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }

    /// Perform exactly one request for an action
    pub async fn dispatch<S: AsRef<str>>(
        &self,
        action: Action,
        resources: &[S],
        flags: &FlagMap,
    ) -> Result<ApiResponse> {
        let request = self.build_request(action, resources, flags)?;
        self.send(request).await
    }
}
