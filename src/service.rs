use std::time::Duration;

use error_stack::{report, ResultExt};
use reqwest::Client;

use crate::{
    configs::Proxy,
    connectors::paymentxp::constants::{self, PaymentXpEndpoints},
    errors::{ApiClientError, CustomResult},
    types::RemoteParameterSet,
};

const FORM_URL_ENCODED: &str = "application/x-www-form-urlencoded";

/// Posts a form to one of the connector's endpoints and hands back the raw body.
///
/// Remote failures are reported inside the body, so a non-2xx status is not an
/// error as long as a body could be read.
#[async_trait::async_trait]
pub trait ConnectorTransport: Send + Sync {
    async fn post(
        &self,
        endpoint: PaymentXpEndpoints,
        params: &RemoteParameterSet,
    ) -> CustomResult<String, ApiClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, proxy: &Proxy) -> CustomResult<Self, ApiClientError> {
        let base_url = base_url.into();
        let should_bypass_proxy = proxy.bypass_proxy_urls.contains(&base_url);
        let client = get_client_builder(proxy, should_bypass_proxy)?
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)
            .inspect_err(|err| {
                tracing::error!(?err, "failed to construct base client");
            })?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for HttpTransport {
    async fn post(
        &self,
        endpoint: PaymentXpEndpoints,
        params: &RemoteParameterSet,
    ) -> CustomResult<String, ApiClientError> {
        let url = reqwest::Url::parse(&constants::get_endpoint_url(&self.base_url, endpoint))
            .change_context(ApiClientError::UrlEncodingFailed)?;
        let body = params.encode()?;

        tracing::Span::current().record("request.url", tracing::field::display(&url));

        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, FORM_URL_ENCODED)
            .body(body)
            .send()
            .await
            .map_err(|error| {
                let api_error = match error {
                    error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
                    _ => ApiClientError::RequestNotSent(error.to_string()),
                };
                tracing::info!(error = %api_error, "unable to send request to connector");
                report!(api_error)
            })?;

        handle_response(response).await
    }
}

async fn handle_response(response: reqwest::Response) -> CustomResult<String, ApiClientError> {
    let status_code = response.status().as_u16();
    tracing::Span::current().record("status_code", status_code);

    if !response.status().is_success() {
        tracing::warn!(status_code, "connector responded with a non-success status");
    }

    response
        .text()
        .await
        .change_context(ApiClientError::ResponseDecodingFailed)
        .attach_printable_lazy(|| format!("status code {status_code}"))
}

fn get_client_builder(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let mut client_builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    if let Some(timeout) = proxy_config.request_timeout {
        client_builder = client_builder.timeout(Duration::from_secs(timeout));
    }

    if should_bypass_proxy {
        return Ok(client_builder.no_proxy());
    }

    // Proxy all HTTPS traffic through the configured HTTPS proxy
    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    tracing::error!(?err, "HTTPS proxy configuration error");
                })?,
        );
    }

    // Proxy all HTTP traffic through the configured HTTP proxy
    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    tracing::error!(?err, "HTTP proxy configuration error");
                })?,
        );
    }

    Ok(client_builder)
}
