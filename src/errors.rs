use error_stack::Report;

pub type CustomResult<T, E> = error_stack::Result<T, E>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
    #[error("Payment method not supported for {operation}")]
    PaymentMethodNotSupported { operation: &'static str },
    #[error("Failed to reach the connector")]
    TransportError,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiClientError {
    #[error("URL encoding of request failed")]
    UrlEncodingFailed,
    #[error("Request body encoding failed")]
    BodySerializationFailed,
    #[error("Failed to construct the HTTP client")]
    ClientConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("Failed to send request to connector: {0}")]
    RequestNotSent(String),
    #[error("Request timed out")]
    RequestTimeoutReceived,
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("Failed to initialize the logger")]
    LoggerInitFailed,
}

pub fn missing_field_err(
    field_name: &'static str,
) -> Box<dyn Fn() -> Report<ConnectorError> + 'static> {
    Box::new(move || ConnectorError::MissingRequiredField { field_name }.into())
}
