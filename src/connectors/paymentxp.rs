pub mod constants;
pub mod transformers;


use std::time::Instant;

use error_stack::ResultExt;
use indexmap::IndexMap;

use crate::{
    configs::Config,
    errors::{ConnectorError, CustomResult},
    service::{ConnectorTransport, HttpTransport},
    types::{
        Address, Card, MinorUnit, NormalizedResult, OperationKind, OperationRequest,
        PaymentMethod,
    },
};
use transformers::{PaymentXpAuthType, PaymentXpRequest};

/// Optional inputs shared by every operation
#[derive(Debug, Clone, Default)]
pub struct PaymentOptions {
    pub address: Option<Address>,
    /// Sent as-is after every computed field, overriding any of them
    pub extra_fields: IndexMap<String, String>,
}

impl PaymentOptions {
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_extra_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_fields.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct PaymentXp<T = HttpTransport> {
    auth: PaymentXpAuthType,
    transport: T,
}

impl PaymentXp<HttpTransport> {
    pub fn from_config(config: &Config) -> CustomResult<Self, ConnectorError> {
        let transport = HttpTransport::new(config.connector.base_url.clone(), &config.proxy)
            .change_context(ConnectorError::TransportError)?;
        let auth = PaymentXpAuthType::new(
            config.connector.merchant_id.clone(),
            config.connector.merchant_key.clone(),
        );
        Ok(Self::new(auth, transport))
    }
}

impl<T: ConnectorTransport> PaymentXp<T> {
    pub fn new(auth: PaymentXpAuthType, transport: T) -> Self {
        Self { auth, transport }
    }

    pub fn id(&self) -> &'static str {
        "paymentxp"
    }

    /// Charges a card or token directly, or a stored customer when given a customer reference
    pub async fn purchase(
        &self,
        amount: MinorUnit,
        payment_method: PaymentMethod,
        options: PaymentOptions,
    ) -> CustomResult<NormalizedResult, ConnectorError> {
        let operation_kind = match payment_method {
            PaymentMethod::CustomerReference { .. } => OperationKind::CustomerCharge,
            PaymentMethod::Card(_) | PaymentMethod::OpaqueToken { .. } => {
                OperationKind::DirectCharge
            }
        };
        let request = OperationRequest::new(operation_kind)
            .amount(amount)
            .payment_method(payment_method)
            .set_optional_address(options.address)
            .extra_fields(options.extra_fields);
        self.execute(&request).await
    }

    pub async fn refund(
        &self,
        amount: MinorUnit,
        transaction_id: impl Into<String>,
        options: PaymentOptions,
    ) -> CustomResult<NormalizedResult, ConnectorError> {
        let request = OperationRequest::new(OperationKind::Refund)
            .amount(amount)
            .transaction_reference(transaction_id)
            .extra_fields(options.extra_fields);
        self.execute(&request).await
    }

    /// Exchanges a card for a one-off token; the token comes back as the authorization
    pub async fn tokenize(
        &self,
        card: Card,
        options: PaymentOptions,
    ) -> CustomResult<NormalizedResult, ConnectorError> {
        let request = OperationRequest::new(OperationKind::Tokenize)
            .payment_method(card.into())
            .extra_fields(options.extra_fields);
        self.execute(&request).await
    }

    /// Stores a card as a reusable customer record. A customer id is generated when none is given.
    pub async fn store_customer(
        &self,
        card: Card,
        customer_id: Option<String>,
        options: PaymentOptions,
    ) -> CustomResult<NormalizedResult, ConnectorError> {
        let request = OperationRequest::new(OperationKind::StoreCustomer)
            .payment_method(card.into())
            .set_optional_address(options.address)
            .set_optional_customer_id(customer_id)
            .extra_fields(options.extra_fields);
        self.execute(&request).await
    }

    /// Builds, sends and normalizes one operation. Input errors surface before any network call.
    pub async fn execute(
        &self,
        request: &OperationRequest,
    ) -> CustomResult<NormalizedResult, ConnectorError> {
        let connector_request = PaymentXpRequest::try_from(request)?;
        self.commit(connector_request).await
    }

    #[tracing::instrument(
        name = "paymentxp.commit",
        skip_all,
        fields(
            connector = "paymentxp",
            operation = %request.operation,
            endpoint = %request.endpoint,
            request.url = tracing::field::Empty,
            status_code = tracing::field::Empty,
            latency = tracing::field::Empty,
        )
    )]
    async fn commit(
        &self,
        request: PaymentXpRequest,
    ) -> CustomResult<NormalizedResult, ConnectorError> {
        let PaymentXpRequest {
            operation,
            endpoint,
            mut params,
            authorization_field,
            success_marker,
        } = request;
        self.auth.append_to(&mut params);

        tracing::info!(request = ?params, "request of connector");

        let start = Instant::now();
        let raw_response = self
            .transport
            .post(endpoint, &params)
            .await
            .change_context(ConnectorError::TransportError)
            .attach_printable_lazy(|| format!("operation {operation} to endpoint {endpoint}"))?;
        let elapsed = start.elapsed().as_millis();
        tracing::Span::current().record("latency", u64::try_from(elapsed).unwrap_or(u64::MAX));

        let result = transformers::normalize(&raw_response, success_marker, authorization_field);
        tracing::info!(
            succeeded = result.succeeded,
            message = %result.message,
            authorization = ?result.authorization,
            "response from connector"
        );
        Ok(result)
    }
}
