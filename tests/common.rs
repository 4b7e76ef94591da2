#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use error_stack::report;
use hyperswitch_masking::Secret;
use paymentxp_connector::{
    connectors::paymentxp::{constants::PaymentXpEndpoints, transformers::PaymentXpAuthType},
    errors::{ApiClientError, CustomResult},
    service::ConnectorTransport,
    types::RemoteParameterSet,
    PaymentXp,
};

pub const TEST_MERCHANT_ID: &str = "merchant_1";
pub const TEST_MERCHANT_KEY: &str = "key_1";

/// One call as it would have gone over the wire
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: PaymentXpEndpoints,
    pub params: RemoteParameterSet,
}

impl RecordedCall {
    pub fn keys(&self) -> Vec<&str> {
        self.params.keys().collect()
    }
}

/// In-memory transport that records every call and replays canned bodies in order
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responses: Arc<Mutex<VecDeque<Result<String, ApiClientError>>>>,
}

impl RecordingTransport {
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let transport = Self::default();
        transport
            .responses
            .lock()
            .unwrap()
            .extend(responses.into_iter().map(|body| Ok(body.into())));
        transport
    }

    pub fn failing(error: ApiClientError) -> Self {
        let transport = Self::default();
        transport.responses.lock().unwrap().push_back(Err(error));
        transport
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls()
            .pop()
            .expect("the transport should have been called")
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for RecordingTransport {
    async fn post(
        &self,
        endpoint: PaymentXpEndpoints,
        params: &RemoteParameterSet,
    ) -> CustomResult<String, ApiClientError> {
        self.calls.lock().unwrap().push(RecordedCall {
            endpoint,
            params: params.clone(),
        });
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(error)) => Err(report!(error)),
            None => Ok(String::new()),
        }
    }
}

pub fn connector(transport: RecordingTransport) -> PaymentXp<RecordingTransport> {
    PaymentXp::new(
        PaymentXpAuthType::new(
            TEST_MERCHANT_ID,
            Secret::new(TEST_MERCHANT_KEY.to_string()),
        ),
        transport,
    )
}
