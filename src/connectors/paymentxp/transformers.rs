use error_stack::report;
use hyperswitch_masking::{PeekInterface, Secret};
use indexmap::IndexMap;

use super::constants::{self, fields, FieldNames, OperationConfig, PaymentXpEndpoints};
use crate::{
    errors::{missing_field_err, ConnectorError, CustomResult},
    types::{
        Address, Card, ExpiryPart, MinorUnit, NormalizedResult, OperationKind, OperationRequest,
        PaymentMethod, RemoteParameterSet,
    },
};

// ===== AUTHENTICATION =====

#[derive(Debug, Clone)]
pub struct PaymentXpAuthType {
    pub merchant_id: String,
    pub merchant_key: Secret<String>,
}

impl PaymentXpAuthType {
    pub fn new(merchant_id: impl Into<String>, merchant_key: Secret<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            merchant_key,
        }
    }

    /// Appended after everything else so callers can never override the credentials
    pub fn append_to(&self, params: &mut RemoteParameterSet) {
        params.remove(fields::MERCHANT_ID);
        params.remove(fields::MERCHANT_KEY);
        params.insert(fields::MERCHANT_ID, self.merchant_id.clone());
        params.insert_masked(fields::MERCHANT_KEY, self.merchant_key.clone());
    }
}

// ===== REQUEST =====

/// A fully built outbound call, minus credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentXpRequest {
    pub operation: OperationKind,
    pub endpoint: PaymentXpEndpoints,
    pub params: RemoteParameterSet,
    pub authorization_field: &'static str,
    pub success_marker: &'static str,
}

impl TryFrom<&OperationRequest> for PaymentXpRequest {
    type Error = error_stack::Report<ConnectorError>;

    fn try_from(item: &OperationRequest) -> Result<Self, Self::Error> {
        let config = constants::get_operation_config(item.operation_kind);
        let mut params = RemoteParameterSet::new();

        match item.operation_kind {
            OperationKind::DirectCharge => build_direct_charge(&mut params, item, &config)?,
            OperationKind::CustomerCharge => build_customer_charge(&mut params, item)?,
            OperationKind::Refund => build_refund(&mut params, item)?,
            OperationKind::Tokenize => build_tokenize(&mut params, item, &config)?,
            OperationKind::StoreCustomer => build_store_customer(&mut params, item, &config)?,
        }

        if let Some(transaction_type) = config.transaction_type {
            params.insert(fields::TRANSACTION_TYPE, transaction_type.to_string());
        }

        // caller supplied fields always win over computed ones
        params.merge(&item.extra_fields);
        // endpoints without a verification code field never receive one, not even as an extra field
        if config.field_names.verification_code.is_none() {
            params.remove(fields::CVV2);
        }

        Ok(Self {
            operation: item.operation_kind,
            endpoint: config.endpoint,
            params,
            authorization_field: config.authorization_field,
            success_marker: config.success_marker,
        })
    }
}

fn build_direct_charge(
    params: &mut RemoteParameterSet,
    item: &OperationRequest,
    config: &OperationConfig,
) -> CustomResult<(), ConnectorError> {
    let payment_method = item
        .payment_method
        .as_ref()
        .ok_or_else(missing_field_err("payment_method"))?;

    if let Some(address) = item.address.as_ref() {
        add_address(params, address, &config.field_names);
    }
    match payment_method {
        PaymentMethod::Card(card) => add_card(params, card, &config.field_names),
        PaymentMethod::OpaqueToken { value } => params.insert_masked(fields::TOKEN, value.clone()),
        PaymentMethod::CustomerReference { .. } => Err(report!(
            ConnectorError::PaymentMethodNotSupported {
                operation: "direct charge"
            }
        )
        .attach_printable("customer references are charged through the customer charge flow"))?,
    }
    add_amount(params, get_amount(item)?)
}

/// Only the customer id and amount are sent; the record already holds card and address
fn build_customer_charge(
    params: &mut RemoteParameterSet,
    item: &OperationRequest,
) -> CustomResult<(), ConnectorError> {
    let customer_id = match item.payment_method.as_ref() {
        Some(PaymentMethod::CustomerReference { id }) => Some(id),
        Some(PaymentMethod::Card(_) | PaymentMethod::OpaqueToken { .. }) => {
            Err(report!(ConnectorError::PaymentMethodNotSupported {
                operation: "customer charge"
            }))?
        }
        None => item.customer_id.as_ref(),
    }
    .ok_or_else(missing_field_err("customer_id"))?;

    params.insert(fields::CUSTOMER_ID, customer_id.clone());
    add_amount(params, get_amount(item)?)
}

fn build_refund(
    params: &mut RemoteParameterSet,
    item: &OperationRequest,
) -> CustomResult<(), ConnectorError> {
    let transaction_id = item
        .transaction_reference
        .as_ref()
        .ok_or_else(missing_field_err("transaction_reference"))?;

    add_amount(params, get_amount(item)?)?;
    params.insert(fields::TRANSACTION_ID, transaction_id.clone());
    Ok(())
}

fn build_tokenize(
    params: &mut RemoteParameterSet,
    item: &OperationRequest,
    config: &OperationConfig,
) -> CustomResult<(), ConnectorError> {
    let card = get_card(item, "tokenize")?;
    add_tokenizable_card(params, card, &config.field_names);
    Ok(())
}

fn build_store_customer(
    params: &mut RemoteParameterSet,
    item: &OperationRequest,
    config: &OperationConfig,
) -> CustomResult<(), ConnectorError> {
    let card = get_card(item, "store customer")?;

    if let Some(address) = item.address.as_ref() {
        add_address(params, address, &config.field_names);
    }
    add_card(params, card, &config.field_names);

    let customer_id = item.customer_id.clone().unwrap_or_else(generate_customer_id);
    params.insert(fields::CUSTOMER_ID, customer_id);
    Ok(())
}

fn get_amount(item: &OperationRequest) -> CustomResult<MinorUnit, ConnectorError> {
    item.amount.ok_or_else(missing_field_err("amount"))
}

fn get_card<'a>(
    item: &'a OperationRequest,
    operation: &'static str,
) -> CustomResult<&'a Card, ConnectorError> {
    match item.payment_method.as_ref() {
        Some(PaymentMethod::Card(card)) => Ok(card.as_ref()),
        Some(_) => Err(report!(ConnectorError::PaymentMethodNotSupported { operation })),
        None => Err(missing_field_err("payment_method")()),
    }
}

pub fn generate_customer_id() -> String {
    format!(
        "{}_{}",
        constants::CUSTOMER_ID_PREFIX,
        uuid::Uuid::now_v7().as_simple()
    )
}

// ===== FIELD MAPPING =====

pub fn add_address(params: &mut RemoteParameterSet, address: &Address, names: &FieldNames) {
    if let Some(line) = join_address_lines(address.line1.as_ref(), address.line2.as_ref()) {
        params.insert_masked(names.address_line, line);
    }
    if let Some(phone) = address.phone.as_ref() {
        params.insert_masked(names.phone, Secret::new(strip_non_digits(phone.peek())));
    }
    params.insert_optional(names.city, address.city.as_ref());
    params.insert_optional(names.country, address.country.as_ref());
    params.insert_optional_masked(names.holder_name, address.full_name.as_ref());
    params.insert_optional(names.region, address.region.as_ref());
    params.insert_optional_masked(names.postal_code, address.postal_code.as_ref());
}

pub fn add_card(params: &mut RemoteParameterSet, card: &Card, names: &FieldNames) {
    add_tokenizable_card(params, card, names);
    params.insert_optional_masked(names.holder_name, card.holder_name.as_ref());
}

pub fn add_tokenizable_card(params: &mut RemoteParameterSet, card: &Card, names: &FieldNames) {
    params.insert_masked(names.card_number, card.number.clone());
    if let Some(field) = names.verification_code {
        params.insert_optional_masked(field, card.verification_code.as_ref());
    }
    if let Some(expiry) = format_expiry(card.expiry_month.as_ref(), card.expiry_year.as_ref()) {
        params.insert_masked(names.expiry, expiry);
    }
}

pub fn add_amount(
    params: &mut RemoteParameterSet,
    amount: MinorUnit,
) -> CustomResult<(), ConnectorError> {
    let amount = amount.to_major_unit_as_string()?;
    params.insert(fields::TRANSACTION_AMOUNT, amount.into_inner());
    Ok(())
}

/// `MMYY`; only when both parts are present and numeric
pub fn format_expiry(
    month: Option<&ExpiryPart>,
    year: Option<&ExpiryPart>,
) -> Option<Secret<String>> {
    let month = month?.as_integer()?;
    let year = year?.as_integer()?;
    Some(Secret::new(format!("{:02}{:02}", month, year.rem_euclid(100))))
}

/// Present only when line1 is and the join is non-empty; blank segments are left out
pub fn join_address_lines(
    line1: Option<&Secret<String>>,
    line2: Option<&Secret<String>>,
) -> Option<Secret<String>> {
    let line1 = line1?;
    let joined = [Some(line1), line2]
        .into_iter()
        .flatten()
        .map(|line| line.peek().as_str())
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    (!joined.is_empty()).then(|| Secret::new(joined))
}

pub fn strip_non_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

// ===== RESPONSE =====

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentXpResponse {
    pub fields: IndexMap<String, String>,
}

impl PaymentXpResponse {
    /// Decodes a form-encoded body; a repeated key keeps its first value
    pub fn parse(raw_body: &str) -> Result<Self, serde::de::value::Error> {
        let body = raw_body.trim_start_matches('\u{FEFF}');
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body)?;
        let mut fields = IndexMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            fields.entry(key).or_insert(value);
        }
        Ok(Self { fields })
    }

    pub fn get_field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn status_id(&self) -> Option<&str> {
        self.fields.get(fields::STATUS_ID).map(String::as_str)
    }

    pub fn message(&self) -> String {
        fields::MESSAGE_CANDIDATES
            .iter()
            .find_map(|candidate| self.get_field(candidate))
            .unwrap_or_default()
            .to_string()
    }
}

/// How one endpoint reports its outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseConvention<'a> {
    pub success_marker: &'a str,
    pub authorization_field: &'a str,
}

impl From<OperationKind> for ResponseConvention<'static> {
    fn from(operation: OperationKind) -> Self {
        let config = constants::get_operation_config(operation);
        Self {
            success_marker: config.success_marker,
            authorization_field: config.authorization_field,
        }
    }
}

impl ResponseConvention<'_> {
    pub fn normalize(&self, response: PaymentXpResponse) -> NormalizedResult {
        NormalizedResult {
            succeeded: response.status_id() == Some(self.success_marker),
            message: response.message(),
            authorization: response
                .get_field(self.authorization_field)
                .map(str::to_string),
            avs_code: response
                .get_field(fields::AVS_RESPONSE_CODE)
                .map(str::to_string),
            cvv_code: response
                .get_field(fields::CVV2_RESPONSE_CODE)
                .map(str::to_string),
            raw_fields: response.fields,
        }
    }
}

/// Never fails: an unparseable body is a failed result with an empty message
pub fn normalize(
    raw_body: &str,
    success_marker: &str,
    authorization_field: &str,
) -> NormalizedResult {
    let convention = ResponseConvention {
        success_marker,
        authorization_field,
    };
    match PaymentXpResponse::parse(raw_body) {
        Ok(response) => convention.normalize(response),
        Err(error) => {
            tracing::warn!(?error, "unable to decode connector response body");
            NormalizedResult::default()
        }
    }
}
