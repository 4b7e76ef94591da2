// Type definitions shared by the connector's request builder and response normalizer

use error_stack::ResultExt;
use hyperswitch_masking::{Maskable, PeekInterface, Secret};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{ApiClientError, ConnectorError, CustomResult};

/// Amount in the smallest denomination of the currency (e.g. cents)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnit(i64);

impl MinorUnit {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Major denomination with exactly two decimal places, `1234` becomes `"12.34"`
    pub fn to_major_unit_as_string(self) -> CustomResult<StringMajorUnit, ConnectorError> {
        if self.0 < 0 {
            return Err(ConnectorError::InvalidInput {
                message: format!("amount must not be negative, got {}", self.0),
            }
            .into());
        }
        let amount = Decimal::new(self.0, 2);
        Ok(StringMajorUnit::new(format!("{amount:.2}")))
    }
}

impl From<i64> for MinorUnit {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringMajorUnit(String);

impl StringMajorUnit {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Expiry month or year as the caller supplied it; either a number or a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpiryPart {
    Number(i64),
    Text(String),
}

impl ExpiryPart {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.trim().parse::<i64>().ok(),
        }
    }
}

impl From<i64> for ExpiryPart {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ExpiryPart {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ExpiryPart {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub number: Secret<String>,
    pub verification_code: Option<Secret<String>>,
    pub expiry_month: Option<ExpiryPart>,
    pub expiry_year: Option<ExpiryPart>,
    pub holder_name: Option<Secret<String>>,
}

impl Card {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: Secret::new(number.into()),
            verification_code: None,
            expiry_month: None,
            expiry_year: None,
            holder_name: None,
        }
    }

    pub fn verification_code(mut self, code: impl Into<String>) -> Self {
        self.verification_code = Some(Secret::new(code.into()));
        self
    }

    pub fn expiry(mut self, month: impl Into<ExpiryPart>, year: impl Into<ExpiryPart>) -> Self {
        self.expiry_month = Some(month.into());
        self.expiry_year = Some(year.into());
        self
    }

    pub fn holder_name(mut self, name: impl Into<String>) -> Self {
        self.holder_name = Some(Secret::new(name.into()));
        self
    }
}

/// The three shapes a caller can pay with. Exactly one is supplied per charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    Card(Box<Card>),
    OpaqueToken { value: Secret<String> },
    CustomerReference { id: String },
}

impl From<Card> for PaymentMethod {
    fn from(card: Card) -> Self {
        Self::Card(Box::new(card))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub line1: Option<Secret<String>>,
    pub line2: Option<Secret<String>>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<Secret<String>>,
    pub country: Option<String>,
    pub phone: Option<Secret<String>>,
    pub full_name: Option<Secret<String>>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OperationKind {
    DirectCharge,
    CustomerCharge,
    Refund,
    Tokenize,
    StoreCustomer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub operation_kind: OperationKind,
    pub amount: Option<MinorUnit>,
    pub payment_method: Option<PaymentMethod>,
    pub address: Option<Address>,
    pub transaction_reference: Option<String>,
    pub customer_id: Option<String>,
    pub extra_fields: IndexMap<String, String>,
}

impl OperationRequest {
    pub fn new(operation_kind: OperationKind) -> Self {
        Self {
            operation_kind,
            amount: None,
            payment_method: None,
            address: None,
            transaction_reference: None,
            customer_id: None,
            extra_fields: IndexMap::new(),
        }
    }

    pub fn amount(mut self, amount: MinorUnit) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = Some(payment_method);
        self
    }

    pub fn set_optional_address(mut self, address: Option<Address>) -> Self {
        self.address = address;
        self
    }

    pub fn transaction_reference(mut self, reference: impl Into<String>) -> Self {
        self.transaction_reference = Some(reference.into());
        self
    }

    pub fn set_optional_customer_id(mut self, customer_id: Option<String>) -> Self {
        self.customer_id = customer_id;
        self
    }

    pub fn extra_fields(mut self, extra_fields: IndexMap<String, String>) -> Self {
        self.extra_fields.extend(extra_fields);
        self
    }
}

/// Ordered remote field name to value mapping, the wire payload of one call.
///
/// A field is either present with a value or absent. Sensitive values are held
/// masked and only exposed when the body is encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteParameterSet {
    fields: IndexMap<String, Maskable<String>>,
}

impl RemoteParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, value: impl Into<String>) {
        self.fields
            .insert(field.to_string(), Maskable::new_normal(value.into()));
    }

    pub fn insert_masked(&mut self, field: &str, value: Secret<String>) {
        self.fields
            .insert(field.to_string(), Maskable::new_masked(value));
    }

    pub fn insert_optional(&mut self, field: &str, value: Option<&String>) {
        if let Some(value) = value {
            self.insert(field, value.clone());
        }
    }

    pub fn insert_optional_masked(&mut self, field: &str, value: Option<&Secret<String>>) {
        if let Some(value) = value {
            self.insert_masked(field, value.clone());
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<Maskable<String>> {
        self.fields.shift_remove(field)
    }

    /// Later entries win; keys not already present are appended in order
    pub fn merge(&mut self, extra_fields: &IndexMap<String, String>) {
        for (field, value) in extra_fields {
            self.insert(field, value.clone());
        }
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn peek(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(exposed)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `application/x-www-form-urlencoded` body, in insertion order
    pub fn encode(&self) -> CustomResult<String, ApiClientError> {
        let pairs: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(field, value)| (field.as_str(), exposed(value)))
            .collect();
        serde_urlencoded::to_string(pairs).change_context(ApiClientError::BodySerializationFailed)
    }
}

fn exposed(value: &Maskable<String>) -> &str {
    match value {
        Maskable::Masked(secret) => secret.peek().as_str(),
        Maskable::Normal(value) => value.as_str(),
    }
}

/// Outcome of one remote exchange, whatever the endpoint's conventions were
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedResult {
    pub succeeded: bool,
    pub message: String,
    pub raw_fields: IndexMap<String, String>,
    pub authorization: Option<String>,
    pub avs_code: Option<String>,
    pub cvv_code: Option<String>,
}

impl NormalizedResult {
    pub fn is_declined(&self) -> bool {
        !self.succeeded
    }
}
