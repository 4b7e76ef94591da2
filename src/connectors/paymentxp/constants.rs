use crate::types::OperationKind;

pub const BASE_URL: &str = "https://webservice.paymentxp.com/wh/";
pub const ENDPOINT_SUFFIX: &str = ".aspx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum PaymentXpEndpoints {
    WebHost,
    GetToken,
}

pub fn get_endpoint_url(base_url: &str, endpoint: PaymentXpEndpoints) -> String {
    format!("{base_url}{endpoint}{ENDPOINT_SUFFIX}")
}

pub(crate) mod fields {
    pub(crate) const MERCHANT_ID: &str = "MerchantID";
    pub(crate) const MERCHANT_KEY: &str = "MerchantKey";
    pub(crate) const TRANSACTION_TYPE: &str = "TransactionType";
    pub(crate) const TRANSACTION_AMOUNT: &str = "TransactionAmount";
    pub(crate) const TRANSACTION_ID: &str = "TransactionID";
    pub(crate) const CUSTOMER_ID: &str = "CustomerID";
    pub(crate) const TOKEN: &str = "Token";
    pub(crate) const PHONE_NUMBER: &str = "PhoneNumber";
    pub(crate) const CVV2: &str = "CVV2";

    pub(crate) const STATUS_ID: &str = "StatusID";
    pub(crate) const AVS_RESPONSE_CODE: &str = "AVSResponseCode";
    pub(crate) const CVV2_RESPONSE_CODE: &str = "CVV2ResponseCode";

    /// Checked in this order; the first non-blank one is the result message
    pub(crate) const MESSAGE_CANDIDATES: [&str; 3] = ["ResponseMessage", "Message", "StatusMessage"];
}

/// Remote names for the card and address data. The same logical data is
/// spelled differently on one-off charges and on customer records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldNames {
    pub holder_name: &'static str,
    pub card_number: &'static str,
    /// `None` where the endpoint does not accept a verification code
    pub verification_code: Option<&'static str>,
    pub expiry: &'static str,
    pub address_line: &'static str,
    pub city: &'static str,
    pub country: &'static str,
    pub region: &'static str,
    pub postal_code: &'static str,
    pub phone: &'static str,
}

pub const CHARGE_FIELD_NAMES: FieldNames = FieldNames {
    holder_name: "BillingFullName",
    card_number: "CardNumber",
    verification_code: Some(fields::CVV2),
    expiry: "ExpirationDateMMYY",
    address_line: "BillingAddress",
    city: "BillingCity",
    country: "BillingCountry",
    region: "BillingState",
    postal_code: "BillingZipCode",
    phone: fields::PHONE_NUMBER,
};

/// One-off naming without the verification code, for token issuance
pub const TOKEN_FIELD_NAMES: FieldNames = FieldNames {
    verification_code: None,
    ..CHARGE_FIELD_NAMES
};

pub const CUSTOMER_FIELD_NAMES: FieldNames = FieldNames {
    holder_name: "CustomerName",
    card_number: "CardNumber",
    verification_code: None,
    expiry: "CardExpirationDate",
    address_line: "Address",
    city: "City",
    country: "Country",
    region: "State",
    postal_code: "Zip",
    phone: fields::PHONE_NUMBER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum TransactionType {
    CreditCardCharge,
    AddCustomerCCCharge,
    CreditCardCredit,
    AddCustomer,
}

/// Everything that differs between operations on the remote side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationConfig {
    pub endpoint: PaymentXpEndpoints,
    pub transaction_type: Option<TransactionType>,
    pub field_names: FieldNames,
    /// Field holding the identifier that correlates later calls with this one
    pub authorization_field: &'static str,
    /// `StatusID` value meaning success. The customer store endpoint inverts it.
    pub success_marker: &'static str,
}

pub fn get_operation_config(operation: OperationKind) -> OperationConfig {
    match operation {
        OperationKind::DirectCharge => OperationConfig {
            endpoint: PaymentXpEndpoints::WebHost,
            transaction_type: Some(TransactionType::CreditCardCharge),
            field_names: CHARGE_FIELD_NAMES,
            authorization_field: fields::TRANSACTION_ID,
            success_marker: "0",
        },
        OperationKind::CustomerCharge => OperationConfig {
            endpoint: PaymentXpEndpoints::WebHost,
            transaction_type: Some(TransactionType::AddCustomerCCCharge),
            field_names: CHARGE_FIELD_NAMES,
            authorization_field: fields::TRANSACTION_ID,
            success_marker: "0",
        },
        OperationKind::Refund => OperationConfig {
            endpoint: PaymentXpEndpoints::WebHost,
            transaction_type: Some(TransactionType::CreditCardCredit),
            field_names: CHARGE_FIELD_NAMES,
            authorization_field: fields::TRANSACTION_ID,
            success_marker: "0",
        },
        OperationKind::Tokenize => OperationConfig {
            endpoint: PaymentXpEndpoints::GetToken,
            transaction_type: None,
            field_names: TOKEN_FIELD_NAMES,
            authorization_field: fields::TOKEN,
            success_marker: "0",
        },
        OperationKind::StoreCustomer => OperationConfig {
            endpoint: PaymentXpEndpoints::WebHost,
            transaction_type: Some(TransactionType::AddCustomer),
            field_names: CUSTOMER_FIELD_NAMES,
            authorization_field: fields::CUSTOMER_ID,
            success_marker: "1",
        },
    }
}

pub const CUSTOMER_ID_PREFIX: &str = "cus";
