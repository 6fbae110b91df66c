//! UK sort code / account number verification.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use super::client::HttpFetch;
use super::response::{Row, ServiceTable, parse_bool, parse_table};
use crate::core::{SepaConfig, SepaError};

/// Account number answered offline by [`AccountVerifier`].
pub const TEST_ACCOUNT_NUMBER: &str = "12345678";

/// Sort codes answered offline together with [`TEST_ACCOUNT_NUMBER`].
pub const TEST_SORT_CODES: [&str; 2] = ["000000", "000009"];

/// Normalized account data reported by the validation service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    pub is_correct: bool,
    pub is_direct_debit_capable: bool,
    pub status_information: String,
    pub corrected_sort_code: String,
    pub corrected_account_number: String,
    pub iban: String,
    pub bank: String,
    pub bank_bic: String,
    pub branch: String,
    pub branch_bic: String,
    pub contact_address_line1: String,
    pub contact_address_line2: String,
    pub contact_post_town: String,
    pub contact_postcode: String,
    pub contact_phone: String,
    pub contact_fax: String,
    pub faster_payments_supported: bool,
    pub chaps_supported: bool,
}

impl AccountDetails {
    fn from_row(row: &Row) -> Self {
        let text = |key: &str| row.get(key).cloned().unwrap_or_default();
        let flag = |key: &str| row.get(key).is_some_and(|v| parse_bool(v));
        Self {
            is_correct: flag("IsCorrect"),
            is_direct_debit_capable: flag("IsDirectDebitCapable"),
            status_information: text("StatusInformation"),
            corrected_sort_code: text("CorrectedSortCode"),
            corrected_account_number: text("CorrectedAccountNumber"),
            iban: text("IBAN"),
            bank: text("Bank"),
            bank_bic: text("BankBIC"),
            branch: text("Branch"),
            branch_bic: text("BranchBIC"),
            contact_address_line1: text("ContactAddressLine1"),
            contact_address_line2: text("ContactAddressLine2"),
            contact_post_town: text("ContactPostTown"),
            contact_postcode: text("ContactPostcode"),
            contact_phone: text("ContactPhone"),
            contact_fax: text("ContactFax"),
            faster_payments_supported: flag("FasterPaymentsSupported"),
            chaps_supported: flag("CHAPSSupported"),
        }
    }

    /// The fixed answer for the offline test account.
    fn test_fixture() -> Self {
        Self {
            is_correct: true,
            iban: "GB27NWBK00009912345678".into(),
            bank: "TEST BANK PLC".into(),
            bank_bic: "NWBKGB21".into(),
            ..Default::default()
        }
    }
}

/// Why an account was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountErrorKind {
    /// The service reported an error.
    Service,
    /// The service answered but flagged the account as incorrect.
    LooksInvalid,
}

impl AccountErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Service => "ACCOUNT_SERVICE_ERROR",
            Self::LooksInvalid => "ACCOUNT_LOOKS_INVALID",
        }
    }
}

/// Error payload of a rejected account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountError {
    pub kind: AccountErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Raw fields reported by the service, empty for `LooksInvalid`.
    pub description: String,
    pub cause: String,
    pub resolution: String,
}

impl AccountError {
    fn from_service_row(row: Option<&Row>) -> Self {
        let field = |key: &str| {
            row.and_then(|r| r.get(key))
                .cloned()
                .unwrap_or_default()
        };
        let (description, cause, resolution) =
            (field("Description"), field("Cause"), field("Resolution"));
        Self {
            kind: AccountErrorKind::Service,
            message: format!(
                " [DESCRIPTION] {description} [CAUSE] {cause} [RESOLUTION] {resolution}"
            ),
            description,
            cause,
            resolution,
        }
    }

    fn looks_invalid() -> Self {
        Self {
            kind: AccountErrorKind::LooksInvalid,
            message: "Account and Sort Code looks INVALID".into(),
            description: String::new(),
            cause: String::new(),
            resolution: String::new(),
        }
    }
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message.trim())
    }
}

impl std::error::Error for AccountError {}

/// Outcome of an account verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountValidation {
    /// The service confirmed the account.
    Valid(AccountDetails),
    /// No API key is configured; the account was not checked.
    Unverified,
    /// The account was rejected.
    Invalid(AccountError),
}

impl AccountValidation {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    pub fn fields(&self) -> Option<&AccountDetails> {
        match self {
            Self::Valid(details) => Some(details),
            Self::Unverified | Self::Invalid(_) => None,
        }
    }

    pub fn error(&self) -> Option<&AccountError> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Valid(_) | Self::Unverified => None,
        }
    }
}

/// Checks UK sort code / account number pairs against the remote
/// validation service.
///
/// Each call performs one blocking request through `F`; callers that
/// need a deadline configure it on the transport.
pub struct AccountVerifier<'a, F> {
    config: &'a SepaConfig,
    fetch: F,
}

impl<'a, F: HttpFetch> AccountVerifier<'a, F> {
    pub fn new(config: &'a SepaConfig, fetch: F) -> Self {
        Self { config, fetch }
    }

    /// Verify an account number and sort code.
    ///
    /// The test account `12345678` with sort code `000000` or `000009`
    /// is answered offline with a fixed result. Without an API key the
    /// result is [`AccountValidation::Unverified`]. A reply that reports
    /// no error but marks the account incorrect is turned into
    /// [`AccountErrorKind::LooksInvalid`].
    ///
    /// # Errors
    ///
    /// `SepaError::Network` if the request fails, `SepaError::Xml` if the
    /// reply cannot be parsed.
    pub fn verify_account_sort_code(
        &self,
        account: &str,
        sort_code: &str,
    ) -> Result<AccountValidation, SepaError> {
        if account == TEST_ACCOUNT_NUMBER && TEST_SORT_CODES.contains(&sort_code) {
            let result = AccountValidation::Valid(AccountDetails::test_fixture());
            debug!(?result, "uk account validator result (test account)");
            return Ok(result);
        }

        let Some(key) = self.config.api_key() else {
            warn!("UK account validator API key not set");
            let result = AccountValidation::Unverified;
            debug!(?result, "uk account validator result (no API key)");
            return Ok(result);
        };

        let url = self.request_url(key, account, sort_code)?;
        debug!(url = %redact_key(&url), "uk account validator request");

        let body = self.fetch.get(url.as_str())?;
        let result = interpret(&parse_table(&body)?);
        debug!(?result, "uk account validator result");
        Ok(result)
    }

    /// Service URL with `Key`, `AccountNumber` and `SortCode` parameters.
    pub fn request_url(&self, key: &str, account: &str, sort_code: &str) -> Result<Url, SepaError> {
        Url::parse_with_params(
            &self.config.account_service_url,
            &[
                ("Key", key),
                ("AccountNumber", account),
                ("SortCode", sort_code),
            ],
        )
        .map_err(|e| SepaError::Network(format!("invalid account service URL: {e}")))
    }
}

fn interpret(table: &ServiceTable) -> AccountValidation {
    if table.is_error() {
        return AccountValidation::Invalid(AccountError::from_service_row(table.rows.first()));
    }

    // Several candidate rows: the last one wins.
    let details = table
        .rows
        .last()
        .map(AccountDetails::from_row)
        .unwrap_or_default();
    if !details.is_correct {
        return AccountValidation::Invalid(AccountError::looks_invalid());
    }
    AccountValidation::Valid(details)
}

fn redact_key(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "Key" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
