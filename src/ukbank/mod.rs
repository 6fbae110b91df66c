//! UK bank account verification.
//!
//! Checks legacy sort code / account number pairs against the Postcode
//! Anywhere BankAccountValidation service and normalizes its reply.
//!
//! # Example
//!
//! ```no_run
//! use lastschrift::core::SepaConfigBuilder;
//! use lastschrift::ukbank::*;
//!
//! let config = SepaConfigBuilder::new("/tmp").api_key("AA11-BB22-CC33-DD44").build();
//! let fetch = ReqwestFetch::with_timeout(std::time::Duration::from_secs(10)).unwrap();
//! let result = AccountVerifier::new(&config, fetch)
//!     .verify_account_sort_code("41234567", "400515")
//!     .unwrap();
//! if let Some(err) = result.error() {
//!     eprintln!("{err}");
//! }
//! ```

mod client;
mod response;
mod verify;

pub use client::{HttpFetch, ReqwestFetch};
pub use verify::{
    AccountDetails, AccountError, AccountErrorKind, AccountValidation, AccountVerifier,
    TEST_ACCOUNT_NUMBER, TEST_SORT_CODES,
};
