//! # lastschrift
//!
//! SEPA direct-debit batch file assembly and payment-instrument validation:
//! pain.008 XML batches, flat BACS lodgement files, IBAN/BIC checks and
//! UK sort code verification.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use lastschrift::core::*;
//!
//! assert!(verify_iban("GB29NWBK60161331926819").is_ok());
//! assert!(verify_bic("DEUTDEFF500").is_ok());
//!
//! let err = verify_iban("GB29NWBK60161331926818").unwrap_err();
//! assert_eq!(err.kind.code(), "INVALID_IBAN");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, IBAN/BIC validation, lodgement records, batch assembly |
//! | `xml` | pain.008 group fragments and document header/footer |
//! | `ukbank` | UK sort code / account number verification service client |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod pain008;

#[cfg(feature = "ukbank")]
pub mod ukbank;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
