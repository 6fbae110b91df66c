//! Core direct-debit types, validation and batch assembly.
//!
//! This module holds the domain model shared by all output formats,
//! IBAN/BIC validation, the BACS lodgement record format and the
//! assemblers that turn stored transaction groups into one batch file.

mod assembly;
mod builder;
mod config;
mod countries;
mod error;
mod lodgement;
mod status;
mod store;
mod types;
mod validation;

pub use assembly::*;
pub use builder::*;
pub use config::*;
pub use countries::{iban_length, is_iban_country};
pub use error::*;
pub use lodgement::{LodgementRecord, RecordFormatter};
pub use status::*;
pub use store::*;
pub use types::*;
pub use validation::*;
