//! pain.008 XML collaborators for [`BatchFileAssembler::generate_xml`].
//!
//! [`Pain008FragmentWriter`] emits one `<PmtInf>` block per transaction
//! group and [`Pain008Template`] renders the surrounding `<Document>` with
//! its group header.
//!
//! # Example
//!
//! ```no_run
//! use lastschrift::core::*;
//! use lastschrift::pain008::{Pain008FragmentWriter, Pain008Template};
//!
//! let store: InMemoryStore = todo!(); // filled by the host
//! let config = SepaConfig::default();
//! let file = BatchFileAssembler::new(&store, &config)
//!     .generate_xml(1, &Pain008FragmentWriter::default(), &Pain008Template)
//!     .unwrap();
//! println!("{} transactions, {} total", file.transaction_count, file.total);
//! ```
//!
//! [`BatchFileAssembler::generate_xml`]: crate::core::BatchFileAssembler::generate_xml

mod fragment;
mod template;
pub(crate) mod xml_utils;

pub use fragment::{LocalInstrument, Pain008FragmentWriter};
pub use template::Pain008Template;
pub use xml_utils::format_amount;
