//! BACS lodgement record formatting.
//!
//! One record per line, six quoted fields separated by commas:
//!
//! ```text
//! "BSORTCDE","BANKACNO","ACNAME","AMOUNT","BANKREF","0N"
//! ```

use tracing::warn;

use super::config::{QuoteStyle, SepaConfig};
use super::status::StatusCodeTable;
use super::types::{MandateRecord, MandateStatus};

/// Outcome of formatting one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LodgementRecord {
    /// A formatted line without trailing newline.
    Line(String),
    /// Nothing to format.
    Empty,
}

impl LodgementRecord {
    pub fn as_line(&self) -> Option<&str> {
        match self {
            Self::Line(line) => Some(line),
            Self::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Formats mandate records as lodgement lines.
#[derive(Debug, Clone, Copy)]
pub struct RecordFormatter<'a> {
    codes: &'a StatusCodeTable,
    quote_style: QuoteStyle,
}

impl<'a> RecordFormatter<'a> {
    pub fn new(config: &'a SepaConfig) -> Self {
        Self {
            codes: &config.status_codes,
            quote_style: config.quote_style,
        }
    }

    /// Format one record.
    ///
    /// `status_code_override`, when non-empty, is written verbatim as the
    /// transaction code; otherwise the mandate status is translated through
    /// the configured status table. An absent record yields
    /// [`LodgementRecord::Empty`].
    pub fn format(
        &self,
        record: Option<&MandateRecord>,
        status_code_override: Option<&str>,
    ) -> LodgementRecord {
        let Some(record) = record else {
            return LodgementRecord::Empty;
        };

        let code = match status_code_override.filter(|c| !c.is_empty()) {
            Some(code) => code.to_string(),
            None => self.transaction_code(record.mandate.status),
        };

        let mandate = &record.mandate;
        let amount = record.contribution.amount.to_string();
        let fields = [
            mandate.sort_code.as_deref().unwrap_or(""),
            mandate.account_number.as_deref().unwrap_or(""),
            record.contribution.contact_name.as_str(),
            amount.as_str(),
            mandate.reference.as_str(),
            code.as_str(),
        ];

        let mut line = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            self.push_quoted(&mut line, field);
        }
        LodgementRecord::Line(line)
    }

    /// BACS code for a mandate status, empty if the table has no entry.
    pub fn transaction_code(&self, status: MandateStatus) -> String {
        match self.codes.translate(status) {
            Some(code) => code.code().to_string(),
            None => {
                warn!(status = status.code(), "no BACS code mapped for mandate status");
                String::new()
            }
        }
    }

    fn push_quoted(&self, out: &mut String, field: &str) {
        out.push('"');
        match self.quote_style {
            QuoteStyle::Legacy => out.push_str(field),
            QuoteStyle::Escaped => out.push_str(&field.replace('"', "\"\"")),
        }
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        BacsCode, ContributionBuilder, MandateBuilder, MandateEntity, SepaConfigBuilder,
    };
    use rust_decimal_macros::dec;

    fn record(name: &str, status: MandateStatus) -> MandateRecord {
        MandateRecord {
            contribution: ContributionBuilder::new(1, name, dec!(12.50))
                .currency("GBP")
                .build(),
            mandate: MandateBuilder::new(9, "BACSREF01", MandateEntity::Single(1))
                .status(status)
                .uk_account("400515", "41234567")
                .build(),
        }
    }

    #[test]
    fn absent_record_is_empty_marker() {
        let config = SepaConfig::default();
        let out = RecordFormatter::new(&config).format(None, Some("17"));
        assert!(out.is_empty());
        assert_eq!(out.as_line(), None);
    }

    #[test]
    fn formats_six_quoted_fields() {
        let config = SepaConfig::default();
        let rec = record("Jane Doe", MandateStatus::Init);
        let out = RecordFormatter::new(&config).format(Some(&rec), None);
        assert_eq!(
            out.as_line(),
            Some(r#""400515","41234567","Jane Doe","12.50","BACSREF01","0N""#)
        );
    }

    #[test]
    fn override_wins_over_status() {
        let config = SepaConfig::default();
        let rec = record("Jane Doe", MandateStatus::Init);
        let out = RecordFormatter::new(&config).format(Some(&rec), Some("99"));
        assert!(out.as_line().unwrap().ends_with(r#","99""#));
    }

    #[test]
    fn empty_override_falls_back_to_table() {
        let config = SepaConfig::default();
        let rec = record("Jane Doe", MandateStatus::Recurring);
        let out = RecordFormatter::new(&config).format(Some(&rec), Some(""));
        assert!(out.as_line().unwrap().ends_with(r#","17""#));
    }

    #[test]
    fn injected_table_is_used() {
        let table = StatusCodeTable::empty().set(MandateStatus::Init, BacsCode::DirectDebit);
        let config = SepaConfigBuilder::new("/tmp").status_codes(table).build();
        let rec = record("Jane Doe", MandateStatus::Init);
        let out = RecordFormatter::new(&config).format(Some(&rec), None);
        assert!(out.as_line().unwrap().ends_with(r#","99""#));
    }

    #[test]
    fn unmapped_status_renders_empty_code() {
        let config = SepaConfigBuilder::new("/tmp")
            .status_codes(StatusCodeTable::empty())
            .build();
        let rec = record("Jane Doe", MandateStatus::Init);
        let out = RecordFormatter::new(&config).format(Some(&rec), None);
        assert!(out.as_line().unwrap().ends_with(r#","BACSREF01","""#));
    }

    #[test]
    fn legacy_style_does_not_escape_quotes() {
        let config = SepaConfig::default();
        let rec = record(r#"Jane "JD" Doe"#, MandateStatus::Init);
        let out = RecordFormatter::new(&config).format(Some(&rec), None);
        assert!(out.as_line().unwrap().contains(r#","Jane "JD" Doe","#));
    }

    #[test]
    fn escaped_style_doubles_quotes() {
        let config = SepaConfigBuilder::new("/tmp")
            .quote_style(QuoteStyle::Escaped)
            .build();
        let rec = record(r#"Jane "JD" Doe"#, MandateStatus::Init);
        let out = RecordFormatter::new(&config).format(Some(&rec), None);
        assert!(out.as_line().unwrap().contains(r#","Jane ""JD"" Doe","#));
    }

    #[test]
    fn amount_is_not_reformatted() {
        let config = SepaConfig::default();
        let mut rec = record("Jane Doe", MandateStatus::Init);
        rec.contribution.amount = dec!(7.5);
        let out = RecordFormatter::new(&config).format(Some(&rec), None);
        assert!(out.as_line().unwrap().contains(r#","7.5","#));
    }
}
