use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::*;

/// Builder for [`Mandate`].
///
/// ```
/// use lastschrift::core::*;
///
/// let mandate = MandateBuilder::new(7, "SEPA-0007", MandateEntity::Recurring(3))
///     .status(MandateStatus::Recurring)
///     .iban("DE89370400440532013000")
///     .bic("COBADEFFXXX")
///     .build();
/// assert!(mandate.is_enabled);
/// ```
pub struct MandateBuilder {
    mandate: Mandate,
}

impl MandateBuilder {
    /// New enabled mandate in status `INIT`.
    pub fn new(id: u64, reference: impl Into<String>, entity: MandateEntity) -> Self {
        Self {
            mandate: Mandate {
                id,
                reference: reference.into(),
                status: MandateStatus::Init,
                entity,
                iban: None,
                bic: None,
                sort_code: None,
                account_number: None,
                is_enabled: true,
                signature_date: None,
                creditor_id: 0,
            },
        }
    }

    pub fn status(mut self, status: MandateStatus) -> Self {
        self.mandate.status = status;
        self
    }

    pub fn iban(mut self, iban: impl Into<String>) -> Self {
        self.mandate.iban = Some(iban.into());
        self
    }

    pub fn bic(mut self, bic: impl Into<String>) -> Self {
        self.mandate.bic = Some(bic.into());
        self
    }

    /// Set the UK sort code and account number.
    pub fn uk_account(
        mut self,
        sort_code: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        self.mandate.sort_code = Some(sort_code.into());
        self.mandate.account_number = Some(account_number.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.mandate.is_enabled = enabled;
        self
    }

    pub fn signature_date(mut self, date: NaiveDate) -> Self {
        self.mandate.signature_date = Some(date);
        self
    }

    pub fn creditor(mut self, creditor_id: u64) -> Self {
        self.mandate.creditor_id = creditor_id;
        self
    }

    pub fn build(self) -> Mandate {
        self.mandate
    }
}

/// Builder for [`Contribution`].
pub struct ContributionBuilder {
    contribution: Contribution,
}

impl ContributionBuilder {
    /// New pending EUR contribution.
    pub fn new(id: u64, contact_name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            contribution: Contribution {
                id,
                contact_name: contact_name.into(),
                invoice_id: None,
                currency: "EUR".into(),
                amount,
                receive_date: None,
                recurring_id: None,
                status: ContributionStatus::Pending,
            },
        }
    }

    pub fn invoice_id(mut self, invoice_id: impl Into<String>) -> Self {
        self.contribution.invoice_id = Some(invoice_id.into());
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.contribution.currency = code.into();
        self
    }

    pub fn receive_date(mut self, date: NaiveDate) -> Self {
        self.contribution.receive_date = Some(date);
        self
    }

    /// Attach the contribution to a recurring contribution series.
    pub fn recurring(mut self, recurring_id: u64) -> Self {
        self.contribution.recurring_id = Some(recurring_id);
        self
    }

    pub fn status(mut self, status: ContributionStatus) -> Self {
        self.contribution.status = status;
        self
    }

    pub fn build(self) -> Contribution {
        self.contribution
    }
}
