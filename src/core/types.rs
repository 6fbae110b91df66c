use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a stored batch file.
pub type FileId = u64;

/// Identifier of a stored transaction group.
pub type GroupId = u64;

/// One submission unit handed to the bank.
///
/// Totals are never stored here; they are derived from the member
/// transaction groups each time the file is assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFile {
    pub id: FileId,
    /// Message reference, used as `MsgId` in the group header.
    pub reference: String,
    /// File name suggested for the submission.
    pub filename: String,
    /// Creation timestamp (`CreDtTm`).
    pub created: NaiveDateTime,
    /// Last day the file may be submitted to the bank.
    pub latest_submission_date: Option<NaiveDate>,
    /// Name of the initiating party (`InitgPty/Nm`).
    pub initiating_party: String,
    /// Free-form tag assigned by the host application.
    pub tag: Option<String>,
}

/// Wire format declared by a transaction group.
///
/// All groups of one batch file must declare the same format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    /// ISO 20022 `pain.008.001.02`.
    Pain008Generic,
    /// German DK variant `pain.008.003.02`.
    Pain008German,
    /// `pain.008.001.02` with the GBIC extensions.
    Pain008Gbic,
    /// Flat BACS lodgement text file.
    BacsLodgement,
}

impl FileFormat {
    /// Schema or format tag as written into the output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pain008Generic => "pain.008.001.02",
            Self::Pain008German => "pain.008.003.02",
            Self::Pain008Gbic => "pain.008.001.02-gbic",
            Self::BacsLodgement => "bacs",
        }
    }

    /// XML namespace of the pain.008 document, `None` for flat formats.
    pub fn namespace(&self) -> Option<&'static str> {
        match self {
            Self::Pain008Generic | Self::Pain008Gbic => {
                Some("urn:iso:std:iso:20022:tech:xsd:pain.008.001.02")
            }
            Self::Pain008German => Some("urn:iso:std:iso:20022:tech:xsd:pain.008.003.02"),
            Self::BacsLodgement => None,
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// SEPA sequence type of a transaction group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceType {
    /// First collection of a recurring mandate.
    First,
    /// Follow-up collection of a recurring mandate.
    Recurring,
    /// Single collection.
    OneOff,
    /// Last collection of a recurring mandate.
    Final,
}

impl SequenceType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::First => "FRST",
            Self::Recurring => "RCUR",
            Self::OneOff => "OOFF",
            Self::Final => "FNAL",
        }
    }
}

/// Creditor collecting the payments of a transaction group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creditor {
    pub name: String,
    /// SEPA creditor identifier (e.g. "DE98ZZZ09999999999").
    pub identifier: String,
    pub iban: String,
    pub bic: Option<String>,
}

/// A subset of a batch file sharing one creditor and one wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionGroup {
    pub id: GroupId,
    /// Owning batch file.
    pub file_id: FileId,
    /// Payment information identifier (`PmtInfId`).
    pub reference: String,
    pub file_format: FileFormat,
    pub sequence_type: SequenceType,
    /// Requested collection date (`ReqdColltnDt`).
    pub collection_date: NaiveDate,
    pub creditor: Creditor,
}

/// Lifecycle status of a mandate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MandateStatus {
    /// Created, no collection yet.
    Init,
    /// One-off mandate, not yet collected.
    OneOff,
    /// Recurring mandate awaiting its first collection.
    First,
    /// Recurring mandate in regular collection.
    Recurring,
    /// One-off mandate already submitted.
    Sent,
    /// Mandate rejected or revoked.
    Invalid,
    /// Recurring mandate that has ended.
    Complete,
    /// Collection suspended.
    OnHold,
    /// Data entry not finished.
    Partial,
}

impl MandateStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::OneOff => "OOFF",
            Self::First => "FRST",
            Self::Recurring => "RCUR",
            Self::Sent => "SENT",
            Self::Invalid => "INVALID",
            Self::Complete => "COMPLETE",
            Self::OnHold => "ONHOLD",
            Self::Partial => "PARTIAL",
        }
    }
}

/// Status of a financial transaction (contribution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionStatus {
    Completed,
    Pending,
    Cancelled,
    Failed,
    InProgress,
}

impl ContributionStatus {
    /// Numeric status id as stored by the host.
    pub fn id(&self) -> u8 {
        match self {
            Self::Completed => 1,
            Self::Pending => 2,
            Self::Cancelled => 3,
            Self::Failed => 4,
            Self::InProgress => 5,
        }
    }
}

/// The entity a mandate is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MandateEntity {
    /// A recurring contribution (standing series of debits).
    Recurring(u64),
    /// A single contribution.
    Single(u64),
}

/// A standing authorization to debit the payer's account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mandate {
    pub id: u64,
    /// Mandate reference (`MndtId`), also used as the lodgement bank reference.
    pub reference: String,
    pub status: MandateStatus,
    pub entity: MandateEntity,
    pub iban: Option<String>,
    pub bic: Option<String>,
    /// UK sort code (6 digits), for BACS mandates.
    pub sort_code: Option<String>,
    /// UK account number, for BACS mandates.
    pub account_number: Option<String>,
    pub is_enabled: bool,
    /// Date the mandate was signed (`DtOfSgntr`).
    pub signature_date: Option<NaiveDate>,
    pub creditor_id: u64,
}

/// A financial transaction to be collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    pub id: u64,
    /// Display name of the paying contact.
    pub contact_name: String,
    /// End-to-end reference (`EndToEndId`).
    pub invoice_id: Option<String>,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Amount as entered; never rounded by this crate.
    pub amount: Decimal,
    pub receive_date: Option<NaiveDate>,
    /// Owning recurring contribution, if any.
    pub recurring_id: Option<u64>,
    pub status: ContributionStatus,
}

/// One eligible row: a contribution joined with its active mandate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MandateRecord {
    pub contribution: Contribution,
    pub mandate: Mandate,
}

impl MandateRecord {
    pub fn amount(&self) -> Decimal {
        self.contribution.amount
    }
}

/// Aggregate counters reported for one transaction group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupTotals {
    pub total: Decimal,
    pub transaction_count: usize,
    pub file_format: FileFormat,
}

/// Result of assembling a whole batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledFile {
    /// Full document text.
    pub content: String,
    /// Sum of all group totals.
    pub total: Decimal,
    /// Sum of all group transaction counts.
    pub transaction_count: usize,
    /// Shared format of all groups; `None` when the file has no groups.
    pub file_format: Option<FileFormat>,
}
