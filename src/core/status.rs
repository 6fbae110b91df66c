//! Mandate status to BACS transaction code translation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::MandateStatus;

/// BACS transaction code written into the last lodgement field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BacsCode {
    /// `0N`: new direct debit instruction.
    NewInstruction,
    /// `0C`: cancel direct debit instruction.
    CancelInstruction,
    /// `0S`: conversion of a paper instruction.
    ConvertedInstruction,
    /// `01`: first collection.
    FirstCollection,
    /// `17`: regular collection.
    RegularCollection,
    /// `18`: re-presentation of a returned collection.
    RePresentation,
    /// `19`: final collection.
    FinalCollection,
    /// `99`: generic direct debit.
    DirectDebit,
}

impl BacsCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NewInstruction => "0N",
            Self::CancelInstruction => "0C",
            Self::ConvertedInstruction => "0S",
            Self::FirstCollection => "01",
            Self::RegularCollection => "17",
            Self::RePresentation => "18",
            Self::FinalCollection => "19",
            Self::DirectDebit => "99",
        }
    }
}

/// Lookup table from mandate status to BACS transaction code.
///
/// Injected through [`SepaConfig`](super::SepaConfig); hosts with a
/// different scheme mapping replace entries with [`StatusCodeTable::set`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCodeTable {
    codes: BTreeMap<MandateStatus, BacsCode>,
}

impl StatusCodeTable {
    /// A table without any mapping.
    pub fn empty() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }

    /// Map `status` to `code`, replacing any previous entry.
    pub fn set(mut self, status: MandateStatus, code: BacsCode) -> Self {
        self.codes.insert(status, code);
        self
    }

    /// Translate a mandate status; `None` if the table has no entry.
    pub fn translate(&self, status: MandateStatus) -> Option<BacsCode> {
        self.codes.get(&status).copied()
    }
}

impl Default for StatusCodeTable {
    fn default() -> Self {
        Self::empty()
            .set(MandateStatus::Init, BacsCode::NewInstruction)
            .set(MandateStatus::Partial, BacsCode::NewInstruction)
            .set(MandateStatus::First, BacsCode::FirstCollection)
            .set(MandateStatus::OneOff, BacsCode::FirstCollection)
            .set(MandateStatus::Recurring, BacsCode::RegularCollection)
            .set(MandateStatus::Sent, BacsCode::RegularCollection)
            .set(MandateStatus::Complete, BacsCode::CancelInstruction)
            .set(MandateStatus::Invalid, BacsCode::CancelInstruction)
            .set(MandateStatus::OnHold, BacsCode::CancelInstruction)
    }
}
