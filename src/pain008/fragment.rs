//! `<PmtInf>` generation, one block per transaction group.

use crate::core::{
    GroupFragmentWriter, GroupTotals, MandateRecord, SepaError, TransactionGroup,
};

use super::xml_utils::{XmlWriter, format_amount};

/// Placeholder for optional identifiers the scheme still requires.
const NOT_PROVIDED: &str = "NOTPROVIDED";

/// Writes one pain.008 payment information block per group.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pain008FragmentWriter {
    /// Local instrument code, `CORE` unless the creditor uses B2B.
    pub local_instrument: LocalInstrument,
}

/// SEPA direct debit scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalInstrument {
    #[default]
    Core,
    B2b,
}

impl LocalInstrument {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Core => "CORE",
            Self::B2b => "B2B",
        }
    }
}

impl GroupFragmentWriter for Pain008FragmentWriter {
    fn write_group(
        &self,
        group: &TransactionGroup,
        records: &[MandateRecord],
        totals: &GroupTotals,
    ) -> Result<String, SepaError> {
        let mut w = XmlWriter::fragment();
        w.start_element("PmtInf")?;
        w.text_element("PmtInfId", &group.reference)?;
        w.text_element("PmtMtd", "DD")?;
        w.text_element("NbOfTxs", &totals.transaction_count.to_string())?;
        w.text_element("CtrlSum", &format_amount(totals.total))?;

        w.start_element("PmtTpInf")?;
        w.start_element("SvcLvl")?;
        w.text_element("Cd", "SEPA")?;
        w.end_element("SvcLvl")?;
        w.start_element("LclInstrm")?;
        w.text_element("Cd", self.local_instrument.code())?;
        w.end_element("LclInstrm")?;
        w.text_element("SeqTp", group.sequence_type.code())?;
        w.end_element("PmtTpInf")?;

        w.text_element(
            "ReqdColltnDt",
            &group.collection_date.format("%Y-%m-%d").to_string(),
        )?;

        let creditor = &group.creditor;
        w.start_element("Cdtr")?;
        w.text_element("Nm", &creditor.name)?;
        w.end_element("Cdtr")?;
        write_account(&mut w, "CdtrAcct", &creditor.iban)?;
        write_agent(&mut w, "CdtrAgt", creditor.bic.as_deref())?;
        w.text_element("ChrgBr", "SLEV")?;

        w.start_element("CdtrSchmeId")?;
        w.start_element("Id")?;
        w.start_element("PrvtId")?;
        w.start_element("Othr")?;
        w.text_element("Id", &creditor.identifier)?;
        w.start_element("SchmeNm")?;
        w.text_element("Prtry", "SEPA")?;
        w.end_element("SchmeNm")?;
        w.end_element("Othr")?;
        w.end_element("PrvtId")?;
        w.end_element("Id")?;
        w.end_element("CdtrSchmeId")?;

        for record in records {
            write_transaction(&mut w, record)?;
        }

        w.end_element("PmtInf")?;
        w.into_string()
    }
}

fn write_transaction(w: &mut XmlWriter, record: &MandateRecord) -> Result<(), SepaError> {
    let contribution = &record.contribution;
    let mandate = &record.mandate;

    w.start_element("DrctDbtTxInf")?;
    w.start_element("PmtId")?;
    w.text_element(
        "EndToEndId",
        contribution.invoice_id.as_deref().unwrap_or(NOT_PROVIDED),
    )?;
    w.end_element("PmtId")?;
    w.amount_element("InstdAmt", contribution.amount, &contribution.currency)?;

    w.start_element("DrctDbtTx")?;
    w.start_element("MndtRltdInf")?;
    w.text_element("MndtId", &mandate.reference)?;
    if let Some(date) = mandate.signature_date {
        w.text_element("DtOfSgntr", &date.format("%Y-%m-%d").to_string())?;
    }
    w.end_element("MndtRltdInf")?;
    w.end_element("DrctDbtTx")?;

    write_agent(w, "DbtrAgt", mandate.bic.as_deref())?;
    w.start_element("Dbtr")?;
    w.text_element("Nm", &contribution.contact_name)?;
    w.end_element("Dbtr")?;
    write_account(w, "DbtrAcct", mandate.iban.as_deref().unwrap_or(""))?;
    w.end_element("DrctDbtTxInf")?;
    Ok(())
}

fn write_account(w: &mut XmlWriter, tag: &str, iban: &str) -> Result<(), SepaError> {
    w.start_element(tag)?;
    w.start_element("Id")?;
    w.text_element("IBAN", iban)?;
    w.end_element("Id")?;
    w.end_element(tag)?;
    Ok(())
}

fn write_agent(w: &mut XmlWriter, tag: &str, bic: Option<&str>) -> Result<(), SepaError> {
    w.start_element(tag)?;
    w.start_element("FinInstnId")?;
    match bic {
        Some(bic) => {
            w.text_element("BIC", bic)?;
        }
        None => {
            w.start_element("Othr")?;
            w.text_element("Id", NOT_PROVIDED)?;
            w.end_element("Othr")?;
        }
    }
    w.end_element("FinInstnId")?;
    w.end_element(tag)?;
    Ok(())
}
