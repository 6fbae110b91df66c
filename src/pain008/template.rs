//! pain.008 document header and footer.

use crate::core::{FileFormat, SepaError, Template, TemplateContext, TemplateRenderer};

use super::xml_utils::{XmlWriter, format_amount};

/// Renders the `<Document>` opening with its group header, and the
/// matching closing tags.
///
/// The namespace follows the file format of the groups; files without
/// groups use the generic `pain.008.001.02` namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pain008Template;

impl TemplateRenderer for Pain008Template {
    fn render(&self, template: Template, ctx: &TemplateContext<'_>) -> Result<String, SepaError> {
        match template {
            Template::FileHeader => render_header(ctx),
            Template::FileFooter => render_footer(),
        }
    }
}

fn render_header(ctx: &TemplateContext<'_>) -> Result<String, SepaError> {
    let format = ctx.file_format.unwrap_or(FileFormat::Pain008Generic);
    let namespace = format.namespace().ok_or_else(|| {
        SepaError::Template(format!("file format {format} has no XML representation"))
    })?;

    let mut w = XmlWriter::document()?;
    w.open(
        "Document",
        &[
            ("xmlns", namespace),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    w.start_element("CstmrDrctDbtInitn")?;
    w.start_element("GrpHdr")?;
    w.text_element("MsgId", &ctx.file.reference)?;
    w.text_element(
        "CreDtTm",
        &ctx.file.created.format("%Y-%m-%dT%H:%M:%S").to_string(),
    )?;
    w.text_element("NbOfTxs", &ctx.transaction_count.to_string())?;
    w.text_element("CtrlSum", &format_amount(ctx.total))?;
    w.start_element("InitgPty")?;
    w.text_element("Nm", &ctx.file.initiating_party)?;
    w.end_element("InitgPty")?;
    w.end_element("GrpHdr")?;
    w.into_string()
}

fn render_footer() -> Result<String, SepaError> {
    let mut w = XmlWriter::fragment();
    w.end_element("CstmrDrctDbtInitn")?;
    w.end_element("Document")?;
    w.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BatchFile;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn file() -> BatchFile {
        BatchFile {
            id: 1,
            reference: "SDD-2024-03".into(),
            filename: "SDD-2024-03.xml".into(),
            created: NaiveDate::from_ymd_opt(2024, 2, 20)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            latest_submission_date: None,
            initiating_party: "Verein e.V.".into(),
            tag: None,
        }
    }

    #[test]
    fn header_carries_totals() {
        let file = file();
        let ctx = TemplateContext {
            file: &file,
            total: dec!(150.5),
            transaction_count: 3,
            file_format: Some(FileFormat::Pain008German),
        };
        let header = Pain008Template.render(Template::FileHeader, &ctx).unwrap();
        assert!(header.starts_with("<?xml"));
        assert!(header.contains(r#"xmlns="urn:iso:std:iso:20022:tech:xsd:pain.008.003.02""#));
        assert!(header.contains("<MsgId>SDD-2024-03</MsgId>"));
        assert!(header.contains("<CreDtTm>2024-02-20T09:30:00</CreDtTm>"));
        assert!(header.contains("<NbOfTxs>3</NbOfTxs><CtrlSum>150.50</CtrlSum>"));
        assert!(header.ends_with("</GrpHdr>"));
    }

    #[test]
    fn footer_closes_document() {
        let file = file();
        let ctx = TemplateContext {
            file: &file,
            total: dec!(0),
            transaction_count: 0,
            file_format: None,
        };
        let footer = Pain008Template.render(Template::FileFooter, &ctx).unwrap();
        assert_eq!(footer, "</CstmrDrctDbtInitn></Document>");
    }

    #[test]
    fn lodgement_format_has_no_header() {
        let file = file();
        let ctx = TemplateContext {
            file: &file,
            total: dec!(0),
            transaction_count: 0,
            file_format: Some(FileFormat::BacsLodgement),
        };
        let err = Pain008Template
            .render(Template::FileHeader, &ctx)
            .unwrap_err();
        assert!(matches!(err, SepaError::Template(_)));
    }
}
