use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::Cursor;

use crate::core::SepaError;

fn xml_io(e: std::io::Error) -> SepaError {
    SepaError::Xml(format!("write error: {e}"))
}

/// Compact XML writer for document pieces that are concatenated later.
///
/// No indentation is applied, so fragments join without whitespace
/// artefacts. Elements may be left open across pieces.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    /// Writer for a document start, emitting the XML declaration.
    pub fn document() -> Result<Self, SepaError> {
        let mut w = Self::fragment();
        w.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(w)
    }

    /// Writer for a fragment without declaration.
    pub fn fragment() -> Self {
        Self {
            writer: Writer::new(Cursor::new(Vec::new())),
        }
    }

    pub fn into_string(self) -> Result<String, SepaError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| SepaError::Xml(format!("UTF-8 error: {e}")))
    }

    fn emit(&mut self, event: Event<'_>) -> Result<&mut Self, SepaError> {
        self.writer.write_event(event).map_err(xml_io)?;
        Ok(self)
    }

    /// Open `name` with the given attributes, in order.
    pub fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<&mut Self, SepaError> {
        let mut elem = BytesStart::new(name);
        elem.extend_attributes(attrs.iter().copied());
        self.emit(Event::Start(elem))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, SepaError> {
        self.open(name, &[])
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, SepaError> {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    /// `<name attrs..>text</name>`, with `text` escaped.
    pub fn leaf(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> Result<&mut Self, SepaError> {
        self.open(name, attrs)?;
        self.emit(Event::Text(BytesText::new(text)))?;
        self.end_element(name)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, SepaError> {
        self.leaf(name, &[], text)
    }

    /// Write an amount with `Ccy` attribute.
    pub fn amount_element(
        &mut self,
        name: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<&mut Self, SepaError> {
        self.leaf(name, &[("Ccy", currency)], &format_amount(amount))
    }
}

/// Format a Decimal as a pain.008 amount: exactly two decimal places,
/// half-cents rounded away from zero.
pub fn format_amount(d: Decimal) -> String {
    let scaled = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{scaled:.2}")
}
