//! Parsing of the tabular XML returned by the validation service.
//!
//! ```xml
//! <Table>
//!   <Columns><Column Name="IsCorrect"/>...</Columns>
//!   <Rows><Row IsCorrect="True" IBAN="GB..." .../></Rows>
//! </Table>
//! ```
//!
//! An error is signalled by a first column named `Error`; the row then
//! carries `Description`, `Cause` and `Resolution` attributes.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::core::SepaError;

/// Attributes of one `<Row>`.
pub(crate) type Row = HashMap<String, String>;

#[derive(Debug, Default)]
pub(crate) struct ServiceTable {
    /// `Name` of the first `<Column>`.
    pub first_column: Option<String>,
    pub rows: Vec<Row>,
}

impl ServiceTable {
    pub fn is_error(&self) -> bool {
        self.first_column.as_deref() == Some("Error")
    }
}

pub(crate) fn parse_table(xml: &str) -> Result<ServiceTable, SepaError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut table = ServiceTable::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"Column" => {
                    if table.first_column.is_none() {
                        table.first_column = attributes(e)?.remove("Name");
                    }
                }
                b"Row" => table.rows.push(attributes(e)?),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SepaError::Xml(format!(
                    "account service response at {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }
    Ok(table)
}

fn attributes(e: &BytesStart<'_>) -> Result<Row, SepaError> {
    let mut row = Row::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| SepaError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| SepaError::Xml(e.to_string()))?;
        row.insert(key, value.into_owned());
    }
    Ok(row)
}

/// Lenient boolean: `1`, `true`, `on` and `yes` in any case are true,
/// everything else is false.
pub(crate) fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}
