//! Batch file assembly.
//!
//! [`BatchFileAssembler`] walks every transaction group of a batch file,
//! delegates each group to [`TransactionGroupAssembler`] and joins the
//! results into either a pain.008 XML document or a BACS lodgement text.
//! Both paths refuse files whose groups declare different wire formats.

use std::collections::BTreeSet;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::config::SepaConfig;
use super::error::SepaError;
use super::lodgement::RecordFormatter;
use super::store::BatchStore;
use super::types::*;

/// Named template rendered around the XML body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    FileHeader,
    FileFooter,
}

/// Variables assigned to the header and footer templates.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub file: &'a BatchFile,
    /// Sum of all group totals.
    pub total: Decimal,
    /// Sum of all group transaction counts.
    pub transaction_count: usize,
    pub file_format: Option<FileFormat>,
}

/// Template collaborator producing the file header and footer.
pub trait TemplateRenderer {
    fn render(&self, template: Template, ctx: &TemplateContext<'_>) -> Result<String, SepaError>;
}

/// Produces the XML fragment of one transaction group.
pub trait GroupFragmentWriter {
    fn write_group(
        &self,
        group: &TransactionGroup,
        records: &[MandateRecord],
        totals: &GroupTotals,
    ) -> Result<String, SepaError>;
}

/// Output of one transaction group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutput {
    pub content: String,
    pub totals: GroupTotals,
}

/// Assembles the eligible records of one transaction group.
pub struct TransactionGroupAssembler<'a, S: ?Sized> {
    store: &'a S,
    formatter: RecordFormatter<'a>,
}

impl<'a, S: BatchStore + ?Sized> TransactionGroupAssembler<'a, S> {
    pub fn new(store: &'a S, config: &'a SepaConfig) -> Self {
        Self {
            store,
            formatter: RecordFormatter::new(config),
        }
    }

    /// Records of a group that may be collected, in store order.
    ///
    /// Cancelled contributions are skipped. A contribution that belongs to
    /// a recurring series resolves to the series mandate only, and is
    /// skipped when the series has none. Other contributions resolve to
    /// their own single-contribution mandate. Disabled mandates are skipped.
    pub fn eligible_records(&self, group_id: GroupId) -> Result<Vec<MandateRecord>, SepaError> {
        let mut records = Vec::new();
        for contribution in self.store.group_contributions(group_id)? {
            if contribution.status == ContributionStatus::Cancelled {
                continue;
            }
            let Some(mandate) = self.resolve_mandate(&contribution)? else {
                continue;
            };
            if !mandate.is_enabled {
                continue;
            }
            records.push(MandateRecord {
                contribution,
                mandate,
            });
        }
        Ok(records)
    }

    fn resolve_mandate(&self, contribution: &Contribution) -> Result<Option<Mandate>, SepaError> {
        let entity = match contribution.recurring_id {
            Some(recurring_id) => MandateEntity::Recurring(recurring_id),
            None => MandateEntity::Single(contribution.id),
        };
        self.store.mandate_for(entity)
    }

    /// XML fragment and counters for one group.
    pub fn assemble_xml(
        &self,
        group: &TransactionGroup,
        writer: &dyn GroupFragmentWriter,
    ) -> Result<GroupOutput, SepaError> {
        let records = self.eligible_records(group.id)?;
        let totals = group_totals(group, &records);
        let content = writer.write_group(group, &records, &totals)?;
        debug!(
            group = group.id,
            transactions = totals.transaction_count,
            total = %totals.total,
            "assembled XML group"
        );
        Ok(GroupOutput { content, totals })
    }

    /// Lodgement lines for one group, each terminated by `\n`.
    pub fn assemble_lodgement(&self, group: &TransactionGroup) -> Result<GroupOutput, SepaError> {
        let records = self.eligible_records(group.id)?;
        let totals = group_totals(group, &records);
        let mut content = String::new();
        for record in &records {
            if let Some(line) = self.formatter.format(Some(record), None).as_line() {
                content.push_str(line);
                content.push('\n');
            }
        }
        debug!(
            group = group.id,
            transactions = totals.transaction_count,
            "assembled lodgement group"
        );
        Ok(GroupOutput { content, totals })
    }
}

fn group_totals(group: &TransactionGroup, records: &[MandateRecord]) -> GroupTotals {
    GroupTotals {
        total: records.iter().map(MandateRecord::amount).sum(),
        transaction_count: records.len(),
        file_format: group.file_format,
    }
}

/// Top-level orchestrator producing one batch file.
///
/// Holds no state between calls. Concurrent calls for the same file id
/// must be serialized by the caller, since the lodgement path writes to
/// a fixed destination.
pub struct BatchFileAssembler<'a, S: ?Sized> {
    store: &'a S,
    config: &'a SepaConfig,
    groups: TransactionGroupAssembler<'a, S>,
}

impl<'a, S: BatchStore + ?Sized> BatchFileAssembler<'a, S> {
    pub fn new(store: &'a S, config: &'a SepaConfig) -> Self {
        Self {
            store,
            config,
            groups: TransactionGroupAssembler::new(store, config),
        }
    }

    /// Build the XML document of a batch file.
    ///
    /// The group fragments are concatenated in store order between the
    /// rendered header and footer.
    ///
    /// # Errors
    ///
    /// `SepaError::MixedFileFormat` if the groups declare more than one
    /// file format; no output is produced in that case.
    pub fn generate_xml(
        &self,
        file_id: FileId,
        fragments: &dyn GroupFragmentWriter,
        templates: &dyn TemplateRenderer,
    ) -> Result<AssembledFile, SepaError> {
        let file = self
            .store
            .batch_file(file_id)?
            .ok_or(SepaError::FileNotFound(file_id))?;
        let groups = self.store.transaction_groups(file_id)?;
        let file_format = single_format(file_id, &groups)?;

        let mut body = String::new();
        let mut total = Decimal::ZERO;
        let mut transaction_count = 0;
        for group in &groups {
            let out = self.groups.assemble_xml(group, fragments)?;
            body.push_str(&out.content);
            total += out.totals.total;
            transaction_count += out.totals.transaction_count;
        }

        let ctx = TemplateContext {
            file: &file,
            total,
            transaction_count,
            file_format,
        };
        let header = templates.render(Template::FileHeader, &ctx)?;
        let footer = templates.render(Template::FileFooter, &ctx)?;

        info!(
            file = file_id,
            groups = groups.len(),
            transactions = transaction_count,
            total = %total,
            "generated XML batch file"
        );
        Ok(AssembledFile {
            content: header + &body + &footer,
            total,
            transaction_count,
            file_format,
        })
    }

    /// Build the lodgement text of a batch file without writing it.
    ///
    /// Each group's lines are followed by one extra `\n`.
    pub fn lodgement_text(&self, file_id: FileId) -> Result<AssembledFile, SepaError> {
        let groups = self.store.transaction_groups(file_id)?;
        let file_format = single_format(file_id, &groups)?;

        let mut content = String::new();
        let mut total = Decimal::ZERO;
        let mut transaction_count = 0;
        for group in &groups {
            let out = self.groups.assemble_lodgement(group)?;
            content.push_str(&out.content);
            content.push('\n');
            total += out.totals.total;
            transaction_count += out.totals.transaction_count;
        }

        Ok(AssembledFile {
            content,
            total,
            transaction_count,
            file_format,
        })
    }

    /// Build the lodgement text and write it to `output_name` inside the
    /// configured output directory, replacing any existing file.
    ///
    /// # Errors
    ///
    /// `SepaError::InvalidOutputName` if `output_name` is not a plain file
    /// name, `SepaError::Io` if the write fails. Nothing is reported as
    /// success unless the file was written completely.
    pub fn generate_lodgement_file(
        &self,
        file_id: FileId,
        output_name: &str,
    ) -> Result<AssembledFile, SepaError> {
        check_output_name(output_name)?;
        let assembled = self.lodgement_text(file_id)?;

        let path = self.config.output_dir.join(output_name);
        write_checked(&path, &assembled.content)?;
        info!(
            file = file_id,
            path = %path.display(),
            bytes = assembled.content.len(),
            "wrote lodgement file"
        );
        Ok(assembled)
    }
}

/// The one file format shared by all groups.
fn single_format(
    file_id: FileId,
    groups: &[TransactionGroup],
) -> Result<Option<FileFormat>, SepaError> {
    let formats: BTreeSet<FileFormat> = groups.iter().map(|g| g.file_format).collect();
    if formats.len() > 1 {
        let formats: Vec<FileFormat> = formats.into_iter().collect();
        warn!(file = file_id, ?formats, "refusing to mix file formats");
        return Err(SepaError::MixedFileFormat { formats });
    }
    Ok(formats.into_iter().next())
}

fn check_output_name(name: &str) -> Result<(), SepaError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(SepaError::InvalidOutputName(name.into()));
    }
    Ok(())
}

fn write_checked(path: &Path, content: &str) -> Result<(), SepaError> {
    std::fs::write(path, content).map_err(|source| SepaError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: GroupId, format: FileFormat) -> TransactionGroup {
        TransactionGroup {
            id,
            file_id: 1,
            reference: format!("TXG-{id}"),
            file_format: format,
            sequence_type: SequenceType::Recurring,
            collection_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            creditor: Creditor {
                name: "Creditor".into(),
                identifier: "DE98ZZZ09999999999".into(),
                iban: "DE89370400440532013000".into(),
                bic: None,
            },
        }
    }

    #[test]
    fn single_format_of_empty_file_is_none() {
        assert_eq!(single_format(1, &[]).unwrap(), None);
    }

    #[test]
    fn single_format_detects_mix() {
        let groups = [
            group(1, FileFormat::Pain008German),
            group(2, FileFormat::Pain008Generic),
            group(3, FileFormat::Pain008German),
        ];
        match single_format(1, &groups) {
            Err(SepaError::MixedFileFormat { formats }) => {
                assert_eq!(
                    formats,
                    vec![FileFormat::Pain008Generic, FileFormat::Pain008German]
                );
            }
            other => panic!("expected MixedFileFormat, got {other:?}"),
        }
    }

    #[test]
    fn output_name_rules() {
        assert!(check_output_name("batch-2024-03.txt").is_ok());
        assert!(check_output_name("").is_err());
        assert!(check_output_name("..").is_err());
        assert!(check_output_name("../etc/passwd").is_err());
        assert!(check_output_name("sub\\file.txt").is_err());
    }
}
