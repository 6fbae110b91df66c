//! BACS lodgement file tests: record layout, file writing, format checks.
//!
//! Run with: `cargo test --test lodgement_tests`

#![cfg(feature = "core")]

use chrono::NaiveDate;
use lastschrift::core::*;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn group(id: GroupId, file_id: FileId, format: FileFormat) -> TransactionGroup {
    TransactionGroup {
        id,
        file_id,
        reference: format!("TXG-{id}"),
        file_format: format,
        sequence_type: SequenceType::Recurring,
        collection_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        creditor: Creditor {
            name: "Animal Rescue Trust".into(),
            identifier: "GB98ZZZSDDBARC0000007495895".into(),
            iban: "GB29NWBK60161331926819".into(),
            bic: None,
        },
    }
}

/// File 2 with two BACS groups holding three collectable records and one
/// cancelled contribution.
fn bacs_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store
        .add_group(group(20, 2, FileFormat::BacsLodgement))
        .add_group(group(21, 2, FileFormat::BacsLodgement));

    store
        .add_contribution(
            20,
            ContributionBuilder::new(1, "Ann Smith", dec!(25.00))
                .currency("GBP")
                .recurring(9)
                .build(),
        )
        .add_mandate(
            MandateBuilder::new(1, "REF-1", MandateEntity::Recurring(9))
                .status(MandateStatus::First)
                .uk_account("000099", "12345678")
                .build(),
        )
        .add_contribution(
            20,
            ContributionBuilder::new(2, "Bob Jones", dec!(10.5))
                .currency("GBP")
                .build(),
        )
        .add_mandate(
            MandateBuilder::new(2, "REF-2", MandateEntity::Single(2))
                .uk_account("401234", "87654321")
                .build(),
        )
        .add_contribution(
            20,
            ContributionBuilder::new(3, "Gone Away", dec!(5))
                .status(ContributionStatus::Cancelled)
                .build(),
        )
        .add_mandate(
            MandateBuilder::new(3, "REF-X", MandateEntity::Single(3))
                .uk_account("401234", "00000000")
                .build(),
        );

    store
        .add_contribution(21, ContributionBuilder::new(4, "Cat Brown", dec!(40)).build())
        .add_mandate(
            MandateBuilder::new(4, "REF-3", MandateEntity::Single(4))
                .status(MandateStatus::Complete)
                .uk_account("309634", "11223344")
                .build(),
        );
    store
}

// ---------------------------------------------------------------------------
// Text assembly
// ---------------------------------------------------------------------------

#[test]
fn lodgement_text_layout() {
    let store = bacs_store();
    let config = SepaConfig::default();
    let file = BatchFileAssembler::new(&store, &config)
        .lodgement_text(2)
        .unwrap();

    insta::assert_snapshot!(file.content.trim_end(), @r#"
    "000099","12345678","Ann Smith","25.00","REF-1","01"
    "401234","87654321","Bob Jones","10.5","REF-2","0N"

    "309634","11223344","Cat Brown","40","REF-3","0C"
    "#);
    assert!(file.content.ends_with("\"0C\"\n\n"));
    assert_eq!(file.total, dec!(75.50));
    assert_eq!(file.transaction_count, 3);
    assert_eq!(file.file_format, Some(FileFormat::BacsLodgement));
}

#[test]
fn empty_group_contributes_blank_line() {
    let mut store = bacs_store();
    store.add_group(group(22, 2, FileFormat::BacsLodgement));
    let config = SepaConfig::default();
    let file = BatchFileAssembler::new(&store, &config)
        .lodgement_text(2)
        .unwrap();
    assert!(file.content.ends_with("\"0C\"\n\n\n"));
    assert_eq!(file.transaction_count, 3);
}

#[test]
fn custom_status_table_is_used() {
    let store = bacs_store();
    let table = StatusCodeTable::default().set(MandateStatus::Init, BacsCode::RegularCollection);
    let config = SepaConfigBuilder::new(std::env::temp_dir())
        .status_codes(table)
        .build();
    let file = BatchFileAssembler::new(&store, &config)
        .lodgement_text(2)
        .unwrap();
    assert!(
        file.content
            .contains(r#""401234","87654321","Bob Jones","10.5","REF-2","17""#)
    );
}

#[test]
fn mixed_formats_rejected() {
    let mut store = bacs_store();
    store.add_group(group(23, 2, FileFormat::Pain008Generic));
    let config = SepaConfig::default();
    let err = BatchFileAssembler::new(&store, &config)
        .lodgement_text(2)
        .unwrap_err();
    assert!(matches!(err, SepaError::MixedFileFormat { .. }));
}

// ---------------------------------------------------------------------------
// File writing
// ---------------------------------------------------------------------------

#[test]
fn writes_file_into_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = bacs_store();
    let config = SepaConfigBuilder::new(dir.path()).build();

    let assembled = BatchFileAssembler::new(&store, &config)
        .generate_lodgement_file(2, "bacs-2024-03.txt")
        .unwrap();

    let written = std::fs::read_to_string(dir.path().join("bacs-2024-03.txt")).unwrap();
    assert_eq!(written, assembled.content);
    assert_eq!(assembled.transaction_count, 3);
}

#[test]
fn rerun_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let store = bacs_store();
    let config = SepaConfigBuilder::new(dir.path()).build();
    let assembler = BatchFileAssembler::new(&store, &config);
    let path = dir.path().join("bacs.txt");

    assembler.generate_lodgement_file(2, "bacs.txt").unwrap();
    let first = std::fs::read(&path).unwrap();
    assembler.generate_lodgement_file(2, "bacs.txt").unwrap();
    let second = std::fs::read(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn existing_file_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bacs.txt");
    std::fs::write(&path, "stale content that is longer than anything we write ".repeat(20))
        .unwrap();

    let store = bacs_store();
    let config = SepaConfigBuilder::new(dir.path()).build();
    let assembled = BatchFileAssembler::new(&store, &config)
        .generate_lodgement_file(2, "bacs.txt")
        .unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), assembled.content);
}

#[test]
fn path_like_output_names_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = bacs_store();
    let config = SepaConfigBuilder::new(dir.path()).build();
    let assembler = BatchFileAssembler::new(&store, &config);

    for name in ["", "..", "../escape.txt", "nested/bacs.txt"] {
        let err = assembler.generate_lodgement_file(2, name).unwrap_err();
        assert_eq!(err.code(), "INVALID_OUTPUT_NAME", "{name:?}");
    }
}

#[test]
fn unwritable_destination_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let store = bacs_store();
    let config = SepaConfigBuilder::new(&missing).build();

    let err = BatchFileAssembler::new(&store, &config)
        .generate_lodgement_file(2, "bacs.txt")
        .unwrap_err();
    match err {
        SepaError::Io { path, .. } => assert_eq!(path, missing.join("bacs.txt")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn mixed_formats_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = bacs_store();
    store.add_group(group(23, 2, FileFormat::Pain008German));
    let config = SepaConfigBuilder::new(dir.path()).build();

    let result = BatchFileAssembler::new(&store, &config).generate_lodgement_file(2, "bacs.txt");
    assert!(result.is_err());
    assert!(!dir.path().join("bacs.txt").exists());
}

// ---------------------------------------------------------------------------
// Record formatting
// ---------------------------------------------------------------------------

#[test]
fn quote_styles_differ_on_embedded_quotes() {
    let record = MandateRecord {
        contribution: ContributionBuilder::new(1, r#"Jo "JJ" Bloggs"#, dec!(3)).build(),
        mandate: MandateBuilder::new(1, "REF", MandateEntity::Single(1))
            .uk_account("000099", "12345678")
            .build(),
    };

    let legacy = SepaConfig::default();
    let line = RecordFormatter::new(&legacy).format(Some(&record), None);
    assert_eq!(
        line.as_line(),
        Some(r#""000099","12345678","Jo "JJ" Bloggs","3","REF","0N""#)
    );

    let escaped = SepaConfigBuilder::new(std::env::temp_dir())
        .quote_style(QuoteStyle::Escaped)
        .build();
    let line = RecordFormatter::new(&escaped).format(Some(&record), None);
    assert_eq!(
        line.as_line(),
        Some(r#""000099","12345678","Jo ""JJ"" Bloggs","3","REF","0N""#)
    );
}
