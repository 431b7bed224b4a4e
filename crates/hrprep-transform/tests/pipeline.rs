//! End-to-end tests for typing and filtering the reference layout.

use std::io::Write;

use hrprep_ingest::load_table;
use hrprep_model::{
    Column, ColumnData, ColumnKind, ProcessingOptions, REFERENCE_SCHEMA, Table, f16,
    reference_classification,
};
use hrprep_transform::{
    RowFilter, TransformError, apply_classification, reference_filter, run_pipeline, write_csv,
};
use tempfile::NamedTempFile;

type Row = [Option<&'static str>; 14];

fn row(id: &'static str, experience: &'static str, company_size: &'static str) -> Row {
    [
        Some(id),
        Some("city_103"),
        Some("0.92"),
        Some("Male"),
        Some("Has relevant experience"),
        Some("no_enrollment"),
        Some("Graduate"),
        Some("STEM"),
        Some(experience),
        Some(company_size),
        Some("Pvt Ltd"),
        Some("1"),
        Some("36"),
        Some("1.0"),
    ]
}

fn raw_table(rows: &[Row]) -> Table {
    let columns = REFERENCE_SCHEMA
        .iter()
        .enumerate()
        .map(|(idx, name)| Column::text(*name, rows.iter().map(|row| row[idx])))
        .collect();
    Table::new(columns).unwrap()
}

fn run(rows: &[Row]) -> hrprep_transform::PipelineOutput {
    run_pipeline(
        raw_table(rows),
        &reference_classification().unwrap(),
        &reference_filter(),
        &ProcessingOptions::default(),
    )
    .expect("pipeline")
}

#[test]
fn filter_scenarios() {
    let output = run(&[
        row("1", "9", "10000+"),
        row("2", ">20", "1000-4999"),
        row("3", "10", "500-999"),
        row("4", "10", "1000-4999"),
        row("5", "15", "5000-9999"),
    ]);

    assert_eq!(output.report.rows_in, 5);
    assert_eq!(output.report.rows_typed, 5);
    assert_eq!(output.filtered.row_index(), [1, 3, 4]);
    assert_eq!(output.filtered, output.typed.take(&[1, 3, 4]));
    let ids = &output.filtered.column("student_id").unwrap().data;
    assert_eq!(ids, &ColumnData::Int32(vec![Some(2), Some(4), Some(5)]));
}

#[test]
fn missing_and_unknown_labels_never_pass() {
    let mut blank = row("1", "15", "1000-4999");
    blank[8] = None;
    let output = run(&[blank, row("2", "eleven", "10000+"), row("3", "11", "huge")]);

    assert_eq!(output.filtered.height(), 0);
    assert_eq!(output.report.unranked_total(), 2);
    let experience = output
        .report
        .columns
        .iter()
        .find(|column| column.name == "experience")
        .unwrap();
    assert_eq!(experience.nulls, 1);
    assert_eq!(experience.unranked, 1);
}

#[test]
fn typed_table_has_target_kinds() {
    let output = run(&[row("8949", ">20", "10000+")]);
    let kind = |name: &str| output.typed.column(name).unwrap().kind();

    assert_eq!(kind("student_id"), ColumnKind::Int32);
    assert_eq!(kind("training_hours"), ColumnKind::Int32);
    assert_eq!(kind("city_development_index"), ColumnKind::Float16);
    assert_eq!(kind("relevant_experience"), ColumnKind::Boolean);
    assert_eq!(kind("job_change"), ColumnKind::Boolean);
    assert_eq!(kind("experience"), ColumnKind::Ordinal);
    assert_eq!(kind("company_size"), ColumnKind::Ordinal);
    assert_eq!(kind("last_new_job"), ColumnKind::Ordinal);
    assert_eq!(kind("city"), ColumnKind::Nominal);
    assert_eq!(kind("gender"), ColumnKind::Nominal);

    let index = &output.typed.column("city_development_index").unwrap().data;
    let ColumnData::Float16(values) = index else {
        panic!("expected float16 column");
    };
    let value = values[0].unwrap();
    assert_eq!(value, f16::from_f64(0.92));
    assert!((value.to_f64() - 0.92).abs() < f64::from(f16::EPSILON.to_f32()));

    let job_change = &output.typed.column("job_change").unwrap().data;
    assert_eq!(job_change, &ColumnData::Boolean(vec![Some(true)]));
}

#[test]
fn classification_is_idempotent() {
    let raw = raw_table(&[row("1", "10", "1000-4999"), row("2", "<1", "<10")]);
    let classification = reference_classification().unwrap();
    let options = ProcessingOptions::default();

    let once = apply_classification(&raw, &classification, &options).unwrap();
    let twice = apply_classification(&once, &classification, &options).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn filtering_twice_changes_nothing() {
    let output = run(&[row("1", "12", "10000+"), row("2", "3", "10000+")]);
    let again = reference_filter().apply(&output.filtered).unwrap();
    assert_eq!(again, output.filtered);
}

#[test]
fn unmapped_job_change_fails_the_run() {
    let mut bad = row("1", "10", "1000-4999");
    bad[13] = Some("2.0");
    let result = run_pipeline(
        raw_table(&[row("0", "10", "1000-4999"), bad]),
        &reference_classification().unwrap(),
        &reference_filter(),
        &ProcessingOptions::default(),
    );

    let err = result.unwrap_err();
    assert!(matches!(err, TransformError::UnmappedBooleanValue { .. }));
    insta::assert_snapshot!(err.to_string(), @"unmapped boolean value '2.0' in column 'job_change' (row 1)");
}

#[test]
fn strict_policy_rejects_unknown_experience() {
    let result = run_pipeline(
        raw_table(&[row("1", "eleven", "10000+")]),
        &reference_classification().unwrap(),
        &RowFilter::new(),
        &ProcessingOptions::strict(),
    );
    assert!(matches!(
        result,
        Err(TransformError::UnknownOrdinalLabel { row: 0, .. })
    ));
}

#[test]
fn empty_table_passes_through() {
    let output = run(&[]);
    assert_eq!(output.typed.height(), 0);
    assert_eq!(output.filtered.height(), 0);
    assert_eq!(output.typed.width(), 14);
    assert_eq!(output.report.retention(), 0.0);
}

fn write_sample(input: &mut NamedTempFile) {
    writeln!(input, "{}", REFERENCE_SCHEMA.join(",")).unwrap();
    writeln!(
        input,
        "8949,city_103,0.92,Male,Has relevant experience,no_enrollment,Graduate,STEM,>20,,,1,36,1.0"
    )
    .unwrap();
    writeln!(
        input,
        "29725,city_40,0.776,Male,No relevant experience,no_enrollment,Graduate,STEM,15,1000-4999,Pvt Ltd,>4,47,0.0"
    )
    .unwrap();
    writeln!(
        input,
        "11561,city_21,0.624,,No relevant experience,Full time course,Graduate,STEM,5,10000+,,never,83,0.0"
    )
    .unwrap();
    writeln!(
        input,
        "402,city_16,0.91,Male,Has relevant experience,no_enrollment,Masters,STEM,>20,5000-9999,Funded Startup,2,12,1.0"
    )
    .unwrap();
    input.flush().unwrap();
}

fn load_and_run(path: &std::path::Path) -> hrprep_transform::PipelineOutput {
    let raw = load_table(path, &REFERENCE_SCHEMA).unwrap();
    run_pipeline(
        raw,
        &reference_classification().unwrap(),
        &reference_filter(),
        &ProcessingOptions::default(),
    )
    .unwrap()
}

#[test]
fn loads_types_filters_and_writes() {
    let mut input = NamedTempFile::new().unwrap();
    write_sample(&mut input);
    let output = load_and_run(input.path());
    assert_eq!(output.filtered.row_index(), [1, 3]);

    let out = NamedTempFile::new().unwrap();
    let classification = reference_classification().unwrap();
    write_csv(&output.filtered, &classification, out.path(), true).unwrap();
    let written = std::fs::read_to_string(out.path()).unwrap();
    let mut lines = written.lines();
    let header = lines.next().unwrap();
    assert_eq!(header, format!("row_index,{}", REFERENCE_SCHEMA.join(",")));
    let record = lines.next().unwrap();
    assert!(record.starts_with("1,29725,city_40,"));
    assert!(record.contains(",Male,No relevant experience,no_enrollment,"));
    assert!(record.ends_with(",15,1000-4999,Pvt Ltd,>4,47,0.0"));
    let record = lines.next().unwrap();
    assert!(record.starts_with("3,402,city_16,"));
    assert!(record.contains(",Has relevant experience,"));
    assert!(record.ends_with(",>20,5000-9999,Funded Startup,2,12,1.0"));
    assert!(lines.next().is_none());
}

#[test]
fn written_output_loads_and_types_again() {
    let mut input = NamedTempFile::new().unwrap();
    write_sample(&mut input);
    let first = load_and_run(input.path());

    let out = NamedTempFile::new().unwrap();
    let classification = reference_classification().unwrap();
    write_csv(&first.filtered, &classification, out.path(), false).unwrap();
    let second = load_and_run(out.path());

    assert_eq!(second.report.rows_in, first.filtered.height());
    assert_eq!(second.filtered.height(), first.filtered.height());
    for (before, after) in first.filtered.columns().iter().zip(second.filtered.columns()) {
        assert_eq!(before.name, after.name);
        assert_eq!(before.kind(), after.kind());
        for row in 0..first.filtered.height() {
            assert_eq!(
                before.data.display(row),
                after.data.display(row),
                "column {} row {row}",
                before.name
            );
        }
    }
}

#[test]
fn report_serializes_for_json_output() {
    let output = run(&[row("1", "12", "10000+"), row("2", "3", "10000+")]);
    let value = serde_json::to_value(&output.report).unwrap();

    assert_eq!(value["rows_in"], 2);
    assert_eq!(value["rows_out"], 1);
    assert_eq!(value["category_policy"], "permissive");
    let thresholds = value["thresholds"].as_array().unwrap();
    assert_eq!(thresholds.len(), 2);
    assert_eq!(thresholds[0]["column"], "experience");
    assert_eq!(thresholds[0]["min_label"], "10");
    assert_eq!(thresholds[1]["min_label"], "1000-4999");
    assert_eq!(value["columns"].as_array().unwrap().len(), 14);
}
