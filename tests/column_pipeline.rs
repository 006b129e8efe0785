//! Column file -> batch pipeline -> result file, end to end.

use std::io::Write;

use pbtail::utils::threading::build_thread_pool;
use pbtail::{
    pruned_prob_dist, BatchPipeline, Column, ColumnReader, DistributionWriter, ExecPolicy,
    PbTailError,
};
use tempfile::NamedTempFile;

fn write_columns(lines: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".tsv")
        .tempfile()
        .expect("Create temp file");
    writeln!(file, "# K\terror probabilities").unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_file_round_trip_matches_entry_point() {
    let file = write_columns(&[
        "1\t0.2",
        "0\t0.01,0.02,0.03",
        "2\t0.001,0.002,0.05,0.01,0.0005",
        "",
        "4\t0.1,0.2,0.3,0.4",
    ]);

    let columns = ColumnReader::open(file.path()).unwrap().read_all().unwrap();
    assert_eq!(columns.len(), 4);

    let dists = BatchPipeline::default().run(&columns).unwrap();
    for (column, dist) in columns.iter().zip(&dists) {
        let mut with_slots = column.error_probs.clone();
        with_slots.extend_from_slice(&[0.0, 0.0]);
        let direct = pruned_prob_dist(&with_slots, column.n(), column.k).unwrap();
        assert_eq!(dist, &direct);
    }

    let out = NamedTempFile::new().unwrap();
    let mut writer = DistributionWriter::new(std::fs::File::create(out.path()).unwrap());
    for (i, (column, dist)) in columns.iter().zip(&dists).enumerate() {
        writer.write(i, column, dist).unwrap();
    }
    writer.finish().unwrap();

    let text = std::fs::read_to_string(out.path()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);

    // Printed values parse back to the exact same floats
    for (line, dist) in lines.iter().zip(&dists) {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 4);
        let values: Vec<f64> = fields[3].split(',').map(|v| v.parse().unwrap()).collect();
        assert_eq!(&values, dist);
    }
    assert!(lines[1].ends_with("\t3\t0\t0"));
}

#[test]
fn test_file_stream_in_chunks() {
    let lines: Vec<String> = (0..25)
        .map(|i| format!("{}\t{}", i % 4, vec!["0.01"; 3 + i % 5].join(",")))
        .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let file = write_columns(&refs);

    let pool = build_thread_pool(2).unwrap();
    let mut reader = ColumnReader::open(file.path()).unwrap();
    let mut writer = DistributionWriter::new(Vec::new());
    let n = BatchPipeline::default()
        .run_stream(&pool, &mut reader, &mut writer, 4)
        .unwrap();
    assert_eq!(n, 25);

    let text = String::from_utf8(writer.finish().unwrap()).unwrap();
    let indices: Vec<usize> = text
        .lines()
        .map(|l| l.split('\t').next().unwrap().parse().unwrap())
        .collect();
    assert_eq!(indices, (0..25).collect::<Vec<_>>());
}

#[test]
fn test_bad_line_reports_location() {
    let file = write_columns(&["1\t0.1,0.2", "1\t0.1,nope"]);
    let err = ColumnReader::open(file.path()).unwrap().read_all().unwrap_err();
    // Header comment is line 1
    assert!(matches!(err, PbTailError::Parse { line: 3, .. }), "{}", err);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ColumnReader::open(std::path::Path::new("/nonexistent/cols.tsv"))
        .err()
        .expect("open should fail");
    assert!(matches!(err, PbTailError::Io(_)));
}

#[test]
fn test_wide_column_parallel_policy() {
    let n = 3000;
    let probs: Vec<f64> = (0..n).map(|i| 0.01 + 0.0001 * (i % 50) as f64).collect();
    let columns = vec![Column::new(400, probs)];

    let sequential = BatchPipeline::new(ExecPolicy::sequential()).run(&columns).unwrap();
    let split = BatchPipeline::new(ExecPolicy {
        min_parallel_states: 64,
        chunk: 33,
    })
    .run(&columns)
    .unwrap();

    assert_eq!(sequential[0].len(), 401);
    assert!(sequential[0]
        .iter()
        .zip(&split[0])
        .all(|(a, b)| a.to_bits() == b.to_bits()));
}
