//! Integration tests for source -> (filter?) -> sink recognition.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use serde_json::json;
use workflow_compiler::lower::{self, Sequence};
use workflow_compiler::parse;

#[test]
fn read_filter_write_is_one_sequence() {
    let snap = filtered_snapshot(json!({}));
    let sequences = lower::find_file_conversion_sequences(&snap);
    assert_eq!(
        sequences,
        vec![Sequence {
            read_node: "readA".into(),
            write_node: "writeB".into(),
            filter_node: Some("filterF".into()),
        }]
    );
}

#[test]
fn direct_read_write() {
    let sequences = lower::find_file_conversion_sequences(&read_write_snapshot());
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].filter_node, None);
}

#[test]
fn branching_source_is_not_reported() {
    let snap = snapshot(
        vec![
            start("start"),
            read_file("read", "/in.csv"),
            write_file("write1", "/out1.json"),
            write_file("write2", "/out2.json"),
            end("end"),
        ],
        vec![
            conn("start", "read"),
            conn("read", "write1"),
            conn("read", "write2"),
            conn("write1", "end"),
            conn("write2", "end"),
        ],
    );
    assert!(lower::find_file_conversion_sequences(&snap).is_empty());
}

#[test]
fn two_filter_hops_are_not_reported() {
    let snap = snapshot(
        vec![
            read_file("read", "/in.csv"),
            filter("f1", json!({})),
            filter("f2", json!({})),
            write_file("write", "/out.json"),
        ],
        chain(&["read", "f1", "f2", "write"]),
    );
    assert!(lower::find_file_conversion_sequences(&snap).is_empty());
}

#[test]
fn branching_filter_is_not_reported() {
    let snap = snapshot(
        vec![
            read_file("read", "/in.csv"),
            filter("f", json!({})),
            write_file("w1", "/a.json"),
            write_file("w2", "/b.json"),
        ],
        vec![conn("read", "f"), conn("f", "w1"), conn("f", "w2")],
    );
    assert!(lower::find_file_conversion_sequences(&snap).is_empty());
}

#[test]
fn database_and_inline_nodes_take_part() {
    let snap = snapshot(
        vec![
            node("db", "database", json!({ "connection_url": "jdbc:postgresql://db/x", "table": "t" })),
            node("out", "inline-output", json!({})),
            node("in", "inline-input", json!({ "rows": [] })),
            node("sink", "database", json!({ "access": "write", "table": "t2" })),
        ],
        vec![conn("db", "out"), conn("in", "sink")],
    );
    let sequences = lower::find_file_conversion_sequences(&snap);
    let pairs: Vec<_> = sequences
        .iter()
        .map(|s| (s.read_node.as_str(), s.write_node.as_str()))
        .collect();
    assert_eq!(pairs, vec![("db", "out"), ("in", "sink")]);
}

#[test]
fn dangling_successor_is_ignored() {
    let snap = snapshot(vec![read_file("read", "/in.csv")], vec![conn("read", "ghost")]);
    assert!(lower::find_file_conversion_sequences(&snap).is_empty());
}

#[test]
fn fixture_sequence_serializes_camel_case() {
    let snap = parse::parse(include_str!("fixtures/nightly_orders.json")).unwrap();
    let sequences = lower::find_file_conversion_sequences(&snap);
    assert_eq!(
        serde_json::to_value(&sequences).unwrap(),
        json!([{ "readNode": "read-orders", "writeNode": "write-lake", "filterNode": "big-orders" }])
    );
}
