//! Integration tests for DAG sequencing.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use serde_json::json;
use workflow_compiler::config::CompileOptions;
use workflow_compiler::lower::{self, convert_workflow_to_dag};
use workflow_compiler::parse::{self, NodeKind};

fn options() -> CompileOptions {
    CompileOptions {
        name: "Nightly Orders".into(),
        schedule: Some("0 2 * * *".into()),
        ..Default::default()
    }
}

#[test]
fn read_write_dag() {
    let dag = convert_workflow_to_dag(&read_write_snapshot(), &options());
    insta::assert_snapshot!(serde_json::to_string_pretty(&dag).unwrap(), @r#"
{
  "dag_id": "dag_nightly_orders",
  "name": "Nightly Orders",
  "schedule": "0 2 * * *",
  "active": true,
  "dag_sequence": [
    {
      "id": "start",
      "type": "start",
      "config_id": null,
      "next": [
        "readA"
      ]
    },
    {
      "id": "readA",
      "type": "read-file",
      "config_id": null,
      "next": [
        "writeB"
      ]
    },
    {
      "id": "writeB",
      "type": "write-file",
      "config_id": null,
      "next": [
        "end"
      ]
    },
    {
      "id": "end",
      "type": "end",
      "config_id": null,
      "next": []
    }
  ]
}
"#);
}

#[test]
fn sequencing_is_deterministic() {
    let snap = parse::parse(include_str!("fixtures/nightly_orders.json")).unwrap();
    let first = convert_workflow_to_dag(&snap, &options());
    let second = convert_workflow_to_dag(&snap, &options());
    assert_eq!(first, second);
}

#[test]
fn entries_follow_node_order_not_topology() {
    let mut snap = read_write_snapshot();
    snap.nodes.reverse();
    let dag = convert_workflow_to_dag(&snap, &CompileOptions::default());
    let ids: Vec<_> = dag.dag_sequence.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["end", "writeB", "readA", "start"]);
    assert_eq!(dag.entry("readA").unwrap().next, vec!["writeB"]);
}

#[test]
fn fan_out_keeps_connection_order_and_drops_repeats() {
    let snap = snapshot(
        vec![
            start("start"),
            filter("a", json!({})),
            filter("b", json!({})),
            end("end"),
        ],
        vec![
            conn("start", "b"),
            conn("start", "a"),
            conn("start", "b"),
            conn("start", "ghost"),
            conn("a", "end"),
            conn("b", "end"),
        ],
    );
    let dag = convert_workflow_to_dag(&snap, &CompileOptions::default());
    assert_eq!(dag.entry("start").unwrap().next, vec!["b", "a"]);
    assert_eq!(dag.entry("end").unwrap().node_type, NodeKind::End);
    assert!(dag.entry("ghost").is_none());
}

#[test]
fn config_ids_come_from_the_nodes() {
    let snap = parse::parse(include_str!("fixtures/nightly_orders.json")).unwrap();
    let dag = convert_workflow_to_dag(&snap, &CompileOptions::default());
    assert_eq!(dag.entry("archive").unwrap().config_id.as_deref(), Some("cfg-archive"));
    assert_eq!(dag.entry("big-orders").unwrap().config_id, None);
    assert_eq!(dag.dag_id, "dag_workflow");
    assert!(dag.schedule.is_none());
}

#[test]
fn next_pointers_always_name_emitted_entries() {
    let snap = parse::parse(include_str!("fixtures/nightly_orders.json")).unwrap();
    let dag = lower::compile(&snap, &options()).unwrap().dag;
    for entry in &dag.dag_sequence {
        for next in &entry.next {
            assert!(dag.entry(next).is_some(), "{} -> {}", entry.id, next);
        }
    }
}
