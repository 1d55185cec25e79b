//! Integration tests for structural validation (V001–V010).

#[allow(dead_code)]
mod helpers;

use std::collections::BTreeSet;

use helpers::*;
use proptest::prelude::*;
use serde_json::json;
use workflow_compiler::parse::{self, GraphSnapshot, WorkflowGraph};
use workflow_compiler::validate;

#[test]
fn pipeline_fixture_passes() {
    let json = include_str!("fixtures/nightly_orders.json");
    let snapshot = parse::parse(json).expect("Should parse");
    let report = validate::validate(&snapshot);
    assert!(report.is_valid, "Expected no validation errors, got: {:?}", report.errors);
}

#[test]
fn cycle_is_reported() {
    let json = include_str!("fixtures/cycle.json");
    let (snapshot, graph) = parse::parse_and_build(json).unwrap();
    let errors = validate::validate_graph(&snapshot, &graph);
    assert_eq!(codes(&errors), vec!["V008"]);
}

#[test]
fn broken_graph_reports_everything_in_order() {
    let json = include_str!("fixtures/broken_graph.json");
    let snapshot = parse::parse(json).unwrap();
    let report = validate::validate(&snapshot);
    assert!(!report.is_valid);
    assert_eq!(
        codes(&report.errors),
        vec!["V001", "V001", "V002", "V003", "V003", "V005", "V006", "V007", "V008", "V009"]
    );
}

#[test]
fn missing_terminals() {
    let snap = snapshot(vec![read_file("r", "/a.csv")], vec![]);
    let report = validate::validate(&snap);
    let v001: Vec<_> = report.errors.iter().filter(|e| e.code == "V001").collect();
    assert_eq!(v001.len(), 2);
    assert!(v001[0].message.contains("start"));
    assert!(v001[1].message.contains("end"));
}

#[test]
fn end_with_outgoing_edge() {
    let mut snap = read_write_snapshot();
    snap.nodes.push(filter("after", json!({})));
    snap.connections.push(conn("end", "after"));
    let report = validate::validate(&snap);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.code == "V002" && e.node_id.as_deref() == Some("end")),
        "{:?}",
        report.errors
    );
}

#[test]
fn island_fed_nodes_are_unreachable() {
    // island-a -> island-b -> end, with nothing feeding island-a from start
    let mut snap = read_write_snapshot();
    snap.nodes.push(filter("island-a", json!({})));
    snap.nodes.push(filter("island-b", json!({})));
    snap.connections.push(conn("island-a", "island-b"));
    snap.connections.push(conn("island-b", "end"));
    let report = validate::validate(&snap);

    let unreachable: BTreeSet<_> = report
        .errors
        .iter()
        .filter(|e| e.code == "V004")
        .filter_map(|e| e.node_id.as_deref())
        .collect();
    assert_eq!(unreachable, BTreeSet::from(["island-b"]));
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.code == "V003" && e.node_id.as_deref() == Some("island-a"))
    );
}

#[test]
fn required_fields_are_checked_per_kind() {
    let mut snap = read_write_snapshot();
    snap.nodes[1] = node("readA", "read-file", json!({ "path": "  " }));
    let report = validate::validate(&snap);
    assert_eq!(codes(&report.errors), vec!["V009"]);
    assert!(report.errors[0].message.contains("'path'"));
    assert_eq!(report.errors[0].node_id.as_deref(), Some("readA"));
}

#[test]
fn conditional_required_fields() {
    let errors = validate::validate_node(&node(
        "db",
        "database",
        json!({ "access": "write", "connection_url": "jdbc:postgresql://db/sales" }),
    ));
    assert_eq!(codes(&errors), vec!["V009"]);
    assert!(errors[0].message.contains("'table'"));

    let errors = validate::validate_node(&node(
        "sf",
        "write-salesforce",
        json!({ "object_name": "Account", "file_path": "a.csv", "operation": "UPSERT" }),
    ));
    assert!(errors[0].message.contains("external_id_field"));

    let errors = validate::validate_node(&node(
        "rm",
        "code",
        json!({ "operation": "delete", "source_path": "/tmp/x" }),
    ));
    assert!(errors.is_empty());
}

#[test]
fn duplicate_node_ids() {
    let mut snap = read_write_snapshot();
    snap.nodes.push(filter("readA", json!({})));
    let errors = validate::validate_graph(&snap, &WorkflowGraph::build(&snap));
    assert!(errors.iter().any(|e| e.code == "V010"), "{:?}", errors);
}

// =============================================================================
// Properties
// =============================================================================

/// start -> f0 -> ... -> f{n-1} -> end plus extra forward edges between
/// filters. Acyclic and fully connected by construction.
fn layered(n: usize, extra: &[(usize, usize)]) -> GraphSnapshot {
    let ids: Vec<String> = (0..n).map(|i| format!("f{}", i)).collect();
    let mut nodes = vec![start("start")];
    nodes.extend(ids.iter().map(|id| filter(id, json!({}))));
    nodes.push(end("end"));

    let mut order = vec!["start"];
    order.extend(ids.iter().map(String::as_str));
    order.push("end");
    let mut connections = chain(&order);

    let mut seen: BTreeSet<(usize, usize)> = (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect();
    for &(a, b) in extra {
        let (a, b) = (a % n, b % n);
        if a < b && seen.insert((a, b)) {
            connections.push(conn(&ids[a], &ids[b]));
        }
    }
    snapshot(nodes, connections)
}

proptest! {
    #[test]
    fn acyclic_connected_graphs_are_valid(
        n in 1usize..12,
        extra in prop::collection::vec((0usize..12, 0usize..12), 0..20),
    ) {
        let snap = layered(n, &extra);
        let report = validate::validate(&snap);
        prop_assert!(report.is_valid, "{:?}", report.errors);
    }

    #[test]
    fn any_back_edge_makes_the_graph_invalid(
        n in 2usize..12,
        from in 0usize..12,
        to in 0usize..12,
    ) {
        let (from, to) = (from % n, to % n);
        prop_assume!(to < from);
        let mut snap = layered(n, &[]);
        snap.connections.push(conn(&format!("f{}", from), &format!("f{}", to)));
        let report = validate::validate(&snap);
        prop_assert!(!report.is_valid);
        prop_assert!(report.errors.iter().any(|e| e.code == "V008"));
    }
}
