//! Integration tests for the per-kind config mappers.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use serde_json::json;
use workflow_compiler::config::CompileOptions;
use workflow_compiler::error::MappingError;
use workflow_compiler::mapper::{self, CliOperation, ConfigItem, ConfigKind, SalesforceOperation};

#[test]
fn csv_input_gets_reader_defaults() {
    let input = mapper::map_input_config(&read_file("r", "s3://raw/orders.csv"))
        .unwrap()
        .expect("read-file maps to an input");
    assert_eq!(input.provider, "s3");
    assert_eq!(input.format, "csv");
    assert_eq!(input.options["header"], json!(true));
    assert_eq!(input.options["inferSchema"], json!(false));
    assert!(input.schema.is_none());
}

#[test]
fn unsupported_kinds_map_to_none() {
    assert_eq!(mapper::map_input_config(&write_file("w", "/out.json")).unwrap(), None);
    assert_eq!(mapper::map_output_config(&read_file("r", "/in.csv")).unwrap(), None);
    assert_eq!(mapper::map_output_config(&start("s")).unwrap(), None);
    assert_eq!(mapper::map_salesforce_read_config(&start("s")).unwrap(), None);
    let options = CompileOptions::default();
    assert_eq!(mapper::map_node_config(&filter("f", json!({})), &options, "dag").unwrap(), None);
}

#[test]
fn missing_path_is_a_mapping_error() {
    let err = mapper::map_input_config(&node("r", "read-file", json!({}))).unwrap_err();
    assert_eq!(err, MappingError::missing("r", "path"));
    assert_eq!(err.code(), "M001");
}

#[test]
fn inline_output_defaults() {
    let output = mapper::map_output_config(&node("o", "inline-output", json!({})))
        .unwrap()
        .unwrap();
    assert_eq!(output.provider, "local");
    assert_eq!(output.mode, "overwrite");
    assert_eq!(output.format, "json");
    assert_eq!(output.path, "inline/o.json");
}

#[test]
fn inline_input_carries_its_rows() {
    let input = mapper::map_input_config(&node(
        "i",
        "inline-input",
        json!({ "rows": [{ "id": 1 }, { "id": 2 }] }),
    ))
    .unwrap()
    .unwrap();
    assert_eq!(input.provider, "inline");
    assert_eq!(input.inline_data.as_ref().map(Vec::len), Some(2));
}

#[test]
fn database_source_and_sink() {
    let source = node(
        "db-in",
        "database",
        json!({
            "connection_url": "jdbc:postgresql://db:5432/sales",
            "query": "SELECT * FROM orders WHERE amount > 10",
            "username": "etl",
            "secret_name": "sales-db-password"
        }),
    );
    let input = mapper::map_input_config(&source).unwrap().unwrap();
    assert_eq!(input.format, "jdbc");
    assert_eq!(input.path, "query");
    assert_eq!(input.options["driver"], json!("org.postgresql.Driver"));
    assert_eq!(input.options["password_secret"], json!("sales-db-password"));
    assert!(!input.options.contains_key("dbtable"));
    assert_eq!(mapper::map_output_config(&source).unwrap(), None);

    let sink = node(
        "db-out",
        "database",
        json!({ "access": "write", "connection_url": "jdbc:mysql://db/warehouse", "table": "big_orders" }),
    );
    let output = mapper::map_output_config(&sink).unwrap().unwrap();
    assert_eq!(output.mode, "append");
    assert_eq!(output.options["dbtable"], json!("big_orders"));
    assert_eq!(output.options["driver"], json!("com.mysql.cj.jdbc.Driver"));
}

#[test]
fn salesforce_write_batch_size_is_bounded() {
    let too_big = node(
        "sf",
        "write-salesforce",
        json!({ "object_name": "Account", "file_path": "a.csv", "use_bulk_api": true, "bulk_batch_size": 15000 }),
    );
    let err = mapper::map_salesforce_write_config(&too_big).unwrap_err();
    assert!(matches!(
        err,
        MappingError::OutOfBounds { min: 1, max: 10_000, value: 15_000, .. }
    ));
    assert_eq!(err.code(), "M002");

    let fine = node(
        "sf",
        "write-salesforce",
        json!({ "object_name": "Account", "file_path": "a.csv", "use_bulk_api": true, "bulk_batch_size": 5000 }),
    );
    let config = mapper::map_salesforce_write_config(&fine).unwrap().unwrap();
    assert_eq!(config.bulk_batch_size, 5000);
    assert_eq!(config.operation, SalesforceOperation::Insert);
}

#[test]
fn salesforce_write_defaults() {
    let config = mapper::map_salesforce_write_config(&node(
        "sf",
        "write-salesforce",
        json!({ "object_name": "Contact", "file_path": "contacts.csv" }),
    ))
    .unwrap()
    .unwrap();
    assert!(config.use_bulk_api);
    assert_eq!(config.bulk_batch_size, 2000);
}

#[test]
fn salesforce_read_needs_query_or_fields() {
    let err = mapper::map_salesforce_read_config(&node(
        "sf",
        "salesforce-cloud",
        json!({ "object_name": "Account" }),
    ))
    .unwrap_err();
    assert_eq!(err, MappingError::missing("sf", "soql_query"));

    let config = mapper::map_salesforce_read_config(&node(
        "sf",
        "salesforce-cloud",
        json!({ "object_name": "Account", "fields": ["Id", " ", "Name"] }),
    ))
    .unwrap()
    .unwrap();
    assert_eq!(config.fields, vec!["Id", "Name"]);
    assert_eq!(config.file_path, "salesforce/Account.csv");
    assert!(!config.use_bulk_api);
}

#[test]
fn cli_operators() {
    let options = CompileOptions {
        executed_by: "airflow".into(),
        ..Default::default()
    };
    let copy = node(
        "cp",
        "copy-file",
        json!({ "source_path": "/a.csv", "destination_path": "/b.csv" }),
    );
    let Some(ConfigItem::CliOperator(config)) = mapper::map_node_config(&copy, &options, "dag").unwrap() else {
        panic!("expected a cli operator config");
    };
    assert_eq!(config.operation, CliOperation::Copy);
    assert_eq!(config.executed_by, "airflow");

    let delete = node("rm", "delete-file", json!({ "source_path": "/a.csv" }));
    let config = mapper::map_cli_operator_config(&delete, "cli").unwrap().unwrap();
    assert_eq!(config.operation, CliOperation::Delete);
    assert_eq!(config.destination_path, None);

    let rename = node("mv", "rename-file", json!({ "source_path": "/a.csv" }));
    assert_eq!(
        mapper::map_cli_operator_config(&rename, "cli").unwrap_err(),
        MappingError::missing("mv", "destination_path")
    );

    let code = node(
        "code",
        "code",
        json!({ "operation": "Move", "source_path": "/a", "destination_path": "/b" }),
    );
    let config = mapper::map_cli_operator_config(&code, "cli").unwrap().unwrap();
    assert_eq!(config.operation, CliOperation::Move);
}

#[test]
fn scheduler_config_kind() {
    let timer = node(
        "t",
        "scheduler",
        json!({ "start_time": "2026-11-01T02:00:00Z", "interval": 6, "unit": "hours", "occurrence_limit": 10 }),
    );
    let item = mapper::map_node_config(&timer, &CompileOptions::default(), "dag_workflow")
        .unwrap()
        .unwrap();
    assert_eq!(item.kind(), ConfigKind::SchedulerTimer);
    assert_eq!(
        serde_json::to_value(&item).unwrap(),
        json!({
            "dag_id": "dag_workflow",
            "start_time": "2026-11-01T02:00:00Z",
            "interval": 6,
            "unit": "hours",
            "occurrence_limit": 10,
            "active": true
        })
    );
}

#[test]
fn output_mapping_is_idempotent() {
    let sink = node(
        "w",
        "write-file",
        json!({ "path": "gs://lake/orders.parquet", "mode": "Append" }),
    );
    let first = mapper::map_output_config(&sink).unwrap().unwrap();
    let again = node("w", "write-file", serde_json::to_value(&first).unwrap());
    let second = mapper::map_output_config(&again).unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first.provider, "gcs");
    assert_eq!(first.options["compression"], json!("snappy"));
}

#[test]
fn input_mapping_is_idempotent() {
    let source = node(
        "r",
        "read-file",
        json!({ "path": "/in/orders.csv", "options": { "delimiter": "|" } }),
    );
    let first = mapper::map_input_config(&source).unwrap().unwrap();
    let again = node("r", "read-file", serde_json::to_value(&first).unwrap());
    assert_eq!(mapper::map_input_config(&again).unwrap().unwrap(), first);
}

#[test]
fn inline_output_mapping_is_idempotent() {
    let sink = node("o", "inline-output", json!({ "mode": "Ignore" }));
    let first = mapper::map_output_config(&sink).unwrap().unwrap();
    let again = node("o", "inline-output", serde_json::to_value(&first).unwrap());
    assert_eq!(mapper::map_output_config(&again).unwrap().unwrap(), first);
}

#[test]
fn database_sink_mapping_is_idempotent() {
    let sink = node(
        "db-out",
        "database",
        json!({
            "access": "write",
            "connection_url": "jdbc:postgresql://db:5432/warehouse",
            "table": "analytics.orders",
            "username": "etl"
        }),
    );
    let first = mapper::map_output_config(&sink).unwrap().unwrap();

    // the mapped record holds the table as `path` and the url under `options`
    let mut data = serde_json::to_value(&first).unwrap();
    data["access"] = json!("write");
    let again = node("db-out", "database", data);
    let second = mapper::map_output_config(&again).unwrap().unwrap();
    assert_eq!(second, first);
    assert_eq!(second.path, "analytics.orders");
    assert_eq!(second.options["url"], json!("jdbc:postgresql://db:5432/warehouse"));
}

#[test]
fn config_key_addresses_the_backend_record() {
    let copy = node(
        "cp",
        "copy-file",
        json!({ "source_path": "/a.csv", "destination_path": "/b.csv" }),
    );
    let item = mapper::map_node_config(&copy, &CompileOptions::default(), "dag")
        .unwrap()
        .unwrap();
    let config = mapper::NodeConfig::new("cp", Some("cfg-1".into()), item);
    let key = config.key("acme");
    assert_eq!(key.client_id, "acme");
    assert_eq!(key.config_kind, ConfigKind::CliOperator);
    assert_eq!(key.config_kind.as_str(), "cli_operator");
    assert_eq!(key.config_id.as_deref(), Some("cfg-1"));
}
