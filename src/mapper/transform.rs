//! Transformation mapper: filter / order_by / aggregation clauses taken from
//! an optional `filter` node sitting between a source and a sink.

use super::types::{AggregationSpec, FilterClause, TransformationClauses};
use crate::error::MappingError;
use crate::parse::types::{
    AggregationClause, AggregationData, FilterCondition, FilterData, NodeData, OrderByClause,
    WorkflowNode,
};

const BINARY_OPERATORS: [&str; 16] = [
    "=", "==", "!=", "<>", ">", ">=", "<", "<=", "eq", "ne", "gt", "gte", "lt", "lte", "like",
    "contains",
];
const SET_OPERATORS: [&str; 4] = ["in", "not_in", "starts_with", "ends_with"];
const UNARY_OPERATORS: [&str; 2] = ["is_null", "is_not_null"];
const AGGREGATE_FUNCTIONS: [&str; 7] = ["count", "count_distinct", "sum", "avg", "min", "max", "first"];

/// Extract the clauses of `node`. `None`, or a node that is not a filter,
/// yields no clauses.
pub fn map_transformations(node: Option<&WorkflowNode>) -> Result<TransformationClauses, MappingError> {
    let Some(node) = node else {
        return Ok(TransformationClauses::default());
    };
    let NodeData::Filter(d) = &node.data else {
        return Ok(TransformationClauses::default());
    };

    Ok(TransformationClauses {
        filter: filter_clause(node.id(), d)?,
        order_by: order_by_clause(&d.order_by),
        aggregation: d
            .aggregation
            .as_ref()
            .map(|a| aggregation_clause(node.id(), a))
            .transpose()?
            .flatten(),
    })
}

fn filter_clause(node_id: &str, d: &FilterData) -> Result<Option<FilterClause>, MappingError> {
    let mut conditions = Vec::with_capacity(d.conditions.len());
    for c in &d.conditions {
        if let Some(condition) = condition(node_id, c)? {
            conditions.push(condition);
        }
    }
    if conditions.is_empty() {
        return Ok(None);
    }
    Ok(Some(FilterClause {
        operator: d.operator.unwrap_or_default(),
        conditions,
    }))
}

/// A condition with a blank field is an unfinished editor row and is dropped.
fn condition(node_id: &str, c: &FilterCondition) -> Result<Option<FilterCondition>, MappingError> {
    let field = c.field.trim();
    if field.is_empty() {
        return Ok(None);
    }
    let operator = c.operator.trim().to_ascii_lowercase();
    if operator.is_empty() {
        return Err(MappingError::missing(node_id, "conditions.operator"));
    }

    let value = if UNARY_OPERATORS.contains(&operator.as_str()) {
        None
    } else if BINARY_OPERATORS.contains(&operator.as_str()) || SET_OPERATORS.contains(&operator.as_str()) {
        match &c.value {
            None | Some(serde_json::Value::Null) => {
                return Err(MappingError::missing(node_id, "conditions.value"));
            }
            Some(v) => Some(v.clone()),
        }
    } else {
        return Err(MappingError::invalid(
            node_id,
            "conditions.operator",
            c.operator.as_str(),
            "unknown comparison operator",
        ));
    };

    Ok(Some(FilterCondition {
        field: field.to_string(),
        operator,
        value,
    }))
}

fn order_by_clause(order_by: &[OrderByClause]) -> Option<Vec<OrderByClause>> {
    let clauses: Vec<OrderByClause> = order_by
        .iter()
        .filter(|o| !o.field.trim().is_empty())
        .map(|o| OrderByClause {
            field: o.field.trim().to_string(),
            direction: o.direction,
        })
        .collect();
    if clauses.is_empty() { None } else { Some(clauses) }
}

fn aggregation_clause(
    node_id: &str,
    a: &AggregationData,
) -> Result<Option<AggregationSpec>, MappingError> {
    let mut aggregations = Vec::with_capacity(a.aggregations.len());
    for agg in &a.aggregations {
        let field = agg.field.trim();
        if field.is_empty() {
            continue;
        }
        let function = agg.function.trim().to_ascii_lowercase();
        if !AGGREGATE_FUNCTIONS.contains(&function.as_str()) {
            return Err(MappingError::invalid(
                node_id,
                "aggregation.function",
                agg.function.as_str(),
                "unknown aggregate function",
            ));
        }
        aggregations.push(AggregationClause {
            field: field.to_string(),
            function,
        });
    }
    if aggregations.is_empty() {
        return Ok(None);
    }

    Ok(Some(AggregationSpec {
        group_by: a
            .group_by
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect(),
        aggregations,
    }))
}
