//! Scheduler timer mapper.

use chrono::DateTime;

use super::MapResult;
use super::io::{optional, required};
use super::types::{SchedulerTimerConfig, TimerUnit};
use crate::error::MappingError;
use crate::parse::types::{NodeData, WorkflowNode};

/// `dag_id` is the DAG being compiled; used when the node names no target.
pub fn map_scheduler_config(node: &WorkflowNode, dag_id: &str) -> MapResult<SchedulerTimerConfig> {
    let NodeData::Scheduler(d) = &node.data else {
        return Ok(None);
    };
    let node_id = node.id();

    let start_time = required(node_id, "start_time", &d.start_time)?;
    if let Err(e) = DateTime::parse_from_rfc3339(&start_time) {
        return Err(MappingError::invalid(
            node_id,
            "start_time",
            start_time,
            &format!("expected an RFC 3339 timestamp ({})", e),
        ));
    }

    let interval = positive(node_id, "interval", d.interval.unwrap_or(1))?;
    let unit = match optional(&d.unit) {
        None => TimerUnit::Days,
        Some(u) => parse_unit(&u).ok_or_else(|| {
            MappingError::invalid(node_id, "unit", u, "expected minutes, hours, days, weeks or months")
        })?,
    };
    let occurrence_limit = d
        .occurrence_limit
        .map(|n| positive(node_id, "occurrence_limit", n))
        .transpose()?;

    Ok(Some(SchedulerTimerConfig {
        dag_id: optional(&d.target_dag_id).unwrap_or_else(|| dag_id.to_string()),
        start_time,
        interval,
        unit,
        occurrence_limit,
        active: d.active.unwrap_or(true),
    }))
}

fn parse_unit(unit: &str) -> Option<TimerUnit> {
    let unit = unit.to_ascii_lowercase();
    match unit.strip_suffix('s').unwrap_or(&unit) {
        "minute" => Some(TimerUnit::Minutes),
        "hour" => Some(TimerUnit::Hours),
        "day" => Some(TimerUnit::Days),
        "week" => Some(TimerUnit::Weeks),
        "month" => Some(TimerUnit::Months),
        _ => None,
    }
}

fn positive(node_id: &str, field: &str, value: i64) -> Result<u32, MappingError> {
    if value < 1 || value > i64::from(u32::MAX) {
        return Err(MappingError::OutOfBounds {
            node_id: node_id.to_string(),
            field: field.to_string(),
            min: 1,
            max: i64::from(u32::MAX),
            value,
        });
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::SchedulerData;

    fn scheduler(data: SchedulerData) -> WorkflowNode {
        WorkflowNode::new("timer", NodeData::Scheduler(data))
    }

    #[test]
    fn defaults_target_the_compiled_dag() {
        let node = scheduler(SchedulerData {
            start_time: Some("2026-01-01T06:00:00Z".into()),
            ..Default::default()
        });
        let config = map_scheduler_config(&node, "dag_sales").unwrap().unwrap();
        assert_eq!(config.dag_id, "dag_sales");
        assert_eq!(config.interval, 1);
        assert_eq!(config.unit, TimerUnit::Days);
        assert!(config.active);
        assert_eq!(config.occurrence_limit, None);
    }

    #[test]
    fn rejects_non_rfc3339_start() {
        let node = scheduler(SchedulerData {
            start_time: Some("tomorrow at six".into()),
            ..Default::default()
        });
        assert!(matches!(
            map_scheduler_config(&node, "d"),
            Err(MappingError::InvalidValue { .. })
        ));
    }

    #[test]
    fn zero_occurrences_is_out_of_bounds() {
        let node = scheduler(SchedulerData {
            start_time: Some("2026-01-01T06:00:00+02:00".into()),
            occurrence_limit: Some(0),
            ..Default::default()
        });
        assert!(matches!(
            map_scheduler_config(&node, "d"),
            Err(MappingError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn singular_units_are_accepted() {
        assert_eq!(parse_unit("Hour"), Some(TimerUnit::Hours));
        assert_eq!(parse_unit("weeks"), Some(TimerUnit::Weeks));
        assert_eq!(parse_unit("fortnight"), None);
    }

    #[test]
    fn only_one_plural_s_is_dropped() {
        assert_eq!(parse_unit("DAYS"), Some(TimerUnit::Days));
        assert_eq!(parse_unit("dayss"), None);
        assert_eq!(parse_unit("hourssss"), None);
    }
}
