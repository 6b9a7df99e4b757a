use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Employee, EmployeeId};

/// The most recent successful mutation, as stored in the `lastAction` slot.
///
/// Wire shape: `{"action": "CREATE" | "UPDATE", "data": {...}, "timestamp": ...}`
/// or `{"action": "DELETE", "employeeId": ..., "timestamp": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "UPPERCASE")]
pub enum LastAction {
    Create {
        data: Employee,
        timestamp: DateTime<Utc>,
    },
    Update {
        data: Employee,
        timestamp: DateTime<Utc>,
    },
    Delete {
        #[serde(rename = "employeeId")]
        employee_id: EmployeeId,
        timestamp: DateTime<Utc>,
    },
}

impl LastAction {
    pub fn created(data: Employee) -> Self {
        LastAction::Create { data, timestamp: Utc::now() }
    }

    pub fn updated(data: Employee) -> Self {
        LastAction::Update { data, timestamp: Utc::now() }
    }

    pub fn deleted(employee_id: EmployeeId) -> Self {
        LastAction::Delete { employee_id, timestamp: Utc::now() }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            LastAction::Create { timestamp, .. }
            | LastAction::Update { timestamp, .. }
            | LastAction::Delete { timestamp, .. } => *timestamp,
        }
    }

    pub fn action_name(&self) -> &'static str {
        match self {
            LastAction::Create { .. } => "CREATE",
            LastAction::Update { .. } => "UPDATE",
            LastAction::Delete { .. } => "DELETE",
        }
    }

    /// Short human description, e.g. "Updated Grace Hopper".
    pub fn describe(&self) -> String {
        match self {
            LastAction::Create { data, .. } => format!("Added {}", data.name),
            LastAction::Update { data, .. } => format!("Updated {}", data.name),
            LastAction::Delete { employee_id, .. } => format!("Deleted #{}", employee_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_wire_shape() {
        let emp = Employee {
            id: Some(EmployeeId::from("2")),
            name: "Grace Hopper".to_string(),
            active: false,
            ..Default::default()
        };
        let value = serde_json::to_value(LastAction::updated(emp)).expect("encode");
        assert_eq!(value["action"], "UPDATE");
        assert_eq!(value["data"]["id"], "2");
        assert_eq!(value["data"]["active"], false);
        assert!(value["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));
    }

    #[test]
    fn test_delete_wire_shape() {
        let value = serde_json::to_value(LastAction::deleted(EmployeeId::from("5"))).expect("encode");
        assert_eq!(value["action"], "DELETE");
        assert_eq!(value["employeeId"], "5");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_decode_from_browser_storage_format() {
        let action: LastAction = serde_json::from_value(json!({
            "action": "CREATE",
            "data": {"id": "9", "name": "Ada Lovelace", "performanceRating": 5},
            "timestamp": "2025-01-31T09:15:00.000Z"
        }))
        .expect("decode");
        assert_eq!(action.action_name(), "CREATE");
        assert_eq!(action.describe(), "Added Ada Lovelace");
        assert_eq!(action.timestamp().to_rfc3339(), "2025-01-31T09:15:00+00:00");
    }
}
