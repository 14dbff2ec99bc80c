use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogType {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "employeeId": 1,
        "type": "IN",
        "time": "2026-01-01T09:00:00.000Z"
    })
)]
pub struct LogEntry {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1)]
    pub employee_id: u64,

    #[serde(rename = "type")]
    pub kind: LogType,

    #[serde(serialize_with = "serialize_iso_millis")]
    #[schema(example = "2026-01-01T09:00:00.000Z", value_type = String, format = DateTime)]
    pub time: DateTime<Utc>,
}

/// Millisecond precision with a `Z` suffix, e.g. `2026-01-01T09:00:00.000Z`.
fn serialize_iso_millis<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
}
