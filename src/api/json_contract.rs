use serde::{Deserialize, Serialize};

use crate::error::{TickError, TickResult};

use super::DatetimeAxisConfig;

pub const AXIS_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatetimeAxisConfigJsonContractV1 {
    pub schema_version: u32,
    pub axis: DatetimeAxisConfig,
}

impl DatetimeAxisConfig {
    pub fn to_json_pretty(&self) -> TickResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TickError::InvalidConfiguration(format!("failed to serialize axis config json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> TickResult<String> {
        let payload = DatetimeAxisConfigJsonContractV1 {
            schema_version: AXIS_CONFIG_JSON_SCHEMA_V1,
            axis: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TickError::InvalidConfiguration(format!(
                "failed to serialize axis config contract v1: {e}"
            ))
        })
    }

    /// Accepts either a bare config or a versioned v1 envelope.
    pub fn from_json_compat_str(input: &str) -> TickResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            TickError::InvalidConfiguration(format!("failed to parse axis config json: {e}"))
        })?;
        if value.get("schema_version").is_none() {
            return serde_json::from_value(value).map_err(|e| {
                TickError::InvalidConfiguration(format!("invalid axis config: {e}"))
            });
        }

        let payload: DatetimeAxisConfigJsonContractV1 =
            serde_json::from_value(value).map_err(|e| {
                TickError::InvalidConfiguration(format!(
                    "failed to parse axis config json payload: {e}"
                ))
            })?;
        if payload.schema_version != AXIS_CONFIG_JSON_SCHEMA_V1 {
            return Err(TickError::InvalidConfiguration(format!(
                "unsupported axis config schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.axis)
    }
}
