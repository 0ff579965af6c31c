//! Maintenance request models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::errors::AppResult;
use crate::utils::ensure_present;

/// Accepted priority values.
pub const PRIORITIES: [&str; 4] = ["Low", "Medium", "High", "Urgent"];
pub const DEFAULT_PRIORITY: &str = "Medium";
/// Status of every newly submitted request.
pub const INITIAL_STATUS: &str = "Pending";

/// Request body for submitting a maintenance request.
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenanceRequest {
    #[validate(range(min = 1))]
    pub property_id: Option<i64>,
    #[validate(length(min = 1, max = 50))]
    pub issue_type: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_priority"))]
    pub priority: Option<String>,
}

fn validate_priority(priority: &str) -> Result<(), ValidationError> {
    if PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(ValidationError::new("priority"))
    }
}

/// A validated maintenance request ready to insert.
#[derive(Debug, Clone)]
pub struct NewMaintenanceRequest {
    pub property_id: i64,
    pub tenant_id: i64,
    pub issue_type: String,
    pub description: String,
    pub priority: String,
}

impl CreateMaintenanceRequest {
    /// Validates the body and attributes it to `tenant_id`.
    pub fn into_new_request(self, tenant_id: i64) -> AppResult<NewMaintenanceRequest> {
        ensure_present(&[
            ("property_id", self.property_id.is_some()),
            ("issue_type", self.issue_type.is_some()),
            ("description", self.description.is_some()),
        ])?;
        self.validate()?;

        Ok(NewMaintenanceRequest {
            property_id: self.property_id.unwrap_or_default(),
            tenant_id,
            issue_type: self.issue_type.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            priority: self
                .priority
                .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceCreated {
    pub message: String,
    pub request_id: i64,
}
