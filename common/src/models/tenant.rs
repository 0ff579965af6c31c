//! Tenant registration and login models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::AppResult;
use crate::utils::ensure_present;

/// Request body for registering a tenant.
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub identity_number: Option<String>,
    #[validate(length(max = 100))]
    pub emergency_contact: Option<String>,
    #[validate(length(max = 20))]
    pub emergency_phone: Option<String>,
}

/// A validated tenant ready to insert.
#[derive(Debug, Clone)]
pub struct NewTenant {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub identity_number: String,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
}

impl RegisterRequest {
    /// Checks required fields, then formats, and converts into a [`NewTenant`].
    pub fn into_new_tenant(self) -> AppResult<NewTenant> {
        ensure_present(&[
            ("email", self.email.is_some()),
            ("first_name", self.first_name.is_some()),
            ("last_name", self.last_name.is_some()),
            ("phone", self.phone.is_some()),
            ("identity_number", self.identity_number.is_some()),
        ])?;
        self.validate()?;

        Ok(NewTenant {
            email: self.email.unwrap_or_default().trim().to_lowercase(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            identity_number: self.identity_number.unwrap_or_default(),
            emergency_contact: self.emergency_contact,
            emergency_phone: self.emergency_phone,
        })
    }
}

/// Request body for logging in.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
}

impl LoginRequest {
    /// Returns the normalized email.
    pub fn into_email(self) -> AppResult<String> {
        ensure_present(&[("email", self.email.is_some())])?;
        Ok(self.email.unwrap_or_default().trim().to_lowercase())
    }
}

/// Public tenant identity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantSummary {
    pub tenant_id: i64,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub token: String,
    pub user_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: TenantSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn complete() -> RegisterRequest {
        RegisterRequest {
            email: Some("Jane@Example.com".into()),
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            phone: Some("0712345678".into()),
            identity_number: Some("ID-1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_email_is_reported_first() {
        let req = RegisterRequest {
            email: None,
            phone: None,
            ..complete()
        };
        let err = req.into_new_tenant().unwrap_err();
        assert!(matches!(err, AppError::MissingField("email")));
    }

    #[test]
    fn test_invalid_email_is_a_validation_error() {
        let req = RegisterRequest {
            email: Some("not-an-email".into()),
            ..complete()
        };
        let err = req.into_new_tenant().unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_email_is_normalized() {
        let tenant = complete().into_new_tenant().unwrap();
        assert_eq!(tenant.email, "jane@example.com");
        assert_eq!(tenant.emergency_contact, None);
    }

    #[test]
    fn test_login_requires_email() {
        assert!(LoginRequest::default().into_email().is_err());
    }
}
