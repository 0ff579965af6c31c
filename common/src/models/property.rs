//! Property listing models.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::errors::AppResult;
use crate::utils::ensure_present;

/// Status given to a property when the request does not set one.
pub const DEFAULT_PROPERTY_STATUS: &str = "Available";

/// Request body for creating a property.
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 100))]
    pub property_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub property_type: Option<String>,
    #[validate(range(min = 0.0))]
    pub monthly_rent: Option<f64>,
    #[validate(length(max = 10))]
    pub postal_code: Option<String>,
    #[validate(range(min = 0))]
    pub bedrooms: Option<i64>,
    #[validate(range(min = 0))]
    pub bathrooms: Option<i64>,
    #[validate(range(min = 0.0))]
    pub size_sqm: Option<f64>,
    pub is_furnished: Option<bool>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub status: Option<String>,
}

/// A validated property ready to insert.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub property_name: String,
    pub address: String,
    pub city: String,
    pub property_type: String,
    pub monthly_rent: f64,
    pub postal_code: Option<String>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub size_sqm: Option<f64>,
    pub is_furnished: bool,
    pub description: Option<String>,
    pub status: String,
}

impl CreatePropertyRequest {
    pub fn into_new_property(self) -> AppResult<NewProperty> {
        ensure_present(&[
            ("property_name", self.property_name.is_some()),
            ("address", self.address.is_some()),
            ("city", self.city.is_some()),
            ("property_type", self.property_type.is_some()),
            ("monthly_rent", self.monthly_rent.is_some()),
        ])?;
        self.validate()?;

        Ok(NewProperty {
            property_name: self.property_name.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            property_type: self.property_type.unwrap_or_default(),
            monthly_rent: self.monthly_rent.unwrap_or_default(),
            postal_code: self.postal_code,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            size_sqm: self.size_sqm,
            is_furnished: self.is_furnished.unwrap_or(false),
            description: self.description,
            status: self
                .status
                .unwrap_or_else(|| DEFAULT_PROPERTY_STATUS.to_string()),
        })
    }
}

/// Query parameters for listing properties.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PropertyFilter {
    /// Exact city match.
    pub city: Option<String>,
    /// Exact property type match.
    pub property_type: Option<String>,
}

/// Property as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PropertyItem {
    pub property_id: i64,
    pub property_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub property_type: String,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub size_sqm: Option<f64>,
    pub monthly_rent: f64,
    pub is_furnished: bool,
    pub description: Option<String>,
    pub status: String,
    /// Image URLs attached to the property.
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PropertyCreated {
    pub message: String,
    pub property_id: i64,
}
