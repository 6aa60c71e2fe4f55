//! Vehicle domain model.
//!
//! A [`Vehicle`] is one catalog record as the plugin displays it. New records
//! start life as a [`NewVehicle`] built by the creation form and are only
//! assigned an id and timestamp by the catalog store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{DriveSphereError, Result};
use super::tag::TagVariant;

/// Longest description the creation form accepts, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 280;

/// Characters of description shown on a list card before truncation.
pub const CARD_SUMMARY_CHARS: usize = 85;

/// A vehicle record.
///
/// # Fields
///
/// - `id`: Catalog identifier, unique and assigned by the store
/// - `name`: Display name
/// - `description`: Free text, may be empty
/// - `image_url`: Optional link to a picture of the vehicle
/// - `car_type`: Transmission type, typically "Manual" or "Automatic"
/// - `specifications`: Specification strings matched by the filter dialog
/// - `created_at`: Unix timestamp of creation, `0` when unknown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub car_type: String,
    #[serde(default)]
    pub specifications: Vec<String>,
    #[serde(default)]
    pub created_at: i64,
}

impl Vehicle {
    /// Badge variant for the vehicle's transmission.
    #[must_use]
    pub fn car_tag(&self) -> TagVariant {
        TagVariant::for_car_type(&self.car_type)
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        if self.created_at <= 0 {
            return None;
        }
        DateTime::from_timestamp(self.created_at, 0)
    }

    /// Card caption such as `"Added: Mar 5, 2024"`.
    ///
    /// Returns `None` when the creation time is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use drivesphere::domain::Vehicle;
    ///
    /// let vehicle = Vehicle {
    ///     id: 1,
    ///     name: "Mustang".to_string(),
    ///     description: String::new(),
    ///     image_url: None,
    ///     car_type: "Manual".to_string(),
    ///     specifications: vec![],
    ///     created_at: 1_709_651_040,
    /// };
    /// assert_eq!(vehicle.added_label().as_deref(), Some("Added: Mar 5, 2024"));
    /// ```
    #[must_use]
    pub fn added_label(&self) -> Option<String> {
        self.created()
            .map(|created| format!("Added: {}", created.format("%b %-d, %Y")))
    }

    /// Details footer timestamp such as `"Mar 05, 2024 | 03:04 PM"`.
    #[must_use]
    pub fn updated_label(&self) -> String {
        self.created().map_or_else(
            || "Unknown".to_string(),
            |created| created.format("%b %d, %Y | %I:%M %p").to_string(),
        )
    }

    /// Description cut to `max` characters with a trailing ellipsis.
    #[must_use]
    pub fn summary(&self, max: usize) -> String {
        truncate_chars(&self.description, max)
    }
}

/// Cuts `text` to `max` characters and appends `...` when anything was cut.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Creation payload produced by the add-vehicle form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub car_type: String,
    #[serde(default)]
    pub specifications: Vec<String>,
}

/// Per-field messages produced by [`NewVehicle::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub name: Option<&'static str>,
    pub description: Option<&'static str>,
    pub car_type: Option<&'static str>,
}

impl ValidationErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.car_type.is_none()
    }

    /// Messages in form order.
    #[must_use]
    pub fn messages(&self) -> Vec<&'static str> {
        [self.name, self.description, self.car_type]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl NewVehicle {
    /// Checks the required fields and the description limit.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        ValidationErrors {
            name: self
                .name
                .trim()
                .is_empty()
                .then_some("Car name is required"),
            description: (self.description.chars().count() > MAX_DESCRIPTION_CHARS)
                .then_some("Description must be at most 280 characters"),
            car_type: self
                .car_type
                .trim()
                .is_empty()
                .then_some("Car type is required"),
        }
    }

    /// Validates and normalizes the payload for storage.
    ///
    /// Trims the name, drops a blank image URL and removes duplicate
    /// specifications while keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`DriveSphereError::Validation`] listing every failed field.
    pub fn into_validated(self) -> Result<Self> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(DriveSphereError::Validation(errors.messages().join(", ")));
        }

        let mut specifications: Vec<String> = Vec::with_capacity(self.specifications.len());
        for spec in self.specifications {
            if !specifications.contains(&spec) {
                specifications.push(spec);
            }
        }

        Ok(Self {
            name: self.name.trim().to_string(),
            description: self.description,
            image_url: self
                .image_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            car_type: self.car_type.trim().to_string(),
            specifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(created_at: i64, description: &str) -> Vehicle {
        Vehicle {
            id: 7,
            name: "Ford Mustang".to_string(),
            description: description.to_string(),
            image_url: None,
            car_type: "Automatic".to_string(),
            specifications: vec!["Fuel Type: Petrol".to_string()],
            created_at,
        }
    }

    #[test]
    fn added_label_uses_short_month() {
        // 2024-03-05T15:04:00Z
        let v = vehicle(1_709_651_040, "");
        assert_eq!(v.added_label().as_deref(), Some("Added: Mar 5, 2024"));
        assert_eq!(v.updated_label(), "Mar 05, 2024 | 03:04 PM");
    }

    #[test]
    fn unknown_creation_time_has_no_labels() {
        let v = vehicle(0, "");
        assert_eq!(v.added_label(), None);
        assert_eq!(v.updated_label(), "Unknown");
    }

    #[test]
    fn summary_truncates_on_char_boundary() {
        let v = vehicle(0, "Çàr with ümlauts everywhere");
        assert_eq!(v.summary(3), "Çàr...");
        assert_eq!(v.summary(100), "Çàr with ümlauts everywhere");
    }

    #[test]
    fn car_tag_follows_car_type() {
        let mut v = vehicle(0, "");
        assert_eq!(v.car_tag(), TagVariant::Automatic);
        v.car_type = "manual".to_string();
        assert_eq!(v.car_tag(), TagVariant::Manual);
    }

    #[test]
    fn validate_reports_required_fields() {
        let errors = NewVehicle::default().validate();
        assert_eq!(errors.name, Some("Car name is required"));
        assert_eq!(errors.car_type, Some("Car type is required"));
        assert_eq!(errors.description, None);
    }

    #[test]
    fn validate_limits_description() {
        let payload = NewVehicle {
            name: "Civic".to_string(),
            description: "x".repeat(MAX_DESCRIPTION_CHARS + 1),
            car_type: "Manual".to_string(),
            ..NewVehicle::default()
        };
        assert!(payload.validate().description.is_some());
    }

    #[test]
    fn into_validated_normalizes_fields() {
        let payload = NewVehicle {
            name: "  Civic ".to_string(),
            description: String::new(),
            image_url: Some("   ".to_string()),
            car_type: "Manual".to_string(),
            specifications: vec!["Seats".to_string(), "Seats".to_string()],
        };
        let validated = payload.into_validated().unwrap();
        assert_eq!(validated.name, "Civic");
        assert_eq!(validated.image_url, None);
        assert_eq!(validated.specifications, vec!["Seats".to_string()]);
    }

    #[test]
    fn into_validated_rejects_blank_name() {
        let payload = NewVehicle {
            car_type: "Manual".to_string(),
            ..NewVehicle::default()
        };
        let err = payload.into_validated().unwrap_err();
        assert!(matches!(err, DriveSphereError::Validation(ref msg) if msg == "Car name is required"));
    }
}
