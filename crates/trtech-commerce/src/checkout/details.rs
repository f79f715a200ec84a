//! Delivery details collected during checkout.

use crate::customer::CustomerProfile;
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// A field of the delivery form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryField {
    Name,
    Email,
    Phone,
    Street,
    City,
    PostalCode,
    Province,
    Notes,
}

impl DeliveryField {
    pub const ALL: [DeliveryField; 8] = [
        DeliveryField::Name,
        DeliveryField::Email,
        DeliveryField::Phone,
        DeliveryField::Street,
        DeliveryField::City,
        DeliveryField::PostalCode,
        DeliveryField::Province,
        DeliveryField::Notes,
    ];

    /// Fields that must be non-empty before the order can be confirmed.
    pub const REQUIRED: [DeliveryField; 5] = [
        DeliveryField::Name,
        DeliveryField::Email,
        DeliveryField::Phone,
        DeliveryField::Street,
        DeliveryField::City,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryField::Name => "name",
            DeliveryField::Email => "email",
            DeliveryField::Phone => "phone",
            DeliveryField::Street => "street",
            DeliveryField::City => "city",
            DeliveryField::PostalCode => "postalCode",
            DeliveryField::Province => "province",
            DeliveryField::Notes => "notes",
        }
    }

    /// Form label.
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryField::Name => "Full Name",
            DeliveryField::Email => "Email",
            DeliveryField::Phone => "Phone",
            DeliveryField::Street => "Street Address",
            DeliveryField::City => "City",
            DeliveryField::PostalCode => "Postal Code",
            DeliveryField::Province => "Province",
            DeliveryField::Notes => "Order Notes",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommerceError::UnknownValue {
                kind: "delivery field",
                value: s.to_string(),
            })
    }
}

/// Shipping and contact data for one checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub province: String,
    pub notes: String,
}

impl DeliveryDetails {
    /// Empty details, as used on the guest path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill from a signed-in customer's profile. Notes always start empty.
    pub fn from_profile(profile: &CustomerProfile) -> Self {
        Self {
            name: profile.full_name(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            street: profile.address.street.clone(),
            city: profile.address.city.clone(),
            postal_code: profile.address.postal_code.clone(),
            province: profile.address.province.clone(),
            notes: String::new(),
        }
    }

    pub fn get(&self, field: DeliveryField) -> &str {
        match field {
            DeliveryField::Name => &self.name,
            DeliveryField::Email => &self.email,
            DeliveryField::Phone => &self.phone,
            DeliveryField::Street => &self.street,
            DeliveryField::City => &self.city,
            DeliveryField::PostalCode => &self.postal_code,
            DeliveryField::Province => &self.province,
            DeliveryField::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: DeliveryField, value: impl Into<String>) {
        let slot = match field {
            DeliveryField::Name => &mut self.name,
            DeliveryField::Email => &mut self.email,
            DeliveryField::Phone => &mut self.phone,
            DeliveryField::Street => &mut self.street,
            DeliveryField::City => &mut self.city,
            DeliveryField::PostalCode => &mut self.postal_code,
            DeliveryField::Province => &mut self.province,
            DeliveryField::Notes => &mut self.notes,
        };
        *slot = value.into();
    }

    /// Required fields that are empty or whitespace only, in form order.
    pub fn missing_fields(&self) -> Vec<DeliveryField> {
        DeliveryField::REQUIRED
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Check every required field is filled in.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::MissingFields(
                missing.iter().map(|f| f.as_str()).collect(),
            ))
        }
    }

    /// `street, city, province postal_code`.
    pub fn address_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.city, self.province, self.postal_code
        )
    }

    /// Notes, or `"None"` when blank.
    pub fn notes_or_none(&self) -> &str {
        if self.notes.trim().is_empty() {
            "None"
        } else {
            &self.notes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::PostalAddress;

    fn complete() -> DeliveryDetails {
        DeliveryDetails {
            name: "John Doe".into(),
            email: "john@x.com".into(),
            phone: "0820000000".into(),
            street: "1 Main St".into(),
            city: "Joburg".into(),
            postal_code: "2000".into(),
            province: "Gauteng".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_complete_details_validate() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_each_required_field_is_checked() {
        for field in DeliveryField::REQUIRED {
            let mut details = complete();
            details.set(field, "");
            assert_eq!(details.missing_fields(), vec![field]);
            assert_eq!(
                details.validate(),
                Err(CommerceError::MissingFields(vec![field.as_str()]))
            );
        }
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let mut details = complete();
        details.set(DeliveryField::PostalCode, "");
        details.set(DeliveryField::Province, "");
        details.set(DeliveryField::Notes, "");
        assert!(details.validate().is_ok());
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut details = complete();
        details.set(DeliveryField::City, "   ");
        assert_eq!(details.missing_fields(), vec![DeliveryField::City]);
    }

    #[test]
    fn test_from_profile() {
        let profile = CustomerProfile {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@x.com".into(),
            phone: "0820000000".into(),
            address: PostalAddress::new("1 Main St", "Joburg", "2000", "Gauteng"),
        };
        let details = DeliveryDetails::from_profile(&profile);
        assert_eq!(details, complete());
    }

    #[test]
    fn test_field_parse() {
        assert_eq!(DeliveryField::parse("postalcode").unwrap(), DeliveryField::PostalCode);
        assert!(DeliveryField::parse("country").is_err());
        assert!(!DeliveryField::Notes.is_required());
    }
}
