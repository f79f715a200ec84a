//! Customer profile and postal address.

use serde::{Deserialize, Serialize};

/// A South African postal address as captured at registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub province: String,
}

impl PostalAddress {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        province: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            postal_code: postal_code.into(),
            province: province.into(),
        }
    }

    /// `street, city, province postal_code`, the layout used on orders.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.city, self.province, self.postal_code
        )
    }

    /// Check if every field is blank.
    pub fn is_blank(&self) -> bool {
        [&self.street, &self.city, &self.postal_code, &self.province]
            .iter()
            .all(|s| s.trim().is_empty())
    }
}

/// Profile of a registered customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: PostalAddress,
}

impl CustomerProfile {
    /// Full name, or an empty string when no first name is on file.
    pub fn full_name(&self) -> String {
        if self.first_name.trim().is_empty() {
            return String::new();
        }
        format!("{} {}", self.first_name, self.last_name)
            .trim_end()
            .to_string()
    }

    /// Name to greet the customer with.
    pub fn display_name(&self) -> &str {
        if self.first_name.trim().is_empty() {
            &self.email
        } else {
            &self.first_name
        }
    }
}
