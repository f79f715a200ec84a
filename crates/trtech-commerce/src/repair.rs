//! Repair bookings.

use crate::ids::RepairId;
use crate::CommerceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Kind of device brought in for repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    Smartphone,
    Laptop,
    #[serde(rename = "Desktop Computer")]
    DesktopComputer,
    Tablet,
    Other,
}

impl DeviceType {
    pub const ALL: [DeviceType; 5] = [
        DeviceType::Smartphone,
        DeviceType::Laptop,
        DeviceType::DesktopComputer,
        DeviceType::Tablet,
        DeviceType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Smartphone => "Smartphone",
            DeviceType::Laptop => "Laptop",
            DeviceType::DesktopComputer => "Desktop Computer",
            DeviceType::Tablet => "Tablet",
            DeviceType::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommerceError::UnknownValue {
                kind: "device type",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workshop status of a repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RepairStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl RepairStatus {
    pub const ALL: [RepairStatus; 4] = [
        RepairStatus::Pending,
        RepairStatus::InProgress,
        RepairStatus::Completed,
        RepairStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepairStatus::Pending => "Pending",
            RepairStatus::InProgress => "In Progress",
            RepairStatus::Completed => "Completed",
            RepairStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        let wanted = s.trim().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CommerceError::UnknownValue {
                kind: "repair status",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The repair booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairBooking {
    #[serde(rename = "customerName")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: String,
    pub device_type: Option<DeviceType>,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    pub issue: String,
    #[serde(default)]
    pub additional_info: String,
}

impl RepairBooking {
    /// Name, phone, device type and issue must be present.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.device_type.is_none() {
            missing.push("deviceType");
        }
        if self.issue.trim().is_empty() {
            missing.push("issue");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::MissingFields(missing))
        }
    }

    /// Booking text for the messaging hand-off.
    pub fn message(&self) -> String {
        let device = self.device_type.map(|d| d.as_str()).unwrap_or("");
        let additional = if self.additional_info.trim().is_empty() {
            "N/A"
        } else {
            self.additional_info.trim()
        };

        let mut out = String::from("Hi! I'd like to book a repair:\n\n");
        let _ = writeln!(out, "Name: {}", self.name);
        let _ = writeln!(out, "Email: {}", self.email);
        let _ = writeln!(out, "Phone: {}", self.phone);
        let _ = writeln!(out, "Device Type: {}", device);
        let _ = writeln!(out, "Brand: {}", self.brand);
        let _ = writeln!(out, "Model: {}", self.model);
        let _ = writeln!(out, "Issue: {}", self.issue);
        let _ = write!(out, "Additional Info: {}", additional);
        out
    }
}

/// A repair job as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repair {
    #[serde(alias = "_id")]
    pub id: RepairId,
    pub customer_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub device_type: DeviceType,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub issue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub status: RepairStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
