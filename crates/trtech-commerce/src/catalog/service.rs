//! Repair and design services offered by the shop.

use crate::ids::ServiceId;
use serde::{Deserialize, Serialize};

/// A service listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(alias = "_id")]
    pub id: ServiceId,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Price label, e.g. "From R150" or "Quote based".
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_from_backend_json() {
        let json = r#"{
            "_id": "svc1",
            "title": "Phone Repairs",
            "price": "From R150",
            "features": ["Screen replacement", "Battery replacement"]
        }"#;
        let service: Service = serde_json::from_str(json).unwrap();
        assert_eq!(service.title, "Phone Repairs");
        assert_eq!(service.features.len(), 2);
        assert!(service.category.is_none());
    }
}
