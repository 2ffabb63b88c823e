//! Input records handed to the matching engine.
//!
//! Announcements arrive from the portal scraper with German column keys, so
//! every announcement field accepts that key as an alias next to its English
//! name.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::normalize::normalize;

/// A client from the registry snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClientRecord {
    pub id: i64,
    /// Display name as entered in the registry.
    pub name: String,
    /// Legal name, expected to be normalized by the registry.
    pub full_name: String,
}

impl ClientRecord {
    /// Build a client, normalizing `full_name` on the way in.
    pub fn new(id: i64, name: impl Into<String>, full_name: &str) -> Self {
        Self {
            id,
            name: name.into(),
            full_name: normalize(full_name),
        }
    }
}

/// One row of the insolvency announcement search results.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnnouncementRecord {
    #[serde(default, alias = "Veröffentlichungsdatum", deserialize_with = "null_as_default")]
    pub publication_date: String,
    #[serde(default, alias = "Aktenzeichen", deserialize_with = "null_as_default")]
    pub case_number: String,
    #[serde(default, alias = "Gericht", deserialize_with = "null_as_default")]
    pub court: String,
    /// Raw company name exactly as published.
    #[serde(default, alias = "Firmenname", deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(default, alias = "Sitz", deserialize_with = "null_as_default")]
    pub registered_seat: String,
    #[serde(default, alias = "Register", deserialize_with = "null_as_default")]
    pub register_entry: String,
    /// Every cell of the source row, in column order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub raw_data: Vec<String>,
    pub scraped_at: NaiveDateTime,
}

/// The portal writes `null` for cells it could not read.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AnnouncementRecord {
    /// Serialize the full record for collaborators that persist it as a blob.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new_normalizes_full_name() {
        let client = ClientRecord::new(7, "Musterbau", "Musterbau GmbH & Co. KG");
        assert_eq!(client.name, "Musterbau");
        assert_eq!(client.full_name, "musterbau gmbh co kg");
    }

    #[test]
    fn test_announcement_accepts_portal_keys() {
        let json = r#"{
            "Veröffentlichungsdatum": "01.07.2025",
            "Aktenzeichen": "IN 123/25",
            "Gericht": "Amtsgericht München",
            "Firmenname": "Müller Bäckerei GmbH",
            "Sitz": "München",
            "Register": "HRB 4711",
            "raw_data": ["01.07.2025", "IN 123/25"],
            "scraped_at": "2025-07-01T08:15:30.123456"
        }"#;

        let record: AnnouncementRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.publication_date, "01.07.2025");
        assert_eq!(record.case_number, "IN 123/25");
        assert_eq!(record.court, "Amtsgericht München");
        assert_eq!(record.company_name, "Müller Bäckerei GmbH");
        assert_eq!(record.registered_seat, "München");
        assert_eq!(record.register_entry, "HRB 4711");
        assert_eq!(record.raw_data.len(), 2);
    }

    #[test]
    fn test_announcement_missing_fields_default_to_empty() {
        let json = r#"{"scraped_at": "2025-07-01T08:15:30"}"#;

        let record: AnnouncementRecord = serde_json::from_str(json).unwrap();
        assert!(record.company_name.is_empty());
        assert!(record.raw_data.is_empty());
    }

    #[test]
    fn test_announcement_null_cells_become_empty() {
        let json = r#"{
            "Firmenname": null,
            "Aktenzeichen": "IN 9/25",
            "Sitz": null,
            "raw_data": null,
            "scraped_at": "2025-07-01T08:15:30"
        }"#;

        let record: AnnouncementRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.company_name, "");
        assert_eq!(record.registered_seat, "");
        assert_eq!(record.case_number, "IN 9/25");
        assert!(record.raw_data.is_empty());
    }

    #[test]
    fn test_to_json_keeps_umlauts() {
        let json = r#"{"Firmenname": "Größle AG", "scraped_at": "2025-07-01T08:15:30"}"#;
        let record: AnnouncementRecord = serde_json::from_str(json).unwrap();

        let blob = record.to_json().unwrap();
        assert!(blob.contains("Größle AG"));

        let back: AnnouncementRecord = serde_json::from_str(&blob).unwrap();
        assert_eq!(back, record);
    }
}
