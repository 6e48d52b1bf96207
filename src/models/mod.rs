use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DonationInfo {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub branch: String,
    pub instructions: String,
}

/// Organisation metadata shown in the footer, contact and donation pages.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub site_name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    pub contact_phone: String,
    pub contact_email: String,
    pub contact_address: String,
    pub about_text: String,
    pub donation_info: DonationInfo,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    pub published_at: DateTime<Utc>,
}

/// A leadership / key-person entry.
///
/// `details` holds named long-form biography sections. `None` means the
/// person has no expanded biography.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub photo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct District {
    pub id: i64,
    pub name: String,
    pub president: String,
    pub phone: String,
    pub email: String,
    pub photo: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GalleryItem {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub file_path: String,
}

pub mod db_operations;
pub mod envelope;
pub mod submission_models;
