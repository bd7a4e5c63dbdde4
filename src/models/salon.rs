// src/models/salon.rs

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::legacy;

// --- SALON RECORD ---

// Canonical salon profile, keyed by `username`.
// Services and notification recipients go through the legacy decoders on the way in,
// so older shapes stored by the backend come out in the current shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalonRecord {
    pub username: String,
    #[serde(default)]
    pub salon_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    // Raw digits only, formatting is a display concern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socials: Option<Socials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<Vec<BusinessHours>>,

    #[serde(
        default,
        deserialize_with = "legacy::deserialize_services",
        skip_serializing_if = "Option::is_none"
    )]
    pub services: Option<Vec<ServiceCategory>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payments: Option<PaymentSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<CalendarSettings>,
}

impl SalonRecord {
    pub fn new(username: impl Into<String>, salon_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            salon_name: salon_name.into(),
            about: None,
            contact_email: None,
            contact_phone: None,
            website: None,
            location: None,
            socials: None,
            media: None,
            business_hours: None,
            services: None,
            amenities: None,
            notifications: None,
            payments: None,
            calendar: None,
        }
    }
}

// Entry of `GET /api/salons`, used by listing and map views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalonSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<serde_json::Value>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub services: Option<serde_json::Value>,
    #[serde(default)]
    pub reviews: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

// --- LOCATION / SOCIALS / HOURS ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub street_number: String,
    pub street: String,
    pub unit: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub place_id: String,
    pub input_location: String,
    pub timezone: String,
    pub country: String,
    pub latitude: String,
    pub longitude: String,
}

// platform -> profile URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Socials {
    pub instagram: String,
    pub facebook: String,
    pub twitter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHours {
    pub day: String,
    pub open_time: String,
    pub close_time: String,
    pub is_open: bool,
}

// --- MEDIA ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<MediaAsset>,
    #[serde(default)]
    pub images: Vec<MediaAsset>,
}

// `key` is the opaque storage key. Empty means the asset was never uploaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub url: String,
    #[serde(default)]
    pub key: String,
}

impl MediaAsset {
    pub fn is_stored(&self) -> bool {
        !self.key.is_empty()
    }
}

// --- SERVICES ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub services: Vec<SalonService>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalonService {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub duration_minutes: u32,
}

/// Price of a service: a fixed amount or an advertised range such as `"15-45"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Price {
    Fixed(Decimal),
    Range { min: Decimal, max: Decimal },
}

impl Price {
    /// The amount charged up front. Ranges count at their lower bound.
    pub fn lower_bound(&self) -> Decimal {
        match self {
            Price::Fixed(amount) => *amount,
            Price::Range { min, .. } => *min,
        }
    }
}

// Reads the numeric prefix of `s`, returning it with the unparsed remainder.
fn leading_decimal(s: &str) -> Option<(Decimal, &str)> {
    let s = s.trim_start().trim_start_matches('$');
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(s.len(), |(i, _)| i);
    let amount = Decimal::from_str(&s[..end]).ok()?;
    Some((amount, &s[end..]))
}

impl FromStr for Price {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, rest) = leading_decimal(s).ok_or_else(|| format!("invalid price: {s:?}"))?;
        let upper = rest
            .trim_start()
            .strip_prefix('-')
            .and_then(leading_decimal)
            .map(|(max, _)| max);
        Ok(match upper {
            Some(max) => Price::Range { min, max },
            None => Price::Fixed(min),
        })
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Fixed(amount) => write!(f, "{}", amount.normalize()),
            Price::Range { min, max } => write!(f, "{}-{}", min.normalize(), max.normalize()),
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Price::Fixed(amount) => Serialize::serialize(amount, serializer),
            Price::Range { .. } => serializer.serialize_str(&self.to_string()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(Decimal),
    Text(String),
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawPrice::deserialize(deserializer)? {
            RawPrice::Number(amount) => Ok(Price::Fixed(amount)),
            RawPrice::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

// --- AMENITIES ---

pub struct Amenity {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

// Tags the settings page offers.
pub const AMENITY_CATALOG: [Amenity; 5] = [
    Amenity { id: "wifi", label: "WiFi", description: "Free WiFi for customers" },
    Amenity { id: "parking", label: "Parking", description: "Free or paid parking available" },
    Amenity {
        id: "wheelchair",
        label: "Wheelchair Accessible",
        description: "Facilities accessible for wheelchair users",
    },
    Amenity {
        id: "credit-cards",
        label: "Credit Cards Accepted",
        description: "All major credit cards accepted",
    },
    Amenity {
        id: "online-booking",
        label: "Online Booking",
        description: "Customers can book appointments online",
    },
];

// --- NOTIFICATIONS ---

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    #[serde(default = "enabled_by_default")]
    pub email_enabled: bool,
    #[serde(default = "enabled_by_default")]
    pub sms_enabled: bool,
    #[serde(default, deserialize_with = "legacy::deserialize_contacts")]
    pub email_recipients: Vec<NotificationContact>,
    #[serde(default, deserialize_with = "legacy::deserialize_contacts")]
    pub sms_recipients: Vec<NotificationContact>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_enabled: true,
            sms_enabled: true,
            email_recipients: Vec::new(),
            sms_recipients: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContact {
    pub id: u64,
    pub value: String,
    pub enabled: bool,
}

// --- PAYMENTS / CALENDAR ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutSchedule {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSettings {
    #[serde(default)]
    pub stripe_connected: bool,
    #[serde(default)]
    pub stripe_account_id: Option<String>,
    #[serde(default)]
    pub auto_payouts: bool,
    #[serde(default)]
    pub payout_schedule: Option<PayoutSchedule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSettings {
    #[serde(default)]
    pub google_connected: bool,
    #[serde(default)]
    pub google_calendar_id: Option<String>,
    #[serde(default)]
    pub sync_enabled: bool,
    #[serde(default)]
    pub notifications_enabled: bool,
}
