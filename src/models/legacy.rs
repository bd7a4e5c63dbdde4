// src/models/legacy.rs
//
// Decoders for the older shapes the backend may still hold.
// Each function is pure: old JSON in, current model out. They run once, at the
// deserialization boundary of `SalonRecord`.
//
// Service categories, oldest first:
//   v1 (backend): { categoryName, subServices: [{ title, description, price: 25, duration: 30 }] }
//   v2 (editor):  { id, name, services: [{ id, name, description, price: "$25", duration: "30 min" }] }
//   v3 (current): { id, name, services: [{ id, title, description, price, durationMinutes }] }
//
// Notification contacts:
//   v1: { email, enabled } / { phone, enabled }
//   v2: { id, value, enabled }

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::salon::{NotificationContact, Price, SalonService, ServiceCategory};

// =========================================================================
//  SERVICES
// =========================================================================

/// Decodes one category at position `index` of the stored list.
pub fn decode_category(item: &Value, index: usize) -> ServiceCategory {
    let category_id = index as u64 + 1;

    if let (Some(name), Some(services)) = (
        item.get("categoryName").and_then(Value::as_str),
        item.get("subServices").and_then(Value::as_array),
    ) {
        return ServiceCategory {
            id: category_id,
            name: name.to_string(),
            services: services
                .iter()
                .enumerate()
                .map(|(i, service)| decode_service(service, category_id * 100 + i as u64 + 1))
                .collect(),
        };
    }

    if let (Some(name), Some(services)) = (
        item.get("name").and_then(Value::as_str),
        item.get("services").and_then(Value::as_array),
    ) {
        let id = item.get("id").and_then(Value::as_u64).unwrap_or(category_id);
        return ServiceCategory {
            id,
            name: name.to_string(),
            services: services
                .iter()
                .enumerate()
                .map(|(i, service)| decode_service(service, id * 100 + i as u64 + 1))
                .collect(),
        };
    }

    ServiceCategory {
        id: category_id,
        name: "Untitled Category".to_string(),
        services: Vec::new(),
    }
}

/// `fallback_id` is used when the stored service has no numeric id.
pub fn decode_service(item: &Value, fallback_id: u64) -> SalonService {
    let text = |key: &str| item.get(key).and_then(Value::as_str).map(str::to_string);

    SalonService {
        id: item.get("id").and_then(Value::as_u64).unwrap_or(fallback_id),
        title: text("title").or_else(|| text("name")).unwrap_or_default(),
        description: text("description").unwrap_or_default(),
        price: item.get("price").map_or(Price::Fixed(Default::default()), decode_price),
        duration_minutes: item
            .get("durationMinutes")
            .or_else(|| item.get("duration"))
            .map_or(0, decode_minutes),
    }
}

// 25, "25", "$25", "15-45". Anything unreadable counts as free.
fn decode_price(value: &Value) -> Price {
    match value {
        Value::String(text) => text.parse().unwrap_or(Price::Fixed(Default::default())),
        other => serde_json::from_value(other.clone()).unwrap_or(Price::Fixed(Default::default())),
    }
}

// 30, "30", "30 min", "15-45 min" (lower bound).
fn decode_minutes(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n.as_u64().and_then(|m| u32::try_from(m).ok()).unwrap_or(0),
        Value::String(text) => {
            let digits: String = text
                .trim_start()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    }
}

pub(crate) fn deserialize_services<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<ServiceCategory>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| decode_category(item, i))
                .collect(),
        ),
        _ => None,
    })
}

// =========================================================================
//  NOTIFICATION CONTACTS
// =========================================================================

pub fn decode_contact(item: &Value, index: usize) -> NotificationContact {
    let fallback_id = index as u64 + 1;

    let Some(obj) = item.as_object() else {
        return NotificationContact { id: fallback_id, value: String::new(), enabled: true };
    };

    let value = ["email", "phone", "value"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
        .unwrap_or_default()
        .to_string();

    NotificationContact {
        id: obj
            .get("id")
            .and_then(Value::as_u64)
            .filter(|id| *id != 0)
            .unwrap_or(fallback_id),
        value,
        enabled: obj.get("enabled").and_then(Value::as_bool).unwrap_or(true),
    }
}

pub(crate) fn deserialize_contacts<'de, D>(deserializer: D) -> Result<Vec<NotificationContact>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| decode_contact(item, i))
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::salon::SalonRecord;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn backend_shape_becomes_current_category() {
        let category = decode_category(
            &json!({
                "categoryName": "Manicure",
                "subServices": [
                    { "title": "Gel Manicure", "description": "Gel polish", "price": 45, "duration": 45 }
                ]
            }),
            0,
        );

        assert_eq!(category.id, 1);
        assert_eq!(category.name, "Manicure");
        assert_eq!(category.services[0].id, 101);
        assert_eq!(category.services[0].title, "Gel Manicure");
        assert_eq!(category.services[0].price, Price::Fixed(Decimal::from(45)));
        assert_eq!(category.services[0].duration_minutes, 45);
    }

    #[test]
    fn editor_shape_keeps_ids_and_parses_strings() {
        let category = decode_category(
            &json!({
                "id": 3,
                "name": "Eyebrows",
                "services": [
                    { "id": 302, "name": "Threading", "description": "", "price": "$18", "duration": "20 min" }
                ]
            }),
            7,
        );

        assert_eq!(category.id, 3);
        assert_eq!(category.services[0].id, 302);
        assert_eq!(category.services[0].title, "Threading");
        assert_eq!(category.services[0].price, Price::Fixed(Decimal::from(18)));
        assert_eq!(category.services[0].duration_minutes, 20);
    }

    #[test]
    fn current_shape_is_stable() {
        let current = ServiceCategory {
            id: 4,
            name: "Nails".into(),
            services: vec![SalonService {
                id: 401,
                title: "Nail Art".into(),
                description: "Custom designs".into(),
                price: "15-45".parse().unwrap(),
                duration_minutes: 15,
            }],
        };

        let decoded = decode_category(&serde_json::to_value(&current).unwrap(), 0);
        assert_eq!(decoded, current);
    }

    #[test]
    fn unknown_shape_becomes_untitled_category() {
        let category = decode_category(&json!({ "foo": 1 }), 2);
        assert_eq!(category.id, 3);
        assert_eq!(category.name, "Untitled Category");
        assert!(category.services.is_empty());
    }

    #[test]
    fn contacts_from_every_shape() {
        assert_eq!(
            decode_contact(&json!({ "email": "a@b.co", "enabled": false }), 0),
            NotificationContact { id: 1, value: "a@b.co".into(), enabled: false }
        );
        assert_eq!(
            decode_contact(&json!({ "phone": "5551234567" }), 1),
            NotificationContact { id: 2, value: "5551234567".into(), enabled: true }
        );
        assert_eq!(
            decode_contact(&json!({ "id": 9, "value": "x@y.co", "enabled": true }), 4),
            NotificationContact { id: 9, value: "x@y.co".into(), enabled: true }
        );
        assert_eq!(
            decode_contact(&json!("garbage"), 0),
            NotificationContact { id: 1, value: String::new(), enabled: true }
        );
    }

    #[test]
    fn salon_record_decodes_legacy_sections() {
        let salon: SalonRecord = serde_json::from_value(json!({
            "username": "glowgirl",
            "salonName": "Glow Girl",
            "services": [{ "categoryName": "Pedicure", "subServices": [] }],
            "notifications": {
                "emailEnabled": false,
                "smsEnabled": true,
                "emailRecipients": [{ "email": "manager@glowgirl.com", "enabled": true }],
                "smsRecipients": [{ "phone": "5551234567", "enabled": true }]
            }
        }))
        .unwrap();

        let services = salon.services.unwrap();
        assert_eq!(services[0].name, "Pedicure");

        let notifications = salon.notifications.unwrap();
        assert!(!notifications.email_enabled);
        assert_eq!(notifications.email_recipients[0].value, "manager@glowgirl.com");
        assert_eq!(notifications.sms_recipients[0].value, "5551234567");
    }
}
