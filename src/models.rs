use chrono::{DateTime, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String, // ISO timestamp from the backend
    pub time: Option<String>, // "HH:mm"
    pub location: Option<String>,
    pub image_url: Option<String>,
}

impl Event {
    // Explicit `time` wins; otherwise the time embedded in the ISO date.
    // A bare midnight in the date counts as unset.
    pub fn time_hint(&self) -> Option<String> {
        if let Some(time) = self.time.as_deref() {
            let trimmed = time.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        embedded_time(&self.date)
    }
}

fn embedded_time(iso: &str) -> Option<String> {
    let time = DateTime::parse_from_rfc3339(iso)
        .ok()
        .map(|dt| dt.time())
        .or_else(|| {
            NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.time())
        })?;
    if time == NaiveTime::MIN {
        return None;
    }
    Some(time.format("%H:%M").to_string())
}

// Body of `GET /api/events`. Missing or null `data` reads as no events.
#[derive(Debug, Deserialize)]
pub struct EventsEnvelope {
    #[serde(default)]
    pub data: Vec<Event>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Attendee {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub email: String,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub event_id: String,
    pub attendee: Attendee,
    pub total_tickets: u32,
}

// Body of `POST /api/bookings`.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct BookingReceipt {
    pub success: bool,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_EVENTS: &str = r#"{
        "data": [
            {
                "id": "6650a1",
                "title": "Harvest Praise Night",
                "description": "An evening of worship.",
                "date": "2025-10-05T00:00:00.000Z",
                "time": "19:00",
                "location": "Main Auditorium",
                "imageUrl": "public\\images\\praise.jpg"
            },
            {
                "id": "6650a2",
                "title": "Youth Conference",
                "date": "2025-11-12T18:30:00.000Z"
            }
        ]
    }"#;

    #[test]
    fn parses_events_envelope() {
        let envelope: EventsEnvelope = serde_json::from_str(SAMPLE_EVENTS).expect("parse events");
        assert_eq!(envelope.data.len(), 2);

        let first = &envelope.data[0];
        assert_eq!(first.id, "6650a1");
        assert_eq!(first.time.as_deref(), Some("19:00"));
        assert_eq!(first.image_url.as_deref(), Some("public\\images\\praise.jpg"));

        let second = &envelope.data[1];
        assert!(second.description.is_empty());
        assert!(second.location.is_none());
        assert!(second.image_url.is_none());
    }

    #[test]
    fn missing_data_reads_as_empty() {
        let envelope: EventsEnvelope = serde_json::from_str("{}").expect("parse empty body");
        assert!(envelope.data.is_empty());

        let envelope: EventsEnvelope =
            serde_json::from_str(r#"{"data": null}"#).expect("parse null data");
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn explicit_time_wins_over_embedded() {
        let envelope: EventsEnvelope = serde_json::from_str(SAMPLE_EVENTS).expect("parse events");
        assert_eq!(envelope.data[0].time_hint().as_deref(), Some("19:00"));
        assert_eq!(envelope.data[1].time_hint().as_deref(), Some("18:30"));
    }

    #[test]
    fn midnight_date_without_time_is_unset() {
        let event = Event {
            id: "1".into(),
            title: "t".into(),
            description: String::new(),
            date: "2025-10-05T00:00:00.000Z".into(),
            time: None,
            location: None,
            image_url: None,
        };
        assert_eq!(event.time_hint(), None);
    }

    #[test]
    fn booking_request_uses_backend_field_names() {
        let request = BookingRequest {
            event_id: "42".into(),
            attendee: Attendee {
                name: "Ada".into(),
                phone: "555-0101".into(),
                location: "Boise".into(),
                email: "ada@example.com".into(),
            },
            total_tickets: 2,
        };

        let value = serde_json::to_value(&request).expect("serialize request");
        assert_eq!(value["eventId"], "42");
        assert_eq!(value["totalTickets"], 2);
        assert_eq!(value["attendee"]["name"], "Ada");
        assert_eq!(value["attendee"]["email"], "ada@example.com");
    }

    #[test]
    fn receipt_defaults_to_failure() {
        let receipt: BookingReceipt = serde_json::from_str("{}").expect("parse empty receipt");
        assert!(!receipt.success);
        assert!(receipt.error.is_none());

        let receipt: BookingReceipt =
            serde_json::from_str(r#"{"success": false, "error": "Sold out"}"#)
                .expect("parse rejection");
        assert_eq!(receipt.error.as_deref(), Some("Sold out"));
    }
}
