use chrono::{Duration, NaiveDate};
use reqwest::Method;
use serde_json::{json, Value};

use crate::calcom::CalendarApi;
use crate::error::{CalChatError, Result};
use crate::models::{Booking, BookingRequest, EventType, Slot};

/// HTTP client for the Cal.com v1 REST API.
///
/// The API key is passed as a query parameter, not a header.
pub struct CalComClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    default_timezone: String,
}

impl CalComClient {
    pub fn new(api_key: &str, base_url: &str, default_timezone: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            default_timezone: default_timezone.to_string(),
        }
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);

        let mut request = self
            .client
            .request(method, &url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(%status, path, "Cal.com API error");
            return Err(CalChatError::Provider {
                status: Some(status.as_u16()),
                message,
            });
        }

        response.json().await.map_err(|e| CalChatError::Provider {
            status: None,
            message: format!("Malformed provider response: {}", e),
        })
    }
}

impl CalendarApi for CalComClient {
    async fn list_event_types(&self) -> Result<Vec<EventType>> {
        let response = self
            .request(Method::GET, "event-types", &[], None)
            .await?;

        let raw = response
            .get("event_types")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        raw.into_iter()
            .map(|et| {
                serde_json::from_value(et).map_err(|e| CalChatError::Provider {
                    status: None,
                    message: format!("Malformed event type: {}", e),
                })
            })
            .collect()
    }

    async fn list_slots(
        &self,
        event_type_id: i64,
        date: NaiveDate,
        timezone: &str,
    ) -> Result<Vec<Slot>> {
        // The slot feed only carries start times; the event type's length is
        // needed to compute slot ends.
        let event_types = self.list_event_types().await?;
        let Some(event_type) = event_types.iter().find(|et| et.id == event_type_id) else {
            tracing::warn!(event_type_id, "event type not found, returning no slots");
            return Ok(vec![]);
        };

        let params = [
            ("eventTypeId", event_type_id.to_string()),
            ("startTime", format!("{}T00:00:00", date)),
            ("endTime", format!("{}T23:59:59", date)),
            ("timeZone", timezone.to_string()),
        ];

        let response = self.request(Method::GET, "slots", &params, None).await?;
        let slots = parse_slots(&response, event_type.length)?;
        tracing::info!(event_type_id, %date, count = slots.len(), "listed slots");
        Ok(slots)
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking> {
        let attendee = request
            .attendees
            .first()
            .ok_or_else(|| CalChatError::Validation("At least one attendee is required".into()))?;

        let timezone = attendee
            .timezone
            .clone()
            .unwrap_or_else(|| self.default_timezone.clone());
        let title = request
            .title
            .clone()
            .unwrap_or_else(|| format!("Meeting with {}", attendee.name));

        let body = json!({
            "eventTypeId": request.event_type_id,
            "start": request.start_time.to_rfc3339(),
            "end": request.end_time.to_rfc3339(),
            "responses": {
                "name": attendee.name,
                "email": attendee.email,
                "location": {
                    "value": "inPerson",
                    "optionValue": ""
                }
            },
            "timeZone": timezone,
            "language": "en",
            "title": title,
            "description": request.description,
            "metadata": {}
        });

        let response = self
            .request(Method::POST, "bookings", &[], Some(&body))
            .await?;

        // The booking may come back wrapped in a `booking` field or as the
        // top-level object.
        let raw = response.get("booking").unwrap_or(&response);
        let booking: Booking =
            serde_json::from_value(raw.clone()).map_err(|e| CalChatError::Provider {
                status: None,
                message: format!("Malformed booking response: {}", e),
            })?;

        tracing::info!(booking_id = %booking.uid, "booking created");
        Ok(booking)
    }
}

/// Pull slots out of the provider's `{"slots": {"<date>": [{"time": ...}]}}`
/// shape. Entries with unparseable times are skipped.
fn parse_slots(response: &Value, event_length_minutes: i64) -> Result<Vec<Slot>> {
    let slots_by_date = response
        .get("slots")
        .and_then(|s| s.as_object())
        .ok_or_else(|| CalChatError::Provider {
            status: None,
            message: "Missing 'slots' object in provider response".to_string(),
        })?;

    let mut slots = Vec::new();
    for (date_str, time_slots) in slots_by_date {
        let Some(entries) = time_slots.as_array() else {
            tracing::warn!(date = %date_str, "unexpected slot list shape");
            continue;
        };
        for entry in entries {
            let Some(time_str) = entry.get("time").and_then(|t| t.as_str()) else {
                tracing::warn!(date = %date_str, "slot entry missing 'time'");
                continue;
            };
            match chrono::DateTime::parse_from_rfc3339(time_str) {
                Ok(start) => slots.push(Slot {
                    start,
                    end: start + Duration::minutes(event_length_minutes),
                }),
                Err(e) => tracing::warn!(time = time_str, error = %e, "unparseable slot time"),
            }
        }
    }
    Ok(slots)
}
