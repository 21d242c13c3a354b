//! Foundation events
//!
//! Events are listed soonest first. The `date` field accepts what browsers
//! actually submit: RFC 3339 timestamps, `datetime-local` values
//! (`2025-06-01T18:30`) and plain dates (`2025-06-01`). Values without an
//! offset are taken as UTC.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    patch_text, required_field, ContentDocument, Document, FormFields, MediaAsset, MediaKind,
    Record,
};
use crate::shared::error::SharedError;

/// A scheduled event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_type: MediaKind,
}

/// Parse a submitted event date
pub fn parse_event_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn date_field(fields: &FormFields) -> Result<DateTime<Utc>, SharedError> {
    let raw = required_field(fields, "date")?;
    parse_event_date(&raw)
        .ok_or_else(|| SharedError::validation("date", "\"date\" must be a valid date"))
}

impl Document for Event {
    const COLLECTION: &'static str = "events";

    fn compare(a: &Record<Self>, b: &Record<Self>) -> Ordering {
        a.document.date.cmp(&b.document.date)
    }
}

impl ContentDocument for Event {
    const LABEL: &'static str = "Event";
    const KEY: &'static str = "event";

    fn from_fields(fields: &FormFields) -> Result<Self, SharedError> {
        Ok(Self {
            title: required_field(fields, "title")?,
            description: required_field(fields, "description")?,
            date: date_field(fields)?,
            location: required_field(fields, "location")?,
            media_url: None,
            media_type: MediaKind::default(),
        })
    }

    fn patch_from_fields(fields: &FormFields) -> Result<Map<String, Value>, SharedError> {
        let mut patch = Map::new();
        patch_text(fields, "title", &mut patch)?;
        patch_text(fields, "description", &mut patch)?;
        if fields.contains_key("date") {
            let date = date_field(fields)?;
            patch.insert("date".into(), serde_json::to_value(date)?);
        }
        patch_text(fields, "location", &mut patch)?;
        Ok(patch)
    }

    fn attach_media(&mut self, media: &MediaAsset) {
        self.media_url = Some(media.url.clone());
        self.media_type = media.kind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::content::fields;
    use chrono::TimeZone;

    #[test]
    fn test_parse_event_date_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 1, 18, 30, 0).unwrap();
        assert_eq!(parse_event_date("2025-06-01T18:30:00Z"), Some(expected));
        assert_eq!(parse_event_date("2025-06-01T20:30:00+02:00"), Some(expected));
        assert_eq!(parse_event_date("2025-06-01T18:30"), Some(expected));
        assert_eq!(
            parse_event_date("2025-06-01"),
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_event_date("next tuesday"), None);
    }

    #[test]
    fn test_from_fields_rejects_bad_date() {
        let err = Event::from_fields(&fields(&[
            ("title", "Gala"),
            ("description", "Fundraiser"),
            ("date", "soon"),
            ("location", "Hall"),
        ]))
        .unwrap_err();
        assert_eq!(err.field(), Some("date"));
    }

    #[test]
    fn test_events_sort_by_date_ascending() {
        let make = |day: u32| Record {
            id: uuid::Uuid::new_v4(),
            document: Event {
                title: format!("day {day}"),
                description: "d".into(),
                date: Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap(),
                location: "l".into(),
                media_url: None,
                media_type: MediaKind::Image,
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let mut records = vec![make(3), make(1), make(2)];
        records.sort_by(Event::compare);
        let titles: Vec<_> = records.iter().map(|r| r.document.title.as_str()).collect();
        assert_eq!(titles, ["day 1", "day 2", "day 3"]);
    }
}
