use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

const RECORD_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = ',';
const FIELDS: [&str; 5] = ["longitude", "latitude", "gpstime", "speed", "course"];

/// One position from a playback response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub longitude: f64,
    pub latitude: f64,
    /// Unix seconds
    pub gps_time: i64,
    pub speed_kmh: i32,
    pub course: i32,
}

impl HistoryPoint {
    pub fn gps_time_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.gps_time, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryParseError {
    #[error("expected {expected} fields, found {found}", expected = FIELDS.len())]
    FieldCount { found: usize },

    #[error("invalid {field} '{value}'")]
    InvalidField { field: &'static str, value: String },
}

impl FromStr for HistoryPoint {
    type Err = HistoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(FIELD_SEPARATOR).map(str::trim).collect();
        let [longitude, latitude, gps_time, speed, course] = fields[..] else {
            return Err(HistoryParseError::FieldCount {
                found: fields.len(),
            });
        };

        Ok(Self {
            longitude: parse_field(FIELDS[0], longitude)?,
            latitude: parse_field(FIELDS[1], latitude)?,
            gps_time: parse_field(FIELDS[2], gps_time)?,
            speed_kmh: parse_field(FIELDS[3], speed)?,
            course: parse_field(FIELDS[4], course)?,
        })
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, HistoryParseError> {
    value.parse().map_err(|_| HistoryParseError::InvalidField {
        field,
        value: value.to_string(),
    })
}

/// Ordered positions of one playback window.
///
/// Fully validated on construction; iterate it as many times as needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    points: Vec<HistoryPoint>,
}

impl History {
    /// Parses `lon,lat,time,speed,course;lon,lat,...`.
    ///
    /// Blank segments (an empty response or a trailing `;`) are skipped; any
    /// other record with the wrong shape fails the whole parse. The error
    /// carries the record's position in `raw`, blank segments included.
    pub fn parse(raw: &str) -> Result<Self, (usize, HistoryParseError)> {
        raw.split(RECORD_SEPARATOR)
            .map(str::trim)
            .enumerate()
            .filter(|(_, record)| !record.is_empty())
            .map(|(index, record)| record.parse::<HistoryPoint>().map_err(|e| (index, e)))
            .collect::<Result<Vec<_>, _>>()
            .map(|points| Self { points })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&HistoryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&HistoryPoint> {
        self.points.last()
    }

    pub fn into_points(self) -> Vec<HistoryPoint> {
        self.points
    }
}

impl IntoIterator for History {
    type Item = HistoryPoint;
    type IntoIter = std::vec::IntoIter<HistoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryPoint;
    type IntoIter = std::slice::Iter<'a, HistoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
