use super::{AccessToken, Envelope};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Requests

/// Historical positions of one device between two instants.
///
/// The vendor answers with a single string of `;` separated records, each
/// of which is `longitude,latitude,gpstime,speed,course`.
#[derive(Debug, Clone, Serialize)]
pub struct Playback {
    access_token: AccessToken,
    imei: String,
    begintime: i64,
    endtime: i64,
}

impl Playback {
    pub fn new(imei: impl Into<String>, begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            access_token: AccessToken::default(),
            imei: imei.into(),
            begintime: begin.timestamp(),
            endtime: end.timestamp(),
        }
    }

    setter!(access_token: AccessToken);
}

impl Request for Playback {
    type Data = Self;
    type Response = PlaybackResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/playback".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

// Responses

pub type PlaybackResponse = Envelope<String>;
