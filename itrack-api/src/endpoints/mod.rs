pub mod authorization;
pub mod geofence;
pub mod playback;
pub mod track;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::marker::PhantomData;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Bearer credential sent as the `access_token` query parameter.
#[derive(Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Response wrapper shared by every iTrack endpoint.
///
/// `code == 0` means success; any other value is a vendor-side rejection
/// with an optional human readable `message`. The vendor fills `record`
/// with arbitrary values on rejections, so it stays raw JSON until the code
/// has been checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub record: Option<serde_json::Value>,
    #[serde(skip)]
    record_type: PhantomData<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Checks the vendor code, ignoring the payload.
    pub fn check(self) -> Result<(), VendorFailure> {
        if self.is_success() {
            Ok(())
        } else {
            Err(VendorFailure {
                code: self.code,
                message: self.message,
            })
        }
    }

    /// Checks the vendor code, then decodes the payload.
    pub fn into_record(self) -> Result<T, VendorFailure>
    where
        T: DeserializeOwned,
    {
        if !self.is_success() {
            return Err(VendorFailure {
                code: self.code,
                message: self.message,
            });
        }
        let record = match self.record {
            None | Some(serde_json::Value::Null) => {
                return Err(VendorFailure {
                    code: self.code,
                    message: Some("response carried no record".to_string()),
                });
            }
            Some(record) => record,
        };
        serde_json::from_value(record).map_err(|e| VendorFailure {
            code: self.code,
            message: Some(format!("malformed record: {}", e)),
        })
    }
}

/// A non-zero `code`, or a success whose payload is missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorFailure {
    pub code: i64,
    pub message: Option<String>,
}

impl VendorFailure {
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(UNKNOWN_ERROR)
    }

    /// Prefixes the vendor message with what was being attempted.
    pub fn describe(&self, context: &str) -> String {
        format!("{}: {}", context, self.message())
    }
}

impl std::fmt::Display for VendorFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vendor code {}: {}", self.code, self.message())
    }
}

impl std::error::Error for VendorFailure {}

/// iTrack is loose about JSON types; numbers sometimes arrive as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Lenient {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Lenient::Int(v) => Some(*v as f64),
            Lenient::Float(v) => Some(*v),
            Lenient::Text(s) => s.trim().parse().ok(),
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Lenient::Int(v) => Some(*v),
            Lenient::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            Lenient::Float(_) => None,
            Lenient::Text(s) => {
                let s = s.trim();
                s.parse()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|v| v.fract() == 0.0).map(|v| v as i64))
            }
        }
    }
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Lenient>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(Lenient::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("expected a decimal number")),
    }
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Lenient>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(Lenient::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("expected an integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_code_yields_record() {
        let envelope: Envelope<String> =
            serde_json::from_value(json!({"code": 0, "record": "abc"})).unwrap();
        assert_eq!(envelope.into_record(), Ok("abc".to_string()));
    }

    #[test]
    fn non_zero_code_keeps_vendor_message() {
        let envelope: Envelope<String> =
            serde_json::from_value(json!({"code": 10004, "message": "imei not exist"})).unwrap();
        let failure = envelope.into_record().unwrap_err();
        assert_eq!(failure.code, 10004);
        assert_eq!(
            failure.describe("Failed to track vehicle"),
            "Failed to track vehicle: imei not exist"
        );
    }

    #[test]
    fn missing_message_falls_back_to_generic_text() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_value(json!({"code": 1})).unwrap();
        let failure = envelope.check().unwrap_err();
        assert_eq!(failure.describe("Failed"), "Failed: Unknown error");
    }

    #[test]
    fn rejection_ignores_record_of_unexpected_type() {
        let envelope: Envelope<Vec<String>> = serde_json::from_value(
            json!({"code": 10004, "message": "imei not exist", "record": ""}),
        )
        .unwrap();
        assert_eq!(
            envelope.into_record().unwrap_err().describe("Failed to track vehicle"),
            "Failed to track vehicle: imei not exist"
        );

        let envelope: Envelope<Vec<String>> =
            serde_json::from_value(json!({"code": 2, "record": {}})).unwrap();
        assert_eq!(envelope.into_record().unwrap_err().message(), "Unknown error");
    }

    #[test]
    fn success_with_malformed_record_is_a_failure() {
        let envelope: Envelope<Vec<String>> =
            serde_json::from_value(json!({"code": 0, "record": "oops"})).unwrap();
        let failure = envelope.into_record().unwrap_err();
        assert_eq!(failure.code, 0);
        assert!(failure.message().starts_with("malformed record: "));
    }

    #[test]
    fn success_without_record_is_a_failure_for_into_record() {
        let envelope: Envelope<String> = serde_json::from_value(json!({"code": 0})).unwrap();
        assert!(envelope.clone().check().is_ok());
        let null_record: Envelope<String> =
            serde_json::from_value(json!({"code": 0, "record": null})).unwrap();
        assert!(null_record.into_record().is_err());
        assert_eq!(
            envelope.into_record().unwrap_err().message(),
            "response carried no record"
        );
    }
}
