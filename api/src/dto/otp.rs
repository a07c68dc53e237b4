//! Request bodies for the passcode endpoints
//!
//! Missing fields, and fields that are not JSON strings, deserialize to empty
//! strings so that the body is rejected by the format checks with the usual
//! message rather than as a malformed request.

use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendOtpRequest {
    /// Phone number in the configured format (bare digits or E.164)
    #[serde(rename = "phoneNumber", default, deserialize_with = "string_or_empty")]
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(rename = "phoneNumber", default, deserialize_with = "string_or_empty")]
    pub phone_number: String,

    /// 6-digit passcode
    #[serde(default, deserialize_with = "string_or_empty")]
    pub otp: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringField {
    Text(String),
    Other(IgnoredAny),
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringField::deserialize(deserializer)? {
        StringField::Text(text) => text,
        StringField::Other(_) => String::new(),
    })
}
