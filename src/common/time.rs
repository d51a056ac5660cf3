use chrono::{SecondsFormat, Utc};

/// Get the current UTC time as an RFC 3339 string with a `Z` suffix.
///
/// This is the representation Firestore expects in `timestampValue` fields.
pub fn utc_now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
