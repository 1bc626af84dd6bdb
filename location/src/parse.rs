//! Map view validation.
//!
//! DESIGN
//! ======
//! Parsers operate on `serde_json::Value` rather than typed structs so a
//! wrong type in any field maps to a specific [`ValidationError`] instead of
//! a generic serde message. Checks run in a fixed order: object shape,
//! latitude, longitude, zoom.
//!
//! Publish bodies arrive either as JSON or as a browser form post
//! (`location[latitude]=45.0&location[longitude]=-93.5&zoom=10`). Form
//! bodies are folded into the same JSON shape first, so both encodings go
//! through one set of checks.

use serde_json::{Map, Value};

use crate::view::{Location, MapView};

/// Reason a payload was rejected. No partial [`MapView`] is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The body could not be decoded in its declared encoding.
    #[error("payload could not be decoded")]
    Malformed,
    /// The payload was valid JSON but not an object.
    #[error("payload is not an object")]
    NotAnObject,
    /// `location` was absent or not an object.
    #[error("missing `location` object")]
    MissingLocation,
    #[error("`location.latitude` is missing or not a number")]
    InvalidLatitude,
    #[error("`location.longitude` is missing or not a number")]
    InvalidLongitude,
    #[error("`zoom` is not an integer")]
    InvalidZoom,
}

/// Parse a publish payload whose numbers are carried as strings.
///
/// Accepts `{"location":{"latitude":"45.0","longitude":"-93.5"},"zoom":"10"}`
/// where `zoom` may also be `null` or absent.
///
/// # Errors
///
/// Returns the first failing check as a [`ValidationError`].
pub fn parse_map_view(raw: &Value) -> Result<MapView, ValidationError> {
    let (location, zoom) = split_payload(raw)?;

    let latitude = location
        .get("latitude")
        .and_then(parse_coordinate_str)
        .ok_or(ValidationError::InvalidLatitude)?;
    let longitude = location
        .get("longitude")
        .and_then(parse_coordinate_str)
        .ok_or(ValidationError::InvalidLongitude)?;
    let zoom = match zoom {
        None | Some(Value::Null) => None,
        Some(value) => Some(parse_zoom_str(value).ok_or(ValidationError::InvalidZoom)?),
    };

    Ok(MapView { location: Location { latitude, longitude }, zoom })
}

/// How a publish body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Json,
    /// `application/x-www-form-urlencoded` with bracketed nested keys.
    Form,
}

impl BodyEncoding {
    const FORM_MIME: &'static str = "application/x-www-form-urlencoded";

    /// Pick the encoding from a `Content-Type` header value. Anything other
    /// than a form post is treated as JSON.
    #[must_use]
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let mime = content_type
            .and_then(|value| value.split(';').next())
            .map(str::trim)
            .unwrap_or_default();
        if mime.eq_ignore_ascii_case(Self::FORM_MIME) { Self::Form } else { Self::Json }
    }
}

/// Decode a raw JSON request body and run it through [`parse_map_view`].
///
/// # Errors
///
/// Returns [`ValidationError::Malformed`] for non-JSON bodies, otherwise the
/// error from [`parse_map_view`].
pub fn parse_map_view_bytes(body: &[u8]) -> Result<MapView, ValidationError> {
    parse_map_view_body(body, BodyEncoding::Json)
}

/// Decode a raw request body in `encoding` and run it through
/// [`parse_map_view`].
///
/// # Errors
///
/// Returns [`ValidationError::Malformed`] if the body cannot be decoded,
/// otherwise the error from [`parse_map_view`].
pub fn parse_map_view_body(body: &[u8], encoding: BodyEncoding) -> Result<MapView, ValidationError> {
    let raw = match encoding {
        BodyEncoding::Json => serde_json::from_slice(body).map_err(|_| ValidationError::Malformed)?,
        BodyEncoding::Form => {
            let pairs: Vec<(String, String)> =
                serde_urlencoded::from_bytes(body).map_err(|_| ValidationError::Malformed)?;
            form_to_value(pairs)
        }
    };
    parse_map_view(&raw)
}

/// Check a fetch response whose numbers are native JSON numbers.
///
/// Used by viewers before a received view is applied to a map.
///
/// # Errors
///
/// Returns the first failing check as a [`ValidationError`].
pub fn parse_map_view_response(raw: &Value) -> Result<MapView, ValidationError> {
    let (location, zoom) = split_payload(raw)?;

    let latitude = location
        .get("latitude")
        .and_then(Value::as_f64)
        .ok_or(ValidationError::InvalidLatitude)?;
    let longitude = location
        .get("longitude")
        .and_then(Value::as_f64)
        .ok_or(ValidationError::InvalidLongitude)?;
    let zoom = match zoom {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            value
                .as_i64()
                .and_then(|z| i32::try_from(z).ok())
                .ok_or(ValidationError::InvalidZoom)?,
        ),
    };

    Ok(MapView { location: Location { latitude, longitude }, zoom })
}

/// Fold `outer[inner]=v` pairs into `{"outer":{"inner":"v"}}`. Plain keys
/// become top-level strings. A later plain key replaces an earlier nested
/// object and vice versa.
fn form_to_value(pairs: Vec<(String, String)>) -> Value {
    let mut root = Map::new();
    for (key, value) in pairs {
        match split_bracket_key(&key) {
            Some((outer, inner)) => {
                let entry = root
                    .entry(outer.to_owned())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !entry.is_object() {
                    *entry = Value::Object(Map::new());
                }
                if let Value::Object(nested) = entry {
                    nested.insert(inner.to_owned(), Value::String(value));
                }
            }
            None => {
                root.insert(key, Value::String(value));
            }
        }
    }
    Value::Object(root)
}

fn split_bracket_key(key: &str) -> Option<(&str, &str)> {
    let (outer, rest) = key.split_once('[')?;
    let inner = rest.strip_suffix(']')?;
    (!outer.is_empty() && !inner.contains(['[', ']'])).then_some((outer, inner))
}

fn split_payload(raw: &Value) -> Result<(&Map<String, Value>, Option<&Value>), ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::NotAnObject)?;
    let location = object
        .get("location")
        .and_then(Value::as_object)
        .ok_or(ValidationError::MissingLocation)?;
    Ok((location, object.get("zoom")))
}

fn parse_coordinate_str(value: &Value) -> Option<f64> {
    let parsed = value.as_str()?.trim().parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

fn parse_zoom_str(value: &Value) -> Option<i32> {
    value.as_str()?.trim().parse::<i32>().ok()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
