use alloc::string::String;

use serde::Serialize;
use serde::de::DeserializeOwned;

use serde_json::{Map, Value};

/// The field carrying the payload of a [`Response`].
pub const VALUE_FIELD: &str = "value";

/// The field carrying the outcome of a [`Response`].
pub const SUCCESS_FIELD: &str = "success";

/// A JSON envelope returned by the cloud.
///
/// Successful bodies are kept exactly as the cloud sent them. The cloud
/// always includes a `value` and a `success` field, and it may add others
/// depending on the operation.
///
/// Failures produced locally share the same shape:
///
/// ```json
/// { "value": "<message>", "success": 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[serde(transparent)]
pub struct Response(Value);

impl Response {
    /// Creates a [`Response`] from a decoded JSON body.
    #[must_use]
    pub const fn new(body: Value) -> Self {
        Self(body)
    }

    /// Creates a failed [`Response`] carrying the given message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        let body: Map<String, Value> = [
            (String::from(VALUE_FIELD), Value::String(message.into())),
            (String::from(SUCCESS_FIELD), Value::from(0)),
        ]
        .into_iter()
        .collect();

        Self(Value::Object(body))
    }

    /// Whether a [`Response`] reports a success.
    ///
    /// The cloud encodes the outcome either as a number or as a text,
    /// so a non-zero number, `true`, or a text holding a non-zero integer
    /// are all successes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self.0.get(SUCCESS_FIELD) {
            Some(Value::Number(number)) => number.as_f64().is_some_and(|number| number != 0.0),
            Some(Value::Bool(success)) => *success,
            Some(Value::String(text)) => {
                let text = text.trim();
                text.eq_ignore_ascii_case("true")
                    || text.parse::<i64>().is_ok_and(|number| number != 0)
            }
            _ => false,
        }
    }

    /// Returns the `value` field of a [`Response`].
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.0.get(VALUE_FIELD)
    }

    /// Returns the `value` field of a [`Response`] when it is a text.
    ///
    /// Failure messages are always texts.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }

    /// Returns the whole JSON body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.0
    }

    /// Consumes a [`Response`] and returns its JSON body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.0
    }

    /// Parses the whole JSON body into the given type.
    ///
    /// # Errors
    ///
    /// If the body does not match the layout of the given type, a
    /// parsing error is returned.
    pub fn parse<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.0)
    }

    /// Parses the `value` field into the given type.
    ///
    /// A missing `value` field is parsed as `null`.
    ///
    /// # Errors
    ///
    /// If the field does not match the layout of the given type, a
    /// parsing error is returned.
    pub fn parse_value<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        match self.value() {
            Some(value) => T::deserialize(value),
            None => T::deserialize(Value::Null),
        }
    }
}

impl From<Value> for Response {
    fn from(body: Value) -> Self {
        Self::new(body)
    }
}

impl core::fmt::Display for Response {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}
