use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::Serialize;

/// All digital pins of a device.
///
/// Servo motors are attached to the same pins.
pub const DIGITAL_PINS: &[Allowed] = &[
    Allowed::Number(0),
    Allowed::Number(1),
    Allowed::Number(2),
    Allowed::Number(3),
    Allowed::Number(4),
];

/// All states a digital pin can be driven to.
///
/// States are compared case-insensitively.
pub const DIGITAL_STATES: &[Allowed] = &[Allowed::Text("high"), Allowed::Text("low")];

/// The only analog pin of a device.
pub const ANALOG_PIN: &str = "A0";

/// An element of a fixed set of accepted values.
///
/// Text elements are always written in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allowed {
    /// An accepted integer.
    Number(i64),
    /// An accepted lowercase text.
    Text(&'static str),
}

/// A scalar argument, either an integer or a text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[serde(untagged)]
pub enum Token {
    /// An integer.
    Number(i64),
    /// A text.
    Text(String),
}

impl Token {
    /// Checks whether a [`Token`] belongs to the given set.
    ///
    /// Integers are compared as they are, texts are lower-cased first.
    #[must_use]
    pub fn is_allowed(&self, allowed: &[Allowed]) -> bool {
        match self {
            Self::Number(number) => allowed.contains(&Allowed::Number(*number)),
            Self::Text(text) => {
                let text = text.to_lowercase();
                allowed
                    .iter()
                    .any(|value| matches!(value, Allowed::Text(allowed) if *allowed == text))
            }
        }
    }

    /// Returns the integer held by a [`Token`].
    ///
    /// A text holding an integer, surrounding whitespace aside, is
    /// converted as well.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    fn to_uppercase(&self) -> Self {
        match self {
            Self::Number(number) => Self::Number(*number),
            Self::Text(text) => Self::Text(text.to_uppercase()),
        }
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Number(number) => number.fmt(f),
            Self::Text(text) => text.fmt(f),
        }
    }
}

macro_rules! integer_token {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Token {
                fn from(value: $ty) -> Self {
                    Self::Number(i64::from(value))
                }
            }

            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Token::from(value))
                }
            }
        )+
    };
}

integer_token!(i8, i16, i32, i64, u8, u16, u32);

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A pin or value argument of an operation.
///
/// Depending on the operation, the same position may receive a single
/// pin or a list of pins, an integer or a text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[serde(untagged)]
pub enum Arg {
    /// A single token.
    Scalar(Token),
    /// An ordered list of tokens.
    List(Vec<Token>),
}

impl Arg {
    /// Checks whether an [`Arg`] belongs to the given set.
    ///
    /// A scalar must be a member of the set. A list must be non-empty and
    /// each of its elements must be a member of the set.
    #[must_use]
    pub fn is_valid(&self, allowed: &[Allowed]) -> bool {
        is_valid_value(self, allowed)
    }

    /// Returns the integer held by a scalar [`Arg`].
    ///
    /// A list never holds an integer.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Scalar(token) => token.as_integer(),
            Self::List(_) => None,
        }
    }

    /// Returns the text held by a scalar [`Arg`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Scalar(Token::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns the tokens of an [`Arg`].
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        match self {
            Self::Scalar(token) => core::slice::from_ref(token),
            Self::List(tokens) => tokens,
        }
    }

    /// Whether an [`Arg`] is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns a copy of an [`Arg`] with all its texts in uppercase.
    #[must_use]
    pub fn to_uppercase(&self) -> Self {
        match self {
            Self::Scalar(token) => Self::Scalar(token.to_uppercase()),
            Self::List(tokens) => Self::List(tokens.iter().map(Token::to_uppercase).collect()),
        }
    }

    /// Converts a scalar text starting with an integer into that integer.
    ///
    /// Leading whitespace and a sign are accepted, and everything after the
    /// digits is ignored, so `"12.7"` becomes `12` and `"90deg"` becomes `90`.
    /// Any other [`Arg`] is returned unchanged.
    #[must_use]
    pub fn to_integer(self) -> Self {
        if let Self::Scalar(Token::Text(text)) = &self
            && let Some(number) = leading_integer(text)
        {
            return Self::Scalar(Token::Number(number));
        }
        self
    }
}

// Parses the integer prefix of a text, after optional whitespace and sign.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits_len = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    text[..sign_len + digits_len].parse().ok()
}

impl core::fmt::Display for Arg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Scalar(token) => token.fmt(f),
            Self::List(tokens) => {
                for (index, token) in tokens.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    token.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}

impl From<Token> for Arg {
    fn from(value: Token) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Scalar(Token::from(value))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Scalar(Token::from(value))
    }
}

impl<T: Into<Token>> From<Vec<T>> for Arg {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Token>, const N: usize> From<[T; N]> for Arg {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Token>> From<&[T]> for Arg {
    fn from(values: &[T]) -> Self {
        Self::List(values.iter().cloned().map(Into::into).collect())
    }
}

/// Checks whether a value belongs to the given set of accepted values.
///
/// - An integer must be a member of the set.
/// - A text must be a member of the set once lower-cased.
/// - A list must be non-empty, and each of its elements must satisfy the
///   rule for its own type.
#[must_use]
pub fn is_valid_value(value: &Arg, allowed: &[Allowed]) -> bool {
    match value {
        Arg::Scalar(token) => token.is_allowed(allowed),
        Arg::List(tokens) => {
            !tokens.is_empty() && tokens.iter().all(|token| token.is_allowed(allowed))
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{
        ANALOG_PIN, Allowed, Arg, DIGITAL_PINS, DIGITAL_STATES, Token, is_valid_value,
    };

    #[test]
    fn test_numeric_membership() {
        for pin in 0..5 {
            assert!(is_valid_value(&Arg::from(pin), DIGITAL_PINS));
        }

        assert!(!is_valid_value(&Arg::from(5), DIGITAL_PINS));
        assert!(!is_valid_value(&Arg::from(-1), DIGITAL_PINS));

        // A text holding a pin is not a pin.
        assert!(!is_valid_value(&Arg::from("1"), DIGITAL_PINS));
    }

    #[test]
    fn test_text_membership() {
        for state in ["high", "HIGH", "High", "low", "LOW", "lOw"] {
            assert!(is_valid_value(&Arg::from(state), DIGITAL_STATES));
        }

        assert!(!is_valid_value(&Arg::from("on"), DIGITAL_STATES));
        assert!(!is_valid_value(&Arg::from(""), DIGITAL_STATES));
        assert!(!is_valid_value(&Arg::from(1), DIGITAL_STATES));
    }

    #[test]
    fn test_list_membership() {
        assert!(is_valid_value(&Arg::from([4, 0, 2]), DIGITAL_PINS));
        assert!(is_valid_value(&Arg::from(["HIGH", "low"]), DIGITAL_STATES));

        // One element out of the set.
        assert!(!is_valid_value(&Arg::from([1, 7]), DIGITAL_PINS));
        assert!(!is_valid_value(&Arg::from(["high", "off"]), DIGITAL_STATES));

        // Mixed element types.
        let mixed = Arg::List(vec![Token::Number(1), Token::Text("2".to_string())]);
        assert!(!is_valid_value(&mixed, DIGITAL_PINS));

        let mixed = Arg::List(vec![Token::Number(1), Token::Text("high".to_string())]);
        let allowed = [Allowed::Number(1), Allowed::Text("high")];
        assert!(is_valid_value(&mixed, &allowed));

        // Empty list.
        assert!(!is_valid_value(&Arg::List(Vec::new()), DIGITAL_PINS));
    }

    #[test]
    fn test_integer_helpers() {
        assert_eq!(Arg::from(127).as_integer(), Some(127));
        assert_eq!(Arg::from(" 42 ").as_integer(), Some(42));
        assert_eq!(Arg::from("4x").as_integer(), None);
        assert_eq!(Arg::from([1, 2]).as_integer(), None);

        assert_eq!(Arg::from("180").to_integer(), Arg::from(180));
        assert_eq!(Arg::from("angle").to_integer(), Arg::from("angle"));
        assert_eq!(Arg::from(["1"]).to_integer(), Arg::from(["1"]));
    }

    #[test]
    fn test_integer_prefix() {
        assert_eq!(Arg::from("12.7").to_integer(), Arg::from(12));
        assert_eq!(Arg::from("90deg").to_integer(), Arg::from(90));
        assert_eq!(Arg::from("  -3 ").to_integer(), Arg::from(-3));
        assert_eq!(Arg::from("+7").to_integer(), Arg::from(7));
        assert_eq!(Arg::from("-").to_integer(), Arg::from("-"));
        assert_eq!(Arg::from("deg90").to_integer(), Arg::from("deg90"));
    }

    #[test]
    fn test_text_helpers() {
        assert_eq!(Arg::from("a0").to_uppercase().as_text(), Some(ANALOG_PIN));
        assert_eq!(
            Arg::from(["high", "Low"]).to_uppercase(),
            Arg::from(["HIGH", "LOW"])
        );
        assert_eq!(Arg::from(3).to_uppercase(), Arg::from(3));
        assert_eq!(Arg::from(3).as_text(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Arg::from(3).to_string(), "3");
        assert_eq!(Arg::from("hello").to_string(), "hello");
        assert_eq!(Arg::from([2, 1, 4]).to_string(), "2,1,4");
        assert_eq!(Arg::from(vec!["a", "b"]).to_string(), "a,b");
        assert_eq!(Arg::List(Vec::new()).to_string(), "");
    }

    #[test]
    fn test_conversions() {
        let pins: &[u8] = &[0, 3];
        assert_eq!(
            Arg::from(pins),
            Arg::List(vec![Token::Number(0), Token::Number(3)])
        );
        assert_eq!(Arg::from(2u8).tokens(), &[Token::Number(2)]);
        assert!(Arg::from([1]).is_list());
        assert!(!Arg::from(1).is_list());
    }

    #[cfg(feature = "deserialize")]
    #[test]
    fn test_serde() {
        use crate::{deserialize, serialize};

        let value = serde_json::Value::Array(vec![
            serde_json::Value::from(1),
            serde_json::Value::from("high"),
        ]);
        assert_eq!(
            deserialize::<Arg>(value.clone()),
            Arg::List(vec![Token::Number(1), Token::Text("high".to_string())])
        );
        assert_eq!(serialize(deserialize::<Arg>(value.clone())), value);
        assert_eq!(
            deserialize::<Arg>(serde_json::Value::from("A0")),
            Arg::from(ANALOG_PIN)
        );
    }
}
