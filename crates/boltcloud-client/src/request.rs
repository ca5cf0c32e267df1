use std::fmt::Write;
use std::ops::RangeInclusive;

use boltcloud::operation::{Channel, Operation};
use boltcloud::value::{ANALOG_PIN, Arg, DIGITAL_PINS, DIGITAL_STATES, Token};

use hashbrown::DefaultHashBuilder;

use indexmap::IndexMap;

use crate::config::{Config, Credentials, SERIAL_BAUD_RATE};
use crate::error::{Error, Result};

/// The values accepted by an analog write.
pub const ANALOG_VALUES: RangeInclusive<i64> = 0..=255;

/// The angles accepted by a servo write.
pub const SERVO_ANGLES: RangeInclusive<i64> = 0..=180;

/// The byte counts accepted by serial operations.
pub const SERIAL_TILL: RangeInclusive<i64> = 0..=127;

/// Query parameters of a request, kept in insertion order.
///
/// Values are rendered verbatim, without any percent-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams(IndexMap<&'static str, String, DefaultHashBuilder>);

impl Default for QueryParams {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, (name, value)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

impl QueryParams {
    /// Creates empty [`QueryParams`].
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self(IndexMap::with_hasher(DefaultHashBuilder::default()))
    }

    /// Adds a parameter.
    ///
    /// A parameter with the same name is overwritten in place.
    #[must_use]
    #[inline]
    pub fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        let _ = self.0.insert(name, value.to_string());
        self
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn integer_in(value: &Arg, range: &RangeInclusive<i64>) -> Option<i64> {
    value.as_integer().filter(|value| range.contains(value))
}

fn serial_till(pin: &Arg) -> Result<i64> {
    integer_in(pin, &SERIAL_TILL).ok_or_else(Error::invalid_input)
}

fn is_analog_pin(pin: &Arg) -> bool {
    pin.as_text() == Some(ANALOG_PIN)
}

// Read pins are sent in ascending order.
fn digital_pins(pin: &Arg) -> Result<QueryParams> {
    match pin {
        Arg::List(pins) => {
            let mut pins = pins.clone();
            pins.sort();
            Ok(QueryParams::new().param("pins", Arg::List(pins)))
        }
        Arg::Scalar(Token::Number(pin)) => Ok(QueryParams::new().param("pin", pin)),
        Arg::Scalar(Token::Text(_)) => Err(Error::invalid_input()),
    }
}

// Written pins keep the order given by the caller, so that each pin stays
// paired with its state.
fn digital_states(pin: &Arg, value: &Arg) -> Result<QueryParams> {
    match (pin, value) {
        (Arg::List(pins), Arg::List(states)) if pins.len() == states.len() => Ok(QueryParams::new()
            .param("pins", pin)
            .param("states", value.to_uppercase())),
        (Arg::Scalar(Token::Number(pin)), Arg::Scalar(Token::Text(state))) => Ok(QueryParams::new()
            .param("pin", pin)
            .param("state", state.to_uppercase())),
        _ => Err(Error::invalid_input()),
    }
}

/// A builder of request URLs for a single device.
///
/// Every URL has the form
/// `{base_url}{api_key}/{operation}?deviceName={device_name}&{params}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    base_url: String,
    credentials: Credentials,
}

impl RequestBuilder {
    /// Creates a [`RequestBuilder`] from a [`Config`].
    #[must_use]
    #[inline]
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            credentials: config.credentials.clone(),
        }
    }

    /// Builds the URL of a read [`Operation`].
    ///
    /// The rules are evaluated in order:
    ///
    /// 1. A digital read accepts a digital pin or a list of digital pins.
    ///    A list is sorted.
    /// 2. An analog read accepts only the `A0` pin.
    /// 3. A serial write sends the argument as data, as it is.
    /// 4. A serial read accepts a byte count in `[0, 128)`.
    ///
    /// # Errors
    ///
    /// An [`crate::error::ErrorKind::InvalidInput`] error is returned when a
    /// rule rejects the argument.
    /// An [`crate::error::ErrorKind::UnsupportedOperation`] error is returned
    /// when no rule applies, which includes a digital read with an
    /// invalid pin.
    pub fn read_url(&self, operation: Operation, pin: &Arg) -> Result<String> {
        let params = match operation.channel() {
            Some(Channel::Digital) if pin.is_valid(DIGITAL_PINS) => digital_pins(pin)?,
            Some(Channel::Analog) if is_analog_pin(pin) => {
                QueryParams::new().param("pin", ANALOG_PIN)
            }
            Some(Channel::Analog) => return Err(Error::invalid_input()),
            _ if operation == Operation::SerialWrite => QueryParams::new().param("data", pin),
            Some(Channel::Serial) => QueryParams::new().param("till", serial_till(pin)?),
            _ => return Err(Error::unsupported()),
        };

        Ok(self.url(operation, &params))
    }

    /// Builds the URL of a write [`Operation`].
    ///
    /// The rules are evaluated in order:
    ///
    /// 1. A digital write accepts a digital pin with a state, or two lists
    ///    of the same length. States are upper-cased, and the order of a
    ///    list is kept.
    /// 2. An analog write accepts the `A0` pin with a value in `[0, 255]`.
    /// 3. A serial write-read accepts a byte count in `[0, 128)` and sends
    ///    the value as data.
    /// 4. A servo write accepts a digital pin, or a list of them, with an
    ///    angle in `[0, 180]`.
    ///
    /// # Errors
    ///
    /// An [`crate::error::ErrorKind::InvalidInput`] error is returned when a
    /// rule rejects the arguments.
    /// An [`crate::error::ErrorKind::UnsupportedOperation`] error is returned
    /// when no rule applies, which includes a digital write with an
    /// invalid pin or state.
    pub fn write_url(&self, operation: Operation, pin: &Arg, value: &Arg) -> Result<String> {
        let params = match operation.channel() {
            Some(Channel::Digital)
                if pin.is_valid(DIGITAL_PINS) && value.is_valid(DIGITAL_STATES) =>
            {
                digital_states(pin, value)?
            }
            Some(Channel::Analog) => {
                let value = integer_in(value, &ANALOG_VALUES)
                    .filter(|_| is_analog_pin(pin))
                    .ok_or_else(Error::invalid_input)?;
                QueryParams::new()
                    .param("pin", ANALOG_PIN)
                    .param("value", value)
            }
            Some(Channel::Serial) => {
                let till = serial_till(pin)?;
                QueryParams::new().param("data", value).param("till", till)
            }
            Some(Channel::Servo) => {
                let angle = integer_in(value, &SERVO_ANGLES)
                    .filter(|_| pin.is_valid(DIGITAL_PINS))
                    .ok_or_else(Error::invalid_input)?;
                QueryParams::new().param("pin", pin).param("value", angle)
            }
            _ => return Err(Error::unsupported()),
        };

        Ok(self.url(operation, &params))
    }

    /// Builds the URL of an [`Operation`] which takes no pin or value.
    ///
    /// Opening the serial port always uses a baud rate of
    /// [`SERIAL_BAUD_RATE`].
    ///
    /// # Errors
    ///
    /// An [`crate::error::ErrorKind::UnsupportedOperation`] error is returned
    /// when the operation needs a pin or a value.
    pub fn fixed_url(&self, operation: Operation) -> Result<String> {
        if !operation.is_fixed() {
            return Err(Error::unsupported());
        }

        let params = match operation {
            Operation::SerialBegin => QueryParams::new().param("baud", SERIAL_BAUD_RATE),
            _ => QueryParams::new(),
        };

        Ok(self.url(operation, &params))
    }

    fn url(&self, operation: Operation, params: &QueryParams) -> String {
        let mut url = format!(
            "{}{}/{}",
            self.base_url,
            self.credentials.api_key(),
            operation
        );

        let mut separator = '?';
        if operation.targets_device() {
            let _ = write!(url, "?deviceName={}", self.credentials.device_name());
            separator = '&';
        }

        if !params.is_empty() {
            let _ = write!(url, "{separator}{params}");
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use boltcloud::operation::{ALL_OPERATIONS, Operation};
    use boltcloud::value::{Arg, Token};

    use crate::config::{Config, Credentials};
    use crate::error::{Error, ErrorKind};

    use super::{QueryParams, RequestBuilder};

    const BASE: &str = "https://cloud.boltiot.com/remote/K";

    fn builder() -> RequestBuilder {
        RequestBuilder::new(&Config::new(Credentials::new("K", "D")))
    }

    fn read(operation: Operation, pin: impl Into<Arg>) -> Result<String, Error> {
        builder().read_url(operation, &pin.into())
    }

    fn write(
        operation: Operation,
        pin: impl Into<Arg>,
        value: impl Into<Arg>,
    ) -> Result<String, Error> {
        builder().write_url(operation, &pin.into(), &value.into())
    }

    fn assert_invalid(result: Result<String, Error>) {
        assert_eq!(result, Err(Error::invalid_input()));
    }

    fn assert_unsupported(result: Result<String, Error>) {
        assert_eq!(result, Err(Error::unsupported()));
    }

    #[test]
    fn test_query_params() {
        let params = QueryParams::new()
            .param("pins", "2,1")
            .param("states", "LOW,HIGH")
            .param("pins", "4");

        assert_eq!(params.to_string(), "pins=4&states=LOW,HIGH");
        assert_eq!(params.get("states"), Some("LOW,HIGH"));
        assert_eq!(params.get("till"), None);
        assert!(QueryParams::default().is_empty());
        assert_eq!(QueryParams::new().to_string(), "");
    }

    #[test]
    fn test_digital_write_all_pins_and_states() {
        for pin in 0..5 {
            for (state, expected) in [
                ("high", "HIGH"),
                ("HIGH", "HIGH"),
                ("High", "HIGH"),
                ("low", "LOW"),
                ("LOW", "LOW"),
                ("lOW", "LOW"),
            ] {
                assert_eq!(
                    write(Operation::DigitalWrite, pin, state),
                    Ok(format!(
                        "{BASE}/digitalWrite?deviceName=D&pin={pin}&state={expected}"
                    ))
                );
            }
        }
    }

    #[test]
    fn test_digital_write_example() {
        assert_eq!(
            write(Operation::DigitalWrite, 1, "HIGH").unwrap(),
            "https://cloud.boltiot.com/remote/K/digitalWrite?deviceName=D&pin=1&state=HIGH"
        );
    }

    #[test]
    fn test_digital_write_invalid_pin_or_state() {
        // Invalid inputs never reach a digital rule.
        assert_unsupported(write(Operation::DigitalWrite, 5, "high"));
        assert_unsupported(write(Operation::DigitalWrite, -1, "low"));
        assert_unsupported(write(Operation::DigitalWrite, "1", "low"));
        assert_unsupported(write(Operation::DigitalWrite, 1, "on"));
        assert_unsupported(write(Operation::DigitalWrite, 1, 1));
        assert_unsupported(write(Operation::DigitalMultiWrite, [1, 9], ["low", "high"]));
        assert_unsupported(write(Operation::DigitalMultiWrite, Vec::<i32>::new(), Vec::<&str>::new()));
    }

    #[test]
    fn test_digital_multi_write() {
        assert_eq!(
            write(Operation::DigitalMultiWrite, [2, 1], ["low", "high"]).unwrap(),
            format!("{BASE}/digitalMultiWrite?deviceName=D&pins=2,1&states=LOW,HIGH")
        );

        // Mismatched arity.
        assert_invalid(write(Operation::DigitalMultiWrite, [2, 1], ["low"]));
        assert_invalid(write(Operation::DigitalMultiWrite, [2], ["low", "high"]));
        assert_invalid(write(Operation::DigitalMultiWrite, [2, 1], "low"));
        assert_invalid(write(Operation::DigitalWrite, 2, ["low"]));
    }

    #[test]
    fn test_digital_read() {
        assert_eq!(
            read(Operation::DigitalRead, 3).unwrap(),
            format!("{BASE}/digitalRead?deviceName=D&pin=3")
        );

        // Read pins are sorted.
        assert_eq!(
            read(Operation::DigitalMultiRead, [4, 0, 2]).unwrap(),
            format!("{BASE}/digitalMultiRead?deviceName=D&pins=0,2,4")
        );

        assert_unsupported(read(Operation::DigitalRead, 5));
        assert_unsupported(read(Operation::DigitalRead, "A0"));
        assert_unsupported(read(Operation::DigitalMultiRead, [0, 5]));
        assert_unsupported(read(Operation::DigitalMultiRead, Vec::<i32>::new()));
    }

    #[test]
    fn test_analog_read() {
        assert_eq!(
            read(Operation::AnalogRead, "A0").unwrap(),
            format!("{BASE}/analogRead?deviceName=D&pin=A0")
        );

        // The builder is case-sensitive.
        assert_invalid(read(Operation::AnalogRead, "a0"));
        assert_invalid(read(Operation::AnalogRead, "A1"));
        assert_invalid(read(Operation::AnalogRead, 0));
    }

    #[test]
    fn test_analog_write_bounds() {
        for value in [0, 128, 255] {
            assert_eq!(
                write(Operation::AnalogWrite, "A0", value).unwrap(),
                format!("{BASE}/analogWrite?deviceName=D&pin=A0&value={value}")
            );
        }

        assert_invalid(write(Operation::AnalogWrite, "A0", -1));
        assert_invalid(write(Operation::AnalogWrite, "A0", 256));
        assert_invalid(write(Operation::AnalogWrite, "A1", 10));
        assert_invalid(write(Operation::AnalogWrite, "A0", "bright"));
        assert_invalid(write(Operation::AnalogWrite, "A0", [1, 2]));
    }

    #[test]
    fn test_servo_write_bounds() {
        for pin in 0..5 {
            for angle in [0, 90, 180] {
                assert_eq!(
                    write(Operation::ServoWrite, pin, angle).unwrap(),
                    format!("{BASE}/servoWrite?deviceName=D&pin={pin}&value={angle}")
                );
            }
        }

        assert_invalid(write(Operation::ServoWrite, 1, 181));
        assert_invalid(write(Operation::ServoWrite, 1, -1));
        assert_invalid(write(Operation::ServoWrite, 5, 90));
        assert_invalid(write(Operation::ServoWrite, [1, 5], 90));

        assert_eq!(
            write(Operation::ServoWrite, [1, 2], 90).unwrap(),
            format!("{BASE}/servoWrite?deviceName=D&pin=1,2&value=90")
        );
    }

    #[test]
    fn test_serial_read_bounds() {
        for till in [0, 64, 127] {
            assert_eq!(
                read(Operation::SerialRead, till).unwrap(),
                format!("{BASE}/serialRead?deviceName=D&till={till}")
            );
        }

        assert_invalid(read(Operation::SerialRead, 128));
        assert_invalid(read(Operation::SerialRead, -1));
        assert_invalid(read(Operation::SerialRead, "lots"));
        assert_invalid(read(Operation::SerialRead, [1]));
    }

    #[test]
    fn test_serial_write_skips_range_check() {
        assert_eq!(
            read(Operation::SerialWrite, "hello").unwrap(),
            format!("{BASE}/serialWrite?deviceName=D&data=hello")
        );
        assert_eq!(
            read(Operation::SerialWrite, 500).unwrap(),
            format!("{BASE}/serialWrite?deviceName=D&data=500")
        );
    }

    #[test]
    fn test_serial_write_read_bounds() {
        assert_eq!(
            write(Operation::SerialWriteRead, 127, "ping").unwrap(),
            format!("{BASE}/serialWR?deviceName=D&data=ping&till=127")
        );
        assert_eq!(
            write(Operation::SerialWriteRead, 0, 42).unwrap(),
            format!("{BASE}/serialWR?deviceName=D&data=42&till=0")
        );

        assert_invalid(write(Operation::SerialWriteRead, 128, "ping"));
        assert_invalid(write(Operation::SerialWriteRead, -1, "ping"));
    }

    #[test]
    fn test_fixed_templates() {
        let builder = builder();

        assert_eq!(
            builder.fixed_url(Operation::SerialBegin).unwrap(),
            format!("{BASE}/serialBegin?deviceName=D&baud=9600")
        );
        assert_eq!(
            builder.fixed_url(Operation::FetchData).unwrap(),
            format!("{BASE}/fetchData?deviceName=D")
        );
        assert_eq!(
            builder.fixed_url(Operation::Version).unwrap(),
            format!("{BASE}/version?deviceName=D")
        );
        assert_eq!(
            builder.fixed_url(Operation::IsOnline).unwrap(),
            format!("{BASE}/isOnline?deviceName=D")
        );
        assert_eq!(
            builder.fixed_url(Operation::Restart).unwrap(),
            format!("{BASE}/restart?deviceName=D")
        );
        assert_eq!(
            builder.fixed_url(Operation::GetDevices).unwrap(),
            format!("{BASE}/getDevices")
        );

        assert_unsupported(builder.fixed_url(Operation::DigitalWrite));

        for &operation in ALL_OPERATIONS {
            assert_eq!(builder.fixed_url(operation).is_ok(), operation.is_fixed());
        }
    }

    #[test]
    fn test_unsupported_operations() {
        assert_unsupported(read(Operation::ServoWrite, 1));
        assert_unsupported(read(Operation::Version, 1));
        assert_unsupported(write(Operation::Restart, 1, 1));

        let error = read(Operation::IsOnline, 1).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedOperation);
        assert_eq!(error.message(), "Input value is not valid or not allowed");
    }

    #[test]
    fn test_injected_base_url() {
        let config = Config::new(Credentials::new("key", "BOLT42")).base_url("http://127.0.0.1:3000/remote");
        let builder = RequestBuilder::new(&config);

        assert_eq!(
            builder
                .read_url(Operation::DigitalRead, &Arg::Scalar(Token::Number(0)))
                .unwrap(),
            "http://127.0.0.1:3000/remote/key/digitalRead?deviceName=BOLT42&pin=0"
        );
    }
}
