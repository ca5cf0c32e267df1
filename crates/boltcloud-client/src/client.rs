use boltcloud::operation::Operation;
use boltcloud::response::Response;
use boltcloud::value::{ANALOG_PIN, Arg};

use reqwest::Client;

use tracing::{debug, warn};

use crate::config::{Config, Credentials};
use crate::error::Result;
use crate::request::RequestBuilder;
use crate::response::fetch;

/// A client controlling a single device through the Bolt cloud.
///
/// Every operation:
///
/// - Validates its arguments and builds the request URL. Invalid arguments
///   are reported as a failed [`Response`] without touching the network.
/// - Sends exactly one `GET` request and waits for its answer.
/// - Returns the JSON body sent by the cloud as it is, or a failed
///   [`Response`] when the request does not succeed.
///
/// A client holds no mutable state, so operations can be run concurrently
/// from a shared reference.
#[derive(Debug, Clone)]
pub struct BoltClient {
    config: Config,
    builder: RequestBuilder,
    http: Client,
}

impl BoltClient {
    /// Creates a [`BoltClient`] for the given API key and device name,
    /// pointing to the Bolt cloud.
    #[must_use]
    #[inline]
    pub fn new(api_key: impl Into<String>, device_name: impl Into<String>) -> Self {
        Self::with_config(Config::new(Credentials::new(api_key, device_name)))
    }

    /// Creates a [`BoltClient`] from a [`Config`].
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let http = config.http_client.clone().unwrap_or_default();
        let builder = RequestBuilder::new(&config);
        Self {
            config,
            builder,
            http,
        }
    }

    /// Returns the [`Config`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the [`Credentials`].
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.config.credentials
    }

    /// Returns the [`RequestBuilder`] used to build request URLs.
    #[must_use]
    pub const fn request_builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Reads a digital pin.
    ///
    /// A list of pins is accepted as well.
    pub async fn digital_read(&self, pin: impl Into<Arg>) -> Response {
        self.read(Operation::DigitalRead, pin.into()).await
    }

    /// Reads a list of digital pins.
    ///
    /// Pins are sent in ascending order.
    pub async fn digital_multi_read(&self, pins: impl Into<Arg>) -> Response {
        self.read(Operation::DigitalMultiRead, pins.into()).await
    }

    /// Drives a digital pin to a `high` or `low` state.
    ///
    /// The state is case-insensitive.
    pub async fn digital_write(&self, pin: impl Into<Arg>, state: impl Into<Arg>) -> Response {
        self.write(Operation::DigitalWrite, pin.into(), state.into())
            .await
    }

    /// Drives a list of digital pins, each one to the state at the same
    /// position in the list of states.
    ///
    /// Both lists must have the same length.
    pub async fn digital_multi_write(
        &self,
        pins: impl Into<Arg>,
        states: impl Into<Arg>,
    ) -> Response {
        self.write(Operation::DigitalMultiWrite, pins.into(), states.into())
            .await
    }

    /// Reads the analog pin.
    ///
    /// The only accepted pin is [`boltcloud::value::ANALOG_PIN`], in any case.
    pub async fn analog_read(&self, pin: impl Into<Arg>) -> Response {
        let pin: Arg = pin.into();
        self.read(Operation::AnalogRead, pin.to_uppercase()).await
    }

    /// Reads the [`boltcloud::value::ANALOG_PIN`] analog pin.
    pub async fn analog_read_default(&self) -> Response {
        self.analog_read(ANALOG_PIN).await
    }

    /// Writes a value in `[0, 255]` on the analog pin.
    ///
    /// The value may also be given as a text starting with an integer.
    pub async fn analog_write(&self, pin: impl Into<Arg>, value: impl Into<Arg>) -> Response {
        let pin: Arg = pin.into();
        let value: Arg = value.into();
        self.write(Operation::AnalogWrite, pin.to_uppercase(), value.to_integer())
            .await
    }

    /// Opens the serial port of the device.
    pub async fn serial_begin(&self) -> Response {
        self.fixed(Operation::SerialBegin).await
    }

    /// Reads up to `till` bytes from the serial port, with `till` in
    /// `[0, 128)`.
    pub async fn serial_read(&self, till: impl Into<Arg>) -> Response {
        self.read(Operation::SerialRead, till.into()).await
    }

    /// Writes data on the serial port.
    pub async fn serial_write(&self, data: impl Into<Arg>) -> Response {
        self.read(Operation::SerialWrite, data.into()).await
    }

    /// Writes data on the serial port, then reads up to `till` bytes.
    pub async fn serial_write_read(&self, till: impl Into<Arg>, data: impl Into<Arg>) -> Response {
        self.write(Operation::SerialWriteRead, till.into(), data.into())
            .await
    }

    /// Moves the servo attached to a digital pin, or to each pin of a list,
    /// to an angle in `[0, 180]`.
    ///
    /// The angle may also be given as a text starting with an integer.
    pub async fn servo_write(&self, pin: impl Into<Arg>, angle: impl Into<Arg>) -> Response {
        let angle: Arg = angle.into();
        self.write(Operation::ServoWrite, pin.into(), angle.to_integer())
            .await
    }

    /// Retrieves the historical data of the device.
    pub async fn historical_data(&self) -> Response {
        self.fixed(Operation::FetchData).await
    }

    /// Retrieves the hardware and firmware version of the device.
    pub async fn version(&self) -> Response {
        self.fixed(Operation::Version).await
    }

    /// Checks whether the device is online.
    pub async fn device_status(&self) -> Response {
        self.fixed(Operation::IsOnline).await
    }

    /// Restarts the device.
    pub async fn restart_device(&self) -> Response {
        self.fixed(Operation::Restart).await
    }

    /// Lists all devices registered under the API key.
    pub async fn device_list(&self) -> Response {
        self.fixed(Operation::GetDevices).await
    }

    async fn read(&self, operation: Operation, pin: Arg) -> Response {
        self.send(operation, self.builder.read_url(operation, &pin))
            .await
    }

    async fn write(&self, operation: Operation, pin: Arg, value: Arg) -> Response {
        self.send(operation, self.builder.write_url(operation, &pin, &value))
            .await
    }

    async fn fixed(&self, operation: Operation) -> Response {
        self.send(operation, self.builder.fixed_url(operation))
            .await
    }

    async fn send(&self, operation: Operation, url: Result<String>) -> Response {
        let url = match url {
            Ok(url) => url,
            Err(e) => {
                warn!("The `{operation}` request is not sent: {e}");
                return e.into_response();
            }
        };

        debug!(
            "Sending `{operation}` request for device `{}`",
            self.config.credentials.device_name()
        );

        fetch(&self.http, &url).await
    }
}
