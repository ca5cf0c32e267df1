use serde::Serialize;

/// All [`Operation`]s.
pub const ALL_OPERATIONS: &[Operation] = &[
    Operation::DigitalRead,
    Operation::DigitalMultiRead,
    Operation::DigitalWrite,
    Operation::DigitalMultiWrite,
    Operation::AnalogRead,
    Operation::AnalogWrite,
    Operation::SerialBegin,
    Operation::SerialRead,
    Operation::SerialWrite,
    Operation::SerialWriteRead,
    Operation::ServoWrite,
    Operation::FetchData,
    Operation::Version,
    Operation::IsOnline,
    Operation::Restart,
    Operation::GetDevices,
];

/// The kind of device channel an [`Operation`] acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Digital pins, driven high or low.
    Digital,
    /// The analog pin, read as a level or written as a PWM duty.
    Analog,
    /// The serial port.
    Serial,
    /// Servo motors attached to a digital pin.
    Servo,
}

impl Channel {
    /// Returns a [`Channel`] name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Digital => "digital",
            Self::Analog => "analog",
            Self::Serial => "serial",
            Self::Servo => "servo",
        }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.name().fmt(f)
    }
}

/// A remote operation exposed by the cloud.
///
/// The serialized form of each variant is the name used in the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub enum Operation {
    /// Reads one digital pin.
    #[serde(rename = "digitalRead")]
    DigitalRead,
    /// Reads several digital pins at once.
    #[serde(rename = "digitalMultiRead")]
    DigitalMultiRead,
    /// Drives one digital pin high or low.
    #[serde(rename = "digitalWrite")]
    DigitalWrite,
    /// Drives several digital pins at once.
    #[serde(rename = "digitalMultiWrite")]
    DigitalMultiWrite,
    /// Reads the analog pin.
    #[serde(rename = "analogRead")]
    AnalogRead,
    /// Writes a PWM duty on the analog pin.
    #[serde(rename = "analogWrite")]
    AnalogWrite,
    /// Opens the serial port.
    #[serde(rename = "serialBegin")]
    SerialBegin,
    /// Reads bytes from the serial port.
    #[serde(rename = "serialRead")]
    SerialRead,
    /// Writes data on the serial port.
    #[serde(rename = "serialWrite")]
    SerialWrite,
    /// Writes data on the serial port and then reads the answer.
    #[serde(rename = "serialWR")]
    SerialWriteRead,
    /// Moves a servo motor to an angle.
    #[serde(rename = "servoWrite")]
    ServoWrite,
    /// Retrieves the historical data of a device.
    #[serde(rename = "fetchData")]
    FetchData,
    /// Retrieves the hardware and firmware version of a device.
    #[serde(rename = "version")]
    Version,
    /// Checks whether a device is online.
    #[serde(rename = "isOnline")]
    IsOnline,
    /// Restarts a device.
    #[serde(rename = "restart")]
    Restart,
    /// Lists all devices registered under an account.
    #[serde(rename = "getDevices")]
    GetDevices,
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.name().fmt(f)
    }
}

impl Operation {
    /// Returns the [`Operation`] name used in the request path.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DigitalRead => "digitalRead",
            Self::DigitalMultiRead => "digitalMultiRead",
            Self::DigitalWrite => "digitalWrite",
            Self::DigitalMultiWrite => "digitalMultiWrite",
            Self::AnalogRead => "analogRead",
            Self::AnalogWrite => "analogWrite",
            Self::SerialBegin => "serialBegin",
            Self::SerialRead => "serialRead",
            Self::SerialWrite => "serialWrite",
            Self::SerialWriteRead => "serialWR",
            Self::ServoWrite => "servoWrite",
            Self::FetchData => "fetchData",
            Self::Version => "version",
            Self::IsOnline => "isOnline",
            Self::Restart => "restart",
            Self::GetDevices => "getDevices",
        }
    }

    /// Returns the [`Operation`] associated with the given path name.
    ///
    /// The comparison is exact, as the cloud does.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_OPERATIONS
            .iter()
            .copied()
            .find(|operation| operation.name() == name)
    }

    /// Returns the [`Channel`] an [`Operation`] acts on, if any.
    ///
    /// Device metadata operations do not act on a channel.
    #[must_use]
    pub const fn channel(self) -> Option<Channel> {
        match self {
            Self::DigitalRead
            | Self::DigitalMultiRead
            | Self::DigitalWrite
            | Self::DigitalMultiWrite => Some(Channel::Digital),
            Self::AnalogRead | Self::AnalogWrite => Some(Channel::Analog),
            Self::SerialBegin | Self::SerialRead | Self::SerialWrite | Self::SerialWriteRead => {
                Some(Channel::Serial)
            }
            Self::ServoWrite => Some(Channel::Servo),
            Self::FetchData | Self::Version | Self::IsOnline | Self::Restart | Self::GetDevices => {
                None
            }
        }
    }

    /// Whether an [`Operation`] is sent through a fixed template, without
    /// any pin or value argument.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(
            self,
            Self::SerialBegin
                | Self::FetchData
                | Self::Version
                | Self::IsOnline
                | Self::Restart
                | Self::GetDevices
        )
    }

    /// Whether an [`Operation`] addresses a single device, and hence needs
    /// a device name in its query.
    ///
    /// Only [`Operation::GetDevices`] works on the whole account.
    #[must_use]
    pub const fn targets_device(self) -> bool {
        !matches!(self, Self::GetDevices)
    }
}
