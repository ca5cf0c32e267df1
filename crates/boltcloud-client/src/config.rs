/// The address of the Bolt cloud remote API.
pub const DEFAULT_BASE_URL: &str = "https://cloud.boltiot.com/remote/";

/// The baud rate used when opening the serial port of a device.
pub const SERIAL_BAUD_RATE: u32 = 9600;

/// The credentials identifying a device on the cloud.
///
/// Both fields are opaque and are embedded verbatim into every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    device_name: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("device_name", &self.device_name)
            .finish()
    }
}

impl Credentials {
    /// Creates [`Credentials`] from an API key and a device name.
    #[must_use]
    #[inline]
    pub fn new(api_key: impl Into<String>, device_name: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            device_name: device_name.into(),
        }
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the device name.
    #[must_use]
    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

/// The configuration of a [`crate::client::BoltClient`].
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) credentials: Credentials,
    pub(crate) base_url: String,
    pub(crate) http_client: Option<reqwest::Client>,
}

impl Config {
    /// Creates a [`Config`] pointing to the Bolt cloud.
    #[must_use]
    #[inline]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.into(),
            http_client: None,
        }
    }

    /// Sets the base URL which precedes the API key in every request.
    ///
    /// A trailing `/` is added when missing.
    #[must_use]
    #[inline]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    /// Sets the HTTP client used to send requests.
    ///
    /// When not set, a default client is created.
    #[must_use]
    #[inline]
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Returns the [`Credentials`].
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.base_url
    }
}
