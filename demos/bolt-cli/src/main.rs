//! A command-line tool driving a Bolt device through the Bolt cloud.

use std::process::ExitCode;

use boltcloud::response::Response;
use boltcloud::value::{ANALOG_PIN, Arg, Token};

use boltcloud_client::client::BoltClient;
use boltcloud_client::config::{Config, Credentials, DEFAULT_BASE_URL};

use clap::{Parser, Subcommand};

use tracing::{Level, error, info};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("the cloud reported a failure")]
    Failure,
    #[error("cannot render the response: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// API key of the cloud account.
    #[arg(long, env = "BOLT_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Name of the device.
    #[arg(long, env = "BOLT_DEVICE_NAME")]
    device: String,

    /// Base URL of the cloud remote API.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Print debug logs.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read one or more digital pins.
    DigitalRead {
        #[arg(required = true)]
        pins: Vec<String>,
    },
    /// Drive a digital pin high or low.
    DigitalWrite { pin: String, state: String },
    /// Drive several digital pins at once.
    DigitalMultiWrite {
        #[arg(long, num_args = 1.., required = true)]
        pins: Vec<String>,
        #[arg(long, num_args = 1.., required = true)]
        states: Vec<String>,
    },
    /// Read the analog pin.
    AnalogRead {
        #[arg(default_value = ANALOG_PIN)]
        pin: String,
    },
    /// Write a value in [0, 255] on the analog pin.
    AnalogWrite { pin: String, value: String },
    /// Open the serial port.
    SerialBegin,
    /// Read up to `till` bytes from the serial port.
    SerialRead { till: String },
    /// Write data on the serial port.
    SerialWrite { data: String },
    /// Write data on the serial port, then read up to `till` bytes.
    SerialWriteRead { till: String, data: String },
    /// Move a servo to an angle in [0, 180].
    ServoWrite { pin: String, angle: String },
    /// Retrieve the historical data of the device.
    History,
    /// Retrieve the version of the device.
    Version,
    /// Check whether the device is online.
    Status,
    /// Restart the device.
    Restart,
    /// List all devices of the account.
    Devices,
}

// Command-line words holding an integer are sent as integers.
fn token(word: String) -> Token {
    match word.parse::<i64>() {
        Ok(number) => Token::Number(number),
        Err(_) => Token::Text(word),
    }
}

fn scalar(word: String) -> Arg {
    Arg::Scalar(token(word))
}

fn list(words: Vec<String>) -> Arg {
    Arg::List(words.into_iter().map(token).collect())
}

// A single pin is read with `digitalRead`, several with `digitalMultiRead`.
async fn digital_read(client: &BoltClient, mut pins: Vec<String>) -> Response {
    if pins.len() == 1 {
        let pin = pins.remove(0);
        client.digital_read(scalar(pin)).await
    } else {
        client.digital_multi_read(list(pins)).await
    }
}

async fn run(client: &BoltClient, command: Command) -> Response {
    match command {
        Command::DigitalRead { pins } => digital_read(client, pins).await,
        Command::DigitalWrite { pin, state } => {
            client.digital_write(scalar(pin), scalar(state)).await
        }
        Command::DigitalMultiWrite { pins, states } => {
            client.digital_multi_write(list(pins), list(states)).await
        }
        Command::AnalogRead { pin } => client.analog_read(scalar(pin)).await,
        Command::AnalogWrite { pin, value } => client.analog_write(scalar(pin), value).await,
        Command::SerialBegin => client.serial_begin().await,
        Command::SerialRead { till } => client.serial_read(scalar(till)).await,
        Command::SerialWrite { data } => client.serial_write(scalar(data)).await,
        Command::SerialWriteRead { till, data } => {
            client.serial_write_read(scalar(till), data).await
        }
        Command::ServoWrite { pin, angle } => client.servo_write(scalar(pin), angle).await,
        Command::History => client.historical_data().await,
        Command::Version => client.version().await,
        Command::Status => client.device_status().await,
        Command::Restart => client.restart_device().await,
        Command::Devices => client.device_list().await,
    }
}

fn report(response: &Response) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(response.body())?);

    if response.is_success() {
        Ok(())
    } else {
        Err(CliError::Failure)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let config =
        Config::new(Credentials::new(cli.api_key, cli.device.as_str())).base_url(cli.base_url);
    let client = BoltClient::with_config(config);

    info!("Controlling device `{}`", cli.device);

    let response = run(&client, cli.command).await;

    match report(&response) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
