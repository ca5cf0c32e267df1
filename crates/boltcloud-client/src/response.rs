use boltcloud::response::Response;

use reqwest::Client;

use serde_json::Value;

use tracing::{error, warn};

use crate::error::{Error, Result};

/// Sends a `GET` request to the given URL and decodes its JSON body.
///
/// The decoded body is returned as it is, even when the cloud reports a
/// failure inside it.
///
/// # Errors
///
/// - A [`crate::error::ErrorKind::Request`] error when the request cannot
///   be sent or its response cannot be received.
/// - A [`crate::error::ErrorKind::Status`] error when the cloud answers with
///   a non-successful status code.
/// - A [`crate::error::ErrorKind::JsonResponse`] error when the body is not
///   valid JSON.
pub async fn try_fetch(client: &Client, url: &str) -> Result<Response> {
    let response = client.get(url).send().await.map_err(Error::request)?;

    let status = response.status();
    if !status.is_success() {
        warn!("The cloud answered with status `{status}`");
        return Err(Error::status());
    }

    response
        .json::<Value>()
        .await
        .map(Response::new)
        .map_err(Error::json_response)
}

/// Sends a `GET` request to the given URL and decodes its JSON body.
///
/// Unlike [`try_fetch`], errors are converted into a failed [`Response`],
/// so the caller always receives the same envelope.
pub async fn fetch(client: &Client, url: &str) -> Response {
    match try_fetch(client, url).await {
        Ok(response) => response,
        Err(e) => {
            error!("{e}");
            e.into_response()
        }
    }
}
