//! HTTP plumbing shared by every resource client.
//!
//! One function per round-trip shape, each offered in an async and a
//! blocking variant: authenticated JSON POST, unauthenticated catalog
//! GET, and a raw-byte fetch used when materializing media payloads.
//! Exactly HTTP 200 counts as success; any other status fails with
//! [`ShardError::Remote`] without reading meaning into the body.

use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::client::ShardError;
use crate::options::TransportOptions;

/// Header carrying the raw credential on authenticated calls.
pub const API_KEY_HEADER: &str = "api-key";

/// Build a configured async HTTP client from transport options.
pub(crate) fn build_http_client(
    options: &TransportOptions,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Build a configured blocking HTTP client from transport options.
pub(crate) fn build_blocking_client(
    options: &TransportOptions,
) -> Result<reqwest::blocking::Client, reqwest::Error> {
    let mut builder = reqwest::blocking::Client::builder();

    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Authenticated JSON POST returning the decoded response body.
pub(crate) async fn post_json<T, B>(
    options: &TransportOptions,
    path: &str,
    payload: &B,
) -> Result<T, ShardError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let key = options.require_credential()?;
    let url = options.endpoint(path);
    debug!(%url, "dispatching POST");

    let response = build_http_client(options)?
        .post(&url)
        .header(API_KEY_HEADER, key.expose_secret())
        .json(payload)
        .send()
        .await?;

    let status = response.status();
    let body = response.bytes().await?;
    debug!(status = status.as_u16(), "response received");
    decode_json(status, &body)
}

/// Blocking counterpart of [`post_json`].
pub(crate) fn post_json_blocking<T, B>(
    options: &TransportOptions,
    path: &str,
    payload: &B,
) -> Result<T, ShardError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let key = options.require_credential()?;
    let url = options.endpoint(path);
    debug!(%url, "dispatching POST");

    let response = build_blocking_client(options)?
        .post(&url)
        .header(API_KEY_HEADER, key.expose_secret())
        .json(payload)
        .send()?;

    let status = response.status();
    let body = response.bytes()?;
    debug!(status = status.as_u16(), "response received");
    decode_json(status, &body)
}

/// Unauthenticated GET returning the decoded response body.
///
/// The catalog endpoints do not take the credential header; that
/// asymmetry is part of the remote API's contract.
pub(crate) async fn get_json<T>(options: &TransportOptions, path: &str) -> Result<T, ShardError>
where
    T: DeserializeOwned,
{
    let url = options.endpoint(path);
    debug!(%url, "dispatching GET");

    let response = build_http_client(options)?.get(&url).send().await?;

    let status = response.status();
    let body = response.bytes().await?;
    debug!(status = status.as_u16(), "response received");
    decode_json(status, &body)
}

/// Blocking counterpart of [`get_json`].
pub(crate) fn get_json_blocking<T>(
    options: &TransportOptions,
    path: &str,
) -> Result<T, ShardError>
where
    T: DeserializeOwned,
{
    let url = options.endpoint(path);
    debug!(%url, "dispatching GET");

    let response = build_blocking_client(options)?.get(&url).send()?;

    let status = response.status();
    let body = response.bytes()?;
    debug!(status = status.as_u16(), "response received");
    decode_json(status, &body)
}

/// Fetch the raw bytes behind a URL, e.g. a generated image or audio
/// clip. No credential header; the URL is already fully qualified.
pub(crate) async fn fetch_bytes(url: &str) -> Result<Bytes, ShardError> {
    debug!(%url, "fetching payload bytes");

    let response = reqwest::Client::new().get(url).send().await?;
    let status = response.status();
    let body = response.bytes().await?;
    ensure_success(status)?;
    Ok(body)
}

/// Blocking counterpart of [`fetch_bytes`].
pub(crate) fn fetch_bytes_blocking(url: &str) -> Result<Bytes, ShardError> {
    debug!(%url, "fetching payload bytes");

    let response = reqwest::blocking::Client::new().get(url).send()?;
    let status = response.status();
    let body = response.bytes()?;
    ensure_success(status)?;
    Ok(body)
}

fn ensure_success(status: StatusCode) -> Result<(), ShardError> {
    if status.as_u16() == 200 {
        Ok(())
    } else {
        Err(ShardError::Remote(status.as_u16()))
    }
}

fn decode_json<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ShardError> {
    ensure_success(status)?;
    Ok(serde_json::from_slice(body)?)
}
