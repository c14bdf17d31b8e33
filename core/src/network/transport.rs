use async_trait::async_trait;
use hyper::client::HttpConnector;
use hyper::header::LOCATION;
use hyper::http::uri::InvalidUri;
use hyper::{Body, Client, Response, StatusCode, Uri};
use tracing::trace;

use apiscan_common::ProbeError;
use apiscan_common::network::target::ProbeTarget;

/// Redirect hops followed before a request is given up on.
pub const MAX_REDIRECTS: usize = 10;

/// Issues a single GET and reports the status code of the response.
///
/// Implementations must not retry and must release the connection before
/// returning; any failure before a final status line arrives is a [`ProbeError`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, target: &ProbeTarget) -> Result<u16, ProbeError>;
}

/// Plaintext HTTP/1 transport on top of hyper's client.
///
/// Idle pooling is disabled: every sub-probe opens its own connection and the
/// socket is closed as soon as the response is dropped.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client<HttpConnector, Body>,
}

impl HttpTransport {
    pub fn new() -> Self {
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .build_http();
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, target: &ProbeTarget) -> Result<u16, ProbeError> {
        let mut locator = target.locator();
        let mut uri: Uri = locator
            .parse()
            .map_err(|e: InvalidUri| ProbeError::InvalidLocator {
                locator: locator.clone(),
                reason: e.to_string(),
            })?;

        for hop in 0..=MAX_REDIRECTS {
            let response = self
                .client
                .get(uri.clone())
                .await
                .map_err(|e| ProbeError::transport(&locator, e))?;

            let status = response.status();
            let Some(location) = redirect_location(&response) else {
                trace!("{locator} answered {status}");
                return Ok(status.as_u16());
            };
            drop(response);

            uri = resolve_redirect(&uri, &location)?;
            locator = uri.to_string();
            if hop == MAX_REDIRECTS {
                break;
            }
            trace!("{status}, following redirect to {locator}");
        }

        Err(ProbeError::transport(
            locator,
            format!("stopped after {MAX_REDIRECTS} redirects"),
        ))
    }
}

/// `Location` of a followable redirect, if `response` is one.
fn redirect_location(response: &Response<Body>) -> Option<String> {
    match response.status() {
        StatusCode::MOVED_PERMANENTLY
        | StatusCode::FOUND
        | StatusCode::SEE_OTHER
        | StatusCode::TEMPORARY_REDIRECT
        | StatusCode::PERMANENT_REDIRECT => {}
        _ => return None,
    }
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    Some(location.to_string())
}

/// Resolves `location` against the request that produced it.
///
/// Only plaintext `http` targets are followed.
fn resolve_redirect(current: &Uri, location: &str) -> Result<Uri, ProbeError> {
    let invalid = |reason: String| ProbeError::InvalidLocator {
        locator: location.to_string(),
        reason,
    };

    if let Some((scheme, _)) = location.split_once("://") {
        if !scheme.eq_ignore_ascii_case("http") {
            return Err(ProbeError::transport(
                location,
                format!("unsupported protocol scheme \"{scheme}\""),
            ));
        }
        return location.parse().map_err(|e: InvalidUri| invalid(e.to_string()));
    }

    let path = if location.starts_with('/') {
        location.to_string()
    } else {
        let base = current.path();
        let dir = &base[..base.rfind('/').map_or(0, |i| i + 1)];
        format!("{dir}{location}")
    };
    let authority = current
        .authority()
        .ok_or_else(|| invalid("redirect from a request without authority".to_string()))?;

    Uri::builder()
        .scheme("http")
        .authority(authority.as_str())
        .path_and_query(path)
        .build()
        .map_err(|e| invalid(e.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
