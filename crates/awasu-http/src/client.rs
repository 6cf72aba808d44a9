//! Blocking Awasu API client
//!
//! [`AwasuClient::call`] is the main entry point; most of the time the
//! per-resource helpers (`channels`, `workpads`, ...) are what you want, and
//! they all funnel through `call_and_check` which additionally inspects the
//! response for an embedded error signal.

use std::fmt;
use std::io::Read;

use awasu_core::{build_post_body, find_descendant, ApiArgs, ResponseBody, ResponseFormat};
use flate2::read::DeflateDecoder;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use tracing::{debug, trace};
use xmltree::Element;

use crate::error::AwasuError;
use crate::headers::ResponseHeaders;

/// API URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:2604";

/// Error cell emitted by Awasu in HTML responses.
static HTML_ERROR_CELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<td class="error-msg value">(.+?)</td>"#).expect("literal pattern is valid")
});

/// One API invocation: endpoint, arguments, optional XML body, raw flag.
///
/// # Example
///
/// ```ignore
/// use awasu_core::ApiArgs;
/// use awasu_http::{ApiRequest, AwasuClient};
///
/// let client = AwasuClient::default();
/// let mut args = ApiArgs::new();
/// args.set("format", "json");
/// let body = client.call(ApiRequest::new("channels/list").args(args))?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    endpoint: &'a str,
    args: ApiArgs,
    body: Option<&'a str>,
    raw: bool,
}

impl<'a> ApiRequest<'a> {
    pub fn new(endpoint: &'a str) -> Self {
        Self {
            endpoint,
            args: ApiArgs::new(),
            body: None,
            raw: false,
        }
    }

    pub fn args(mut self, args: ApiArgs) -> Self {
        self.args = args;
        self
    }

    /// Attach a pre-built XML request body. The arguments will be injected
    /// into it as the first child of its root.
    pub fn body(mut self, body: &'a str) -> Self {
        self.body = Some(body);
        self
    }

    /// Return the response body as received, without parsing.
    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }
}

/// Synchronous, blocking client for the Awasu API.
///
/// Holds only read-only configuration (base URL, optional token) plus a
/// reqwest connection pool; it is safe to share across threads. Each call
/// blocks until the full response has been received.
#[derive(Debug, Clone)]
pub struct AwasuClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl AwasuClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Create a client with custom transport settings.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http: client,
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Configure the API access token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call the Awasu API and return the parsed response body.
    ///
    /// In raw mode the body is returned as received (after decompression).
    /// Otherwise it is parsed according to the response format derived from
    /// the arguments — an XML tree, a JSON value, or the text unchanged —
    /// regardless of the HTTP status; raw mode is the only parse bypass.
    ///
    /// # Errors
    ///
    /// `Connection` when the transport fails; decode errors when the body
    /// does not satisfy its declared format. `call` itself never inspects
    /// the response for application-level errors — that is `call_and_check`.
    pub fn call(&self, request: ApiRequest<'_>) -> Result<ResponseBody, AwasuError> {
        Ok(self.call_with_headers(request)?.1)
    }

    /// Like [`call`](Self::call), but also returns the response headers.
    pub fn call_with_headers(
        &self,
        request: ApiRequest<'_>,
    ) -> Result<(ResponseHeaders, ResponseBody), AwasuError> {
        let format = request.args.response_format();
        let raw = request.raw;
        let (headers, text) = self.dispatch(request)?;
        let body = decode_body(text, &format, raw)?;
        Ok((headers, body))
    }

    /// Call the Awasu API and check the response for errors.
    ///
    /// Every convenience method goes through here. Checks the HTTP status
    /// line before decoding, so a failure body that doesn't satisfy its
    /// declared format can't mask the status error; then (outside raw mode)
    /// scans the body for an embedded error signal in whichever format the
    /// response used.
    pub fn call_and_check(
        &self,
        mut request: ApiRequest<'_>,
    ) -> Result<ResponseBody, AwasuError> {
        request.args.set("quiet", false);
        let format = request.args.response_format();
        let raw = request.raw;

        let (headers, text) = self.dispatch(request)?;
        check_status_line(&headers)?;
        let body = decode_body(text, &format, raw)?;
        if !raw {
            check_embedded_error(&body, &format)?;
        }
        Ok(body)
    }

    fn dispatch(
        &self,
        request: ApiRequest<'_>,
    ) -> Result<(ResponseHeaders, String), AwasuError> {
        let url = resolve_url(&self.base_url, request.endpoint);

        let mut args = request.args;
        // The token always travels inside the POST body, never in the URL,
        // so proxies that record only request lines don't see it.
        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            args.set("token", token);
        }
        let payload = build_post_body(&args, request.body)?;

        debug!(%url, "calling Awasu API");
        let mut builder = self.http.post(&url).header("Accept-Encoding", "deflate");
        if let Some(payload) = payload {
            builder = builder.body(payload);
        }
        let response = builder.send().map_err(AwasuError::Connection)?;

        let mut headers = ResponseHeaders::new();
        headers.push_status_line(format!(
            "{} {} {}",
            version_str(response.version()),
            response.status().as_u16(),
            response.status().canonical_reason().unwrap_or("")
        ));
        for (name, value) in response.headers() {
            headers.push(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        trace!(status = response.status().as_u16(), "received response");

        let bytes = response.bytes().map_err(AwasuError::Connection)?;
        let bytes = if headers
            .get("Content-Encoding")
            .is_some_and(|v| v.eq_ignore_ascii_case("deflate"))
        {
            // Raw deflate stream, no zlib header.
            let mut inflated = Vec::new();
            DeflateDecoder::new(bytes.as_ref())
                .read_to_end(&mut inflated)
                .map_err(AwasuError::Inflate)?;
            trace!(inflated = inflated.len(), "inflated response body");
            inflated
        } else {
            bytes.to_vec()
        };
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok((headers, text))
    }
}

impl Default for AwasuClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl fmt::Display for AwasuClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AwasuApi @ {}", self.base_url)
    }
}

/// Prepend the base URL, and a scheme when the result lacks one.
fn resolve_url(base_url: &str, endpoint: &str) -> String {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), endpoint);
    if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        format!("http://{url}")
    }
}

fn version_str(version: reqwest::Version) -> &'static str {
    if version == reqwest::Version::HTTP_10 {
        "HTTP/1.0"
    } else if version == reqwest::Version::HTTP_2 {
        "HTTP/2.0"
    } else if version == reqwest::Version::HTTP_3 {
        "HTTP/3.0"
    } else if version == reqwest::Version::HTTP_09 {
        "HTTP/0.9"
    } else {
        "HTTP/1.1"
    }
}

/// Parse the body text according to the declared response format.
///
/// Raw mode and whitespace-only bodies skip parsing entirely.
fn decode_body(
    text: String,
    format: &ResponseFormat,
    raw: bool,
) -> Result<ResponseBody, AwasuError> {
    if raw || text.trim().is_empty() {
        return Ok(ResponseBody::Raw(text));
    }
    match format {
        ResponseFormat::Xml => Element::parse(text.as_bytes())
            .map(ResponseBody::Xml)
            .map_err(AwasuError::XmlDecode),
        ResponseFormat::Json => serde_json::from_str(&text)
            .map(ResponseBody::Json)
            .map_err(AwasuError::JsonDecode),
        ResponseFormat::Html | ResponseFormat::Other(_) => Ok(ResponseBody::Raw(text)),
    }
}

/// Fail unless the status line reports 200 or 204.
///
/// Scans for the first marker entry (value is `None`), takes the substring
/// after the `HTTP/1.x ` prefix and compares the numeric code; the full
/// status line becomes the error message. Only one marker is expected, so
/// scanning stops at the first.
fn check_status_line(headers: &ResponseHeaders) -> Result<(), AwasuError> {
    if let Some(line) = headers.status_line() {
        let status = line.get(9..).unwrap_or("");
        let code = status
            .split(' ')
            .next()
            .and_then(|c| c.parse::<u16>().ok())
            .unwrap_or(0);
        if code != 200 && code != 204 {
            return Err(AwasuError::Api(line.to_string()));
        }
    }
    Ok(())
}

/// Scan a parsed body for an application-level error signal.
fn check_embedded_error(
    body: &ResponseBody,
    format: &ResponseFormat,
) -> Result<(), AwasuError> {
    match format {
        ResponseFormat::Json => {
            let error_msg = body
                .as_json()
                .and_then(|v| v.get("status"))
                .and_then(|s| s.get("errorMsg"))
                .and_then(serde_json::Value::as_str);
            if let Some(msg) = error_msg {
                if !msg.is_empty() {
                    return Err(AwasuError::Api(msg.to_string()));
                }
            }
        }
        ResponseFormat::Xml => {
            if let Some(root) = body.as_xml() {
                if let Some(node) = find_descendant(root, "errorMsg") {
                    let msg = node.get_text().unwrap_or_default().into_owned();
                    return Err(AwasuError::Api(msg));
                }
            }
        }
        ResponseFormat::Html => {
            if let Some(text) = body.as_raw() {
                if let Some(caps) = HTML_ERROR_CELL.captures(text) {
                    return Err(AwasuError::Api(caps[1].trim().to_string()));
                }
            }
        }
        ResponseFormat::Other(_) => {}
    }
    Ok(())
}
