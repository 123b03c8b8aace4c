//! Request Adapter
//!
//! Translates loosely typed request parameters into render calls the way the
//! HTTP endpoint does, without hosting a server. A caller that owns the
//! socket builds [`Params`] from the query string or body, then passes the
//! method and params to [`handle`] and writes out the returned
//! [`ApiResponse`].
//!
//! # Parameter rules
//!
//! | Key | Accepted | Otherwise |
//! |-----|----------|-----------|
//! | `message` | string | empty message |
//! | `cow`, `mode`, `eyes`, `tongue` | string | unset |
//! | `action` | `"think"` | say |
//! | `wrap` | number, string, boolean, null | no wrap |
//! | `json` | any truthy value | plain text |

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::balloon::Action;
use crate::compose::{Composer, NormalizedOptions, RenderOptions, WrapOption};

/// Request parameters as a JSON object
pub type Params = Map<String, Value>;

/// Methods the endpoint answers
pub const ALLOWED_METHODS: [&str; 3] = ["GET", "POST", "HEAD"];

/// Message rendered for a rejected method
pub const METHOD_NOT_ALLOWED: &str = "405: Method Not Allowed";

/// Plain text content type
pub const TEXT_PLAIN: &str = "text/plain";

/// JSON content type
pub const APPLICATION_JSON: &str = "application/json";

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Parse a query string (with or without the leading `?`)
///
/// Every value is a string. When a key repeats, the last value wins.
#[must_use]
pub fn params_from_query(query: &str) -> Params {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect()
}

/// Parse a request body
///
/// Form bodies are read like query strings. Anything else is tried as JSON:
/// an object is used as is, any other JSON value yields no parameters, and
/// text that is not JSON becomes the message.
#[must_use]
pub fn params_from_body(body: &str, content_type: Option<&str>) -> Params {
    if content_type.is_some_and(|ct| ct.starts_with(FORM_URLENCODED)) {
        return params_from_query(body);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(params)) => params,
        Ok(other) => {
            debug!(kind = json_kind(&other), "JSON body is not an object, ignoring");
            Params::new()
        }
        Err(_) => {
            let mut params = Params::new();
            params.insert("message".to_string(), Value::String(body.to_string()));
            params
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A typed request
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiRequest {
    /// Message, if one was given as a string
    pub message: Option<String>,
    /// Render options
    pub options: RenderOptions,
    /// Whether a JSON reply was asked for
    pub json: bool,
}

/// Read typed fields out of loose params
#[must_use]
pub fn parse_params(params: &Params) -> ApiRequest {
    let text = |key: &str| params.get(key).and_then(Value::as_str).map(str::to_string);

    let action = match params.get("action").and_then(Value::as_str) {
        Some("think") => Action::Think,
        _ => Action::Say,
    };

    let options = RenderOptions {
        cow: text("cow"),
        mode: text("mode"),
        eyes: text("eyes"),
        tongue: text("tongue"),
        wrap: wrap_option(params.get("wrap")),
        action: Some(action),
    };

    ApiRequest {
        message: text("message"),
        options,
        json: params.get("json").is_some_and(truthy),
    }
}

fn wrap_option(value: Option<&Value>) -> WrapOption {
    match value {
        None => WrapOption::Unset,
        Some(Value::Null | Value::Bool(false)) => WrapOption::Disabled,
        Some(Value::Bool(true)) => WrapOption::Enabled,
        Some(Value::Number(number)) => number
            .as_f64()
            .map_or(WrapOption::Disabled, WrapOption::Number),
        Some(Value::String(text)) => WrapOption::Text(text.clone()),
        Some(other) => {
            debug!(kind = json_kind(other), "Unsupported wrap type, wrapping disabled");
            WrapOption::Disabled
        }
    }
}

/// Truthiness of a JSON value
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// What to send back
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` header value
    pub content_type: &'static str,
    /// Additional headers
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: String,
}

impl ApiResponse {
    fn text(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN,
            headers: Vec::new(),
            body,
        }
    }
}

#[derive(Serialize)]
struct JsonReply<'a> {
    req: JsonRequest<'a>,
    res: &'a str,
}

#[derive(Serialize)]
struct JsonRequest<'a> {
    message: &'a str,
    #[serde(flatten)]
    options: &'a NormalizedOptions,
}

/// Answer one request
///
/// Methods other than GET, POST and HEAD get a `405` with a cow saying so and
/// an `Allow` header. HEAD answers like GET with an empty body.
#[must_use]
pub fn handle(method: &str, params: &Params, composer: &Composer<'_>) -> ApiResponse {
    if !ALLOWED_METHODS.contains(&method) {
        debug!(method = %method, "Rejected method");
        let cow = composer.render(METHOD_NOT_ALLOWED, &RenderOptions::new());
        let mut response = ApiResponse::text(405, cow);
        response
            .headers
            .push(("Allow".to_string(), ALLOWED_METHODS.join(", ")));
        return response;
    }

    let request = parse_params(params);
    let message = request.message.as_deref().unwrap_or_default();
    let options = composer.normalize(&request.options);
    let cow = composer.render_normalized(message, &options);

    let mut response = if request.json {
        json_response(message, &options, cow)
    } else {
        ApiResponse::text(200, cow)
    };

    if method == "HEAD" {
        response.body.clear();
    }
    response
}

fn json_response(message: &str, options: &NormalizedOptions, cow: String) -> ApiResponse {
    let reply = JsonReply {
        req: JsonRequest { message, options },
        res: &cow,
    };

    match serde_json::to_string(&reply) {
        Ok(body) => ApiResponse {
            status: 200,
            content_type: APPLICATION_JSON,
            headers: Vec::new(),
            body,
        },
        Err(e) => {
            warn!(error = %e, "Failed to encode JSON reply, sending text");
            ApiResponse::text(200, cow)
        }
    }
}
