//! Share Links
//!
//! A cow state is reduced to the fields that differ from the defaults and
//! written out three ways: a web page link, a `curl` GET against the API and
//! a `curl` POST with a JSON body.
//!
//! The web page and the API have different defaults (`moo!` at 30 columns
//! for the page, an empty message at 40 for the API), so the web link is
//! adjusted after the API data is built.

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::balloon::{Action, Wrap};
use crate::compose::{NormalizedOptions, DEFAULT_WRAP};
use crate::cows::DEFAULT_COW;
use crate::modes::{fit, ModeId};

/// Message shown by the web page when none is given
pub const WEB_DEFAULT_MESSAGE: &str = "moo!";

/// Wrap column of the web page when none is given
pub const WEB_DEFAULT_WRAP: usize = 30;

/// Everything a share link can carry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CowState {
    /// Message
    pub message: String,
    /// Template name
    pub cow: String,
    /// Mode id (`u` and `c` mean "use eyes and tongue")
    pub mode: String,
    /// Eyes, unpadded
    pub eyes: String,
    /// Tongue, unpadded
    pub tongue: String,
    /// Wrap column, ignored when `no_wrap` is set
    pub wrap: usize,
    /// Say or think
    pub action: Action,
    /// Wrapping disabled
    pub no_wrap: bool,
}

impl Default for CowState {
    fn default() -> Self {
        Self {
            message: WEB_DEFAULT_MESSAGE.to_string(),
            cow: DEFAULT_COW.to_string(),
            mode: ModeId::Default.as_str().to_string(),
            eyes: "oo".to_string(),
            tongue: String::new(),
            wrap: WEB_DEFAULT_WRAP,
            action: Action::Say,
            no_wrap: false,
        }
    }
}

impl CowState {
    /// State of an already normalized render
    #[must_use]
    pub fn from_options(message: &str, options: &NormalizedOptions) -> Self {
        let (wrap, no_wrap) = match options.wrap {
            Wrap::Column(column) => (column, false),
            Wrap::Disabled => (DEFAULT_WRAP, true),
        };

        Self {
            message: message.to_string(),
            cow: options.cow.clone(),
            mode: options.mode.as_str().to_string(),
            eyes: options.eyes.trim_end().to_string(),
            tongue: options.tongue.trim_end().to_string(),
            wrap,
            action: options.action,
            no_wrap,
        }
    }
}

/// Wrap as carried by share data: a column, or empty for no wrap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareWrap {
    /// Wrap column
    Column(usize),
    /// No wrap
    Empty,
}

impl fmt::Display for ShareWrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column) => write!(f, "{column}"),
            Self::Empty => Ok(()),
        }
    }
}

impl Serialize for ShareWrap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Column(column) => serializer.serialize_u64(*column as u64),
            Self::Empty => serializer.serialize_str(""),
        }
    }
}

/// The non-default part of a [`CowState`], in link order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ShareData {
    /// Message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Template name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cow: Option<String>,
    /// Preset mode id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Eyes, padded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyes: Option<String>,
    /// Tongue, padded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tongue: Option<String>,
    /// Wrap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<ShareWrap>,
    /// Action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl ShareData {
    /// Keep only what differs from the defaults
    ///
    /// A preset mode stands in for the face; otherwise eyes other than `oo`
    /// and any tongue are kept, padded to two cells.
    #[must_use]
    pub fn purge(state: &CowState, default_wrap: usize) -> Self {
        let mut data = Self::default();

        if !state.message.is_empty() {
            data.message = Some(state.message.clone());
        }
        if state.cow != DEFAULT_COW {
            data.cow = Some(state.cow.clone());
        }

        let custom = [ModeId::Custom.as_str(), ModeId::Default.as_str()];
        if custom.contains(&state.mode.as_str()) {
            if !state.eyes.is_empty() && state.eyes != "oo" {
                data.eyes = Some(fit(&state.eyes));
            }
            if !state.tongue.is_empty() {
                data.tongue = Some(fit(&state.tongue));
            }
        } else {
            data.mode = Some(state.mode.clone());
        }

        if state.no_wrap {
            data.wrap = Some(ShareWrap::Empty);
        } else if state.wrap != default_wrap {
            data.wrap = Some(ShareWrap::Column(state.wrap));
        }

        if state.action != Action::Say {
            data.action = Some(state.action);
        }

        data
    }

    /// Present fields as `(key, value)` pairs in link order
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let fields = [
            ("message", self.message.clone()),
            ("cow", self.cow.clone()),
            ("mode", self.mode.clone()),
            ("eyes", self.eyes.clone()),
            ("tongue", self.tongue.clone()),
            ("wrap", self.wrap.map(|wrap| wrap.to_string())),
            ("action", self.action.map(|action| action.to_string())),
        ];
        fields
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect()
    }

    /// `?key=value&…`, or empty when nothing differs
    #[must_use]
    pub fn to_query(&self) -> String {
        query(&self.to_pairs())
    }

    /// JSON body for a POST
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to encode share data");
            "{}".to_string()
        })
    }
}

/// Encode pairs as a query string
///
/// Spaces become `+` and dots `%2E`. `! ' ( ) ~` are left as they are.
fn query(pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }

    let encoded: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", escape(key), escape(value)))
        .collect();
    format!("?{}", encoded.join("&"))
}

fn escape(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%7E", "~")
        .replace('.', "%2E")
}

/// The three ways to share a cow
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareLinks {
    /// Web page link
    pub web: String,
    /// API GET link
    pub get: String,
    /// API endpoint
    pub api: String,
    /// API POST body
    pub post: String,
}

impl ShareLinks {
    /// Build the links for `state` against `base_url`
    #[must_use]
    pub fn new(state: &CowState, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let api = format!("{base}/api");

        let data = ShareData::purge(state, DEFAULT_WRAP);
        let get = format!("{api}{}", data.to_query());
        let post = data.to_json();

        Self {
            web: format!("{base}/{}", query(&web_pairs(&data))),
            get,
            api,
            post,
        }
    }
}

/// API pairs adjusted to the web page defaults
///
/// Fields the page would otherwise default differently are appended after
/// the others, and fields equal to the page defaults are dropped.
fn web_pairs(data: &ShareData) -> Vec<(&'static str, String)> {
    let mut pairs = data.to_pairs();

    match &data.message {
        None => pairs.push(("message", String::new())),
        Some(message) if message == WEB_DEFAULT_MESSAGE => pairs.retain(|(key, _)| *key != "message"),
        Some(_) => {}
    }

    match data.wrap {
        None => pairs.push(("wrap", DEFAULT_WRAP.to_string())),
        Some(ShareWrap::Column(WEB_DEFAULT_WRAP)) => pairs.retain(|(key, _)| *key != "wrap"),
        Some(_) => {}
    }

    pairs
}

impl fmt::Display for ShareLinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " Web: {}", self.web)?;
        writeln!(f, " GET: curl '{}'", self.get)?;
        write!(f, " POST: curl {} -X POST -d '{}'", self.api, self.post)
    }
}
