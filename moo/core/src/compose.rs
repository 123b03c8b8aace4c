//! Option Normalization and Rendering
//!
//! [`RenderOptions`] is the loose form every surface fills in: each field is
//! optional and `wrap` keeps whatever shape the caller had (number, string,
//! boolean, null). [`normalize`] applies every default and coercion rule in
//! one place and yields [`NormalizedOptions`], which the [`Composer`] turns
//! into the final picture.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::balloon::{self, Action, Wrap, SPACE_CLASS};
use crate::cows::{CowCatalog, DEFAULT_COW};
use crate::modes::{fit, Face, ModeCatalog, ModeId};

/// Wrap column used when none is given
pub const DEFAULT_WRAP: usize = 40;

// Integer prefix, the way `parseInt` reads it
static INT_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^[{SPACE_CLASS}]*([+-]?[0-9]+)")).expect("invalid wrap regex"));

/// Wrap setting as received from a caller
#[derive(Clone, Debug, Default, PartialEq)]
pub enum WrapOption {
    /// Not given: [`DEFAULT_WRAP`]
    #[default]
    Unset,
    /// `false` or `null`: no wrapping
    Disabled,
    /// `true`: [`DEFAULT_WRAP`]
    Enabled,
    /// A number, possibly negative or fractional
    Number(f64),
    /// A string, read for its integer prefix
    Text(String),
}

impl WrapOption {
    /// Resolve to a [`Wrap`], using `default` for unset or `true`
    #[must_use]
    pub fn resolve(&self, default: usize) -> Wrap {
        match self {
            Self::Unset | Self::Enabled => Wrap::Column(default),
            Self::Disabled => Wrap::Disabled,
            Self::Number(number) => column_from_number(*number),
            Self::Text(text) => column_from_text(text),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn column_from_number(number: f64) -> Wrap {
    if number.is_nan() {
        debug!("NaN wrap, wrapping disabled");
        return Wrap::Disabled;
    }
    // Negatives clamp to 0; the cast truncates and saturates
    Wrap::Column(number.max(0.0) as usize)
}

fn column_from_text(text: &str) -> Wrap {
    let Some(digits) = INT_PREFIX_RE.captures(text).and_then(|caps| caps.get(1)) else {
        // Non-numeric wrap means no wrap rather than an error
        debug!(wrap = %text, "Non-numeric wrap, wrapping disabled");
        return Wrap::Disabled;
    };

    let digits = digits.as_str();
    if digits.starts_with('-') {
        return Wrap::Column(0);
    }
    Wrap::Column(digits.trim_start_matches('+').parse().unwrap_or(usize::MAX))
}

/// Loosely typed render options; every field is optional
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOptions {
    /// Template name
    pub cow: Option<String>,
    /// Mode id or name; when set, its face replaces `eyes`
    pub mode: Option<String>,
    /// Eyes
    pub eyes: Option<String>,
    /// Tongue
    pub tongue: Option<String>,
    /// Wrap setting
    pub wrap: WrapOption,
    /// Say or think
    pub action: Option<Action>,
}

impl RenderOptions {
    /// Options with every field unset
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template name
    #[must_use]
    pub fn cow(mut self, cow: impl Into<String>) -> Self {
        self.cow = Some(cow.into());
        self
    }

    /// Set the mode
    #[must_use]
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Set the eyes
    #[must_use]
    pub fn eyes(mut self, eyes: impl Into<String>) -> Self {
        self.eyes = Some(eyes.into());
        self
    }

    /// Set the tongue
    #[must_use]
    pub fn tongue(mut self, tongue: impl Into<String>) -> Self {
        self.tongue = Some(tongue.into());
        self
    }

    /// Wrap at `column`
    #[must_use]
    pub fn wrap_column(mut self, column: u32) -> Self {
        self.wrap = WrapOption::Number(f64::from(column));
        self
    }

    /// Keep the message's own line breaks only
    #[must_use]
    pub fn no_wrap(mut self) -> Self {
        self.wrap = WrapOption::Disabled;
        self
    }

    /// Set the wrap option as received
    #[must_use]
    pub fn wrap(mut self, wrap: WrapOption) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the action
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

/// Fully resolved options
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NormalizedOptions {
    /// Template name as requested (resolution to a template happens at render time)
    pub cow: String,
    /// Mode matching the final face, [`ModeId::Custom`] if none does
    pub mode: ModeId,
    /// Eyes, exactly two cells
    pub eyes: String,
    /// Tongue, exactly two cells
    pub tongue: String,
    /// Wrap column or disabled
    pub wrap: Wrap,
    /// Say or think
    pub action: Action,
}

impl NormalizedOptions {
    /// Final face, padded
    #[must_use]
    pub fn face(&self) -> Face {
        Face::new(self.eyes.clone(), self.tongue.clone())
    }
}

/// Render pipeline over a pair of catalogs
#[derive(Clone, Copy, Debug)]
pub struct Composer<'a> {
    modes: &'a ModeCatalog,
    cows: &'a CowCatalog,
}

impl<'a> Composer<'a> {
    /// Create a composer over the given catalogs
    #[must_use]
    pub fn new(modes: &'a ModeCatalog, cows: &'a CowCatalog) -> Self {
        Self { modes, cows }
    }

    /// Mode catalog in use
    #[must_use]
    pub fn modes(&self) -> &'a ModeCatalog {
        self.modes
    }

    /// Cow catalog in use
    #[must_use]
    pub fn cows(&self) -> &'a CowCatalog {
        self.cows
    }

    /// Apply defaults and coercions
    ///
    /// - a set `mode` supplies the eyes; it supplies the tongue too unless its
    ///   tongue is empty, in which case the explicit tongue is used;
    /// - without a mode, explicit eyes and tongue are used as given;
    /// - both are clamped and padded to two cells.
    #[must_use]
    pub fn normalize(&self, options: &RenderOptions) -> NormalizedOptions {
        let preset = options.mode.as_deref().map(|mode| self.modes.face_for_mode(mode));

        let eyes = match &preset {
            Some(face) => face.eyes.as_str(),
            None => options.eyes.as_deref().unwrap_or("oo"),
        };
        let tongue = match &preset {
            Some(face) if !face.tongue.is_empty() => face.tongue.as_str(),
            _ => options.tongue.as_deref().unwrap_or(""),
        };

        let face = Face::new(fit(eyes), fit(tongue));
        let mode = self.modes.mode_for_face(&face);

        NormalizedOptions {
            cow: options.cow.clone().unwrap_or_else(|| DEFAULT_COW.to_string()),
            mode,
            eyes: face.eyes,
            tongue: face.tongue,
            wrap: options.wrap.resolve(DEFAULT_WRAP),
            action: options.action.unwrap_or_default(),
        }
    }

    /// Render `message` with loose options
    #[must_use]
    pub fn render(&self, message: &str, options: &RenderOptions) -> String {
        self.render_normalized(message, &self.normalize(options))
    }

    /// Render `message` with resolved options
    #[must_use]
    pub fn render_normalized(&self, message: &str, options: &NormalizedOptions) -> String {
        let balloon = balloon::balloon(options.action, message, options.wrap);
        let body = self
            .cows
            .render(&options.cow, options.action, &options.eyes, &options.tongue);
        format!("{balloon}\n{body}")
    }
}

impl Composer<'static> {
    /// Composer over the built-in catalogs
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(ModeCatalog::builtin(), CowCatalog::builtin())
    }
}

impl Default for Composer<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

/// [`Composer::normalize`] with the built-in catalogs
#[must_use]
pub fn normalize(options: &RenderOptions) -> NormalizedOptions {
    Composer::builtin().normalize(options)
}

/// [`Composer::render`] with the built-in catalogs
#[must_use]
pub fn render(message: &str, options: &RenderOptions) -> String {
    Composer::builtin().render(message, options)
}

/// Render a speech balloon, whatever `options.action` says
#[must_use]
pub fn cowsay(message: &str, options: &RenderOptions) -> String {
    render(message, &options.clone().action(Action::Say))
}

/// Render a thought balloon, whatever `options.action` says
#[must_use]
pub fn cowthink(message: &str, options: &RenderOptions) -> String {
    render(message, &options.clone().action(Action::Think))
}
