//! Face Modes
//!
//! The classic cowsay face presets (`-b`, `-d`, `-g`, ...) and the two-way
//! lookup between a preset and the `(eyes, tongue)` pair that defines it.
//!
//! Two ids are synthetic: `u` is both the "unset" id and the `default` preset,
//! and `c` ([`ModeId::Custom`]) is reported for any face that matches no preset.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of character cells taken by the eyes and by the tongue in every template
pub const FACE_WIDTH: usize = 2;

/// Cow face: eyes and tongue, stored unpadded
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    /// Eyes, up to two characters
    pub eyes: String,
    /// Tongue, up to two characters (empty for no tongue)
    pub tongue: String,
}

impl Face {
    /// Create a face from eyes and tongue
    pub fn new(eyes: impl Into<String>, tongue: impl Into<String>) -> Self {
        Self {
            eyes: eyes.into(),
            tongue: tongue.into(),
        }
    }

    /// The face as laid out in a template: both parts clamped and padded to
    /// exactly [`FACE_WIDTH`] characters
    #[must_use]
    pub fn padded(&self) -> Self {
        Self {
            eyes: fit(&self.eyes),
            tongue: fit(&self.tongue),
        }
    }
}

impl Default for Face {
    fn default() -> Self {
        Self::new("oo", "")
    }
}

/// Truncate to [`FACE_WIDTH`] characters and right-pad with spaces to exactly that width
#[must_use]
pub fn fit(part: &str) -> String {
    let mut fitted: String = part.chars().take(FACE_WIDTH).collect();
    let len = fitted.chars().count();
    fitted.extend(std::iter::repeat(' ').take(FACE_WIDTH - len));
    fitted
}

/// Mode identifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ModeId {
    /// `u`: default face (also used when no mode is set)
    #[default]
    #[serde(rename = "u")]
    Default,
    /// `b`: borg
    #[serde(rename = "b")]
    Borg,
    /// `d`: dead
    #[serde(rename = "d")]
    Dead,
    /// `g`: greedy
    #[serde(rename = "g")]
    Greedy,
    /// `p`: paranoia
    #[serde(rename = "p")]
    Paranoia,
    /// `s`: stoned
    #[serde(rename = "s")]
    Stoned,
    /// `t`: tired
    #[serde(rename = "t")]
    Tired,
    /// `w`: wired
    #[serde(rename = "w")]
    Wired,
    /// `y`: youthful
    #[serde(rename = "y")]
    Youthful,
    /// `c`: a face that matches no preset
    #[serde(rename = "c")]
    Custom,
}

impl ModeId {
    /// Single-letter id
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "u",
            Self::Borg => "b",
            Self::Dead => "d",
            Self::Greedy => "g",
            Self::Paranoia => "p",
            Self::Stoned => "s",
            Self::Tired => "t",
            Self::Wired => "w",
            Self::Youthful => "y",
            Self::Custom => "c",
        }
    }

    /// Parse a single-letter id
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let mode = match id {
            "u" => Self::Default,
            "b" => Self::Borg,
            "d" => Self::Dead,
            "g" => Self::Greedy,
            "p" => Self::Paranoia,
            "s" => Self::Stoned,
            "t" => Self::Tired,
            "w" => Self::Wired,
            "y" => Self::Youthful,
            "c" => Self::Custom,
            _ => return None,
        };
        Some(mode)
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named face preset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mode {
    /// Mode id
    pub id: ModeId,
    /// Mode name
    pub name: &'static str,
    /// Other accepted spellings of the name
    pub aliases: &'static [&'static str],
    /// Preset eyes
    pub eyes: &'static str,
    /// Preset tongue (empty for none)
    pub tongue: &'static str,
}

impl Mode {
    /// The preset face
    #[must_use]
    pub fn face(&self) -> Face {
        Face::new(self.eyes, self.tongue)
    }

    /// Whether `key` names this mode by id, name or alias
    #[must_use]
    pub fn matches_key(&self, key: &str) -> bool {
        self.id.as_str() == key || self.name == key || self.aliases.contains(&key)
    }

    /// Whether `face` is this preset's face
    ///
    /// Eyes must match exactly; tongues are compared without trailing
    /// whitespace so a blank tongue equals no tongue.
    #[must_use]
    pub fn matches_face(&self, face: &Face) -> bool {
        self.eyes == face.eyes && self.tongue.trim_end() == face.tongue.trim_end()
    }
}

const BUILTIN_MODES: [Mode; 9] = [
    Mode { id: ModeId::Default, name: "default", aliases: &[], eyes: "oo", tongue: "" },
    Mode { id: ModeId::Borg, name: "borg", aliases: &[], eyes: "==", tongue: "" },
    Mode { id: ModeId::Dead, name: "dead", aliases: &[], eyes: "xx", tongue: "U" },
    Mode { id: ModeId::Greedy, name: "greedy", aliases: &[], eyes: "$$", tongue: "" },
    Mode { id: ModeId::Paranoia, name: "paranoia", aliases: &["paranoid"], eyes: "@@", tongue: "" },
    Mode { id: ModeId::Stoned, name: "stoned", aliases: &[], eyes: "**", tongue: "U" },
    Mode { id: ModeId::Tired, name: "tired", aliases: &[], eyes: "--", tongue: "" },
    Mode { id: ModeId::Wired, name: "wired", aliases: &[], eyes: "OO", tongue: "" },
    Mode { id: ModeId::Youthful, name: "youthful", aliases: &[], eyes: "..", tongue: "" },
];

static BUILTIN: LazyLock<ModeCatalog> = LazyLock::new(|| ModeCatalog::new(BUILTIN_MODES.to_vec()));

/// Immutable catalog of face presets
///
/// The first entry is the fallback for unknown mode keys.
#[derive(Clone, Debug)]
pub struct ModeCatalog {
    modes: Vec<Mode>,
}

impl ModeCatalog {
    /// Create a catalog from a list of modes
    #[must_use]
    pub fn new(modes: Vec<Mode>) -> Self {
        Self { modes }
    }

    /// The nine classic presets
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Iterate over the presets in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Mode> {
        self.modes.iter()
    }

    /// Find a preset by id, name or alias
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Mode> {
        self.modes.iter().find(|mode| mode.matches_key(key))
    }

    /// Face for a mode id or name
    ///
    /// Unknown keys fall back to the first preset's face (the `default` face
    /// for the builtin catalog).
    #[must_use]
    pub fn face_for_mode(&self, key: &str) -> Face {
        if let Some(mode) = self.get(key) {
            return mode.face();
        }

        debug!(mode = %key, "Unknown mode, using default face");
        self.modes.first().map(Mode::face).unwrap_or_default()
    }

    /// Mode id whose preset face equals `face`, or [`ModeId::Custom`]
    #[must_use]
    pub fn mode_for_face(&self, face: &Face) -> ModeId {
        self.modes
            .iter()
            .find(|mode| mode.matches_face(face))
            .map_or(ModeId::Custom, |mode| mode.id)
    }
}

impl Default for ModeCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

/// [`ModeCatalog::face_for_mode`] on the builtin presets
#[must_use]
pub fn face_for_mode(key: &str) -> Face {
    ModeCatalog::builtin().face_for_mode(key)
}

/// [`ModeCatalog::mode_for_face`] on the builtin presets
#[must_use]
pub fn mode_for_face(face: &Face) -> ModeId {
    ModeCatalog::builtin().mode_for_face(face)
}
