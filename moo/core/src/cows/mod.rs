//! Character Templates
//!
//! A cow is a named piece of ASCII art with placeholders that the renderer
//! fills in:
//!
//! | Placeholder | Expands to |
//! |-------------|------------|
//! | `$thoughts` | connector glyph (`\` or `o`) |
//! | `$eyes` | eyes, padded to two cells |
//! | `$eye` | the second padded eye cell |
//! | `$tongue` | tongue, padded to two cells |
//!
//! The built-in drawings live in [`builtin`]. More can be read from `*.cow`
//! files with [`CowCatalog::extend_from_dir`].

pub mod builtin;
mod loader;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::balloon::Action;
use crate::modes::fit;

pub use loader::{load_dir, parse_template, CatalogError};

/// Name of the fallback template
pub const DEFAULT_COW: &str = "default";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(thoughts|eyes|eye|tongue)").expect("invalid placeholder regex"));

static BUILTIN: LazyLock<CowCatalog> = LazyLock::new(|| {
    CowCatalog::new(
        builtin::COWS
            .iter()
            .map(|(name, art)| CowTemplate::new(*name, *art)),
    )
});

/// A named character drawing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CowTemplate {
    /// Template name
    pub name: String,
    /// Art with placeholders
    pub art: String,
}

impl CowTemplate {
    /// Create a template
    pub fn new(name: impl Into<String>, art: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            art: art.into(),
        }
    }

    /// Fill in the placeholders
    ///
    /// `eyes` and `tongue` are clamped and padded to two cells first.
    #[must_use]
    pub fn render(&self, action: Action, eyes: &str, tongue: &str) -> String {
        let eyes = fit(eyes);
        let tongue = fit(tongue);
        let eye: String = eyes.chars().skip(1).collect();

        PLACEHOLDER_RE
            .replace_all(&self.art, |caps: &Captures<'_>| match &caps[1] {
                "thoughts" => action.thoughts().to_owned(),
                "eyes" => eyes.clone(),
                "eye" => eye.clone(),
                _ => tongue.clone(),
            })
            .into_owned()
    }

    /// Whether the art has a connector to draw between balloon and body
    #[must_use]
    pub fn has_thoughts(&self) -> bool {
        PLACEHOLDER_RE
            .captures_iter(&self.art)
            .any(|caps| &caps[1] == "thoughts")
    }
}

/// Name-ordered set of templates
#[derive(Clone, Debug, Default)]
pub struct CowCatalog {
    cows: BTreeMap<String, CowTemplate>,
}

impl CowCatalog {
    /// Create a catalog; later templates replace earlier ones of the same name
    pub fn new(cows: impl IntoIterator<Item = CowTemplate>) -> Self {
        let mut catalog = Self::default();
        for cow in cows {
            catalog.insert(cow);
        }
        catalog
    }

    /// The drawings that ship with the crate
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Add or replace a template, returning the one it replaced
    pub fn insert(&mut self, cow: CowTemplate) -> Option<CowTemplate> {
        self.cows.insert(cow.name.clone(), cow)
    }

    /// Look up a template by exact name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CowTemplate> {
        self.cows.get(name)
    }

    /// Whether `name` is in the catalog
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cows.contains_key(name)
    }

    /// Template names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cows.keys().map(String::as_str)
    }

    /// Number of templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.cows.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cows.is_empty()
    }

    /// Template for `name`, falling back to this catalog's `default` and
    /// then to the built-in `default`
    #[must_use]
    pub fn resolve(&self, name: &str) -> &CowTemplate {
        if let Some(cow) = self.cows.get(name) {
            return cow;
        }

        debug!(cow = %name, "Unknown cow, using default");
        if let Some(cow) = self.cows.get(DEFAULT_COW) {
            return cow;
        }
        builtin_default()
    }

    /// Render the body for `name`
    #[must_use]
    pub fn render(&self, name: &str, action: Action, eyes: &str, tongue: &str) -> String {
        self.resolve(name).render(action, eyes, tongue)
    }
}

fn builtin_default() -> &'static CowTemplate {
    static DEFAULT: LazyLock<CowTemplate> =
        LazyLock::new(|| CowTemplate::new(DEFAULT_COW, builtin::DEFAULT));
    BUILTIN.cows.get(DEFAULT_COW).unwrap_or(&*DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEFAULT_SAY: &str = r"        \   ^__^
         \  (oo)\_______
            (__)\       )\/\
                ||----w |
                ||     ||";

    #[test]
    fn test_builtin_default_say() {
        let body = CowCatalog::builtin().render("default", Action::Say, "oo", "");
        assert_eq!(body, DEFAULT_SAY);
    }

    #[test]
    fn test_builtin_default_think_dead() {
        let body = CowCatalog::builtin().render("default", Action::Think, "xx", "U");
        let expected = r"        o   ^__^
         o  (xx)\_______
            (__)\       )\/\
             U  ||----w |
                ||     ||";
        assert_eq!(body, expected);
    }

    #[test]
    fn test_face_is_clamped_and_padded() {
        let cow = CowTemplate::new("face", "[$eyes][$tongue]");
        assert_eq!(cow.render(Action::Say, "o", ""), "[o ][  ]");
        assert_eq!(cow.render(Action::Say, "^^^", "VVV"), "[^^][VV]");
    }

    #[test]
    fn test_second_eye_placeholder() {
        let cow = CowTemplate::new("three", "($eyes$eye)");
        assert_eq!(cow.render(Action::Say, "@O", ""), "(@OO)");
        assert_eq!(cow.render(Action::Say, "@", ""), "(@  )");
    }

    #[test]
    fn test_three_eyes() {
        let body = CowCatalog::builtin().render("three-eyes", Action::Say, "oO", "");
        assert!(body.contains("(oOO)"), "{body}");
    }

    #[test]
    fn test_unknown_cow_falls_back_to_default() {
        let catalog = CowCatalog::builtin();
        assert_eq!(
            catalog.render("no-such-cow", Action::Say, "oo", ""),
            catalog.render("default", Action::Say, "oo", "")
        );
    }

    #[test]
    fn test_empty_catalog_falls_back_to_builtin_default() {
        let catalog = CowCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.render("tux", Action::Say, "oo", ""), DEFAULT_SAY);
    }

    #[test]
    fn test_resolve_borrows_from_local_catalog() {
        let catalog = CowCatalog::new([CowTemplate::new("dot", "$thoughts .")]);
        let cow = catalog.resolve("dot");
        assert_eq!(cow.name, "dot");

        let fallback = catalog.resolve("missing");
        assert_eq!(fallback.name, DEFAULT_COW);
        assert_eq!(fallback.render(Action::Say, "oo", ""), DEFAULT_SAY);
    }

    #[test]
    fn test_substitute_default() {
        let catalog = CowCatalog::new([CowTemplate::new("default", "$thoughts $eyes")]);
        assert_eq!(catalog.render("missing", Action::Think, "..", ""), "o ..");
    }

    #[test]
    fn test_builtin_names_sorted() {
        let names: Vec<&str> = CowCatalog::builtin().names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"default"));
        assert!(names.contains(&"skeleton"));
        assert_eq!(names.len(), builtin::COWS.len());
    }

    #[test]
    fn test_every_builtin_has_thoughts() {
        for cow in CowCatalog::builtin().cows.values() {
            assert!(cow.has_thoughts(), "{} has no connector", cow.name);
            let body = cow.render(Action::Say, "oo", "");
            assert!(!body.contains('$'), "{} left a placeholder", cow.name);
        }
    }

    #[test]
    fn test_insert_replaces() {
        let mut catalog = CowCatalog::default();
        assert!(catalog.insert(CowTemplate::new("a", "1")).is_none());
        let old = catalog.insert(CowTemplate::new("a", "2"));
        assert_eq!(old.map(|cow| cow.art), Some("1".to_string()));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("a"));
    }
}
