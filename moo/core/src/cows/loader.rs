//! Cow file loading
//!
//! Two file formats are accepted:
//!
//! - plain art: the whole file is the template, with `$thoughts`, `$eyes`,
//!   `$eye` and `$tongue` placeholders;
//! - classic cowfiles: `##` comment lines and a `$the_cow = <<EOC;` heredoc
//!   holding the art, with backslash escapes and `${name}` placeholders.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::{CowCatalog, CowTemplate};

/// File extension of template files
pub const COW_EXTENSION: &str = "cow";

/// Template loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read a template file or directory
    #[error("Failed to read cow file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Template name is not usable as a lookup key
    #[error("Invalid cow name: {0:?}")]
    InvalidName(String),

    /// Template has nowhere to draw the connector
    #[error("Cow {name} has no $thoughts placeholder")]
    MissingPlaceholder {
        /// Template name
        name: String,
    },
}

/// Parse template source into a [`CowTemplate`]
///
/// # Errors
///
/// Returns [`CatalogError::InvalidName`] for an empty name or one containing
/// whitespace or path separators, and [`CatalogError::MissingPlaceholder`]
/// when the art has no `$thoughts`.
pub fn parse_template(name: &str, source: &str) -> Result<CowTemplate, CatalogError> {
    if name.is_empty() || name.contains(['/', '\\']) || name.chars().any(char::is_whitespace) {
        return Err(CatalogError::InvalidName(name.to_string()));
    }

    let art = match heredoc(source) {
        Some((body, interpolate)) if interpolate => unescape(&body),
        Some((body, _)) => body,
        None => source.trim_end_matches(['\n', '\r']).to_string(),
    };

    let cow = CowTemplate::new(name, art);
    if !cow.has_thoughts() {
        return Err(CatalogError::MissingPlaceholder {
            name: name.to_string(),
        });
    }
    Ok(cow)
}

/// Body of a `$the_cow = <<TAG;` heredoc, and whether it interpolates
fn heredoc(source: &str) -> Option<(String, bool)> {
    let mut lines = source.lines();

    let opener = lines.find(|line| {
        let line = line.trim_start();
        line.starts_with("$the_cow") && line.contains("<<")
    })?;

    let (_, tag) = opener.split_once("<<")?;
    let tag = tag.trim().trim_end_matches(';').trim();
    let interpolate = !tag.starts_with('\'');
    let tag = tag.trim_matches(|c| c == '"' || c == '\'');

    let body: Vec<&str> = lines.take_while(|line| line.trim_end() != tag).collect();
    Some((body.join("\n"), interpolate))
}

/// Undo double-quoted string escapes and brace placeholders
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            _ => out.push(c),
        }
    }

    for name in ["thoughts", "eyes", "eye", "tongue"] {
        out = out.replace(&format!("${{{name}}}"), &format!("${name}"));
    }
    out
}

/// Read every `*.cow` file in `dir`, sorted by name
///
/// # Errors
///
/// Returns [`CatalogError::ReadError`] if the directory or a file cannot be
/// read, or the parse error of the first invalid template.
pub fn load_dir(dir: &Path) -> Result<Vec<CowTemplate>, CatalogError> {
    let entries = fs::read_dir(dir).map_err(|source| CatalogError::ReadError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            let is_cow = path.is_file()
                && path.extension().is_some_and(|ext| ext == COW_EXTENSION);
            if !is_cow {
                debug!(path = %path.display(), "Skipping non-cow file");
            }
            is_cow
        })
        .collect();
    paths.sort();

    let mut cows = Vec::with_capacity(paths.len());
    for path in paths {
        let source = fs::read_to_string(&path).map_err(|source| CatalogError::ReadError {
            path: path.clone(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        cows.push(parse_template(&name, &source)?);
    }
    Ok(cows)
}

impl CowCatalog {
    /// Add every template in `dir`, replacing built-ins of the same name
    ///
    /// Returns the number of templates read.
    ///
    /// # Errors
    ///
    /// See [`load_dir`].
    pub fn extend_from_dir(&mut self, dir: &Path) -> Result<usize, CatalogError> {
        let cows = load_dir(dir)?;
        let count = cows.len();
        for cow in cows {
            if let Some(replaced) = self.insert(cow) {
                debug!(cow = %replaced.name, "Replaced template");
            }
        }
        info!(dir = %dir.display(), count, "Loaded cow files");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balloon::Action;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const CLASSIC: &str = r#"##
## The classic cow
##
$the_cow = <<"EOC";
        $thoughts   ^__^
         $thoughts  (${eyes})\\_______
            (__)\\       )\\/\\
             $tongue ||----w |
                ||     ||
EOC
"#;

    #[test]
    fn test_parse_plain_art() {
        let cow = parse_template("plain", "$thoughts ($eyes)\n  $tongue\n\n").unwrap();
        assert_eq!(cow.art, "$thoughts ($eyes)\n  $tongue");
        assert_eq!(cow.render(Action::Think, "..", ""), "o (..)\n    ");
    }

    #[test]
    fn test_parse_classic_heredoc() {
        let cow = parse_template("classic", CLASSIC).unwrap();
        assert_eq!(cow.art, crate::cows::builtin::DEFAULT);
    }

    #[test]
    fn test_parse_single_quoted_heredoc_is_literal() {
        let source = "$the_cow = <<'EOC';\n$thoughts \\o/\nEOC\n";
        let cow = parse_template("literal", source).unwrap();
        assert_eq!(cow.art, "$thoughts \\o/");
    }

    #[test]
    fn test_escaped_at_signs() {
        let source = "$the_cow = <<EOC;\n$thoughts \\@\\@\nEOC\n";
        let cow = parse_template("at", source).unwrap();
        assert_eq!(cow.art, "$thoughts @@");
    }

    #[test]
    fn test_missing_thoughts() {
        let err = parse_template("mute", "($eyes)").unwrap_err();
        assert!(matches!(err, CatalogError::MissingPlaceholder { name } if name == "mute"));
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "a b", "../x", "a\\b"] {
            let err = parse_template(name, "$thoughts").unwrap_err();
            assert!(matches!(err, CatalogError::InvalidName(_)), "{name:?}");
        }
    }

    #[test]
    fn test_load_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.cow"), "$thoughts b").unwrap();
        fs::write(dir.path().join("a.cow"), "$thoughts a").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let cows = load_dir(dir.path()).unwrap();
        let names: Vec<&str> = cows.iter().map(|cow| cow.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_load_dir_missing() {
        let err = load_dir(Path::new("/nonexistent/moo/cows")).unwrap_err();
        assert!(matches!(err, CatalogError::ReadError { .. }));
    }

    #[test]
    fn test_load_dir_rejects_bad_template() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mute.cow"), "no connector").unwrap();
        assert!(load_dir(dir.path()).is_err());
    }

    #[test]
    fn test_extend_from_dir_overrides_builtin() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tux.cow"), "$thoughts penguin").unwrap();
        fs::write(dir.path().join("new.cow"), "$thoughts new").unwrap();

        let mut catalog = CowCatalog::builtin().clone();
        let before = catalog.len();
        assert_eq!(catalog.extend_from_dir(dir.path()).unwrap(), 2);
        assert_eq!(catalog.len(), before + 1);
        assert_eq!(catalog.render("tux", Action::Say, "oo", ""), "\\ penguin");
    }
}
