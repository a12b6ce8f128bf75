// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::HoconError;
use crate::ast::Value;
use crate::export;
use crate::parser::Parser;

mod access;
mod conversion;
mod helpers;

/// A parsed, fully resolved configuration document.
///
/// Every constructor runs the whole pipeline (parse, includes, substitution
/// resolution), so a `Config` never holds a substitution placeholder unless
/// the document root is an array.
#[derive(Debug, Clone)]
pub struct Config {
    root: Value,
    raw_content: String, // Store for error reporting
}

impl Config {
    /// Load a config file, resolving relative includes next to it.
    ///
    /// # Example
    /// ```no_run
    /// # use hocon_cfg::Config;
    /// let config = Config::from_file("application.conf")?;
    /// # Ok::<(), hocon_cfg::HoconError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HoconError> {
        let path_ref = path.as_ref();
        Self::from_file_with_base(path_ref, base_dir_of(path_ref))
    }

    /// Load a config file with fallback support.
    ///
    /// The fallback is only tried when the primary cannot be read; a primary
    /// that exists but fails to parse is reported as is.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, HoconError> {
        let (primary, fallback) = (primary.as_ref(), fallback.as_ref());

        let Ok(content) = read(primary) else {
            debug!(
                primary = %primary.display(),
                fallback = %fallback.display(),
                "primary config unreadable, trying fallback"
            );
            return Self::from_file(fallback).map_err(|e| match e {
                HoconError::FileError { message, .. } => HoconError::FileError {
                    message: format!(
                        "Failed to load config from primary path '{}' or fallback path '{}': {}",
                        primary.display(),
                        fallback.display(),
                        message
                    ),
                    path: format!("{} (fallback: {})", primary.display(), fallback.display()),
                    hint: Some("Check that at least one of the config files exists".into()),
                    code: Some(301),
                },
                other => other,
            });
        };

        Self::from_content(primary, content, base_dir_of(primary))
    }

    /// Load a config file and resolve relative includes against `base_dir`.
    pub fn from_file_with_base<P: AsRef<Path>, B: AsRef<Path>>(path: P, base_dir: B) -> Result<Self, HoconError> {
        let content = read(path.as_ref())?;
        Self::from_content(path.as_ref(), content, base_dir.as_ref())
    }

    fn from_content(path: &Path, content: String, base_dir: &Path) -> Result<Self, HoconError> {
        debug!(path = %path.display(), base_dir = %base_dir.display(), "loading config file");

        // The file itself heads the include stack so it cannot include itself.
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let root = Parser::new(&content)?
            .with_base_dir(base_dir)
            .with_include_stack(vec![canonical])
            .parse()?;

        Ok(Self {
            root,
            raw_content: content,
        })
    }

    /// Parse a config from a string. Relative includes resolve against the
    /// working directory.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, HoconError> {
        let root = Parser::new(content)?.parse()?;
        Ok(Self {
            root,
            raw_content: content.to_string(),
        })
    }

    /// Parse a config from a string, resolving relative includes against `base_dir`.
    pub fn from_str_with_base<B: AsRef<Path>>(content: &str, base_dir: B) -> Result<Self, HoconError> {
        let root = Parser::new(content)?.with_base_dir(base_dir).parse()?;
        Ok(Self {
            root,
            raw_content: content.to_string(),
        })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    /// Convert the resolved tree into any `serde` deserializable type.
    ///
    /// # Example
    /// ```
    /// # use hocon_cfg::Config;
    /// #[derive(serde::Deserialize)]
    /// struct Server { host: String, port: u16 }
    ///
    /// let config = Config::from_str("host = \"localhost\", port = 8080")?;
    /// let server: Server = config.deserialize()?;
    /// assert_eq!(server.port, 8080);
    /// # Ok::<(), hocon_cfg::HoconError>(())
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, HoconError> {
        serde_json::from_value(export::to_json(&self.root)).map_err(|e| HoconError::TypeError {
            message: format!("could not deserialize configuration: {}", e),
            hint: Some("Check that the config matches the target type".into()),
            code: Some(420),
        })
    }
}

fn base_dir_of(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn read(path: &Path) -> Result<String, HoconError> {
    fs::read_to_string(path).map_err(|e| HoconError::FileError {
        message: format!("Failed to read file: {}", e),
        path: path.display().to_string(),
        hint: Some("Check that the file exists and is readable".into()),
        code: Some(301),
    })
}
