use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
}

/// Where the site is read from and written to.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Markdown pages
    pub content: PathBuf,
    /// Assets copied verbatim into the output
    #[serde(rename = "static")]
    pub static_dir: PathBuf,
    /// HTML page template with `{{ Title }}` and `{{ Content }}` placeholders
    pub template: PathBuf,
    pub output: PathBuf,
    /// Prefix substituted for the leading `/` of root-relative URLs
    pub basepath: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            template: PathBuf::from("template.html"),
            output: PathBuf::from("public"),
            basepath: "/".to_string(),
        }
    }
}

impl Config {
    /// The configuration bundled with the binary.
    ///
    /// `build.rs` rejects a bundled file that does not set every `[site]` key
    /// as a string, so deserializing it cannot fail.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("default_config.toml is validated by build.rs")
    }

    /// Load config from a TOML file, or return the compiled default if the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::compiled_default()),
            Err(e) => Err(Error::io(path, e)),
        }
    }
}
