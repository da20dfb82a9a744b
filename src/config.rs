/// Name of the configuration file looked up in the project root.
pub(crate) const FILE_NAME: &str = "vendor-assets.toml";

/// Global config shared by the entire program.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Directory containing the installed vendor packages.
    pub vendor_dir: PathBuf,

    /// Directory that generated assets are written to.
    pub out_dir: PathBuf,

    pub css: Bundle,
    pub fonts: Files,
    pub js: Bundle,

    /// Project root that every other path is relative to.
    #[serde(skip)]
    pub root: PathBuf,

    /// Whether to regenerate outputs that are already up to date.
    #[serde(skip)]
    pub force: bool,

    /// The file this config was read from, if any.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

/// Several inputs concatenated into one output file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Bundle {
    pub output: String,
    /// Output directory, relative to `out_dir`.
    pub dir: PathBuf,
    pub inputs: Vec<String>,
    /// Whether a glob in `inputs` may match nothing.
    #[serde(default)]
    pub allow_empty_globs: bool,
}

/// Inputs copied to a directory unchanged.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Files {
    pub dir: PathBuf,
    pub inputs: Vec<String>,
    #[serde(default)]
    pub allow_empty_globs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vendor_dir: PathBuf::from("node_modules"),
            out_dir: PathBuf::from("assets"),
            css: Bundle {
                output: "vendor.css".to_owned(),
                dir: PathBuf::from("css"),
                inputs: strings(&[
                    "bootstrap/dist/css/bootstrap.css",
                    "bootstrap/dist/css/bootstrap-theme.css",
                    "font-awesome/css/font-awesome.css",
                    "bootstrap-datepicker/dist/css/*.standalone.css",
                ]),
                allow_empty_globs: true,
            },
            fonts: Files {
                dir: PathBuf::from("fonts"),
                inputs: strings(&["bootstrap/dist/fonts/*", "font-awesome/fonts/*"]),
                allow_empty_globs: false,
            },
            js: Bundle {
                output: "vendor.js".to_owned(),
                dir: PathBuf::from("js"),
                inputs: strings(&["jquery/dist/jquery.js", "bootstrap/dist/js/bootstrap.js"]),
                allow_empty_globs: false,
            },
            root: PathBuf::from("."),
            force: false,
            path: None,
        }
    }
}

fn strings(s: &[&str]) -> Vec<String> {
    s.iter().map(|&s| s.to_owned()).collect()
}

impl Config {
    /// Load the config for a project.
    ///
    /// With no explicit path, `vendor-assets.toml` in the root is used if it exists.
    #[context("failed to load config")]
    pub(crate) fn load(root: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_owned()),
            None => Some(root.join(FILE_NAME)).filter(|path| path.is_file()),
        };

        let mut config = match &path {
            Some(path) => {
                let src = fs::read_to_string(path)
                    .with_context(|| format!("failed to read `{}`", path.display()))?;
                toml::from_str::<Self>(&src)
                    .with_context(|| format!("failed to parse `{}`", path.display()))?
            }
            None => Self::default(),
        };

        config.root = root.to_owned();
        config.path = path;
        Ok(config)
    }

    pub(crate) fn vendor_dir(&self) -> PathBuf {
        self.root.join(&self.vendor_dir)
    }

    pub(crate) fn out_dir(&self, dir: &Path) -> PathBuf {
        self.root.join(&self.out_dir).join(dir)
    }

    pub(crate) fn modified(&self) -> Modified {
        Modified::latest(&self.path)
    }
}


use crate::util::asset::Modified;
use anyhow::Context as _;
use fn_error_context::context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
