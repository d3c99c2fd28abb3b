use crate::error::Error;
use crate::{fv_error, muted_error};
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::Path;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Backend generation. Only the newer one knows how to stringify a markup value.
#[derive(Copy, Clone, PartialEq, Debug, Default, Deserialize, EnumString, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
pub enum BackendFlavor {
    /// Older backend, markup values are described by the object descriptor payload only.
    #[strum(serialize = "legacy")]
    Legacy,
    /// Backend accepts `<expr>.toXMLString()` evaluation.
    #[default]
    #[strum(serialize = "stringify")]
    Stringify,
}

/// Inspector configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Values longer than this are shown truncated with a "show full value" link.
    pub max_value_length: usize,
    /// Backend generation, drives markup value presentation.
    pub backend: BackendFlavor,
    /// Prefix that marks a backing field of an accessor (`_name` backs `name`).
    pub backing_field_prefix: String,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            max_value_length: Self::DEFAULT_MAX_VALUE_LENGTH,
            backend: BackendFlavor::default(),
            backing_field_prefix: "_".to_string(),
        }
    }
}

impl InspectorConfig {
    const DEFAULT_PATH: &'static str = ".config/fdbview/inspector.toml";
    pub const DEFAULT_MAX_VALUE_LENGTH: usize = 1000;

    pub fn from_toml(data: &str) -> Result<Self, Error> {
        Ok(toml::de::from_str(data)?)
    }

    /// Load configuration from file. Return [`None`] on errors.
    ///
    /// # Arguments
    ///
    /// * `path`: path to configuration file, if `None` then `$HOME/.config/fdbview/inspector.toml` used
    pub fn from_file(path: Option<&str>) -> Option<Self> {
        match path {
            None => {
                let path = home::home_dir()?.join(Self::DEFAULT_PATH);
                muted_error!(Self::read(path), "Error while load inspector config:")
            }
            Some(path) => match Self::read(path) {
                Ok(config) => Some(config),
                Err(err) => {
                    fv_error!("Error while load inspector config file: {err}");
                    None
                }
            },
        }
    }

    fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let data = read_to_string(path)?;
        Self::from_toml(&data)
    }
}
