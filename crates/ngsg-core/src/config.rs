use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Project configuration loaded from `.ngsg.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NgsgConfig {
    /// Path or `http(s)://` URL of the Swagger document.
    pub source: Option<String>,
    pub output: String,
    /// Name of the generated NgModule, without the `Module` suffix.
    pub module: String,
    pub clear_output: bool,
    pub resolves: bool,
    pub null_body: NullBody,
    pub on_error: OnError,
}

impl Default for NgsgConfig {
    fn default() -> Self {
        Self {
            source: None,
            output: "./output".to_string(),
            module: "Api".to_string(),
            clear_output: true,
            resolves: false,
            null_body: NullBody::default(),
            on_error: OnError::default(),
        }
    }
}

/// What POST and PUT calls send when they declare neither body nor form data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullBody {
    /// Pass an explicit `null` body.
    #[default]
    Emit,
    /// Call with the URL only.
    Omit,
}

/// How a fatal pipeline failure is surfaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// Log the failure and finish with a failed status.
    #[default]
    Report,
    /// Propagate the error to the caller.
    Abort,
}

impl FromStr for NullBody {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emit" => Ok(NullBody::Emit),
            "omit" => Ok(NullBody::Omit),
            other => Err(format!("invalid null body mode `{other}` (expected emit or omit)")),
        }
    }
}

impl fmt::Display for NullBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NullBody::Emit => "emit",
            NullBody::Omit => "omit",
        })
    }
}

impl FromStr for OnError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "report" => Ok(OnError::Report),
            "abort" => Ok(OnError::Abort),
            other => Err(format!("invalid error mode `{other}` (expected report or abort)")),
        }
    }
}

impl fmt::Display for OnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OnError::Report => "report",
            OnError::Abort => "abort",
        })
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".ngsg.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<NgsgConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: NgsgConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# ngsg configuration
# source: swagger.json        # local path or http(s):// URL
output: ./output
module: Api                   # generates api.module.ts / ApiModule
clear_output: true            # remove the output directory before writing
resolves: false               # generate route resolvers per method
null_body: emit               # emit | omit (POST/PUT without a body)
on_error: report              # report | abort
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NgsgConfig::default();
        assert_eq!(config.source, None);
        assert_eq!(config.output, "./output");
        assert_eq!(config.module, "Api");
        assert!(config.clear_output);
        assert!(!config.resolves);
        assert_eq!(config.null_body, NullBody::Emit);
        assert_eq!(config.on_error, OnError::Report);
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
source: https://petstore.swagger.io/v2/swagger.json
output: src/api
module: Petstore
clear_output: false
resolves: true
null_body: omit
on_error: abort
"#;
        let config: NgsgConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(
            config.source.as_deref(),
            Some("https://petstore.swagger.io/v2/swagger.json")
        );
        assert_eq!(config.output, "src/api");
        assert_eq!(config.module, "Petstore");
        assert!(!config.clear_output);
        assert!(config.resolves);
        assert_eq!(config.null_body, NullBody::Omit);
        assert_eq!(config.on_error, OnError::Abort);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: NgsgConfig = serde_yaml_ng::from_str("source: api.yaml\n").unwrap();
        assert_eq!(config.source.as_deref(), Some("api.yaml"));
        // Defaults applied
        assert_eq!(config.output, "./output");
        assert_eq!(config.module, "Api");
    }

    #[test]
    fn test_default_content_parses_to_defaults() {
        let config: NgsgConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config, NgsgConfig::default());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("omit".parse::<NullBody>().unwrap(), NullBody::Omit);
        assert_eq!("abort".parse::<OnError>().unwrap(), OnError::Abort);
        assert!("never".parse::<NullBody>().is_err());
        assert_eq!(OnError::Report.to_string(), "report");
    }
}
