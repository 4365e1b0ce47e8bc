use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One step of a batch, tagged by `"command"` in JSON.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum BatchStep {
    /// Read `path` and store it as `name`.
    Load { path: PathBuf, name: String },
    /// Write the raster stored as `name` to `path`.
    Save { name: String, path: PathBuf },
    /// Write the histogram of the raster stored as `name` to `path` as JSON.
    Histogram { name: String, path: PathBuf },
    /// Store the greyscale stencil of `source` as `dest`.
    Mask { source: String, dest: String },
    /// Run `operation` (with its textual `args`) on `source`, storing the
    /// result as `dest`. With `mask`, only the stencil's dark region changes.
    Apply {
        operation: String,
        #[serde(default)]
        args: Vec<String>,
        source: String,
        dest: String,
        #[serde(default)]
        mask: Option<String>,
    },
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BatchConfig {
    /// Seed for the mosaic random source; fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub steps: Vec<BatchStep>,
}

pub fn load_config(path: &Path) -> Result<BatchConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<BatchConfig, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        let cfg = parse_config(
            r#"{
                "seed": 9,
                "steps": [
                    { "command": "load", "path": "in.ppm", "name": "a" },
                    { "command": "mask", "source": "a", "dest": "m" },
                    { "command": "apply", "operation": "brighten", "args": ["10"],
                      "source": "a", "dest": "b", "mask": "m" },
                    { "command": "apply", "operation": "blur", "source": "b", "dest": "c" },
                    { "command": "save", "name": "c", "path": "out.png" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.steps.len(), 5);
        assert_eq!(
            cfg.steps[3],
            BatchStep::Apply {
                operation: "blur".into(),
                args: vec![],
                source: "b".into(),
                dest: "c".into(),
                mask: None,
            }
        );
    }

    #[test]
    fn unknown_command_fails_to_parse() {
        assert!(parse_config(r#"{ "steps": [ { "command": "undo" } ] }"#).is_err());
    }
}
