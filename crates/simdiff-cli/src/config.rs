use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::cli::{Cli, OutputFormat};

/// Run configuration: file values first, then command-line overrides.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimdiffConfig {
    /// Master (baseline) snapshot path.
    pub master: PathBuf,
    /// Branch (candidate) snapshot path.
    pub branch: PathBuf,
    pub format: OutputFormat,
    /// Colorize text output when writing to a terminal.
    pub color: bool,
    /// Exit with status 1 when any difference is found.
    pub fail_on_diff: bool,
}

impl Default for SimdiffConfig {
    fn default() -> Self {
        Self {
            master: PathBuf::from("master_sorted.json"),
            branch: PathBuf::from("branch_sorted.json"),
            format: OutputFormat::Text,
            color: true,
            fail_on_diff: false,
        }
    }
}

impl SimdiffConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Layer command-line flags over this configuration.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(master) = &cli.master {
            self.master = master.clone();
        }
        if let Some(branch) = &cli.branch {
            self.branch = branch.clone();
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if cli.no_color {
            self.color = false;
        }
        if cli.fail_on_diff {
            self.fail_on_diff = true;
        }
        self
    }

    /// Build the effective configuration for a command line.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.with_cli(cli))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn default_config() {
        let c = SimdiffConfig::default();
        assert_eq!(c.master, PathBuf::from("master_sorted.json"));
        assert_eq!(c.branch, PathBuf::from("branch_sorted.json"));
        assert_eq!(c.format, OutputFormat::Text);
        assert!(c.color);
        assert!(!c.fail_on_diff);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = SimdiffConfig::from_toml_str(
            r#"
            branch = "out/branch.json"
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(c.master, PathBuf::from("master_sorted.json"));
        assert_eq!(c.branch, PathBuf::from("out/branch.json"));
        assert_eq!(c.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(SimdiffConfig::from_toml_str("tolerance = 0.01").is_err());
    }

    #[test]
    fn cli_overrides_file() {
        let cli = Cli::try_parse_from([
            "simdiff", "--master", "m.json", "--format", "text", "--no-color",
        ])
        .unwrap();
        let file = SimdiffConfig {
            format: OutputFormat::Json,
            fail_on_diff: true,
            ..Default::default()
        };
        let c = file.with_cli(&cli);
        assert_eq!(c.master, PathBuf::from("m.json"));
        assert_eq!(c.branch, PathBuf::from("branch_sorted.json"));
        assert_eq!(c.format, OutputFormat::Text);
        assert!(!c.color);
        assert!(c.fail_on_diff);
    }

    #[test]
    fn resolve_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simdiff.toml");
        fs::write(&path, "fail_on_diff = true\ncolor = false\n").unwrap();

        let cli = Cli::try_parse_from(["simdiff", "--config", path.to_str().unwrap()]).unwrap();
        let c = SimdiffConfig::resolve(&cli).unwrap();
        assert!(c.fail_on_diff);
        assert!(!c.color);
    }

    #[test]
    fn resolve_missing_config_fails() {
        let cli = Cli::try_parse_from(["simdiff", "--config", "/nonexistent/simdiff.toml"]).unwrap();
        let err = SimdiffConfig::resolve(&cli).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
