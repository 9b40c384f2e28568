//! # Configuration
//!
//! Optional TOML file with run defaults. Every key is optional and command
//! line flags win over file values.
//!
//! ```toml
//! blacklist = "blacklist.txt"
//! archetypes = ["controls-state-change", "binding"]
//! pretty = true
//!
//! [exchange]
//! old = "GDP"
//! new = "GTP"
//! ```

use pathcards_core::{Archetype, MoleculePair, PathcardsError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Contents of a config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathcardsConfig {
    pub blacklist: Option<PathBuf>,
    pub archetypes: Vec<String>,
    pub pretty: Option<bool>,
    pub exchange: ExchangeConfig,
}

/// Molecules swapped by the exchange archetypes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExchangeConfig {
    pub old: Option<String>,
    pub new: Option<String>,
}

/// Effective settings of one run, after flags are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub blacklist: Option<PathBuf>,
    /// Empty means every archetype.
    pub archetypes: Vec<Archetype>,
    pub exchange: MoleculePair,
    pub pretty: bool,
}

impl PathcardsConfig {
    /// Parse config text.
    pub fn parse(text: &str) -> Result<Self, PathcardsError> {
        toml::from_str(text).map_err(|e| PathcardsError::ConfigError(e.to_string()))
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, PathcardsError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            PathcardsError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(PathcardsError::ConfigError(format!(
                "Config file '{}' exceeds {} bytes",
                path.display(),
                MAX_CONFIG_FILE_SIZE
            )));
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            PathcardsError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    /// Load from an optional path; no path means defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, PathcardsError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command line overrides.
    ///
    /// A flag given on the command line replaces the file value; archetype
    /// names from either source are validated here.
    pub fn resolve(
        self,
        blacklist: Option<PathBuf>,
        archetypes: &[String],
        compact: bool,
    ) -> Result<Settings, PathcardsError> {
        let names = if archetypes.is_empty() {
            &self.archetypes
        } else {
            archetypes
        };
        let archetypes = names
            .iter()
            .map(|name| name.parse::<Archetype>())
            .collect::<Result<Vec<_>, _>>()?;

        let defaults = MoleculePair::default();
        let exchange = MoleculePair {
            old: self.exchange.old.unwrap_or(defaults.old),
            new: self.exchange.new.unwrap_or(defaults.new),
        };

        Ok(Settings {
            blacklist: blacklist.or(self.blacklist),
            archetypes,
            exchange,
            pretty: !compact && self.pretty.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = PathcardsConfig::parse("")
            .expect("parse")
            .resolve(None, &[], false)
            .expect("resolve");
        assert_eq!(settings.blacklist, None);
        assert!(settings.archetypes.is_empty());
        assert_eq!(settings.exchange, MoleculePair::default());
        assert!(settings.pretty);
    }

    #[test]
    fn file_values_are_read() {
        let config = PathcardsConfig::parse(
            r#"
            blacklist = "ubiquitous.txt"
            archetypes = ["binding", "expression"]
            pretty = false

            [exchange]
            old = "ADP"
            new = "ATP"
            "#,
        )
        .expect("parse");
        let settings = config.resolve(None, &[], false).expect("resolve");

        assert_eq!(settings.blacklist, Some(PathBuf::from("ubiquitous.txt")));
        assert_eq!(
            settings.archetypes,
            vec![Archetype::Binding, Archetype::Expression]
        );
        assert_eq!(settings.exchange.old, "ADP");
        assert_eq!(settings.exchange.new, "ATP");
        assert!(!settings.pretty);
    }

    #[test]
    fn flags_override_file() {
        let config = PathcardsConfig::parse(
            "blacklist = \"a.txt\"\narchetypes = [\"binding\"]\n",
        )
        .expect("parse");
        let settings = config
            .resolve(
                Some(PathBuf::from("b.txt")),
                &["expression".to_string()],
                true,
            )
            .expect("resolve");

        assert_eq!(settings.blacklist, Some(PathBuf::from("b.txt")));
        assert_eq!(settings.archetypes, vec![Archetype::Expression]);
        assert!(!settings.pretty);
    }

    #[test]
    fn partial_exchange_keeps_other_default() {
        let settings = PathcardsConfig::parse("[exchange]\nnew = \"ATP\"\n")
            .expect("parse")
            .resolve(None, &[], false)
            .expect("resolve");
        assert_eq!(settings.exchange.old, "GDP");
        assert_eq!(settings.exchange.new, "ATP");
    }

    #[test]
    fn bad_input_is_a_config_error() {
        assert!(matches!(
            PathcardsConfig::parse("pretty = \"yes\""),
            Err(PathcardsError::ConfigError(_))
        ));
        assert!(matches!(
            PathcardsConfig::parse("colour = true"),
            Err(PathcardsError::ConfigError(_))
        ));
        assert!(matches!(
            PathcardsConfig::parse("archetypes = [\"telepathy\"]")
                .expect("parse")
                .resolve(None, &[], false),
            Err(PathcardsError::ConfigError(_))
        ));
    }
}
