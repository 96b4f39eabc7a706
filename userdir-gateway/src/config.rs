//! Gateway configuration read from the environment.

use userdir_core::{IdAssignment, PathIdMode};

/// Explicit listen address, `host:port`.
pub const LISTEN_ADDR_VAR: &str = "USERDIR_LISTEN_ADDR";
/// Port used with `0.0.0.0` when no explicit address is given.
pub const PORT_VAR: &str = "PORT";
/// `length` or `max-plus-one`.
pub const ID_ASSIGNMENT_VAR: &str = "USERDIR_ID_ASSIGNMENT";
/// `lenient` or `strict`.
pub const PATH_IDS_VAR: &str = "USERDIR_PATH_IDS";

const DEFAULT_PORT: u16 = 8080;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A variable is set to a value the gateway does not understand.
    #[error("invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Runtime settings for the gateway binary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Socket address the server binds to.
    pub listen_addr: String,
    /// Id policy handed to the user store.
    pub id_assignment: IdAssignment,
    /// How `{id}` path segments are parsed.
    pub path_ids: PathIdMode,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            id_assignment: IdAssignment::default(),
            path_ids: PathIdMode::default(),
        }
    }
}

impl GatewayConfig {
    /// Read configuration from process environment variables.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to an
    /// unrecognised value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value if set.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to an
    /// unrecognised value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = match lookup(LISTEN_ADDR_VAR) {
            Some(addr) => addr,
            None => {
                let port = match lookup(PORT_VAR) {
                    Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                        key: PORT_VAR,
                        value: raw,
                        expected: "a port number",
                    })?,
                    None => DEFAULT_PORT,
                };
                format!("0.0.0.0:{port}")
            }
        };

        let id_assignment = match lookup(ID_ASSIGNMENT_VAR).as_deref() {
            None | Some("length") => IdAssignment::Length,
            Some("max-plus-one") => IdAssignment::MaxPlusOne,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: ID_ASSIGNMENT_VAR,
                    value: other.to_owned(),
                    expected: "'length' or 'max-plus-one'",
                })
            }
        };

        let path_ids = match lookup(PATH_IDS_VAR).as_deref() {
            None | Some("lenient") => PathIdMode::Lenient,
            Some("strict") => PathIdMode::Strict,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: PATH_IDS_VAR,
                    value: other.to_owned(),
                    expected: "'lenient' or 'strict'",
                })
            }
        };

        Ok(Self { listen_addr, id_assignment, path_ids })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<GatewayConfig, ConfigError> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        GatewayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_compatible_defaults() {
        let config = match config_from(&[]) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config, GatewayConfig::default());
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.id_assignment, IdAssignment::Length);
        assert_eq!(config.path_ids, PathIdMode::Lenient);
    }

    #[test]
    fn port_variable_sets_listen_port() {
        let config = match config_from(&[("PORT", "9000")]) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.listen_addr, "0.0.0.0:9000");
    }

    #[test]
    fn explicit_listen_addr_wins_over_port() {
        let config = match config_from(&[
            ("USERDIR_LISTEN_ADDR", "127.0.0.1:3000"),
            ("PORT", "9000"),
        ]) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.listen_addr, "127.0.0.1:3000");
    }

    #[test]
    fn policies_are_selectable() {
        let config = match config_from(&[
            ("USERDIR_ID_ASSIGNMENT", "max-plus-one"),
            ("USERDIR_PATH_IDS", "strict"),
        ]) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.id_assignment, IdAssignment::MaxPlusOne);
        assert_eq!(config.path_ids, PathIdMode::Strict);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = config_from(&[("PORT", "eighty")]);
        assert!(
            matches!(err, Err(ConfigError::InvalidValue { key: "PORT", .. })),
            "non-numeric port must be rejected"
        );

        let err = config_from(&[("USERDIR_ID_ASSIGNMENT", "random")]);
        match err {
            Err(e) => assert!(e.to_string().contains("random"), "message must name the value"),
            Ok(c) => panic!("expected error, got {c:?}"),
        }

        let err = config_from(&[("USERDIR_PATH_IDS", "loose")]);
        assert!(matches!(err, Err(ConfigError::InvalidValue { key: "USERDIR_PATH_IDS", .. })));
    }
}
