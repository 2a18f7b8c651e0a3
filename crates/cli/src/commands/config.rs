use std::env;
use std::fs;
use std::path::Path;

use serde::Serialize;
use storefront_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct ConfigReport {
    command: &'static str,
    status: &'static str,
    message: String,
    fields: Vec<ConfigField>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct ConfigField {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            )
        }
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let fields: [(&'static str, String, &[&str]); 9] = [
        ("database.url", config.database.url.clone(), &["STOREFRONT_DATABASE_URL"]),
        (
            "database.max_connections",
            config.database.max_connections.to_string(),
            &["STOREFRONT_DATABASE_MAX_CONNECTIONS"],
        ),
        (
            "database.timeout_secs",
            config.database.timeout_secs.to_string(),
            &["STOREFRONT_DATABASE_TIMEOUT_SECS"],
        ),
        (
            "server.bind_address",
            config.server.bind_address.clone(),
            &["STOREFRONT_SERVER_BIND_ADDRESS"],
        ),
        ("server.port", config.server.port.to_string(), &["STOREFRONT_SERVER_PORT"]),
        (
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
            &["STOREFRONT_SERVER_GRACEFUL_SHUTDOWN_SECS"],
        ),
        (
            "server.templates_dir",
            config.server.templates_dir.display().to_string(),
            &["STOREFRONT_SERVER_TEMPLATES_DIR"],
        ),
        (
            "logging.level",
            config.logging.level.clone(),
            &["STOREFRONT_LOGGING_LEVEL", "STOREFRONT_LOG_LEVEL"],
        ),
        (
            "logging.format",
            format!("{:?}", config.logging.format),
            &["STOREFRONT_LOGGING_FORMAT", "STOREFRONT_LOG_FORMAT"],
        ),
    ];

    let report = ConfigReport {
        command: "config",
        status: "ok",
        message: "effective config (source precedence: env > file > default)".to_string(),
        fields: fields
            .into_iter()
            .map(|(key, value, env_keys)| ConfigField {
                key,
                source: field_source(
                    key,
                    env_keys,
                    config_file_doc.as_ref(),
                    config_file_path.as_deref(),
                ),
                value,
            })
            .collect(),
    };

    match serde_json::to_string(&report) {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(error) => CommandResult::failure(
            "config",
            "serialization",
            format!("failed to serialize config report: {error}"),
            3,
        ),
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    // Blank values are ignored by the loader, so they are not a source either.
    let env_key =
        env_keys.iter().find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()));
    if let Some(env_key) = env_key {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use toml::Value;

    use super::{contains_path, field_source};

    #[test]
    fn contains_path_walks_nested_tables() {
        let doc: Value = "[server]\nport = 9000\n".parse().expect("toml");

        assert!(contains_path(&doc, "server.port"));
        assert!(!contains_path(&doc, "server.bind_address"));
        assert!(!contains_path(&doc, "database.url"));
    }

    #[test]
    fn file_source_is_reported_when_key_is_in_file() {
        let doc: Value = "[logging]\nlevel = \"warn\"\n".parse().expect("toml");

        let source = field_source(
            "logging.level",
            &["STOREFRONT_TEST_NEVER_SET_LEVEL"],
            Some(&doc),
            Some(Path::new("storefront.toml")),
        );

        assert_eq!(source, "file (storefront.toml)");
    }

    #[test]
    fn default_source_when_no_env_or_file() {
        let source = field_source("server.port", &["STOREFRONT_TEST_NEVER_SET_PORT"], None, None);

        assert_eq!(source, "default");
    }
}
