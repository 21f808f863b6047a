use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileOutputConfig, FileRoutineConfig};
use super::models::{AppConfig, OutputFormat};
use crate::cli::GlobalOptions;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::utils::parser;
use skinprint::core::models::routine::RoutineSlot;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// Resolves settings: built-in defaults, then the config file, then `-S` overrides, then
/// explicit flags.
pub fn build_config(options: &GlobalOptions, data_manager: &DataManager) -> Result<AppConfig> {
    let config_path = options
        .config
        .clone()
        .or_else(DataManager::default_config_file);

    let file_config = match &config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    merge(options, file_config, data_manager)
}

fn merge(
    options: &GlobalOptions,
    file_config: FileConfig,
    data_manager: &DataManager,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = apply_set_values(file_config, &options.set_values)?;

    let store_path = options
        .store
        .clone()
        .or(file_config.store_path)
        .unwrap_or_else(|| data_manager.default_store_path());

    let catalog_path = options.catalog.clone().or(file_config.catalog_path);

    let output_format = if options.json {
        OutputFormat::Json
    } else {
        match file_config.output.and_then(|o| o.format) {
            Some(value) => OutputFormat::from_str(&value).map_err(CliError::Config)?,
            None => defaults.output_format,
        }
    };

    let default_time = match file_config.routine.and_then(|r| r.default_time) {
        Some(value) => RoutineSlot::from_str(&value).map_err(|e| {
            CliError::Config(format!("Invalid value for routine.default-time: {}", e))
        })?,
        None => defaults.default_time,
    };

    let config = AppConfig {
        store_path,
        catalog_path,
        output_format,
        default_time,
    };
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "store-path" => config.store_path = Some(PathBuf::from(value_str)),
            "catalog-path" => config.catalog_path = Some(PathBuf::from(value_str)),
            "output.format" => {
                config
                    .output
                    .get_or_insert_with(FileOutputConfig::default)
                    .format = Some(value_str.to_string());
            }
            "routine.default-time" => {
                config
                    .routine
                    .get_or_insert_with(FileRoutineConfig::default)
                    .default_time = Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn manager(base: &Path) -> DataManager {
        DataManager::with_custom_path(base.to_path_buf())
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let tmp = tempdir().unwrap();
        let config = merge(&GlobalOptions::default(), FileConfig::default(), &manager(tmp.path())).unwrap();
        assert_eq!(config.store_path, tmp.path().join("store.json"));
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.output_format, OutputFormat::Text);
        assert_eq!(config.default_time, RoutineSlot::Both);
    }

    #[test]
    fn build_config_reads_file() {
        let tmp = tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
            store-path = "/var/skin/store.json"
            catalog-path = "catalog.toml"

            [output]
            format = "json"

            [routine]
            default-time = "pm"
            "#,
        );
        let options = GlobalOptions {
            config: Some(path),
            ..Default::default()
        };
        let config = build_config(&options, &manager(tmp.path())).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/var/skin/store.json"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.toml")));
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.default_time, RoutineSlot::Pm);
    }

    #[test]
    fn set_values_override_file_and_flags_override_both() {
        let tmp = tempdir().unwrap();
        let file = FileConfig {
            store_path: Some(PathBuf::from("from-file.json")),
            output: Some(FileOutputConfig {
                format: Some("json".to_string()),
            }),
            ..Default::default()
        };
        let options = GlobalOptions {
            set_values: vec![
                "store-path=from-set.json".to_string(),
                "output.format=text".to_string(),
                "routine.default-time=am".to_string(),
            ],
            ..Default::default()
        };
        let config = merge(&options, file.clone(), &manager(tmp.path())).unwrap();
        assert_eq!(config.store_path, PathBuf::from("from-set.json"));
        assert_eq!(config.output_format, OutputFormat::Text);
        assert_eq!(config.default_time, RoutineSlot::Am);

        let options = GlobalOptions {
            store: Some(PathBuf::from("from-flag.json")),
            json: true,
            ..options
        };
        let config = merge(&options, file, &manager(tmp.path())).unwrap();
        assert_eq!(config.store_path, PathBuf::from("from-flag.json"));
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn unknown_keys_and_bad_values_are_config_errors() {
        let tmp = tempdir().unwrap();
        let options = GlobalOptions {
            set_values: vec!["colour=blue".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            merge(&options, FileConfig::default(), &manager(tmp.path())),
            Err(CliError::Config(_))
        ));

        let options = GlobalOptions {
            set_values: vec!["routine.default-time=noon".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            merge(&options, FileConfig::default(), &manager(tmp.path())),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn unknown_file_keys_fail_to_parse() {
        let tmp = tempdir().unwrap();
        let path = write_config(tmp.path(), "threads = 4\n");
        let options = GlobalOptions {
            config: Some(path),
            ..Default::default()
        };
        assert!(matches!(
            build_config(&options, &manager(tmp.path())),
            Err(CliError::FileParsing { .. })
        ));
    }
}
