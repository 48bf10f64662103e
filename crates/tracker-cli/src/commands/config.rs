//! `tracker config`: inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

const UNSET: &str = "(unset)";

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.document(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.document(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.document(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    fn show<T: ToString>(value: Option<T>) -> String {
        value.map_or_else(|| UNSET.to_string(), |v| v.to_string())
    }

    let ids = &config.identifiers;
    match key {
        "validation.mode" => Ok(show(config.validation.mode)),
        "validation.import_strategy" => Ok(show(config.validation.import_strategy)),
        "identifiers.org_unit" => Ok(show(ids.org_unit)),
        "identifiers.program" => Ok(show(ids.program)),
        "identifiers.program_stage" => Ok(show(ids.program_stage)),
        "identifiers.category_option_combo" => Ok(show(ids.category_option_combo)),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "logging.file" => Ok(show(config.logging.file.as_ref().map(|p| p.display()))),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::domain::{IdScheme, ValidationMode};

    #[test]
    fn unset_keys_are_marked() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "validation.mode").unwrap(), UNSET);
        assert_eq!(get_config_value(&cfg, "output.format").unwrap(), "table");
    }

    #[test]
    fn set_keys_use_wire_names() {
        let mut cfg = AppConfig::default();
        cfg.validation.mode = Some(ValidationMode::FailFast);
        cfg.identifiers.program = Some(IdScheme::Code);

        assert_eq!(get_config_value(&cfg, "validation.mode").unwrap(), "fail-fast");
        assert_eq!(get_config_value(&cfg, "identifiers.program").unwrap(), "code");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }
}
