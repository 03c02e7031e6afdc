//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::locale::Locale;
use crate::domain::recording::Duration;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    *field_mut(&mut config, key)? = Some(value.to_string());

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    presenter.output(field(&config, key).unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, field(&config, key).unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: "Unknown key".to_string(),
    }
}

fn field<'a>(config: &'a AppConfig, key: &str) -> Option<&'a str> {
    let value = match key {
        "locale" => &config.locale,
        "transcription_model" => &config.transcription_model,
        "emotion_model" => &config.emotion_model,
        "request_timeout" => &config.request_timeout,
        "transcription_timeout" => &config.transcription_timeout,
        "record_duration" => &config.record_duration,
        "output_dir" => &config.output_dir,
        "secrets_path" => &config.secrets_path,
        _ => return None,
    };
    value.as_deref()
}

fn field_mut<'a>(config: &'a mut AppConfig, key: &str) -> Result<&'a mut Option<String>, ConfigError> {
    Ok(match key {
        "locale" => &mut config.locale,
        "transcription_model" => &mut config.transcription_model,
        "emotion_model" => &mut config.emotion_model,
        "request_timeout" => &mut config.request_timeout,
        "transcription_timeout" => &mut config.transcription_timeout,
        "record_duration" => &mut config.record_duration,
        "output_dir" => &mut config.output_dir,
        "secrets_path" => &mut config.secrets_path,
        _ => return Err(unknown_key(key)),
    })
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "locale" => {
            value
                .parse::<Locale>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "request_timeout" | "transcription_timeout" | "record_duration" => {
            let duration = value
                .parse::<Duration>()
                .map_err(|e| invalid(e.to_string()))?;
            if duration.as_millis() == 0 {
                return Err(invalid("Duration must be greater than zero".to_string()));
            }
        }
        _ => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty".to_string()));
            }
        }
    }
    Ok(())
}
