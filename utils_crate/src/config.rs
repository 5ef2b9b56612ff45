#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![deny(unsafe_code, unused_mut, unused_imports, unused_attributes)]

//! Загрузка конфигурации стенда из TOML-файла.
//!
//! Все поля имеют значения по умолчанию: отсутствующий файл или частично
//! заполненный файл не являются ошибкой.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::{warn, Level};

use crate::error::UtilsError;

/// Глобальная конфигурация приложения-стенда.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Параметры демонстрационных запусков.
    #[serde(default)]
    pub run_config: RunConfigSub,

    /// Конфигурация логирования.
    #[serde(default)]
    pub logging_config: LoggingConfigSub,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            run_config: RunConfigSub::default(),
            logging_config: LoggingConfigSub::default(),
        }
    }
}

/// Параметры демонстрационных запусков (под-конфигурация для `AppConfig`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfigSub {
    /// Размер батча демонстрационного входа.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Зерно генератора случайных чисел бэкенда (для воспроизводимости запусков).
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Число признаков демонстрационного входа.
    #[serde(default = "default_d_features")]
    pub d_features: usize,
}

fn default_batch_size() -> usize {
    2
}
fn default_seed() -> u64 {
    42
}
fn default_d_features() -> usize {
    20
}

impl Default for RunConfigSub {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            seed: default_seed(),
            d_features: default_d_features(),
        }
    }
}

/// Специфичная конфигурация логирования (под-конфигурация для `AppConfig`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfigSub {
    /// Уровень логирования консоли ("trace", "debug", "info", "warn", "error").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Директория для файлов логов (опционально).
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfigSub {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

impl LoggingConfigSub {
    /// Разбирает строковый уровень логирования в `tracing::Level`.
    ///
    /// # Ошибки
    /// Возвращает `UtilsError::InvalidParameter`, если строка не является
    /// допустимым уровнем.
    pub fn parse_level(&self) -> Result<Level, UtilsError> {
        Level::from_str(&self.level).map_err(|_| {
            UtilsError::InvalidParameter(format!(
                "Недопустимый уровень логирования: '{}'",
                self.level
            ))
        })
    }
}

impl AppConfig {
    /// Загружает конфигурацию приложения из TOML файла.
    /// Если файл не найден, возвращается конфигурация по умолчанию.
    ///
    /// # Аргументы
    /// * `file_path` - Путь к TOML файлу конфигурации.
    ///
    /// # Ошибки
    /// Возвращает `UtilsError::Io` при ошибках чтения файла или
    /// `UtilsError::Config` при ошибках разбора TOML.
    pub fn load_from_toml(file_path: &Path) -> Result<Self, UtilsError> {
        if !file_path.exists() {
            warn!(
                "Файл конфигурации {:?} не найден, используются значения по умолчанию.",
                file_path
            );
            return Ok(Self::default());
        }
        let config_str = std::fs::read_to_string(file_path)
            .map_err(|e| UtilsError::io_with_path(e, file_path.display().to_string()))?;
        toml::from_str(&config_str).map_err(|e| {
            UtilsError::Config(format!(
                "Не удалось разобрать конфигурацию из TOML {file_path:?}: {e}"
            ))
        })
    }
}
