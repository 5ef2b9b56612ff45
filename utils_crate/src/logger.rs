#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![deny(unsafe_code, unused_mut, unused_imports, unused_attributes)]

//! Модуль для инициализации глобального логгера на основе `tracing`.
//!
//! Консольный вывод включен всегда; запись в файл с суточной ротацией
//! активируется фичей `logger_file_output`.

use std::io;
use std::path::Path;

use tracing::Level;
use tracing_subscriber::{
    filter::EnvFilter,
    layer::SubscriberExt,
    registry::Registry,
    util::SubscriberInitExt,
    Layer,
};

use crate::error::UtilsError;

/// Директива фильтрации по умолчанию, если переменная `RUST_LOG` не задана.
const DEFAULT_FILTER: &str = "info";

/// Собирает `EnvFilter` из окружения (`RUST_LOG`) и добавляет явную директиву
/// уровня для текущего приложения.
///
/// `EnvFilter` не реализует `Clone`, поэтому фильтр собирается заново
/// для каждого слоя.
fn build_filter(app_name: &str, level: Level) -> Result<EnvFilter, UtilsError> {
    // Дефисы в имени крейта превращаются в подчеркивания в имени таргета tracing.
    let sanitized_app_name = app_name.replace('-', "_");

    let directive = format!("{sanitized_app_name}={level}")
        .parse()
        .map_err(|e| {
            UtilsError::InvalidParameter(format!(
                "Недопустимая директива уровня логирования для '{app_name}': {e}"
            ))
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        .add_directive(directive);
    Ok(filter)
}

/// Инициализирует глобальный подписчик `tracing`.
///
/// Настраивает вывод в консоль (stderr) и, опционально, в файл с суточной
/// ротацией. Фильтрует по `RUST_LOG` и явным уровням.
///
/// # Аргументы
/// * `app_name` - Имя приложения (для фильтров и имени файла лога).
/// * `console_level` - Уровень для консоли.
/// * `file_level` - Уровень для файла.
/// * `log_dir` - Опциональная директория для файлов логов.
///
/// # Ошибки
/// Возвращает `UtilsError::Generic`, если глобальный подписчик уже установлен,
/// и `UtilsError::InvalidParameter` при невалидной директиве фильтра.
/// Проблемы с созданием директории логов логируются как предупреждения,
/// но не приводят к ошибке: приложение продолжает работать с логированием
/// только в консоль.
pub fn init_tracing_logger(
    app_name: &str,
    console_level: Level,
    file_level: Level,
    log_dir: Option<&Path>,
) -> Result<(), UtilsError> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(true)
        .pretty()
        .with_filter(build_filter(app_name, console_level)?);

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync + 'static>> = Vec::new();
    layers.push(console_layer.boxed());

    // Слой для записи в файл, если указана директория и включена фича.
    #[cfg(feature = "logger_file_output")]
    if let Some(dir) = log_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            // tracing еще не инициализирован, поэтому eprintln!.
            eprintln!(
                "[ПРЕДУПРЕЖДЕНИЕ] Не удалось создать директорию логов {dir:?}: {e}. \
                 Логирование в файл отключено."
            );
        } else {
            let file_appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(build_filter(app_name, file_level)?);
            layers.push(file_layer.boxed());
        }
    }
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| UtilsError::Generic(format!("Не удалось инициализировать логгер: {e}")))?;

    match log_dir {
        Some(dir) if cfg!(feature = "logger_file_output") => tracing::info!(
            "Логгер инициализирован. Консоль: {console_level}, файл: {file_level} в {dir:?}."
        ),
        _ => tracing::info!("Логгер инициализирован. Только консоль (уровень {console_level})."),
    }
    Ok(())
}
