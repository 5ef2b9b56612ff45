#![warn(
    missing_docs, // Предупреждать, если публичные элементы не документированы.
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used, // Предупреждать об использовании .unwrap()
    clippy::expect_used  // Предупреждать об использовании .expect()
)]
#![deny(
    unsafe_code,        // Запретить использование unsafe блоков.
    unused_mut,         // Запретить неиспользуемые изменяемые переменные.
    unused_imports,     // Запретить неиспользуемые импорты.
    unused_attributes   // Запретить неиспользуемые атрибуты.
)]

//! `utils_crate` предоставляет общие структуры данных, обработку ошибок
//! и распространенные утилиты для стенда blocklab.
//!
//! # Основные модули:
//!
//! - [`error`]: Определяет общий тип ошибки `UtilsError` для всего крейта.
//! - [`config`]: Предоставляет `AppConfig` для загрузки и управления
//!   конфигурацией стенда из TOML-файлов.
//! - [`logger`]: Утилиты для инициализации системы логирования на базе `tracing`.
//!
//! # Использование фич (Features)
//!
//! Фича `logger_file_output` (входит в `default`) включает запись логов в файл
//! с суточной ротацией через `tracing-appender`. Без нее логгер пишет только
//! в консоль.

// --- Модуль для общих ошибок ---
pub mod error;
pub use error::UtilsError; // Реэкспорт для удобства использования.

// --- Модуль для конфигурации приложения ---
pub mod config;
pub use config::AppConfig; // Реэкспорт.

// --- Модуль с утилитами для инициализации логирования ---
pub mod logger;
pub use logger::init_tracing_logger; // Реэкспорт.
