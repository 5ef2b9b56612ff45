// cli_app/src/main.rs

// Включаем строгие правила линтинга для всего крейта.
#![warn(
    missing_docs, // Предупреждать об отсутствующей документации для публичных элементов.
    clippy::all, // Все стандартные проверки Clippy.
    clippy::pedantic, // Более строгие ("педантичные") проверки Clippy.
    clippy::nursery // Экспериментальные проверки Clippy (могут быть нестабильны).
)]
// Запрещаем использование небезопасных конструкций и потенциально проблемных методов.
#![deny(
    unsafe_code, // Запрет `unsafe` блоков без явного `allow`.
    clippy::unwrap_used, // Запрет использования `.unwrap()`.
    clippy::expect_used // Запрет использования `.expect()`.
)]

//! # `blocklab-cli`
//!
//! CLI-стенд демонстраций конструирования моделей на Burn. Каждая подкоманда
//! строит один из блоков `core_blocks`, прогоняет через него случайный вход
//! и отчитывается через `tracing`. CLI только маршрутизирует: вся логика
//! демонстраций живет в модуле `demos`.

mod demos;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use utils_crate::{init_tracing_logger, AppConfig};

/// Аргументы командной строки стенда.
///
/// Derive-макрос `Parser` генерирует разбор аргументов по полям структуры.
#[derive(Parser, Debug)]
#[command(
    name = "blocklab-cli",
    version,
    about = "Демонстрации конструирования моделей на Burn: контейнеры, вложенные модули, константы, автодифф."
)]
struct Cli {
    /// Путь к TOML-файлу конфигурации стенда.
    #[arg(long, value_name = "ФАЙЛ", default_value = "blocklab.toml")]
    config: PathBuf,

    /// Зерно ГСЧ бэкенда (перекрывает значение из конфигурации).
    #[arg(long)]
    seed: Option<u64>,

    /// Подробный вывод: уровень debug вместо уровня из конфигурации.
    #[arg(short, long)]
    verbose: bool,

    /// Демонстрация для запуска.
    #[command(subcommand)]
    command: DemoCommand,
}

/// Доступные демонстрации.
#[derive(Subcommand, Debug)]
enum DemoCommand {
    /// Контейнер Sequential, собранный по списку стадий.
    Sequential,
    /// Перцептрон с рукописным прямым проходом.
    Mlp,
    /// Классификатор изображений: Flatten, тело, softmax.
    Classifier,
    /// Модель с необучаемой константой, общим слоем и циклом.
    Fixed,
    /// Вложенные модели и композиция Chimera.
    Nested,
    /// Градиенты на автодифф-бэкенде.
    Autodiff,
    /// Все демонстрации по порядку.
    All,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Конфигурация стенда: файл или значения по умолчанию.
    //    Логгер еще не поднят, поэтому о выбранном файле сообщаем после.
    let app_config = AppConfig::load_from_toml(&cli.config)
        .with_context(|| format!("Загрузка конфигурации из {:?}", cli.config))?;

    // 2. Логирование: уровень консоли из конфигурации, --verbose перекрывает.
    let console_level = if cli.verbose {
        Level::DEBUG
    } else {
        app_config.logging_config.parse_level()?
    };
    let log_dir = app_config.logging_config.log_dir.as_deref().map(Path::new);
    init_tracing_logger("blocklab-cli", console_level, Level::DEBUG, log_dir)?;
    info!(
        "Конфигурация запусков: {:?} (файл {:?}).",
        app_config.run_config, cli.config
    );

    // 3. Зерно из CLI имеет приоритет над файлом конфигурации.
    let mut run_config = app_config.run_config.clone();
    if let Some(seed) = cli.seed {
        run_config.seed = seed;
    }

    // 4. Диспетчеризация демонстраций.
    let result = match cli.command {
        DemoCommand::Sequential => demos::run_sequential(&run_config),
        DemoCommand::Mlp => demos::run_mlp(&run_config),
        DemoCommand::Classifier => demos::run_classifier(&run_config),
        DemoCommand::Fixed => demos::run_fixed(&run_config),
        DemoCommand::Nested => demos::run_nested(&run_config),
        DemoCommand::Autodiff => demos::run_autodiff(&run_config),
        DemoCommand::All => demos::run_all(&run_config),
    };

    if let Err(e) = &result {
        error!("Демонстрация завершилась ошибкой: {e:#}");
    }
    result
}
