// core_blocks/src/lib.rs

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

//! # `core_blocks`
//!
//! Этот крейт (`core_blocks`) — учебное ядро конструирования моделей на базе
//! фреймворка [Burn](https://burn.dev/). Он показывает, как из публичного API
//! Burn собираются модели: собственный `Module` с рукописным `forward`,
//! контейнер последовательных слоев, написанный с нуля, вложенные под-модели,
//! а также необучаемые константы и управляющие конструкции внутри прямого
//! прохода.
//!
//! ## Назначение
//!
//! Крейт не реализует ни тензорные ядра, ни автодифференцирование, ни слои
//! фреймворка: все это остается за Burn. Здесь только конструирование:
//! каждая модель определяется парой "Config + Module", конфигурации
//! валидируются на этапе сборки, прямые проходы ошибок не возвращают.
//!
//! ## Структура
//!
//! Крейт организован следующим образом:
//! - `blocks`: демонстрационные блоки (`Flatten`, `Sequential`, `Mlp`,
//!   `ImageClassifier`, `FixedMlp`, `NestedMlp`, `Chimera`) и сводка `BlockInfo`.
//! - `error`: кастомные типы ошибок для этого крейта.

// Объявляем публичные модули, входящие в состав крейта.
pub mod blocks;
pub mod error;

// Реэкспортируем наиболее важные и часто используемые элементы из модулей
// для удобства их использования потребителями этого крейта.

// Ошибки
pub use error::CoreError;

// Блоки и их конфигурации
pub use blocks::{
    // Сводка о построенной модели
    BlockInfo,
    // Композиция готовых моделей
    Chimera,
    ChimeraConfig,
    // Модель с константой, общим слоем и циклом
    FixedMlp,
    FixedMlpConfig,
    // Слой схлопывания осей
    Flatten,
    // Классификатор изображений
    ImageClassifier,
    ImageClassifierConfig,
    // Перцептрон с рукописным forward
    Mlp,
    MlpConfig,
    // Вложенные модели
    NestedMlp,
    NestedMlpConfig,
    // Контейнер последовательных стадий
    Sequential,
    SequentialConfig,
    Stage,
    StageConfig,
};
