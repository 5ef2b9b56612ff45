// core_blocks/src/error.rs

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(unsafe_code, clippy::unwrap_used, clippy::expect_used)]

/// Перечисление всех возможных ошибок, которые могут возникнуть в крейте `core_blocks`.
///
/// Все ошибки относятся к этапу конструирования блоков: прямые проходы
/// не возвращают `Result`, ошибки форм во время вычислений поднимает сам
/// фреймворк Burn.
#[derive(thiserror::Error, Debug)] // Используем `thiserror` для автоматической генерации трейтов Error и Display.
pub enum CoreError {
    /// Ошибка, связанная с некорректной конфигурацией блока.
    /// Например, нулевые размерности или неположительный порог.
    #[error("Некорректная конфигурация: {0}")]
    InvalidConfig(String),

    /// Ошибка, указывающая на несостыковку размерностей соседних стадий контейнера.
    #[error(
        "Несовместимые размерности на стадии {stage}: ожидался вход {expected}, указан {found}"
    )]
    DimensionMismatch {
        /// Индекс стадии, на которой обнаружена несостыковка.
        stage: usize,
        /// Ожидаемая входная размерность (выход предыдущего линейного слоя).
        expected: usize,
        /// Фактически указанная входная размерность стадии.
        found: usize,
    },

    /// Общая или неуточненная ошибка в `core_blocks`.
    /// Следует использовать с осторожностью, предпочитая более специфичные варианты ошибок.
    #[error("Общая ошибка core_blocks: {0}")]
    Generic(String),
}
