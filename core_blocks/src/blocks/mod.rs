// core_blocks/src/blocks/mod.rs

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(unsafe_code, clippy::unwrap_used, clippy::expect_used)]

//! Корневой модуль демонстрационных блоков конструирования моделей.
//!
//! Каждая демонстрация живет в своем подмодуле: от простейшего слоя без
//! параметров до композиции из нескольких готовых моделей. Здесь же
//! определяется общий тип сводки о построенной модели.

// Подключаем подмодули с демонстрационными блоками.
pub mod classifier;
pub mod fixed;
pub mod flatten;
pub mod mlp;
pub mod nested;
pub mod sequential;

use serde::{Deserialize, Serialize};

pub use classifier::{ImageClassifier, ImageClassifierConfig};
pub use fixed::{FixedMlp, FixedMlpConfig};
pub use flatten::Flatten;
pub use mlp::{Mlp, MlpConfig};
pub use nested::{Chimera, ChimeraConfig, NestedMlp, NestedMlpConfig};
pub use sequential::{Sequential, SequentialConfig, Stage, StageConfig};

/// Сводная информация о построенной модели.
///
/// Заполняется самой моделью из сохраненных размерностей и
/// `Module::num_params`. Используется потребителями крейта для
/// человекочитаемых и JSON-отчетов.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockInfo {
    /// Короткое имя вида блока (например, "mlp" или "image_classifier").
    pub kind: String,

    /// Число входных признаков.
    pub d_input: usize,

    /// Число выходных признаков.
    pub d_output: usize,

    /// Число обучаемых параметров. Константы модулей (необучаемые тензоры)
    /// сюда не входят.
    pub trainable_params: usize,
}
