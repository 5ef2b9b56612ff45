// core_blocks/src/blocks/sequential.rs

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(unsafe_code, clippy::unwrap_used, clippy::expect_used)]

//! Контейнер `Sequential`, собранный из публичного API Burn.
//!
//! В Burn нет объектно-безопасного trait-объекта для модулей, поэтому стадии
//! контейнера представлены enum-модулем `Stage` с вариантом на каждый
//! поддерживаемый тип слоя. Контейнер применяет стадии строго в порядке
//! добавления; пустой контейнер является тождественной функцией.

use burn::{
    config::Config,
    module::Module,
    nn::{Dropout, DropoutConfig, Linear, LinearConfig, Relu},
    tensor::{backend::Backend, Tensor},
};
use tracing::debug;

use crate::error::CoreError;

/// Конфигурация одной стадии контейнера.
///
/// Зеркально повторяет enum `Stage`: по варианту на каждый поддерживаемый слой.
#[derive(Config, Debug)]
pub enum StageConfig {
    /// Полносвязный слой заданных размерностей.
    Linear {
        /// Число входных признаков.
        d_input: usize,
        /// Число выходных признаков.
        d_output: usize,
        /// Использовать ли смещение (bias).
        bias: bool,
    },
    /// Поэлементная активация ReLU.
    Relu,
    /// Дропаут с заданной вероятностью обнуления.
    Dropout {
        /// Вероятность обнуления элемента. Значение 0.0 делает слой прозрачным.
        prob: f64,
    },
}

impl StageConfig {
    /// Инициализирует стадию на указанном устройстве.
    ///
    /// # Аргументы
    /// * `device`: Устройство Burn, на котором будут инициализированы веса.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Stage<B> {
        match self {
            Self::Linear {
                d_input,
                d_output,
                bias,
            } => Stage::Linear(
                LinearConfig::new(*d_input, *d_output)
                    .with_bias(*bias)
                    .init(device),
            ),
            Self::Relu => Stage::Relu(Relu::new()),
            Self::Dropout { prob } => Stage::Dropout(DropoutConfig::new(*prob).init()),
        }
    }
}

/// Одна стадия контейнера `Sequential`.
///
/// Enum-модуль: derive-макрос `Module` поддерживает перечисления, у которых
/// каждый вариант несет ровно одно поле-модуль.
#[derive(Debug, Module)]
pub enum Stage<B: Backend> {
    /// Полносвязный слой.
    Linear(Linear<B>),
    /// Активация ReLU.
    Relu(Relu),
    /// Слой дропаута.
    Dropout(Dropout),
}

impl<B: Backend> Stage<B> {
    /// Выполняет прямой проход одной стадии.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        match self {
            Self::Linear(layer) => layer.forward(input),
            Self::Relu(layer) => layer.forward(input),
            Self::Dropout(layer) => layer.forward(input),
        }
    }
}

/// Конфигурация контейнера `Sequential`: упорядоченный список стадий.
#[derive(Config, Debug)]
pub struct SequentialConfig {
    /// Конфигурации стадий в порядке применения.
    #[config(default = "Vec::new()")]
    pub stages: Vec<StageConfig>,
}

impl SequentialConfig {
    /// Добавляет стадию в конец списка (builder-стиль).
    pub fn add(mut self, stage: StageConfig) -> Self {
        self.stages.push(stage);
        self
    }

    /// Проверяет согласованность размерностей линейных стадий.
    ///
    /// Стадии без параметров (ReLU, Dropout) прозрачны для проверки: они не
    /// меняют число признаков.
    ///
    /// # Ошибки
    /// `CoreError::DimensionMismatch`, если вход линейной стадии не равен
    /// выходу предыдущей линейной стадии.
    pub fn validate(&self) -> Result<(), CoreError> {
        // Выход последней встреченной линейной стадии; None до первой из них.
        let mut current: Option<usize> = None;
        for (index, stage) in self.stages.iter().enumerate() {
            if let StageConfig::Linear {
                d_input, d_output, ..
            } = stage
            {
                if let Some(expected) = current {
                    if expected != *d_input {
                        return Err(CoreError::DimensionMismatch {
                            stage: index,
                            expected,
                            found: *d_input,
                        });
                    }
                }
                current = Some(*d_output);
            }
        }
        Ok(())
    }

    /// Инициализирует контейнер на устройстве, предварительно проверив
    /// согласованность конфигурации.
    ///
    /// # Аргументы
    /// * `device`: Устройство Burn, на котором будут инициализированы веса.
    ///
    /// # Ошибки
    /// Пробрасывает ошибку `validate`: контейнер с несогласованными
    /// размерностями не конструируется.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<Sequential<B>, CoreError> {
        self.validate()?;
        let stages = self.stages.iter().map(|s| s.init(device)).collect();
        debug!("Инициализирован Sequential из {} стадий.", self.stages.len());
        Ok(Sequential { stages })
    }
}

/// Контейнер, применяющий стадии в порядке их добавления.
#[derive(Debug, Module)]
pub struct Sequential<B: Backend> {
    /// Стадии в порядке применения.
    stages: Vec<Stage<B>>,
}

impl<B: Backend> Sequential<B> {
    /// Выполняет прямой проход: вход последовательно проходит каждую стадию.
    ///
    /// # Аргументы
    /// * `input`: Тензор формы `[batch_size, d_input]`.
    ///
    /// # Возвращает
    /// Выход последней стадии. Пустой контейнер возвращает вход без изменений.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        self.stages
            .iter()
            .fold(input, |x, stage| stage.forward(x))
    }

    /// Число стадий в контейнере.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Возвращает `true`, если контейнер не содержит ни одной стадии.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
