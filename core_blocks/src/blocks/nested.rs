// core_blocks/src/blocks/nested.rs

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(unsafe_code, clippy::unwrap_used, clippy::expect_used)]

//! Вложенные модели: контейнер внутри модели и модели внутри модели.
//!
//! `NestedMlp` держит `Sequential` как под-модуль рядом с отдельным слоем;
//! `Chimera` составлена из готовых моделей (`NestedMlp`, `FixedMlp`) и
//! мостового слоя между ними. Параметры всех под-моделей видны насквозь:
//! `num_params` композиции равен сумме параметров частей.

use burn::{
    config::Config,
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{backend::Backend, Tensor},
};
use tracing::debug;

use crate::{
    blocks::{BlockInfo, FixedMlp, FixedMlpConfig, Sequential, SequentialConfig, StageConfig},
    error::CoreError,
};

/// Конфигурация для модели `NestedMlp`.
#[derive(Config, Debug)]
pub struct NestedMlpConfig {
    /// Число входных признаков.
    pub d_input: usize,
    /// Размер первого скрытого слоя.
    pub d_hidden: usize,
    /// Размер второго скрытого слоя.
    pub d_inner: usize,
    /// Число выходов.
    pub d_output: usize,
}

impl NestedMlpConfig {
    /// Создает новый экземпляр `NestedMlp`.
    ///
    /// Тело модели собирается как `Sequential` из двух пар Linear/ReLU,
    /// голова - отдельный линейный слой.
    ///
    /// # Аргументы
    /// * `device`: Устройство Burn, на котором будут инициализированы веса.
    ///
    /// # Ошибки
    /// `CoreError::InvalidConfig`, если какая-либо размерность нулевая.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<NestedMlp<B>, CoreError> {
        if [self.d_input, self.d_hidden, self.d_inner, self.d_output].contains(&0) {
            return Err(CoreError::InvalidConfig(format!(
                "Все размерности должны быть положительными: {} -> {} -> {} -> {}.",
                self.d_input, self.d_hidden, self.d_inner, self.d_output
            )));
        }

        let body = SequentialConfig::new()
            .add(StageConfig::Linear {
                d_input: self.d_input,
                d_output: self.d_hidden,
                bias: true,
            })
            .add(StageConfig::Relu)
            .add(StageConfig::Linear {
                d_input: self.d_hidden,
                d_output: self.d_inner,
                bias: true,
            })
            .add(StageConfig::Relu)
            .init(device)?;
        let head = LinearConfig::new(self.d_inner, self.d_output).init(device);

        debug!(
            "Инициализирован NestedMlp: {} -> {} -> {} -> {}.",
            self.d_input, self.d_hidden, self.d_inner, self.d_output
        );
        Ok(NestedMlp {
            body,
            head,
            d_input: self.d_input,
            d_output: self.d_output,
        })
    }
}

/// Модель с контейнером `Sequential` в роли под-модуля.
#[derive(Debug, Module)]
pub struct NestedMlp<B: Backend> {
    /// Тело: две пары Linear/ReLU внутри контейнера.
    pub body: Sequential<B>,
    /// Голова: финальная линейная проекция.
    pub head: Linear<B>,
    /// Число входных признаков (для отчетности).
    d_input: usize,
    /// Число выходов (для отчетности).
    d_output: usize,
}

impl<B: Backend> NestedMlp<B> {
    /// Выполняет прямой проход: тело, затем голова.
    ///
    /// # Аргументы
    /// * `input`: Тензор формы `[batch_size, d_input]`.
    ///
    /// # Возвращает
    /// Тензор формы `[batch_size, d_output]`.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.body.forward(input);
        self.head.forward(x)
    }

    /// Возвращает сводку о модели для отчетности.
    pub fn info(&self) -> BlockInfo {
        BlockInfo {
            kind: "nested_mlp".to_string(),
            d_input: self.d_input,
            d_output: self.d_output,
            trainable_params: self.num_params(),
        }
    }
}

/// Конфигурация для модели `Chimera`.
///
/// Вложенные конфигурации частей хранятся как есть; проверка стыков
/// выполняется при инициализации.
#[derive(Config, Debug)]
pub struct ChimeraConfig {
    /// Конфигурация вложенного MLP (начало композиции).
    pub nested: NestedMlpConfig,
    /// Ширина мостового линейного слоя. Должна равняться `d_features`
    /// хвостовой модели.
    pub d_bridge: usize,
    /// Конфигурация хвостовой модели с константой.
    pub fixed: FixedMlpConfig,
}

impl ChimeraConfig {
    /// Создает новый экземпляр `Chimera`.
    ///
    /// # Аргументы
    /// * `device`: Устройство Burn, на котором будут инициализированы веса.
    ///
    /// # Ошибки
    /// `CoreError::InvalidConfig`, если ширина моста не равна `d_features`
    /// хвоста; пробрасывает ошибки конструкторов частей.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<Chimera<B>, CoreError> {
        if self.d_bridge != self.fixed.d_features {
            return Err(CoreError::InvalidConfig(format!(
                "Ширина моста ({}) не равна d_features хвоста ({}).",
                self.d_bridge, self.fixed.d_features
            )));
        }

        let nest = self.nested.init(device)?;
        let bridge = LinearConfig::new(self.nested.d_output, self.d_bridge).init(device);
        let tail = self.fixed.init(device)?;

        debug!(
            "Инициализирована Chimera: вход {}, мост {}, выход {}.",
            self.nested.d_input, self.d_bridge, self.fixed.d_features
        );
        Ok(Chimera {
            nest,
            bridge,
            tail,
            d_input: self.nested.d_input,
            d_output: self.fixed.d_features,
        })
    }
}

/// Композиция готовых демонстрационных моделей.
#[derive(Debug, Module)]
pub struct Chimera<B: Backend> {
    /// Начальная часть: вложенный MLP.
    pub nest: NestedMlp<B>,
    /// Мостовой линейный слой между частями.
    pub bridge: Linear<B>,
    /// Хвостовая часть: модель с константой и циклом.
    pub tail: FixedMlp<B>,
    /// Число входных признаков (для отчетности).
    d_input: usize,
    /// Число выходных признаков (для отчетности).
    d_output: usize,
}

impl<B: Backend> Chimera<B> {
    /// Выполняет прямой проход: вложенный MLP, мост, хвост.
    ///
    /// # Аргументы
    /// * `input`: Тензор формы `[batch_size, d_input]` вложенного MLP.
    ///
    /// # Возвращает
    /// Тензор формы `[batch_size, d_features]` хвостовой модели.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.nest.forward(input);
        let x = self.bridge.forward(x);
        self.tail.forward(x)
    }

    /// Скалярная свертка прямого прохода: сумма всех элементов выхода.
    pub fn forward_sum(&self, input: Tensor<B, 2>) -> Tensor<B, 1> {
        self.forward(input).sum()
    }

    /// Возвращает сводку о модели для отчетности.
    pub fn info(&self) -> BlockInfo {
        BlockInfo {
            kind: "chimera".to_string(),
            d_input: self.d_input,
            d_output: self.d_output,
            trainable_params: self.num_params(),
        }
    }
}
