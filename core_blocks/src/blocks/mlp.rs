// core_blocks/src/blocks/mlp.rs

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(unsafe_code, clippy::unwrap_used, clippy::expect_used)]

//! Многослойный перцептрон с "рукописным" прямым проходом.
//!
//! Демонстрирует основную точку расширения Burn: собственная структура
//! с derive-макросом `Module` и методом `forward`, написанным вручную
//! из готовых слоев и функциональных активаций.

use burn::{
    config::Config,
    module::Module,
    nn::{Dropout, DropoutConfig, Initializer, Linear, LinearConfig},
    tensor::{activation::relu, backend::Backend, Tensor},
};
use tracing::debug;

use crate::blocks::BlockInfo;

/// Конфигурация для модели `Mlp`.
#[derive(Config, Debug)]
pub struct MlpConfig {
    /// Число входных признаков.
    pub d_input: usize,
    /// Размер скрытого слоя.
    pub d_hidden: usize,
    /// Число выходов (логитов).
    pub d_output: usize,
    /// Вероятность дропаута между скрытым и выходным слоями.
    /// Вне обучения слой прозрачен.
    #[config(default = 0.0)]
    pub dropout: f64,
    /// Инициализатор весов обоих линейных слоев.
    #[config(default = "Initializer::KaimingUniform{gain:1.0,fan_out_only:false}")]
    pub initializer: Initializer,
}

impl MlpConfig {
    /// Создает новый экземпляр `Mlp`.
    ///
    /// Инициализация параметров полностью делегируется `Initializer` из Burn
    /// через `LinearConfig::with_initializer`.
    ///
    /// # Аргументы
    /// * `device`: Устройство Burn, на котором будут инициализированы веса.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Mlp<B> {
        let hidden = LinearConfig::new(self.d_input, self.d_hidden)
            .with_initializer(self.initializer.clone())
            .init(device);
        let output = LinearConfig::new(self.d_hidden, self.d_output)
            .with_initializer(self.initializer.clone())
            .init(device);

        debug!(
            "Инициализирован Mlp: {} -> {} -> {}.",
            self.d_input, self.d_hidden, self.d_output
        );
        Mlp {
            hidden,
            output,
            dropout: DropoutConfig::new(self.dropout).init(),
            d_input: self.d_input,
            d_output: self.d_output,
        }
    }
}

/// Многослойный перцептрон: скрытая проекция, ReLU, дропаут, выходная проекция.
///
/// Модель возвращает сырые оценки (логиты) без softmax.
#[derive(Debug, Module)]
pub struct Mlp<B: Backend> {
    /// Скрытый линейный слой.
    pub hidden: Linear<B>,
    /// Выходной линейный слой.
    pub output: Linear<B>,
    /// Слой дропаута между скрытым и выходным слоями.
    pub dropout: Dropout,
    /// Число входных признаков (для отчетности).
    d_input: usize,
    /// Число выходов (для отчетности).
    d_output: usize,
}

impl<B: Backend> Mlp<B> {
    /// Выполняет прямой проход модели.
    ///
    /// # Аргументы
    /// * `input`: Тензор формы `[batch_size, d_input]`.
    ///
    /// # Возвращает
    /// Логиты формы `[batch_size, d_output]`.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        // 1. Скрытая проекция.
        let x = self.hidden.forward(input);
        // 2. Функциональная активация ReLU.
        let x = relu(x);
        // 3. Дропаут (активен только при обучении).
        let x = self.dropout.forward(x);
        // 4. Выходная проекция: сырые логиты.
        self.output.forward(x)
    }

    /// Возвращает сводку о модели для отчетности.
    pub fn info(&self) -> BlockInfo {
        BlockInfo {
            kind: "mlp".to_string(),
            d_input: self.d_input,
            d_output: self.d_output,
            trainable_params: self.num_params(),
        }
    }
}
