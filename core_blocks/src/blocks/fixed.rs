// core_blocks/src/blocks/fixed.rs

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(unsafe_code, clippy::unwrap_used, clippy::expect_used)]

//! Модель `FixedMlp`: необучаемая константа, общий слой и цикл в проходе.
//!
//! Три приема в одной модели:
//! - обычное поле-тензор вместо `Param`: Burn хранит его как константу
//!   модуля, градиенты к нему не текут;
//! - один линейный слой, применяемый в проходе дважды (общие параметры);
//! - управляющая конструкция `while`, условие которой зависит от данных.

use burn::{
    config::Config,
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{activation::relu, backend::Backend, Distribution, ElementConversion, Tensor},
};
use tracing::debug;

use crate::{blocks::BlockInfo, error::CoreError};

/// Конфигурация для модели `FixedMlp`.
#[derive(Config, Debug)]
pub struct FixedMlpConfig {
    /// Число признаков: вход, выход и размер константной матрицы.
    pub d_features: usize,
    /// Порог суммы модулей активаций: пока она выше порога, выход делится
    /// пополам. Должен быть положительным, иначе цикл не завершится.
    #[config(default = 1.0)]
    pub threshold: f64,
}

impl FixedMlpConfig {
    /// Создает новый экземпляр `FixedMlp`.
    ///
    /// Константная матрица рисуется из равномерного распределения `[0, 1)`
    /// на устройстве и обучаемым параметром не является.
    ///
    /// # Аргументы
    /// * `device`: Устройство Burn, на котором будут инициализированы веса.
    ///
    /// # Ошибки
    /// `CoreError::InvalidConfig` при нулевом `d_features` или неположительном
    /// `threshold`.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<FixedMlp<B>, CoreError> {
        if self.d_features == 0 {
            return Err(CoreError::InvalidConfig(
                "d_features должно быть положительным.".to_string(),
            ));
        }
        if self.threshold <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "Порог должен быть положительным, получено {}.",
                self.threshold
            )));
        }

        let mix = Tensor::random(
            [self.d_features, self.d_features],
            Distribution::Default,
            device,
        );
        let dense = LinearConfig::new(self.d_features, self.d_features).init(device);

        debug!(
            "Инициализирован FixedMlp: d_features = {}, порог = {}.",
            self.d_features, self.threshold
        );
        Ok(FixedMlp {
            mix,
            dense,
            threshold: self.threshold,
            d_features: self.d_features,
        })
    }
}

/// Модель с фиксированной (необучаемой) матрицей и общим линейным слоем.
#[derive(Debug, Module)]
pub struct FixedMlp<B: Backend> {
    /// Константная матрица смешивания. Обычное поле-тензор, а не `Param`:
    /// в подсчет параметров не входит и градиентов не получает.
    pub mix: Tensor<B, 2>,
    /// Линейный слой, применяемый в проходе дважды (общие параметры).
    pub dense: Linear<B>,
    /// Порог для цикла деления.
    threshold: f64,
    /// Число признаков (для отчетности).
    d_features: usize,
}

impl<B: Backend> FixedMlp<B> {
    /// Выполняет прямой проход с зависящим от данных циклом.
    ///
    /// # Аргументы
    /// * `input`: Тензор формы `[batch_size, d_features]`.
    ///
    /// # Возвращает
    /// Тензор формы `[batch_size, d_features]`, сумма модулей элементов
    /// которого не превышает порога.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        // 1. Общий линейный слой.
        let x = self.dense.forward(input);
        // 2. Константная матрица: relu(x * mix + 1).
        let x = relu(x.matmul(self.mix.clone()).add_scalar(1.0));
        // 3. Тот же слой еще раз: параметры используются повторно.
        let mut x = self.dense.forward(x);
        // 4. Делим выход пополам, пока сумма модулей выше порога.
        //    Сумма строго убывает, поэтому при положительном пороге цикл конечен.
        while Self::abs_sum(&x) > self.threshold {
            x = x.div_scalar(2.0);
        }
        x
    }

    /// Скалярная свертка прямого прохода: сумма всех элементов выхода.
    ///
    /// # Возвращает
    /// Одноэлементный тензор формы `[1]`.
    pub fn forward_sum(&self, input: Tensor<B, 2>) -> Tensor<B, 1> {
        self.forward(input).sum()
    }

    /// Сумма модулей элементов тензора, прочитанная на хост.
    fn abs_sum(x: &Tensor<B, 2>) -> f64 {
        x.clone().abs().sum().into_scalar().elem::<f64>()
    }

    /// Возвращает сводку о модели для отчетности.
    ///
    /// В `trainable_params` входит только общий линейный слой;
    /// константа `mix` не учитывается.
    pub fn info(&self) -> BlockInfo {
        BlockInfo {
            kind: "fixed_mlp".to_string(),
            d_input: self.d_features,
            d_output: self.d_features,
            trainable_params: self.num_params(),
        }
    }
}
