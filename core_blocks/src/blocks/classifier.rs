// core_blocks/src/blocks/classifier.rs

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(unsafe_code, clippy::unwrap_used, clippy::expect_used)]

//! Классификатор изображений: `Flatten` плюс полносвязный конвейер.
//!
//! Модель собирается целиком из уже определенных блоков: входной `Flatten`
//! превращает `[batch, height, width]` в матрицу признаков, дальше работает
//! контейнер `Sequential` из пар Linear/ReLU и финальной проекции в логиты.

use burn::{
    config::Config,
    module::Module,
    tensor::{activation::softmax, backend::Backend, Tensor},
};
use tracing::debug;

use crate::{
    blocks::{BlockInfo, Flatten, Sequential, SequentialConfig, StageConfig},
    error::CoreError,
};

/// Конфигурация для модели `ImageClassifier`.
#[derive(Config, Debug)]
pub struct ImageClassifierConfig {
    /// Высота и ширина входного изображения.
    pub input_shape: [usize; 2],
    /// Размеры скрытых слоев тела. Пустой список допустим: тогда модель
    /// проецирует признаки сразу в логиты.
    pub hidden_sizes: Vec<usize>,
    /// Число классов (выходных логитов).
    pub num_classes: usize,
    /// Вероятность дропаута после каждой активации скрытого слоя.
    #[config(default = 0.0)]
    pub dropout: f64,
}

impl ImageClassifierConfig {
    /// Создает новый экземпляр `ImageClassifier`.
    ///
    /// Тело собирается как `SequentialConfig`: Linear + ReLU (и опционально
    /// Dropout) на каждый скрытый слой, затем финальная линейная проекция
    /// в `num_classes` логитов.
    ///
    /// # Аргументы
    /// * `device`: Устройство Burn, на котором будут инициализированы веса.
    ///
    /// # Ошибки
    /// `CoreError::InvalidConfig` при нулевых размерностях; пробрасывает
    /// ошибки валидации собранного `SequentialConfig`.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<ImageClassifier<B>, CoreError> {
        let d_input = self.input_shape[0] * self.input_shape[1];
        if d_input == 0 {
            return Err(CoreError::InvalidConfig(format!(
                "Форма входа {:?} содержит нулевую ось.",
                self.input_shape
            )));
        }
        if self.num_classes == 0 {
            return Err(CoreError::InvalidConfig(
                "Число классов должно быть положительным.".to_string(),
            ));
        }
        if let Some(position) = self.hidden_sizes.iter().position(|&size| size == 0) {
            return Err(CoreError::InvalidConfig(format!(
                "Нулевой размер скрытого слоя на позиции {position}."
            )));
        }

        let mut body = SequentialConfig::new();
        let mut d_current = d_input;
        for &d_hidden in &self.hidden_sizes {
            body = body
                .add(StageConfig::Linear {
                    d_input: d_current,
                    d_output: d_hidden,
                    bias: true,
                })
                .add(StageConfig::Relu);
            if self.dropout > 0.0 {
                body = body.add(StageConfig::Dropout { prob: self.dropout });
            }
            d_current = d_hidden;
        }
        // Тело всегда завершается проекцией в логиты классов.
        body = body.add(StageConfig::Linear {
            d_input: d_current,
            d_output: self.num_classes,
            bias: true,
        });
        let body = body.init(device)?;

        debug!(
            "Инициализирован ImageClassifier: {:?} -> {} классов ({} скрытых слоев).",
            self.input_shape,
            self.num_classes,
            self.hidden_sizes.len()
        );
        Ok(ImageClassifier {
            flatten: Flatten::new(),
            body,
            d_input,
            num_classes: self.num_classes,
        })
    }
}

/// Классификатор изображений: `Flatten` и полносвязное тело.
#[derive(Debug, Module)]
pub struct ImageClassifier<B: Backend> {
    /// Входная ступень, превращающая изображение в вектор признаков.
    flatten: Flatten,
    /// Полносвязное тело, завершающееся проекцией в логиты классов.
    body: Sequential<B>,
    /// Число признаков после схлопывания входа (для отчетности).
    d_input: usize,
    /// Число классов.
    num_classes: usize,
}

impl<B: Backend> ImageClassifier<B> {
    /// Выполняет прямой проход.
    ///
    /// # Аргументы
    /// * `images`: Тензор формы `[batch_size, height, width]`.
    ///
    /// # Возвращает
    /// Сырые логиты формы `[batch_size, num_classes]`.
    pub fn forward(&self, images: Tensor<B, 3>) -> Tensor<B, 2> {
        let x = self.flatten.forward(images);
        self.body.forward(x)
    }

    /// Возвращает вероятности классов: softmax по оси классов.
    ///
    /// Каждая строка результата суммируется в единицу (с точностью до
    /// накопленной ошибки плавающей точки).
    pub fn predict_proba(&self, images: Tensor<B, 3>) -> Tensor<B, 2> {
        softmax(self.forward(images), 1)
    }

    /// Возвращает сводку о модели для отчетности.
    pub fn info(&self) -> BlockInfo {
        BlockInfo {
            kind: "image_classifier".to_string(),
            d_input: self.d_input,
            d_output: self.num_classes,
            trainable_params: self.num_params(),
        }
    }
}
