// cli_app/src/demos.rs

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(unsafe_code, clippy::unwrap_used, clippy::expect_used)]

//! Запуск демонстраций: построение блоков из `core_blocks`, прогон случайных
//! входов и отчеты через `tracing`.
//!
//! Все демонстрации работают на CPU-бэкенде `NdArray`; демонстрация
//! градиентов оборачивает его в `Autodiff`.

use anyhow::Result;
use burn::module::Module;
use burn::nn::Linear;
use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::{Distribution, Tensor};
use burn_autodiff::Autodiff;
use burn_ndarray::{NdArray, NdArrayDevice};
use tracing::info;

use core_blocks::{
    ChimeraConfig, FixedMlpConfig, ImageClassifierConfig, MlpConfig, NestedMlpConfig,
    SequentialConfig, StageConfig,
};
use utils_crate::config::RunConfigSub;

/// Бэкенд демонстраций: NdArray (CPU, f32).
type DemoBackend = NdArray<f32>;

/// Автодифф-обертка над демонстрационным бэкендом.
type DemoAutodiffBackend = Autodiff<DemoBackend>;

/// Градиенты автодифф-бэкенда после обратного прохода.
type DemoGradients = <DemoAutodiffBackend as AutodiffBackend>::Gradients;

/// Случайный вход `[batch_size, d_features]` из равномерного распределения.
fn random_input(run: &RunConfigSub, device: &NdArrayDevice) -> Tensor<DemoBackend, 2> {
    Tensor::random(
        [run.batch_size, run.d_features],
        Distribution::Default,
        device,
    )
}

/// L2-норма тензора, прочитанная на хост.
fn l2_norm<const D: usize>(tensor: Tensor<DemoBackend, D>) -> f32 {
    tensor.powf_scalar(2.0).sum().sqrt().into_scalar()
}

/// Логирует градиенты весов и смещения линейного слоя.
fn log_linear_grads(name: &str, layer: &Linear<DemoAutodiffBackend>, grads: &DemoGradients) {
    if let Some(grad) = layer.weight.val().grad(grads) {
        info!(
            "Градиент {name}.weight: форма {:?}, L2-норма {:.6}.",
            grad.dims(),
            l2_norm(grad)
        );
    }
    if let Some(grad) = layer.bias.as_ref().and_then(|bias| bias.val().grad(grads)) {
        info!(
            "Градиент {name}.bias: форма {:?}, L2-норма {:.6}.",
            grad.dims(),
            l2_norm(grad)
        );
    }
}

/// Контейнер `Sequential`, собранный по списку стадий.
pub fn run_sequential(run: &RunConfigSub) -> Result<()> {
    info!("--- Демонстрация: контейнер Sequential ---");
    let device = NdArrayDevice::default();
    DemoBackend::seed(run.seed);

    let config = SequentialConfig::new()
        .add(StageConfig::Linear {
            d_input: run.d_features,
            d_output: 32,
            bias: true,
        })
        .add(StageConfig::Relu)
        .add(StageConfig::Linear {
            d_input: 32,
            d_output: 16,
            bias: true,
        })
        .add(StageConfig::Relu)
        .add(StageConfig::Linear {
            d_input: 16,
            d_output: 4,
            bias: true,
        });
    let container = config.init::<DemoBackend>(&device)?;
    info!(
        "Собрано стадий: {}, обучаемых параметров: {}.",
        container.len(),
        container.num_params()
    );

    let output = container.forward(random_input(run, &device));
    info!("Форма выхода: {:?}.", output.dims());
    info!("Выход:\n{}", output);
    Ok(())
}

/// Перцептрон с рукописным прямым проходом.
pub fn run_mlp(run: &RunConfigSub) -> Result<()> {
    info!("--- Демонстрация: Mlp с рукописным forward ---");
    let device = NdArrayDevice::default();
    DemoBackend::seed(run.seed);

    let model = MlpConfig::new(run.d_features, 32, 10).init::<DemoBackend>(&device);
    info!("Сводка: {}", serde_json::to_string(&model.info())?);

    let logits = model.forward(random_input(run, &device));
    info!("Логиты (без softmax):\n{}", logits);
    Ok(())
}

/// Классификатор изображений: Flatten, полносвязное тело, softmax.
pub fn run_classifier(run: &RunConfigSub) -> Result<()> {
    info!("--- Демонстрация: классификатор изображений ---");
    let device = NdArrayDevice::default();
    DemoBackend::seed(run.seed);

    let model = ImageClassifierConfig::new([28, 28], vec![128, 64], 10)
        .init::<DemoBackend>(&device)?;
    info!("Сводка: {}", serde_json::to_string(&model.info())?);

    let images = Tensor::<DemoBackend, 3>::random(
        [run.batch_size, 28, 28],
        Distribution::Default,
        &device,
    );
    let logits = model.forward(images.clone());
    info!("Форма логитов: {:?}.", logits.dims());

    let proba = model.predict_proba(images);
    info!("Вероятности классов:\n{}", proba);
    info!("Суммы по строкам (должны быть единицами):\n{}", proba.sum_dim(1));
    Ok(())
}

/// Модель с необучаемой константой, общим слоем и циклом в проходе.
pub fn run_fixed(run: &RunConfigSub) -> Result<()> {
    info!("--- Демонстрация: FixedMlp с константой и циклом ---");
    let device = NdArrayDevice::default();
    DemoBackend::seed(run.seed);

    let config = FixedMlpConfig::new(run.d_features);
    let model = config.init::<DemoBackend>(&device)?;
    info!("Сводка: {}", serde_json::to_string(&model.info())?);

    // Крупный вход: цикл деления пополам заведомо сработает.
    let input = random_input(run, &device).mul_scalar(5.0);
    let output = model.forward(input.clone());
    let abs_sum: f32 = output.abs().sum().into_scalar();
    info!(
        "Сумма модулей после цикла: {abs_sum:.6} (порог {}).",
        config.threshold
    );

    let collapsed: f32 = model.forward_sum(input).into_scalar();
    info!("Скалярная свертка выхода: {collapsed:.6}.");
    Ok(())
}

/// Вложенные модели и композиция `Chimera`.
pub fn run_nested(run: &RunConfigSub) -> Result<()> {
    info!("--- Демонстрация: вложенные модели ---");
    let device = NdArrayDevice::default();
    DemoBackend::seed(run.seed);

    let nested_config = NestedMlpConfig::new(run.d_features, 32, 16, 8);
    let nested = nested_config.init::<DemoBackend>(&device)?;
    info!("Сводка NestedMlp: {}", serde_json::to_string(&nested.info())?);
    let output = nested.forward(random_input(run, &device));
    info!("Форма выхода NestedMlp: {:?}.", output.dims());

    let chimera = ChimeraConfig::new(nested_config, 6, FixedMlpConfig::new(6))
        .init::<DemoBackend>(&device)?;
    info!("Сводка Chimera: {}", serde_json::to_string(&chimera.info())?);
    let collapsed: f32 = chimera.forward_sum(random_input(run, &device)).into_scalar();
    info!("Скалярная свертка Chimera: {collapsed:.6}.");
    Ok(())
}

/// Градиенты на автодифф-бэкенде.
///
/// Обратный проход запускается без какой-либо подготовки модели:
/// достаточно выполнить прямой проход на `Autodiff`-бэкенде.
pub fn run_autodiff(run: &RunConfigSub) -> Result<()> {
    info!("--- Демонстрация: градиенты на Autodiff<NdArray> ---");
    let device = NdArrayDevice::default();
    DemoAutodiffBackend::seed(run.seed);

    // Перцептрон: градиенты приходят во все четыре тензора параметров.
    let model = MlpConfig::new(run.d_features, 32, 10).init::<DemoAutodiffBackend>(&device);
    let input = Tensor::<DemoAutodiffBackend, 2>::random(
        [run.batch_size, run.d_features],
        Distribution::Default,
        &device,
    );
    let loss = model.forward(input).sum();
    info!("Скалярный выход: {:.6}.", loss.clone().into_scalar());

    let grads = loss.backward();
    log_linear_grads("hidden", &model.hidden, &grads);
    log_linear_grads("output", &model.output, &grads);

    // Константа FixedMlp остается без градиента даже в обратном проходе.
    let fixed = FixedMlpConfig::new(run.d_features).init::<DemoAutodiffBackend>(&device)?;
    let fixed_input = Tensor::<DemoAutodiffBackend, 2>::random(
        [run.batch_size, run.d_features],
        Distribution::Default,
        &device,
    );
    let fixed_grads = fixed.forward_sum(fixed_input).backward();
    log_linear_grads("dense", &fixed.dense, &fixed_grads);
    info!(
        "Градиент константы mix отсутствует: {}.",
        fixed.mix.grad(&fixed_grads).is_none()
    );
    Ok(())
}

/// Все демонстрации по порядку.
pub fn run_all(run: &RunConfigSub) -> Result<()> {
    run_sequential(run)?;
    run_mlp(run)?;
    run_classifier(run)?;
    run_fixed(run)?;
    run_nested(run)?;
    run_autodiff(run)?;
    info!("Все демонстрации завершены.");
    Ok(())
}
