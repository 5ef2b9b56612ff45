use approx::assert_relative_eq;
use burn::module::Module;
use burn::nn::Initializer;
use burn::tensor::{Distribution, Tensor};
use burn_ndarray::{NdArray, NdArrayDevice};
use core_blocks::error::CoreError;
use core_blocks::{
    BlockInfo, ChimeraConfig, FixedMlpConfig, Flatten, ImageClassifierConfig, MlpConfig,
    NestedMlpConfig,
};

type TB = NdArray<f32>;

#[test]
fn flatten_collapses_trailing_axes() {
    let device = NdArrayDevice::default();
    let layer = Flatten::new();

    let input = Tensor::<TB, 3>::zeros([2, 3, 4], &device);
    assert_eq!(layer.forward(input).dims(), [2, 12]);

    let input = Tensor::<TB, 4>::zeros([5, 2, 3, 2], &device);
    assert_eq!(layer.forward(input).dims(), [5, 12]);

    // Вход ранга 2 проходит без изменения формы.
    let input = Tensor::<TB, 2>::zeros([5, 7], &device);
    assert_eq!(layer.forward(input).dims(), [5, 7]);
}

#[test]
fn flatten_preserves_element_order() {
    let device = NdArrayDevice::default();
    let layer = Flatten::new();

    let input = Tensor::<TB, 3>::from_floats([[[1.0, 2.0], [3.0, 4.0]]], &device);
    let output = layer.forward(input);
    assert_eq!(output.dims(), [1, 4]);
    assert_eq!(
        output.into_data().to_vec::<f32>().unwrap(),
        vec![1.0, 2.0, 3.0, 4.0]
    );
}

#[test]
fn mlp_shapes_params_and_info() {
    let device = NdArrayDevice::default();
    let model = MlpConfig::new(20, 32, 10).init::<TB>(&device);

    let input = Tensor::<TB, 2>::random([2, 20], Distribution::Default, &device);
    assert_eq!(model.forward(input).dims(), [2, 10]);

    // Веса и смещения двух линейных слоев.
    let expected_params = 20 * 32 + 32 + 32 * 10 + 10;
    assert_eq!(model.num_params(), expected_params);

    let info = model.info();
    assert_eq!(
        info,
        BlockInfo {
            kind: "mlp".to_string(),
            d_input: 20,
            d_output: 10,
            trainable_params: expected_params,
        }
    );
}

#[test]
fn mlp_forward_matches_hand_computation() {
    let device = NdArrayDevice::default();
    // Константная инициализация делает проход полностью предсказуемым:
    // hidden = relu(1 * 0.5 + 1 * 0.5 + 0.5) = 1.5 на каждом из трех нейронов,
    // output = 3 * 1.5 * 0.5 + 0.5 = 2.75.
    let model = MlpConfig::new(2, 3, 1)
        .with_initializer(Initializer::Constant { value: 0.5 })
        .init::<TB>(&device);

    let input = Tensor::<TB, 2>::ones([1, 2], &device);
    let output: f32 = model.forward(input).into_scalar();
    assert_relative_eq!(output, 2.75, epsilon = 1e-6);
}

#[test]
fn classifier_shapes_proba_and_params() {
    let device = NdArrayDevice::default();
    let model = ImageClassifierConfig::new([4, 5], vec![8], 3)
        .init::<TB>(&device)
        .unwrap();

    let images = Tensor::<TB, 3>::random([2, 4, 5], Distribution::Default, &device);
    assert_eq!(model.forward(images.clone()).dims(), [2, 3]);

    // Каждая строка вероятностей суммируется в единицу.
    let proba = model.predict_proba(images);
    assert_eq!(proba.dims(), [2, 3]);
    let row_sums = proba.sum_dim(1).into_data().to_vec::<f32>().unwrap();
    for row_sum in row_sums {
        assert_relative_eq!(row_sum, 1.0, epsilon = 1e-5);
    }

    assert_eq!(model.num_params(), 20 * 8 + 8 + 8 * 3 + 3);
    assert_eq!(model.info().kind, "image_classifier");
    assert_eq!(model.info().d_input, 20);
}

#[test]
fn classifier_without_hidden_layers_is_valid() {
    let device = NdArrayDevice::default();
    let model = ImageClassifierConfig::new([4, 5], Vec::new(), 3)
        .init::<TB>(&device)
        .unwrap();

    let images = Tensor::<TB, 3>::random([2, 4, 5], Distribution::Default, &device);
    assert_eq!(model.forward(images).dims(), [2, 3]);
    assert_eq!(model.num_params(), 20 * 3 + 3);
}

#[test]
fn classifier_rejects_zero_dimensions() {
    let device = NdArrayDevice::default();

    let zero_axis = ImageClassifierConfig::new([0, 5], vec![8], 3).init::<TB>(&device);
    assert!(matches!(zero_axis, Err(CoreError::InvalidConfig(_))));

    let zero_classes = ImageClassifierConfig::new([4, 5], vec![8], 0).init::<TB>(&device);
    assert!(matches!(zero_classes, Err(CoreError::InvalidConfig(_))));

    let zero_hidden = ImageClassifierConfig::new([4, 5], vec![8, 0, 4], 3).init::<TB>(&device);
    assert!(matches!(zero_hidden, Err(CoreError::InvalidConfig(_))));
}

#[test]
fn fixed_mlp_loop_respects_threshold() {
    let device = NdArrayDevice::default();
    let config = FixedMlpConfig::new(6);
    assert_relative_eq!(config.threshold, 1.0);
    let model = config.init::<TB>(&device).unwrap();

    // Крупный вход гарантирует, что цикл деления пополам сработает.
    let input = Tensor::<TB, 2>::random([2, 6], Distribution::Default, &device).mul_scalar(5.0);
    let output = model.forward(input.clone());
    assert_eq!(output.dims(), [2, 6]);

    let abs_sum: f32 = output.abs().sum().into_scalar();
    assert!(
        f64::from(abs_sum) <= config.threshold + 1e-6,
        "Сумма модулей {} выше порога",
        abs_sum
    );

    // Скалярная свертка: |sum| <= sum |x| <= порог.
    let collapsed = model.forward_sum(input);
    assert_eq!(collapsed.dims(), [1]);
    let value: f32 = collapsed.into_scalar();
    assert!(f64::from(value.abs()) <= config.threshold + 1e-6);

    // Порог не зашит в модель: цикл ведет себя по значению из конфигурации.
    let tight = FixedMlpConfig::new(6).with_threshold(0.25);
    let tight_model = tight.init::<TB>(&device).unwrap();
    let tight_input =
        Tensor::<TB, 2>::random([2, 6], Distribution::Default, &device).mul_scalar(5.0);
    let tight_sum: f32 = tight_model.forward(tight_input).abs().sum().into_scalar();
    assert!(
        f64::from(tight_sum) <= tight.threshold + 1e-6,
        "Сумма модулей {} выше порога {}",
        tight_sum,
        tight.threshold
    );
}

#[test]
fn fixed_mlp_counts_only_dense_params() {
    let device = NdArrayDevice::default();
    let model = FixedMlpConfig::new(6).init::<TB>(&device).unwrap();

    // Константная матрица 6x6 в подсчет не входит.
    assert_eq!(model.num_params(), 6 * 6 + 6);
    assert_eq!(model.info().trainable_params, 6 * 6 + 6);
    assert_eq!(model.info().kind, "fixed_mlp");
}

#[test]
fn fixed_mlp_rejects_bad_config() {
    let device = NdArrayDevice::default();

    let zero_features = FixedMlpConfig::new(0).init::<TB>(&device);
    assert!(matches!(zero_features, Err(CoreError::InvalidConfig(_))));

    let zero_threshold = FixedMlpConfig::new(6).with_threshold(0.0).init::<TB>(&device);
    assert!(matches!(zero_threshold, Err(CoreError::InvalidConfig(_))));

    let negative_threshold = FixedMlpConfig::new(6)
        .with_threshold(-1.5)
        .init::<TB>(&device);
    assert!(matches!(negative_threshold, Err(CoreError::InvalidConfig(_))));
}

#[test]
fn nested_mlp_shapes_and_params() {
    let device = NdArrayDevice::default();
    let model = NestedMlpConfig::new(10, 16, 12, 8)
        .init::<TB>(&device)
        .unwrap();

    let input = Tensor::<TB, 2>::random([3, 10], Distribution::Default, &device);
    assert_eq!(model.forward(input).dims(), [3, 8]);

    // Два линейных слоя тела плюс голова.
    let expected_params = (10 * 16 + 16) + (16 * 12 + 12) + (12 * 8 + 8);
    assert_eq!(model.num_params(), expected_params);
    assert_eq!(model.info().kind, "nested_mlp");

    let zero_dim = NestedMlpConfig::new(10, 0, 12, 8).init::<TB>(&device);
    assert!(matches!(zero_dim, Err(CoreError::InvalidConfig(_))));
}

#[test]
fn chimera_composes_parts_and_sums_their_params() {
    let device = NdArrayDevice::default();
    let config = ChimeraConfig::new(NestedMlpConfig::new(10, 16, 12, 8), 6, FixedMlpConfig::new(6));
    let model = config.init::<TB>(&device).unwrap();

    let input = Tensor::<TB, 2>::random([2, 10], Distribution::Default, &device);
    assert_eq!(model.forward(input.clone()).dims(), [2, 6]);
    assert_eq!(model.forward_sum(input).dims(), [1]);

    // Параметры композиции равны сумме параметров частей:
    // вложенный MLP, мост 8 -> 6 и хвост с общим слоем 6 -> 6.
    let nested_params = (10 * 16 + 16) + (16 * 12 + 12) + (12 * 8 + 8);
    let bridge_params = 8 * 6 + 6;
    let tail_params = 6 * 6 + 6;
    assert_eq!(
        model.num_params(),
        nested_params + bridge_params + tail_params
    );

    let info = model.info();
    assert_eq!(info.kind, "chimera");
    assert_eq!(info.d_input, 10);
    assert_eq!(info.d_output, 6);
}

#[test]
fn chimera_rejects_bridge_mismatch() {
    let device = NdArrayDevice::default();
    let config = ChimeraConfig::new(NestedMlpConfig::new(10, 16, 12, 8), 7, FixedMlpConfig::new(6));

    match config.init::<TB>(&device) {
        Err(CoreError::InvalidConfig(message)) => {
            assert!(message.contains('7'));
            assert!(message.contains('6'));
        }
        other => panic!("Ожидалась InvalidConfig, получено {:?}", other.map(|_| ())),
    }
}

#[test]
fn block_info_round_trips_through_json() {
    let info = BlockInfo {
        kind: "mlp".to_string(),
        d_input: 20,
        d_output: 10,
        trainable_params: 1002,
    };

    let json = serde_json::to_string(&info).unwrap();
    assert!(json.contains("\"kind\":\"mlp\""));
    assert!(json.contains("\"trainable_params\":1002"));

    let parsed: BlockInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, info);
}
