// core_blocks/src/blocks/flatten.rs

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(unsafe_code, clippy::unwrap_used, clippy::expect_used)]

//! Слой `Flatten`: схлопывание всех осей после батчевой в одну ось признаков.
//!
//! Слой не имеет параметров, не зависит от бэкенда и служит входной ступенью
//! для полносвязных конвейеров, принимающих многомерные данные (например,
//! изображения `[batch, height, width]`).

use burn::{
    module::Module,
    tensor::{backend::Backend, Tensor},
};

/// Слой, перестраивающий `[b, d1, ..., dn]` в `[b, d1 * ... * dn]`.
///
/// Порядок элементов сохраняется (row-major), параметров нет, к градиентам
/// слой не добавляет ничего.
#[derive(Module, Clone, Debug, Default)]
pub struct Flatten;

impl Flatten {
    /// Создает новый слой `Flatten`.
    pub fn new() -> Self {
        Self
    }

    /// Выполняет прямой проход: схлопывает все оси после нулевой (батчевой).
    ///
    /// # Аргументы
    /// * `input`: Тензор ранга `D >= 2` формы `[batch_size, d1, ..., dn]`.
    ///
    /// # Возвращает
    /// Тензор формы `[batch_size, d1 * ... * dn]`. Вход ранга 2 проходит
    /// без изменения формы.
    pub fn forward<B: Backend, const D: usize>(&self, input: Tensor<B, D>) -> Tensor<B, 2> {
        input.flatten(1, D - 1)
    }
}
