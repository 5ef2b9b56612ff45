use std::fs;
use std::io::Read;
use std::path::Path;

use tempfile::tempdir;
use tracing::Level;
use utils_crate::error::UtilsError;
use utils_crate::logger::init_tracing_logger;

/// Ищет в директории логов файл с именем, начинающимся с `app_name.log`
/// (суточная ротация добавляет дату суффиксом), содержащий `expected_message`.
fn log_file_contains(log_dir: &Path, app_name: &str, expected_message: &str) -> bool {
    // Даем немного времени на запись в файл.
    std::thread::sleep(std::time::Duration::from_millis(150));

    let prefix = format!("{app_name}.log");
    let entries: Vec<_> = fs::read_dir(log_dir)
        .expect("Не удалось прочитать директорию логов")
        .filter_map(Result::ok)
        .map(|res| res.path())
        .filter(|p| {
            p.is_file()
                && p.file_name()
                    .map_or(false, |n| n.to_string_lossy().starts_with(&prefix))
        })
        .collect();

    let mut file_content = String::new();
    for entry_path in entries {
        if let Ok(mut file) = fs::File::open(&entry_path) {
            file_content.clear();
            if file.read_to_string(&mut file_content).is_ok()
                && file_content.contains(expected_message)
            {
                return true;
            }
        }
    }
    false
}

// Глобальный подписчик tracing устанавливается один раз на процесс,
// поэтому весь сценарий логгера проверяется в одном тесте.
#[test]
#[cfg(feature = "logger_file_output")]
fn init_logger_writes_file_and_rejects_reinit() {
    let dir = tempdir().unwrap();
    let app_name = "blocklab-logger-test";

    init_tracing_logger(app_name, Level::DEBUG, Level::DEBUG, Some(dir.path()))
        .expect("Первая инициализация логгера должна пройти успешно");

    let marker = "маркер-записи-в-файл-7319";
    tracing::info!("{}", marker);

    assert!(
        log_file_contains(dir.path(), app_name, marker),
        "Сообщение не найдено в файле лога"
    );

    // Повторная инициализация должна вернуть ошибку, а не паниковать.
    let second = init_tracing_logger(app_name, Level::INFO, Level::INFO, None);
    match second {
        Err(UtilsError::Generic(msg)) => {
            assert!(msg.contains("Не удалось инициализировать логгер"));
        }
        other => panic!("Ожидалась ошибка Generic, получено {:?}", other),
    }
}
