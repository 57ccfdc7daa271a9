use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Конфигурация приложения из переменных окружения (.env поддерживается)
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub typing_delay_ms: u64,
    pub bot_name: String,
    pub db_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        dotenv::dotenv().ok();

        let backend_url = env::var("JESTER_BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:7777".to_string());

        let request_timeout_secs = env::var("JESTER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);

        // Пауза перед ответом, чтобы индикатор набора успел показаться
        let typing_delay_ms = env::var("JESTER_TYPING_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        let db_path = env::var("JESTER_DB_PATH").ok().map(PathBuf::from);

        Self {
            backend_url,
            request_timeout_secs,
            typing_delay_ms,
            bot_name: "Jester".to_string(),
            db_path,
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }
}
