use anyhow::Result;
use std::time::Duration;

/// Клиент для Jester-бэкенда (сервер шуток)
pub struct JesterClient {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl JesterClient {
    /// Создает клиент для указанного адреса бэкенда
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url,
            timeout,
        }
    }

    /// Запрашивает ответ бэкенда: GET {base}/{сообщение}
    ///
    /// Сообщение уходит сегментом пути, поэтому кодируем его. Сам текст
    /// не изменяется - регистр и пробелы доходят до сервера как есть.
    pub async fn fetch_joke(&self, message: &str) -> Result<String> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(message)
        );

        let response = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Jester backend error: {}", status));
        }

        // Бэкенд отвечает обычным текстом, отдаем его без изменений
        Ok(response.text().await?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
