use crate::ai::local::{Classification, LocalAI};
use crate::ai::JesterClient;
use crate::config::Config;
use crate::core::history::ChatHistory;
use crate::services::{ChatSettings, SQLiteStorage};

/// Ответ при недоступном бэкенде (единственная обрабатываемая ошибка)
pub const FALLBACK_RESPONSE: &str =
    "I'm having trouble connecting to the Jester server. Is the C backend running?";

/// Приветствие Джестера при старте и очистке чата
pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your Jester today. Give me keyword, and I shall give you joke! (तुम मुझे शब्द दो, मैं तुम्हे चुटकुला दूंगा!)";

// Заглушка на вложение файла - обработка файлов не поддерживается
const ATTACHMENT_RESPONSE: &str =
    "I've received your file! However, I can't process files directly. Is there something specific about the file you'd like to discuss?";

/// Агент чата: классифицирует сообщение, отвечает локально или
/// через Jester-бэкенд, ведет историю разговора
pub struct JesterAgent {
    client: JesterClient,
    history: ChatHistory,
    storage: Option<SQLiteStorage>,
}

impl JesterAgent {
    pub fn new(config: &Config) -> Self {
        let client = JesterClient::new(config.backend_url.clone(), config.request_timeout());

        // Хранилище опционально: без БД продолжаем работать, только без истории
        let storage = match SQLiteStorage::new(config.db_path.clone()) {
            Ok(s) => {
                log::info!("✓ SQLiteStorage инициализирован");
                Some(s)
            }
            Err(e) => {
                log::warn!("⚠️ Ошибка инициализации SQLiteStorage: {}", e);
                None
            }
        };

        Self {
            client,
            history: ChatHistory::new(),
            storage,
        }
    }

    /// Приветствие при старте сессии, попадает в историю
    pub fn greet(&mut self) -> &'static str {
        self.record("bot", WELCOME_MESSAGE);
        WELCOME_MESSAGE
    }

    /// Полный цикл обработки: классификация, ответ, история
    pub async fn send_message(&mut self, user_input: &str) -> String {
        self.record("user", user_input);

        let classification = LocalAI::classify(user_input);
        let response = self.respond(user_input, classification).await;

        self.record("bot", &response);
        response
    }

    /// Отвечает по классификации: готовой фразой или шуткой с бэкенда.
    /// Сетевая ошибка превращается в запасной ответ и наружу не выходит.
    pub async fn respond(&self, message: &str, classification: Classification) -> String {
        match classification {
            Classification::Local(category) => {
                log::debug!("📡 Локальный ответ, категория {:?}", category);
                LocalAI::pick_response(category).to_string()
            }
            // Бэкенду уходит исходное сообщение, не приведенное к нижнему регистру
            Classification::Delegate => match self.client.fetch_joke(message).await {
                Ok(joke) => {
                    log::debug!("📡 Ответ от Jester-бэкенда");
                    joke
                }
                Err(e) => {
                    log::warn!("⚠️ Jester-бэкенд недоступен: {}", e);
                    FALLBACK_RESPONSE.to_string()
                }
            },
        }
    }

    /// Заглушка вложения файла из исходного виджета
    pub fn attach_file(&mut self, file_name: &str) {
        self.record("user", &format!("📎 Attached: {}", file_name));
        self.record("bot", ATTACHMENT_RESPONSE);
    }

    /// Очищает историю разговора и снова здоровается
    pub fn clear_history(&mut self) {
        self.history.clear();

        if let Some(ref storage) = self.storage {
            if let Err(e) = storage.clear_session_history() {
                log::error!("Ошибка при очистке истории в БД: {}", e);
            }
        }

        log::info!("🗑️  История разговора очищена");
        self.greet();
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// Настройки из БД или значения по умолчанию
    pub fn load_settings(&self) -> ChatSettings {
        match &self.storage {
            Some(storage) => match storage.load_settings() {
                Ok(Some(settings)) => settings,
                Ok(None) => ChatSettings::default(),
                Err(e) => {
                    log::warn!("⚠️ Не удалось загрузить настройки: {}", e);
                    ChatSettings::default()
                }
            },
            None => ChatSettings::default(),
        }
    }

    pub fn save_settings(&self, settings: &ChatSettings) {
        if let Some(ref storage) = self.storage {
            if let Err(e) = storage.save_settings(settings) {
                log::error!("Ошибка сохранения настроек: {}", e);
            }
        }
    }

    pub fn storage_stats(&self) -> String {
        match &self.storage {
            Some(storage) => match storage.get_stats() {
                Ok(stats) => stats,
                Err(e) => format!("Failed to read storage stats: {}", e),
            },
            None => "Storage is not available".to_string(),
        }
    }

    // Сообщение попадает в память и, если доступно, в БД
    fn record(&mut self, role: &str, content: &str) {
        self.history.push(role, content);

        if let Some(ref storage) = self.storage {
            if let Err(e) = storage.save_message(role, content) {
                log::error!("Ошибка сохранения {} message в БД: {}", role, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::local::Category;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn test_agent(backend_url: &str) -> (JesterAgent, TempDir) {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.backend_url = backend_url.to_string();
        config.request_timeout_secs = 1;
        config.db_path = Some(temp.path().join("jester.db"));
        (JesterAgent::new(&config), temp)
    }

    // Адрес, по которому соединение гарантированно отклоняется
    async fn dead_backend_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        url
    }

    #[tokio::test]
    async fn local_response_comes_from_category_list() {
        let (agent, _temp) = test_agent("http://localhost:7777");

        let classification = LocalAI::classify("hi");
        assert_eq!(classification, Classification::Local(Category::Greetings));

        let response = agent.respond("hi", classification).await;
        assert!(LocalAI::responses(Category::Greetings).contains(&response.as_str()));
    }

    #[tokio::test]
    async fn delegate_failure_returns_fallback() {
        let url = dead_backend_url().await;
        let (agent, _temp) = test_agent(&url);

        let response = agent.respond("tell me a joke", Classification::Delegate).await;
        assert_eq!(response, FALLBACK_RESPONSE);
    }

    #[tokio::test]
    async fn delegate_success_returns_backend_body() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 1024];
            let _ = socket.read(&mut buf).await.unwrap();
            let body = "A joke about cats.";
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        let (mut agent, _temp) = test_agent(&url);
        let response = agent.send_message("about cats").await;
        assert_eq!(response, "A joke about cats.");
    }

    #[tokio::test]
    async fn send_message_appends_user_then_bot() {
        let (mut agent, _temp) = test_agent("http://localhost:7777");

        agent.send_message("hi").await;

        let messages = agent.history().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[1].role, "bot");
    }

    #[tokio::test]
    async fn attach_file_records_stub_exchange() {
        let (mut agent, _temp) = test_agent("http://localhost:7777");

        agent.attach_file("report.pdf");

        let messages = agent.history().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "📎 Attached: report.pdf");
        assert_eq!(messages[1].content, ATTACHMENT_RESPONSE);
    }

    #[tokio::test]
    async fn clear_history_restores_welcome() {
        let (mut agent, _temp) = test_agent("http://localhost:7777");

        agent.greet();
        agent.send_message("hello").await;
        agent.clear_history();

        let messages = agent.history().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, WELCOME_MESSAGE);
    }
}
