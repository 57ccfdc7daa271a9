use anyhow::Result;
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use super::settings::{ChatSettings, SETTINGS_KEY};

/// Структура для хранения одного сообщения в БД
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: i32,
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub timestamp: String,
}

/// Хранилище разговоров и настроек в SQLite
pub struct SQLiteStorage {
    conn: Connection,
    session_id: String,
}

impl SQLiteStorage {
    /// Создает или открывает базу данных
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        // Используем путь по умолчанию если не указан
        let db_path = db_path.unwrap_or_else(|| {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".config/jester/jester.db")
        });

        // Создаем директорию если её нет
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        log::info!("📦 SQLite БД открыта: {}", db_path.display());

        Self::init_schema(&conn)?;

        // Генерируем уникальный session_id
        let session_id = Uuid::new_v4().to_string();
        log::info!("📍 Session ID: {}", session_id);

        Ok(Self { conn, session_id })
    }

    /// Инициализирует схему БД
    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS conversations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )",
            [],
        )?;

        // Создаем индекс для быстрого поиска по session_id
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_session_id ON conversations(session_id)",
            [],
        )?;

        // Настройки храним парой ключ/значение, значение - JSON
        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        log::info!("✓ Схема БД инициализирована");
        Ok(())
    }

    /// Сохраняет сообщение в БД
    pub fn save_message(&self, role: &str, content: &str) -> Result<()> {
        let timestamp = Local::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO conversations (session_id, role, content, timestamp)
             VALUES (?1, ?2, ?3, ?4)",
            params![&self.session_id, role, content, &timestamp],
        )?;

        log::debug!(
            "💾 Сохранено сообщение: {} - {}",
            role,
            content.chars().take(50).collect::<String>()
        );
        Ok(())
    }

    /// Загружает историю разговора из текущей сессии
    pub fn load_session_history(&self) -> Result<Vec<StoredMessage>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, role, content, timestamp
             FROM conversations
             WHERE session_id = ?1
             ORDER BY id ASC",
        )?;

        let messages = stmt.query_map(params![&self.session_id], |row| {
            Ok(StoredMessage {
                id: row.get(0)?,
                session_id: row.get(1)?,
                role: row.get(2)?,
                content: row.get(3)?,
                timestamp: row.get(4)?,
            })
        })?;

        let mut result = Vec::new();
        for msg in messages {
            result.push(msg?);
        }

        log::info!("📖 Загружено {} сообщений из сессии", result.len());
        Ok(result)
    }

    /// Очищает историю текущей сессии
    pub fn clear_session_history(&self) -> Result<()> {
        let affected = self.conn.execute(
            "DELETE FROM conversations WHERE session_id = ?1",
            params![&self.session_id],
        )?;

        log::warn!("🗑️  Очищено {} сообщений из текущей сессии", affected);
        Ok(())
    }

    /// Сохраняет настройки под фиксированным ключом (перезаписывая старые)
    pub fn save_settings(&self, settings: &ChatSettings) -> Result<()> {
        let value = serde_json::to_string(settings)?;

        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![SETTINGS_KEY, &value],
        )?;

        log::debug!("💾 Настройки сохранены: {}", value);
        Ok(())
    }

    /// Загружает настройки, если они были сохранены
    pub fn load_settings(&self) -> Result<Option<ChatSettings>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![SETTINGS_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    /// Возвращает количество сообщений в БД
    pub fn message_count(&self) -> Result<usize> {
        let count: usize =
            self.conn
                .query_row("SELECT COUNT(*) FROM conversations", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Возвращает информацию о статистике БД
    pub fn get_stats(&self) -> Result<String> {
        let total: usize =
            self.conn
                .query_row("SELECT COUNT(*) FROM conversations", [], |row| row.get(0))?;

        let sessions: usize = self.conn.query_row(
            "SELECT COUNT(DISTINCT session_id) FROM conversations",
            [],
            |row| row.get(0),
        )?;

        let current_session: usize = self.conn.query_row(
            "SELECT COUNT(*) FROM conversations WHERE session_id = ?1",
            params![&self.session_id],
            |row| row.get(0),
        )?;

        Ok(format!(
            "📊 {} messages total, {} sessions, {} in the current session",
            total, sessions, current_session
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::settings::{FontSize, Theme};
    use tempfile::TempDir;

    fn create_test_storage() -> (SQLiteStorage, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = SQLiteStorage::new(Some(temp_dir.path().join("test.db")))
            .expect("Failed to create storage");
        (storage, temp_dir)
    }

    #[test]
    fn message_roundtrip_keeps_order() {
        let (storage, _temp) = create_test_storage();

        storage.save_message("user", "hi").unwrap();
        storage.save_message("bot", "Hello! Nice to meet you!").unwrap();

        let history = storage.load_session_history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, "user");
        assert_eq!(history[0].content, "hi");
        assert_eq!(history[1].role, "bot");

        assert_eq!(storage.message_count().unwrap(), 2);
    }

    #[test]
    fn clear_session_history_empties_session() {
        let (storage, _temp) = create_test_storage();

        storage.save_message("user", "hi").unwrap();
        storage.clear_session_history().unwrap();

        assert!(storage.load_session_history().unwrap().is_empty());
    }

    #[test]
    fn non_ascii_content_is_stored() {
        let (storage, _temp) = create_test_storage();

        let content = "📎 Attached: отчет.pdf (तुम मुझे शब्द दो!)";
        storage.save_message("user", content).unwrap();

        let history = storage.load_session_history().unwrap();
        assert_eq!(history[0].content, content);
    }

    #[test]
    fn settings_roundtrip() {
        let (storage, _temp) = create_test_storage();

        assert!(storage.load_settings().unwrap().is_none());

        let settings = ChatSettings {
            theme: Theme::Dark,
            font_size: FontSize::Small,
            sound_enabled: true,
        };
        storage.save_settings(&settings).unwrap();

        assert_eq!(storage.load_settings().unwrap(), Some(settings.clone()));

        // Повторное сохранение перезаписывает, а не дублирует
        let updated = ChatSettings {
            theme: Theme::Light,
            ..settings
        };
        storage.save_settings(&updated).unwrap();
        assert_eq!(storage.load_settings().unwrap(), Some(updated));
    }
}
