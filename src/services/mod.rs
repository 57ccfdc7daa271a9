pub mod settings;
pub mod storage;

pub use settings::{ChatSettings, FontSize, Theme, SETTINGS_KEY};
pub use storage::SQLiteStorage;
