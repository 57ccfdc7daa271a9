// Модули приложения
mod ai;
mod config;
mod core;
mod logger;
mod services;
mod ui;

use config::Config;
use ui::ConsoleUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Инициализируем логирование
    logger::init();
    log::info!("🃏 Jester запущен");

    let config = Config::default();
    log::info!("📁 Конфигурация загружена, бэкенд: {}", config.backend_url);

    let mut ui = ConsoleUi::new(&config);
    ui.run().await
}
