/// Console chat front-end: rendering and interaction loop
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use rand::Rng;

use crate::config::Config;
use crate::core::JesterAgent;
use crate::services::{ChatSettings, FontSize, Theme};

/// Emoji palette offered by the original widget
const EMOJIS: &[&str] = &["😊", "😂", "❤️", "👍", "🎉", "🤔", "😎", "🙏"];

// Звонок терминала вместо синтеза звука
const BELL: char = '\u{0007}';

pub struct ConsoleUi {
    agent: JesterAgent,
    settings: ChatSettings,
    bot_name: String,
    typing_delay: Duration,
    // Набранный через /emoji "хвост" для следующего сообщения
    composer: String,
}

impl ConsoleUi {
    pub fn new(config: &Config) -> Self {
        let agent = JesterAgent::new(config);
        let settings = agent.load_settings();

        Self {
            agent,
            settings,
            bot_name: config.bot_name.clone(),
            typing_delay: config.typing_delay(),
            composer: String::new(),
        }
    }

    /// Runs the interactive loop until `/quit` or EOF
    pub async fn run(&mut self) -> Result<()> {
        let greeting = self.agent.greet();
        self.print_message("bot", greeting);
        println!("(type /help for commands)");

        let stdin = io::stdin();
        loop {
            print!("you> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.read_line(&mut line)? == 0 {
                break; // EOF
            }

            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            if let Some(command) = input.strip_prefix('/') {
                if !self.handle_command(command) {
                    break;
                }
                continue;
            }

            let message = if self.composer.is_empty() {
                input.to_string()
            } else {
                format!("{}{}", std::mem::take(&mut self.composer), input)
            };
            self.send(&message).await;
        }

        Ok(())
    }

    async fn send(&mut self, message: &str) {
        self.print_message("user", message);
        if self.settings.sound_enabled {
            print!("{BELL}");
        }

        self.show_typing_indicator().await;
        let response = self.agent.send_message(message).await;
        self.hide_typing_indicator();

        self.print_message("bot", &response);
        if self.settings.sound_enabled {
            print!("{BELL}");
        }
    }

    // Пауза перед ответом, чтобы индикатор успел показаться
    async fn show_typing_indicator(&self) {
        print!("{} is typing...", self.bot_name);
        let _ = io::stdout().flush();
        tokio::time::sleep(self.typing_delay).await;
    }

    fn hide_typing_indicator(&self) {
        print!("\r{:width$}\r", "", width = self.bot_name.len() + 14);
    }

    fn print_message(&self, role: &str, content: &str) {
        let time = chrono::Local::now().format("%l:%M %p").to_string();
        let sender = if role == "user" {
            "You"
        } else {
            self.bot_name.as_str()
        };
        println!("[{}] {}: {}", time.trim(), sender, content);
    }

    /// Обрабатывает /команду; false означает выход из цикла
    fn handle_command(&mut self, command: &str) -> bool {
        let mut parts = command.splitn(2, ' ');
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        match name {
            "quit" | "exit" => return false,
            "help" => {
                println!("Commands: /clear, /emoji, /attach <file>, /theme <light|dark>,");
                println!("          /font <small|medium|large>, /sound <on|off>, /stats, /quit");
            }
            "clear" => {
                self.agent.clear_history();
                if let Some(content) = self.agent.history().last().map(|m| m.content.clone()) {
                    self.print_message("bot", &content);
                }
            }
            "emoji" => {
                let emoji = EMOJIS[rand::thread_rng().gen_range(0..EMOJIS.len())];
                self.composer.push_str(emoji);
                println!("{} added to your next message", emoji);
            }
            "attach" => {
                if arg.is_empty() {
                    println!("Usage: /attach <file name>");
                } else {
                    self.agent.attach_file(arg);
                    let exchange: Vec<(String, String)> = self
                        .agent
                        .history()
                        .messages()
                        .iter()
                        .rev()
                        .take(2)
                        .rev()
                        .map(|m| (m.role.clone(), m.content.clone()))
                        .collect();
                    for (role, content) in exchange {
                        self.print_message(&role, &content);
                    }
                }
            }
            "theme" => match Theme::parse(arg) {
                Some(theme) => {
                    self.settings.theme = theme;
                    self.agent.save_settings(&self.settings);
                    println!("Theme set to {}", arg);
                }
                None => println!("Usage: /theme <light|dark>"),
            },
            "font" => match FontSize::parse(arg) {
                Some(font_size) => {
                    self.settings.font_size = font_size;
                    self.agent.save_settings(&self.settings);
                    println!("Font size set to {}", arg);
                }
                None => println!("Usage: /font <small|medium|large>"),
            },
            "sound" => match arg {
                "on" => {
                    self.settings.sound_enabled = true;
                    self.agent.save_settings(&self.settings);
                    println!("Sound on");
                }
                "off" => {
                    self.settings.sound_enabled = false;
                    self.agent.save_settings(&self.settings);
                    println!("Sound off");
                }
                _ => println!("Usage: /sound <on|off>"),
            },
            "stats" => println!("{}", self.agent.storage_stats()),
            other => println!("Unknown command: /{other} (try /help)"),
        }

        true
    }
}
