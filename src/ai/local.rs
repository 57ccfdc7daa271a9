use rand::Rng;

/// Категория локального ответа
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Greetings,
    HowAreYou,
    Help,
    Weather,
    Time,
    Thanks,
    Goodbye,
}

/// Результат классификации: локальный ответ или вопрос для Jester-бэкенда
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Local(Category),
    Delegate,
}

// Правила проверяются по порядку, выигрывает первое совпадение.
// Совпадение - вхождение подстроки, не отдельное слово.
const KEYWORD_RULES: &[(Category, &[&str])] = &[
    (Category::Greetings, &["hello", "hi", "hey", "greetings"]),
    (Category::HowAreYou, &["how are you", "how do you do"]),
    (Category::Help, &["help", "assist", "support"]),
    (Category::Weather, &["weather", "forecast"]),
    (Category::Time, &["time", "clock"]),
    (Category::Thanks, &["thank", "thanks"]),
    (Category::Goodbye, &["bye", "goodbye"]),
];

/// Локальный AI с правилами для базовых ответов
pub struct LocalAI;

impl LocalAI {
    /// Определяет категорию сообщения или отдает его бэкенду
    pub fn classify(message: &str) -> Classification {
        let input_lower = message.to_lowercase();

        for (category, keywords) in KEYWORD_RULES {
            if keywords.iter().any(|keyword| input_lower.contains(keyword)) {
                return Classification::Local(*category);
            }
        }

        // Категории для шуток нет - такие запросы уходят на Jester-сервер
        Classification::Delegate
    }

    /// Список готовых ответов категории (всегда непустой)
    pub fn responses(category: Category) -> &'static [&'static str] {
        match category {
            Category::Greetings => &[
                "Hello! How can I assist you today?",
                "Hi there! What can I help you with?",
                "Greetings! I'm here to help.",
                "Hello! Nice to meet you!",
            ],
            Category::HowAreYou => &[
                "I'm doing great, thank you for asking! How about you?",
                "I'm functioning perfectly! How can I help you?",
                "All systems are running smoothly! What's on your mind?",
                "I'm excellent! Ready to assist you with anything you need.",
            ],
            Category::Help => &[
                "I can help you with various tasks! Try asking me about the weather, tell me a joke, or ask for recommendations.",
                "I'm your AI assistant! I can answer questions, have conversations, and help with information. What would you like to know?",
                "I'm here to assist! You can ask me questions, request information, or just have a friendly chat. What interests you?",
                "I can help with many things! Try asking me about topics, requesting information, or just chat with me. What's on your mind?",
            ],
            Category::Weather => &[
                "I don't have access to real-time weather data, but I'd recommend checking a weather app or website for current conditions in your area!",
                "For accurate weather information, please check a local weather service. Is there anything else I can help you with?",
                "I can't provide live weather updates, but I'd be happy to help with other questions you might have!",
            ],
            Category::Time => &[
                "I don't have access to your current time, but you can check your device's clock for the accurate time!",
                "Time is relative, but your device should show you the current local time!",
                "I can't access real-time data, but your system clock should have the current time!",
            ],
            Category::Thanks => &[
                "You're very welcome! 😊",
                "Happy to help! Let me know if you need anything else.",
                "My pleasure! Is there anything else I can assist you with?",
                "You're welcome! I'm always here to help.",
            ],
            Category::Goodbye => &[
                "Goodbye! Have a wonderful day! 👋",
                "See you later! Take care!",
                "Farewell! It was great chatting with you!",
                "Bye for now! Feel free to come back anytime!",
            ],
        }
    }

    /// Выбирает случайный ответ категории (равномерно, без исключения повторов)
    pub fn pick_response(category: Category) -> &'static str {
        let responses = Self::responses(category);
        let index = rand::thread_rng().gen_range(0..responses.len());
        responses[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_classifies_as_greetings_in_any_case() {
        for message in ["hello", "HELLO there", "Oh, Hello!"] {
            assert_eq!(
                LocalAI::classify(message),
                Classification::Local(Category::Greetings),
                "message: {message}"
            );
        }
    }

    #[test]
    fn unmatched_message_delegates() {
        assert_eq!(LocalAI::classify("tell me a joke"), Classification::Delegate);
        assert_eq!(LocalAI::classify(""), Classification::Delegate);
        assert_eq!(LocalAI::classify("про кота"), Classification::Delegate);
    }

    #[test]
    fn help_rule_wins_over_thanks() {
        // "help" проверяется раньше "thanks"
        assert_eq!(
            LocalAI::classify("thanks for the help"),
            Classification::Local(Category::Help)
        );
    }

    #[test]
    fn greetings_rule_wins_over_goodbye() {
        assert_eq!(
            LocalAI::classify("hello and goodbye"),
            Classification::Local(Category::Greetings)
        );
    }

    #[test]
    fn matching_is_substring_based() {
        // "bedtime" содержит "time" - поведение виджета сохранено
        assert_eq!(
            LocalAI::classify("it is bedtime"),
            Classification::Local(Category::Time)
        );
    }

    #[test]
    fn every_rule_category_has_responses() {
        for (category, keywords) in KEYWORD_RULES {
            assert!(!keywords.is_empty());
            assert!(!LocalAI::responses(*category).is_empty());
        }
    }

    #[test]
    fn picked_response_is_from_category_list() {
        let greetings = LocalAI::responses(Category::Greetings);
        assert_eq!(greetings.len(), 4);
        for _ in 0..32 {
            let response = LocalAI::pick_response(Category::Greetings);
            assert!(greetings.contains(&response));
        }
    }
}
