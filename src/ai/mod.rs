pub mod jester;
pub mod local;

pub use jester::JesterClient;
pub use local::{Category, Classification, LocalAI};
