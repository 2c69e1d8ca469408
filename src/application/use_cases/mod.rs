mod chat_turn;
mod prompt;

pub use chat_turn::*;
pub use prompt::*;
