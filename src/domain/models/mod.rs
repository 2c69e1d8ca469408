mod generation;
mod message;
mod transcript;
mod turn;

pub use generation::*;
pub use message::*;
pub use transcript::*;
pub use turn::*;
