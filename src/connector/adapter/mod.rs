mod gemini_forwarder;
mod mock_client;
mod proxy_client;

pub use gemini_forwarder::*;
pub use mock_client::*;
pub use proxy_client::*;
