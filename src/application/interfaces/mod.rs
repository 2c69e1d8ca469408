mod completion_client;
mod upstream_forwarder;

pub use completion_client::*;
pub use upstream_forwarder::*;
