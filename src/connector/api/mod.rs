mod router;
mod static_files;

pub use router::*;
