pub mod libs;

pub use libs::error::HicError;
pub use libs::io::{reader, writer};
