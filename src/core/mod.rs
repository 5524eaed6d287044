pub mod collectors;
pub mod parse;
pub mod snapshot;
