pub mod code_entry;

pub use code_entry::*;
