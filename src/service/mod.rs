pub mod string_service;

pub use string_service::{FilteredStrings, InterpretedStrings, StringService};
