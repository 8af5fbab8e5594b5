//! Query engine: filter construction and evaluation
//!
//! Filters come from two places:
//! - structured query parameters (`?is_palindrome=true&min_length=3`)
//! - free-text phrases (`"single word palindromic strings"`)
//!
//! Both produce a [`Filter`](crate::models::Filter) which is evaluated by
//! [`FilterExecutor`].

pub mod executor;
pub mod phrase;
pub mod structured;

pub use executor::FilterExecutor;
pub use phrase::{InterpretedQuery, PhraseParser};
pub use structured::StructuredFilterParser;
