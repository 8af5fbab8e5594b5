pub mod filter;
pub mod record;

pub use filter::Filter;
pub use record::{current_timestamp, Fingerprint, FrequencyMap, StringProperties, StringRecord};
