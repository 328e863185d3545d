pub mod event;
pub mod types;

pub use types::{parse_json_bool, ReleaseInputs, RunContext};
