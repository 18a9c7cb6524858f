pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod format;
pub mod intake;
pub mod io;
pub mod lead;
pub mod paths;
pub mod policy;
pub mod query;
pub mod sample;
pub mod types;
pub mod user;
pub mod visibility;

pub use error::{CrmError, Result};
