pub mod authoring;
pub mod error;
pub mod math;
pub mod meshing;
pub mod query;
pub mod topology;

pub use error::{MuralisError, Result};

#[cfg(test)]
mod scenarios;
