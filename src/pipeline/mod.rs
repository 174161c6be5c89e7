//! Pipeline module - reshaping and the impute/encode/scale preprocessing steps

pub mod encode;
pub mod error;
pub mod impute;
pub mod loader;
pub mod preprocessor;
pub mod reshape;
pub mod roles;
pub mod scale;
pub mod stage;

pub use encode::*;
pub use error::*;
pub use impute::*;
pub use loader::*;
pub use preprocessor::*;
pub use reshape::*;
pub use roles::*;
pub use scale::*;
pub use stage::*;
