//! Business records held by the store. Pure data, no store or actor concerns.

pub mod appointment;
pub mod product;
pub mod sale;

pub use appointment::*;
pub use product::*;
pub use sale::*;
