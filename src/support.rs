//! Supporting types shared by all models.

pub mod constraint;
pub mod dictionary;
pub mod field;
pub mod material;
pub mod phase;
pub mod selection;
pub mod units;
