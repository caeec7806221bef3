//! Match engines, one per match rule.

pub mod blank;
pub mod camel;
pub mod exact;
pub mod factory;
pub mod glob;
mod util;
