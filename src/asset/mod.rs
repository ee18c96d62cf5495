//! Asset data model - out points, inputs, outputs, orders

mod timelock;
mod out_point;
mod input;
mod output;
mod order;
mod asset;
pub mod derivation;

pub use timelock::*;
pub use out_point::*;
pub use input::*;
pub use output::*;
pub use order::*;
pub use asset::*;
pub use derivation::{asset_address, asset_scheme_address};
