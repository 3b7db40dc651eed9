mod hub;
mod observer;

pub use hub::*;
pub use observer::*;
