pub mod controller;
pub mod page;

pub use controller::*;
pub use page::*;
