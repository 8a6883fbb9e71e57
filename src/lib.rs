pub mod core;
pub mod features;
pub mod shared;
