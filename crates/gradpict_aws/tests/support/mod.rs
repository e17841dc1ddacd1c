pub mod backends;
pub mod fixtures;
