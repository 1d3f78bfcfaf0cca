pub mod cover;
pub mod filename;
pub mod resolver;
