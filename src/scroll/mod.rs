pub mod driver;
pub mod normalizer;
