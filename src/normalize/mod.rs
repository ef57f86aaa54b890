pub mod error;
pub mod method;
pub mod normalizer;
pub mod params;
