// Library for tests to access modules

pub mod config;
pub mod error;
pub mod estimate;
pub mod models;
pub mod point_container;
pub mod report;
pub mod source;
pub mod version;
