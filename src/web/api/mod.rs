pub mod catalog;
pub mod error;
pub mod params;
pub mod view;
