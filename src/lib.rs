pub mod aggregate;
pub mod analytics_export;
pub mod crosstab;
pub mod field_zones;
pub mod filters;
pub mod format;
pub mod loader;
pub mod rankings;
pub mod records;
pub mod sample_feed;
