pub mod alert_settings;
pub mod banners;
pub mod digest_settings;
