pub mod api_key;
pub mod detection_log;
