pub mod toml_date;
pub mod os_helper;
