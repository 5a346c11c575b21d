pub mod config;
pub mod server;
pub mod logger;
pub mod util;
pub mod api;
pub mod auth;
pub mod publish;
pub mod blog_store;
pub mod blog_query;
pub mod content;
pub mod view;
pub mod page_processor;
mod post_list;
mod test_data;
mod text_utils;
mod query_string;
mod paginator;
