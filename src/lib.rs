pub mod config;
pub mod logger;
pub mod server;
pub mod slug;
pub mod page_range;
pub mod paginator;
pub mod post;
pub mod content_api;
pub mod remote_api;
pub mod navigation;
pub mod slug_index;
pub mod resolver;
pub mod catalog;
pub mod environment;
mod text_utils;
mod query_string;
mod view;
mod test_data;
