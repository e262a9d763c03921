pub mod list_view;
pub mod post_view;
