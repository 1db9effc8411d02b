//! HTTP surface for the to-do list.

mod dto;
mod handlers;
mod render;
mod routes;

pub use dto::{CreateTodoForm, ErrorResponse};
pub use handlers::TodoAppState;
pub use render::{escape_html, HtmlItemRenderer};
pub use routes::todo_routes;
