//! Entity shapes served by the API and the relational table that stores them.

pub mod errors;
pub mod db;
pub mod shape;
pub mod plan;
pub mod blog_post;
pub mod contact_message;
pub mod document;

pub use blog_post::BlogPost;
pub use contact_message::ContactMessage;
pub use plan::Plan;
pub use shape::{Document, DocumentShape};
