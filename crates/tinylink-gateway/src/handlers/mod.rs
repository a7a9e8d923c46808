mod health;
mod link;

pub use health::health_handler;
pub use link::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    qr_handler, redirect_handler, RESERVED_CODES,
};
