//! HTTP request handlers.

pub mod health;
pub mod ping;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use ping::ping_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
