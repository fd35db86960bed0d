pub mod app;
pub mod config;
pub mod input;
pub mod keybinds;
pub mod logging;
pub mod router;
pub mod session;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::App;
pub use config::Config;
pub use router::Route;
