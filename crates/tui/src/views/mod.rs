//! Per-route screen state.

pub mod login;
pub mod setup;

pub use login::{LoginField, LoginForm};
pub use setup::{FieldRef, SetupGate, SetupView};
