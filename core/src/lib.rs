/// SOS Contacts - emergency contact core
///
/// A small persisted list of emergency contacts with the gesture state
/// machine and form handling that drive it. Rendering is left to the caller.

pub mod app;
pub mod cli_app;
pub mod config;
pub mod contact_store;
pub mod dialer;
pub mod dispatcher;
pub mod error;
pub mod form;
pub mod persistence;

pub use app::{FormTarget, Screen, SosApp};
pub use config::Config;
pub use contact_store::{Contact, ContactId, ContactStore};
pub use error::{Result, SosError};
