//! Core business logic abstractions

pub mod alert;
pub mod config;
pub mod error;
pub mod log;
pub mod news;
pub mod notify;
pub mod quote;

// Re-export main types for cleaner imports
pub use alert::{AlertOutcome, run_alert};
pub use error::AlertError;
pub use news::{Article, NewsProvider, NewsQuery};
pub use notify::{Notification, Notifier};
pub use quote::{Quote, QuoteProvider};
