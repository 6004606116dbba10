//! Command implementations and console presentation

pub mod check;
pub mod news;
pub mod quote;
pub mod setup;
pub mod ui;
