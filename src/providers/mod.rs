pub mod alphavantage;
pub mod console;
pub mod newsapi;
pub mod smtp;

pub use alphavantage::AlphaVantageProvider;
pub use console::ConsoleNotifier;
pub use newsapi::NewsApiProvider;
pub use smtp::SmtpNotifier;
