pub mod config;
pub mod document;
pub mod normalizer;
pub mod output;
mod parser;
pub mod scraper;
pub mod types;
pub mod utils;
pub mod walker;

pub use parser::{parse_harvest_page, parse_summary_page};
pub use scraper::{ScraperError, WebScraper};
