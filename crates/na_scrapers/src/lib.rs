pub mod content;
pub mod web;

pub use content::text_from_blocks;
pub use web::{extract_paragraphs, WebScraper};

pub mod prelude {
    pub use super::web::WebScraper;
    pub use na_core::{Error, Result, Scraper};
}
