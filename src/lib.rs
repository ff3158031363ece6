pub mod cli;
pub mod delay_manager;
pub mod error;
pub mod extractor;
pub mod input_loader;
pub mod logger;
pub mod scraper;
pub mod writer;

// Exporting types for convenience
pub use cli::Args;
pub use error::ScrapeError;
pub use extractor::{Extractor, ParcelRecord};
// self:: keeps this from clashing with the scraper crate itself
pub use self::scraper::HcadClient;
