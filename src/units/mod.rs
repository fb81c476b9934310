// Unit extraction engine: canonical codes, the pattern catalog and the
// cascading extraction strategies, plus the HTML document driver.
pub mod catalog;
pub mod code;
pub mod document;
pub mod extract;

pub use catalog::PatternCatalog;
pub use code::UnitCode;
pub use document::UnitDocumentParser;
pub use extract::UnitExtractor;
