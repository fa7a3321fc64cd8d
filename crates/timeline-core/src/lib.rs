//! timeline-core
//!
//! Generic cursor-pagination engine and per-family query builders for the
//! timeline query layer (spec §2: validator/parser, Timeline engine, and
//! family query builders — roughly 3,500–5,000 lines, deliberately
//! collaborator-free of HTTP or serialization concerns). A route handler
//! (`timeline-api`) and a document-store collaborator (any `impl Store`,
//! e.g. `timeline-store`) sit on either side of this crate without it
//! knowing about either.

pub mod cursor;
pub mod error;
pub mod family;
pub mod model;
pub mod parser;
pub mod predicate;
pub mod store;
pub mod timeline;
pub mod value;

pub use error::{ErrorClass, TimelineError};
pub use store::Store;
