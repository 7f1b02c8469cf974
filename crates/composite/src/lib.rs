//! Declarative documents with pluggable wire formats
//!
//! A [`Schema`] describes a document type once: its scalar, list and
//! nested fields, and an optional set of attribute fields. A [`Document`]
//! is an instance of a schema. Wire formats implement [`Format`] together
//! with a [`ParseVisitor`] and a [`BuildVisitor`]; the [`DocumentBuilder`]
//! walks a schema against a format in either direction.
//!
//! The keyed mapping format lives in `composite-json`, the markup format in
//! `composite-xml`.

mod value;
pub use value::*;

mod error;
pub use error::*;

mod field;
pub use field::*;

mod schema;
pub use schema::*;

mod document;
pub use document::*;

mod visitor;
pub use visitor::*;

mod builder;
pub use builder::*;
