//! Tuple schemas.
//!
//! A [`TupleDescriptor`] gives a tuple its shape: an ordered list of
//! fields, each with a type and an optional name. Field types are fixed
//! width, so a descriptor also determines the exact byte size of every
//! tuple stored under it.
//!
//! Descriptors are immutable and shared behind an `Arc` (see
//! [`DescriptorRef`]); a table, its pages, and every tuple read from
//! them all point at the same descriptor.

mod descriptor;
mod error;

pub use descriptor::{DescriptorRef, FieldDef, FieldType, TupleDescriptor};
pub use error::{SchemaError, SchemaResult};
