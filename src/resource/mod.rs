//! Resource Module
//!
//! The declarative layer: descriptors that define operations, the builder
//! that turns a descriptor set into callable form, and the per-call
//! argument types.

mod builder;
mod call;
mod descriptor;
mod operation;
mod template;

pub use builder::{Resource, ResourceBuilder};
pub use call::{CallArgs, CallOptions};
pub use descriptor::{Method, OperationDescriptor};
pub use operation::Operation;
pub use template::resolve_template;
