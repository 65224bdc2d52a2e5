//! Command handlers, one module per resource.
//!
//! Each handler validates its arguments and then maps onto exactly one
//! registry or collection call.

pub mod collection;
pub mod record;
pub mod system;
