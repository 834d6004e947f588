//! Request/Response data transfer objects
//!
//! Wire shapes are camelCase. Requests are statically typed; malformed
//! bodies are rejected by the deserializer before a handler runs.

pub mod billing;
pub mod customers;
pub mod items;
