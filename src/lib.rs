//! Value inspector for a line-oriented debugger backend.
//!
//! Decodes backend value replies ([`value::ValueNode`]), builds their presentation and lazily
//! expands objects into ordered, classified children trees ([`children`]). Backend access goes
//! through [`backend::Transport`], declarations lookup through [`symbols::SymbolIndex`].

pub mod backend;
pub mod children;
pub mod config;
pub mod context;
pub mod error;
pub mod log;
pub mod symbols;
pub mod value;

pub use context::{ContextBuilder, InspectContext};
pub use error::Error;
