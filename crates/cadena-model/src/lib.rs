//! Chain model and terminal resolution for the cadena chain compiler.
//!
//! A chain description names a set of operator instances, their sink/source
//! terminals, chain-level inputs and outputs, directed connections, and
//! per-configuration operator messages. This crate turns the raw attributed
//! tree (deserialized from a description file) into a normalized [`Chain`]
//! with all optional attributes resolved to their defaults, and provides the
//! [`TerminalResolver`], the single point where symbolic terminal references
//! become numeric indices.
//!
//! # Example
//!
//! ```rust
//! use cadena_model::{Chain, Direction, spec::ChainSpec};
//!
//! let description = r#"
//! name = "Passthrough"
//! id = "5"
//!
//! [[operators]]
//! name = "op1"
//! id = "0x1000"
//! sinks = [{ name = "sink0", terminal = 0 }]
//! sources = [{ name = "source0", terminal = 0 }]
//!
//! [[inputs]]
//! sink = "op1.sink0"
//! role = "IN"
//! "#;
//!
//! let spec: ChainSpec = toml::from_str(description).unwrap();
//! let chain = Chain::from_spec(spec).unwrap();
//! assert_eq!(chain.name, "passthrough");
//!
//! let index = chain
//!     .resolver()
//!     .resolve("op1", "sink0", Direction::Sink)
//!     .unwrap();
//! assert_eq!(index, 0);
//! ```

mod error;
mod model;
mod resolver;

/// Raw attributed-tree types deserialized from chain description files.
pub mod spec;

pub use error::ModelError;
pub use model::{
    Chain, Configuration, Connection, Endpoint, EndpointMetadata, OpMsg, Operator, Terminal,
    TerminalRef,
};
pub use resolver::{Direction, TerminalResolver};
