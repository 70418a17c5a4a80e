//! Artifact emitters for the cadena chain compiler.
//!
//! Three artifacts render from one normalized [`Chain`](cadena_model::Chain):
//! a native header (role enumerations and extern declarations), a native
//! source file (static arrays and the aggregate chain-configuration record),
//! and a PlantUML topology diagram. Which one is produced is selected by
//! [`Artifact`], a closed set dispatched over the shared model.
//!
//! Every emitter is pure with respect to the model: rendering the same chain
//! twice yields byte-identical output, in any order.

mod config;
mod ctext;
mod diagram;

pub use config::ConfigurationEmitter;
pub use ctext::{Enumeration, StaticArray};
pub use diagram::DiagramEmitter;

use cadena_model::{Chain, ModelError};

/// The artifact kinds one chain compiles into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// Role enumerations and extern declarations (`.h`).
    Header,
    /// Static arrays and the aggregate configuration record (`.c`).
    Source,
    /// PlantUML topology diagram (`.uml`).
    Diagram,
}

impl Artifact {
    /// File extension conventionally used for this artifact.
    pub fn file_extension(self) -> &'static str {
        match self {
            Artifact::Header => "h",
            Artifact::Source => "c",
            Artifact::Diagram => "uml",
        }
    }

    /// Render this artifact from a normalized chain.
    ///
    /// # Errors
    ///
    /// Propagates [`ModelError::Terminal`] when an endpoint or connection
    /// reference does not resolve to exactly one terminal declaration.
    pub fn render(self, chain: &Chain) -> Result<String, ModelError> {
        match self {
            Artifact::Header => ConfigurationEmitter::new(chain).render_header(),
            Artifact::Source => ConfigurationEmitter::new(chain).render_source(),
            Artifact::Diagram => DiagramEmitter::new(chain).render(),
        }
    }
}
