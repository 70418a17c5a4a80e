//! Topology-diagram emission.

use cadena_model::{Chain, Direction, ModelError};

/// Renders a PlantUML topology diagram for one normalized chain, wrapped in
/// a doxygen `\page` comment block so it can sit next to the generated
/// sources.
///
/// Elements follow declaration order: operators, then connections, then
/// inputs, then outputs. Terminal references resolve through the same
/// resolver as configuration emission and fail the same way.
pub struct DiagramEmitter<'a> {
    chain: &'a Chain,
}

impl<'a> DiagramEmitter<'a> {
    /// Create an emitter over a normalized chain.
    pub fn new(chain: &'a Chain) -> Self {
        Self { chain }
    }

    /// Render the diagram artifact.
    pub fn render(&self) -> Result<String, ModelError> {
        let chain = self.chain;
        let mut out = String::from("/*!\n");
        out.push_str(&format!("\\page {} {}\n", chain.name, chain.name));
        out.push_str("\\startuml\n");

        for operator in &chain.operators {
            out.push_str(&format!("object \"{}\" as {}\n", operator.name, operator.name));
            out.push_str(&format!("{} : id = {}\n", operator.name, operator.id));
        }

        let resolver = chain.resolver();
        for connection in &chain.connections {
            let source = resolver.resolve(
                &connection.source.operator,
                &connection.source.terminal,
                Direction::Source,
            )?;
            let sink = resolver.resolve(
                &connection.sink.operator,
                &connection.sink.terminal,
                Direction::Sink,
            )?;
            out.push_str(&format!(
                "{} --> {} : source {} -> sink {}\n",
                connection.source.operator, connection.sink.operator, source, sink
            ));
        }

        for input in &chain.inputs {
            let metadata = chain.endpoint_metadata(input, Direction::Sink)?;
            out.push_str(&format!("circle {}\n", metadata.role));
            out.push_str(&format!(
                "{} --> {} : sink {}\n",
                metadata.role, metadata.operator, metadata.terminal
            ));
        }

        for output in &chain.outputs {
            let metadata = chain.endpoint_metadata(output, Direction::Source)?;
            out.push_str(&format!("circle {}\n", metadata.role));
            out.push_str(&format!(
                "{} --> {} : source {}\n",
                metadata.operator, metadata.role, metadata.terminal
            ));
        }

        out.push_str("\\enduml\n*/\n");
        tracing::debug!(chain = %chain.name, bytes = out.len(), "diagram rendered");
        Ok(out)
    }
}
