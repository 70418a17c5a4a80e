//! Header and source emission for a normalized chain.

use cadena_model::{Chain, Connection, Direction, ModelError, Operator};

use crate::ctext::{self, Enumeration, StaticArray};

/// Renders the generated header and source artifacts from one normalized
/// [`Chain`].
///
/// Both render modes are pure: the same model produces the same bytes. Any
/// [`ModelError::Terminal`] raised while resolving endpoint or connection
/// references aborts the current artifact and surfaces to the caller;
/// sibling chains in a batch are unaffected.
pub struct ConfigurationEmitter<'a> {
    chain: &'a Chain,
}

impl<'a> ConfigurationEmitter<'a> {
    /// Create an emitter over a normalized chain.
    pub fn new(chain: &'a Chain) -> Self {
        Self { chain }
    }

    /// Render the header artifact: role enumerations and extern
    /// declarations.
    pub fn render_header(&self) -> Result<String, ModelError> {
        let chain = self.chain;
        let mut out = ctext::banner(&chain.filename("h"), &chain.name);
        out.push_str(&ctext::guard_open(&chain.name));
        out.push_str("#include <chain.h>\n\n");

        if chain.generate_operator_roles_enum {
            let operators = Enumeration {
                name: format!("{}_operators", chain.name),
                members: chain.operators.iter().map(|op| op.name.clone()).collect(),
            };
            out.push_str(&operators.render());
        }

        if chain.generate_endpoint_roles_enum {
            out.push_str(&self.endpoint_enum()?.render());
        }

        for configuration in &chain.configurations {
            out.push_str(&format!(
                "extern const chain_operator_message_t {}[{}];\n",
                chain.opmsgs_config_name(&configuration.name),
                configuration.opmsgs.len()
            ));
        }

        if !chain.exclude_from_configure_sample_rate.is_empty() {
            out.push_str(&format!(
                "extern const unsigned {}[{}];\n",
                chain.exclude_array_name(),
                chain.exclude_from_configure_sample_rate.len()
            ));
        }

        out.push_str(&format!(
            "extern const chain_config_t {};\n\n",
            chain.config_record_name()
        ));
        out.push_str(&ctext::guard_close(&chain.name));

        tracing::debug!(chain = %chain.name, bytes = out.len(), "header rendered");
        Ok(out)
    }

    /// Render the source artifact: static arrays and the aggregate
    /// chain-configuration record.
    pub fn render_source(&self) -> Result<String, ModelError> {
        let chain = self.chain;
        let mut out = ctext::banner(&chain.filename("c"), &chain.name);

        for header in self.source_includes() {
            out.push_str(&format!("#include <{header}>\n"));
        }
        out.push('\n');

        if !chain.operators.is_empty() {
            let operators = StaticArray {
                decl: "static const operator_config_t".to_string(),
                name: "operators".to_string(),
                elements: chain.operators.iter().map(operator_line).collect(),
            };
            out.push_str(&operators.render());
        }

        if !chain.inputs.is_empty() {
            out.push_str(&self.endpoint_array("inputs", Direction::Sink)?.render());
        }

        if !chain.outputs.is_empty() {
            out.push_str(&self.endpoint_array("outputs", Direction::Source)?.render());
        }

        if !chain.connections.is_empty() {
            let connections = StaticArray {
                decl: "static const operator_connection_t".to_string(),
                name: "connections".to_string(),
                elements: chain
                    .connections
                    .iter()
                    .map(|connection| self.connection_line(connection))
                    .collect::<Result<_, _>>()?,
            };
            out.push_str(&connections.render());
        }

        if !chain.exclude_from_configure_sample_rate.is_empty() {
            let exclusions = StaticArray {
                decl: "const unsigned".to_string(),
                name: chain.exclude_array_name(),
                elements: chain.exclude_from_configure_sample_rate.clone(),
            };
            out.push_str(&exclusions.render());
        }

        for configuration in &chain.configurations {
            let mut collection = Vec::with_capacity(configuration.opmsgs.len());
            for msg in &configuration.opmsgs {
                let array_name = msg.array_name(&configuration.name);
                let mut elements = vec![msg.id.clone()];
                elements.extend(msg.payload.iter().cloned());
                let message = StaticArray {
                    decl: "static const uint16".to_string(),
                    name: array_name.clone(),
                    elements,
                };
                out.push_str(&message.render());
                collection.push(format!(
                    "{{{}, {}, ARRAY_DIM({})}}",
                    msg.operator, array_name, array_name
                ));
            }
            let opmsgs = StaticArray {
                decl: "const chain_operator_message_t".to_string(),
                name: chain.opmsgs_config_name(&configuration.name),
                elements: collection,
            };
            out.push_str(&opmsgs.render());
        }

        out.push_str(&format!(
            "const chain_config_t {} = {{{}, {}, {}, {}, {}, {}}};\n",
            chain.config_record_name(),
            chain.id,
            chain.ucid,
            array_or_null("operators", chain.operators.len()),
            array_or_null("inputs", chain.inputs.len()),
            array_or_null("outputs", chain.outputs.len()),
            array_or_null("connections", chain.connections.len()),
        ));

        tracing::debug!(chain = %chain.name, bytes = out.len(), "source rendered");
        Ok(out)
    }

    /// Endpoint-role enumeration: every input then every output, sorted
    /// lexicographically by role string. The sort is a user-visible
    /// contract; declaration order does not matter here.
    fn endpoint_enum(&self) -> Result<Enumeration, ModelError> {
        let chain = self.chain;
        let mut roles = Vec::with_capacity(chain.inputs.len() + chain.outputs.len());
        for input in &chain.inputs {
            roles.push(chain.endpoint_metadata(input, Direction::Sink)?.role);
        }
        for output in &chain.outputs {
            roles.push(chain.endpoint_metadata(output, Direction::Source)?.role);
        }
        roles.sort();
        Ok(Enumeration {
            name: format!("{}_endpoints", chain.name),
            members: roles,
        })
    }

    fn source_includes(&self) -> Vec<String> {
        let mut headers = vec![
            self.chain.filename("h"),
            "cap_id_prim.h".to_string(),
            "opmsg_prim.h".to_string(),
            "hydra_macros.h".to_string(),
        ];
        headers.extend(self.chain.include_headers.iter().cloned());
        headers
    }

    fn endpoint_array(
        &self,
        name: &str,
        direction: Direction,
    ) -> Result<StaticArray, ModelError> {
        let endpoints = match direction {
            Direction::Sink => &self.chain.inputs,
            Direction::Source => &self.chain.outputs,
        };
        let elements = endpoints
            .iter()
            .map(|endpoint| {
                let metadata = self.chain.endpoint_metadata(endpoint, direction)?;
                Ok(format!(
                    "{{{}, {}, {}}}",
                    metadata.operator, metadata.role, metadata.terminal
                ))
            })
            .collect::<Result<_, ModelError>>()?;
        Ok(StaticArray {
            decl: "static const operator_endpoint_t".to_string(),
            name: name.to_string(),
            elements,
        })
    }

    /// `{src_op, src_index, sink_op, sink_index, 1}` — the trailing 1 is a
    /// structural multiplicity placeholder, fixed for every connection.
    fn connection_line(&self, connection: &Connection) -> Result<String, ModelError> {
        let resolver = self.chain.resolver();
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
        Ok(format!(
            "{{{}, {}, {}, {}, 1}}",
            connection.source.operator, source, connection.sink.operator, sink
        ))
    }
}

/// Operator-config macro selection. Priority and processor suffixes are
/// selected independently; the priority suffix always precedes the
/// processor suffix in the macro name. That ordering is fixed for
/// compatibility with existing consumers of the generated data.
fn operator_line(operator: &Operator) -> String {
    let priority = if operator.priority == "DEFAULT" {
        String::new()
    } else {
        format!("_PRIORITY_{}", operator.priority)
    };
    let processor = if operator.processor == "P0" {
        String::new()
    } else {
        format!("_{}", operator.processor)
    };
    format!(
        "MAKE_OPERATOR_CONFIG{priority}{processor}({}, {})",
        operator.id, operator.name
    )
}

fn array_or_null(name: &str, len: usize) -> String {
    if len == 0 {
        "NULL, 0".to_string()
    } else {
        format!("{name}, {len}")
    }
}
