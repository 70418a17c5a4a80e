//! Normalized chain entities.
//!
//! [`Chain::from_spec`] applies every documented default exactly once, so
//! downstream emitters never re-query optional attributes: chain and
//! configuration names are lower-cased, priorities and processors are
//! upper-cased with the chain default already folded in, endpoint roles are
//! materialized, and the rate-configuration exclusion list is derived from
//! the operator flags. All entities are immutable after normalization.

use crate::error::ModelError;
use crate::resolver::{Direction, TerminalResolver};
use crate::spec::{
    ChainSpec, ConfigurationSpec, ConnectionSpec, InputSpec, OpMsgSpec, OperatorSpec, OutputSpec,
};

/// A parsed `operator.terminal` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalRef {
    /// Referenced operator name.
    pub operator: String,
    /// Referenced terminal name.
    pub terminal: String,
}

impl TerminalRef {
    /// Split an `operator.terminal` reference into its two components.
    ///
    /// Anything other than exactly two non-empty dot-separated components is
    /// a [`ModelError::MalformedRef`] (defect-class, not a user error).
    pub fn parse(text: &str) -> Result<Self, ModelError> {
        let mut parts = text.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(operator), Some(terminal), None)
                if !operator.is_empty() && !terminal.is_empty() =>
            {
                Ok(Self {
                    operator: operator.to_string(),
                    terminal: terminal.to_string(),
                })
            }
            _ => Err(ModelError::MalformedRef {
                text: text.to_string(),
            }),
        }
    }
}

/// A named, indexed sink or source port on an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    /// Terminal name.
    pub name: String,
    /// Numeric terminal index.
    pub index: u32,
}

/// A normalized operator instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    /// Instance name.
    pub name: String,
    /// Operator id literal, emitted verbatim.
    pub id: String,
    /// Resolved scheduling priority, upper-cased; the chain default is
    /// already applied.
    pub priority: String,
    /// Processor affinity, upper-cased; `"P0"` when unspecified.
    pub processor: String,
    /// Sink terminals in declaration order.
    pub sinks: Vec<Terminal>,
    /// Source terminals in declaration order.
    pub sources: Vec<Terminal>,
}

/// A chain-level input or output bound to one operator terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// The terminal this endpoint binds.
    pub reference: TerminalRef,
    /// Endpoint role; defaulted to `<operator>_<terminal>` when the
    /// description gave none.
    pub role: String,
}

/// Endpoint data with the terminal reference resolved to its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointMetadata {
    /// Operator the endpoint binds.
    pub operator: String,
    /// Endpoint role.
    pub role: String,
    /// Resolved numeric terminal index.
    pub terminal: u32,
}

/// A directed edge from one operator's source to another's sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Source end of the edge.
    pub source: TerminalRef,
    /// Sink end of the edge.
    pub sink: TerminalRef,
}

/// One operator message within a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpMsg {
    /// Target operator name.
    pub operator: String,
    /// Message id literal.
    pub id: String,
    /// Payload literals, already split on commas.
    pub payload: Vec<String>,
}

impl OpMsg {
    /// The generated static-array symbol for this message:
    /// `<msgid>_<operator>_<configuration>`, all lower-cased.
    pub fn array_name(&self, configuration: &str) -> String {
        format!(
            "{}_{}_{}",
            self.id.to_lowercase(),
            self.operator.to_lowercase(),
            configuration
        )
    }
}

/// A named group of operator messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Configuration name, lower-cased.
    pub name: String,
    /// Messages in declaration order.
    pub opmsgs: Vec<OpMsg>,
}

/// One normalized chain description: the compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    /// Chain name, lower-cased; prefixes every chain-scoped symbol.
    pub name: String,
    /// Chain id literal, emitted verbatim.
    pub id: String,
    /// Use-case id literal; `"0"` when unspecified.
    pub ucid: String,
    /// Default scheduling priority, upper-cased.
    pub default_priority: String,
    /// Whether the operator-role enumeration is emitted.
    pub generate_operator_roles_enum: bool,
    /// Whether the endpoint-role enumeration is emitted.
    pub generate_endpoint_roles_enum: bool,
    /// Operators in declaration order.
    pub operators: Vec<Operator>,
    /// Chain inputs in declaration order.
    pub inputs: Vec<Endpoint>,
    /// Chain outputs in declaration order.
    pub outputs: Vec<Endpoint>,
    /// Connections in declaration order.
    pub connections: Vec<Connection>,
    /// Configurations in declaration order.
    pub configurations: Vec<Configuration>,
    /// Extra headers included by the generated source file.
    pub include_headers: Vec<String>,
    /// Names of operators excluded from sample-rate configuration, in
    /// declaration order.
    pub exclude_from_configure_sample_rate: Vec<String>,
}

impl Chain {
    /// Normalize a raw chain description.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MalformedRef`] when an endpoint or connection
    /// reference does not split into `operator.terminal`. Terminal indices
    /// are not resolved here; that happens during emission, through
    /// [`TerminalResolver`].
    pub fn from_spec(spec: ChainSpec) -> Result<Self, ModelError> {
        let default_priority = spec
            .default_priority
            .map_or_else(|| "DEFAULT".to_string(), |p| p.to_uppercase());

        let exclude_from_configure_sample_rate: Vec<String> = spec
            .operators
            .iter()
            .filter(|op| op.set_sample_rate == Some(false))
            .map(|op| op.name.clone())
            .collect();

        let operators: Vec<Operator> = spec
            .operators
            .into_iter()
            .map(|op| Operator::from_spec(op, &default_priority))
            .collect();

        let chain = Self {
            name: spec.name.to_lowercase(),
            id: spec.id,
            ucid: spec.ucid.unwrap_or_else(|| "0".to_string()),
            default_priority,
            generate_operator_roles_enum: spec.generate_operator_roles_enum.unwrap_or(true),
            generate_endpoint_roles_enum: spec.generate_endpoint_roles_enum.unwrap_or(true),
            operators,
            inputs: spec
                .inputs
                .into_iter()
                .map(Endpoint::from_input)
                .collect::<Result<_, _>>()?,
            outputs: spec
                .outputs
                .into_iter()
                .map(Endpoint::from_output)
                .collect::<Result<_, _>>()?,
            connections: spec
                .connections
                .into_iter()
                .map(Connection::from_spec)
                .collect::<Result<_, _>>()?,
            configurations: spec
                .configurations
                .into_iter()
                .map(Configuration::from_spec)
                .collect(),
            include_headers: spec.include_headers,
            exclude_from_configure_sample_rate,
        };

        tracing::debug!(
            chain = %chain.name,
            operators = chain.operators.len(),
            connections = chain.connections.len(),
            "chain model normalized"
        );
        Ok(chain)
    }

    /// A resolver over this chain's operator declarations.
    pub fn resolver(&self) -> TerminalResolver<'_> {
        TerminalResolver::new(&self.operators)
    }

    /// Resolve an endpoint's terminal reference, pairing the role with the
    /// numeric index.
    pub fn endpoint_metadata(
        &self,
        endpoint: &Endpoint,
        direction: Direction,
    ) -> Result<EndpointMetadata, ModelError> {
        let terminal = self.resolver().resolve(
            &endpoint.reference.operator,
            &endpoint.reference.terminal,
            direction,
        )?;
        Ok(EndpointMetadata {
            operator: endpoint.reference.operator.clone(),
            role: endpoint.role.clone(),
            terminal,
        })
    }

    /// The artifact filename for this chain, e.g. `passthrough.h`.
    pub fn filename(&self, extension: &str) -> String {
        format!("{}.{}", self.name, extension)
    }

    /// The opmsgs-collection symbol for a configuration:
    /// `<chain>_opmsgs_config_<configuration>`.
    pub fn opmsgs_config_name(&self, configuration: &str) -> String {
        format!("{}_opmsgs_config_{}", self.name, configuration)
    }

    /// The rate-configuration exclusion array symbol.
    pub fn exclude_array_name(&self) -> String {
        format!("{}_exclude_from_configure_sample_rate", self.name)
    }

    /// The aggregate chain-configuration record symbol.
    pub fn config_record_name(&self) -> String {
        format!("{}_config", self.name)
    }
}

impl Operator {
    fn from_spec(spec: OperatorSpec, default_priority: &str) -> Self {
        Self {
            name: spec.name,
            id: spec.id,
            priority: spec
                .priority
                .map_or_else(|| default_priority.to_string(), |p| p.to_uppercase()),
            processor: spec
                .processor
                .map_or_else(|| "P0".to_string(), |p| p.to_uppercase()),
            sinks: spec.sinks.into_iter().map(Terminal::from_spec).collect(),
            sources: spec.sources.into_iter().map(Terminal::from_spec).collect(),
        }
    }
}

impl Terminal {
    fn from_spec(spec: crate::spec::TerminalSpec) -> Self {
        Self {
            name: spec.name,
            index: spec.terminal,
        }
    }
}

impl Endpoint {
    fn from_input(spec: InputSpec) -> Result<Self, ModelError> {
        Self::new(&spec.sink, spec.role)
    }

    fn from_output(spec: OutputSpec) -> Result<Self, ModelError> {
        Self::new(&spec.source, spec.role)
    }

    fn new(reference: &str, role: Option<String>) -> Result<Self, ModelError> {
        let reference = TerminalRef::parse(reference)?;
        let role =
            role.unwrap_or_else(|| format!("{}_{}", reference.operator, reference.terminal));
        Ok(Self { reference, role })
    }
}

impl Connection {
    fn from_spec(spec: ConnectionSpec) -> Result<Self, ModelError> {
        Ok(Self {
            source: TerminalRef::parse(&spec.source)?,
            sink: TerminalRef::parse(&spec.sink)?,
        })
    }
}

impl Configuration {
    fn from_spec(spec: ConfigurationSpec) -> Self {
        Self {
            name: spec.name.to_lowercase(),
            opmsgs: spec.opmsgs.into_iter().map(OpMsg::from_spec).collect(),
        }
    }
}

impl OpMsg {
    fn from_spec(spec: OpMsgSpec) -> Self {
        Self {
            operator: spec.op,
            id: spec.id,
            payload: spec
                .msg
                .map(|m| m.split(',').map(|part| part.trim().to_string()).collect())
                .unwrap_or_default(),
        }
    }
}
