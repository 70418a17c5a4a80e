//! Raw attributed-tree types for chain descriptions.
//!
//! These mirror the description file one-to-one: every optional attribute is
//! an `Option`, and numeric-literal attributes (`id`, `ucid`, message ids)
//! are carried as strings so hex literals like `"0x1000"` reach the
//! generated output unchanged. Defaults are applied once, when the tree is
//! normalized into a [`Chain`](crate::Chain).
//!
//! # TOML format
//!
//! ```toml
//! name = "Aec_Ref"
//! id = "0x2001"
//! ucid = "2"
//! default_priority = "high"
//!
//! [[operators]]
//! name = "aec"
//! id = "0x0043"
//! processor = "p1"
//! set_sample_rate = false
//! sinks = [{ name = "in", terminal = 0 }]
//! sources = [{ name = "out", terminal = 0 }]
//!
//! [[inputs]]
//! sink = "aec.in"
//! role = "MIC"
//!
//! [[outputs]]
//! source = "aec.out"
//!
//! [[configurations]]
//! name = "Handsfree"
//! opmsgs = [{ op = "aec", id = "0x80C3", msg = "1, 0" }]
//! ```

use serde::Deserialize;

/// One chain description, exactly as read from the input file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainSpec {
    /// Chain name; lower-cased during normalization.
    pub name: String,
    /// Chain id literal, emitted verbatim.
    pub id: String,
    /// Use-case id literal; defaults to `"0"`.
    pub ucid: Option<String>,
    /// Scheduling priority applied to operators without an override;
    /// defaults to `"DEFAULT"`.
    pub default_priority: Option<String>,
    /// Whether the operator-role enumeration is emitted; defaults to true.
    pub generate_operator_roles_enum: Option<bool>,
    /// Whether the endpoint-role enumeration is emitted; defaults to true.
    pub generate_endpoint_roles_enum: Option<bool>,
    /// Operator instances, in declaration order.
    #[serde(default)]
    pub operators: Vec<OperatorSpec>,
    /// Chain inputs, each bound to an operator sink.
    #[serde(default)]
    pub inputs: Vec<InputSpec>,
    /// Chain outputs, each bound to an operator source.
    #[serde(default)]
    pub outputs: Vec<OutputSpec>,
    /// Directed source-to-sink connections.
    #[serde(default)]
    pub connections: Vec<ConnectionSpec>,
    /// Named operator-message groups.
    #[serde(default)]
    pub configurations: Vec<ConfigurationSpec>,
    /// Extra headers included by the generated source file.
    #[serde(default)]
    pub include_headers: Vec<String>,
}

/// A named operator instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorSpec {
    /// Instance name, unique within the chain.
    pub name: String,
    /// Operator id literal, emitted verbatim.
    pub id: String,
    /// Scheduling priority override.
    pub priority: Option<String>,
    /// Processor affinity; defaults to `"P0"`.
    pub processor: Option<String>,
    /// Set to `false` to exclude this operator from sample-rate
    /// configuration.
    pub set_sample_rate: Option<bool>,
    /// Sink terminals.
    #[serde(default)]
    pub sinks: Vec<TerminalSpec>,
    /// Source terminals.
    #[serde(default)]
    pub sources: Vec<TerminalSpec>,
}

/// A named, indexed terminal on an operator.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerminalSpec {
    /// Terminal name, unique per operator and direction.
    pub name: String,
    /// Numeric terminal index.
    pub terminal: u32,
}

/// A chain input bound to an operator sink.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSpec {
    /// `operator.terminal` reference to a sink.
    pub sink: String,
    /// Endpoint role; defaults to `<operator>_<terminal>`.
    pub role: Option<String>,
}

/// A chain output bound to an operator source.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSpec {
    /// `operator.terminal` reference to a source.
    pub source: String,
    /// Endpoint role; defaults to `<operator>_<terminal>`.
    pub role: Option<String>,
}

/// A directed edge between two operators' terminals.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionSpec {
    /// `operator.terminal` reference to the source end.
    pub source: String,
    /// `operator.terminal` reference to the sink end.
    pub sink: String,
}

/// A named group of operator messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigurationSpec {
    /// Configuration name; lower-cased during normalization.
    pub name: String,
    /// Messages in declaration order.
    #[serde(default)]
    pub opmsgs: Vec<OpMsgSpec>,
}

/// One operator message.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpMsgSpec {
    /// Target operator name.
    pub op: String,
    /// Message id literal.
    pub id: String,
    /// Optional comma-separated payload literals.
    pub msg: Option<String>,
}
