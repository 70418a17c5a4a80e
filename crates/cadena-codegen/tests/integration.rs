//! End-to-end emission tests for cadena-codegen.
//!
//! Fixtures are TOML chain descriptions normalized through cadena-model,
//! mirroring how the CLI drives the emitters.

use cadena_codegen::{Artifact, ConfigurationEmitter, DiagramEmitter};
use cadena_model::{Chain, ModelError, spec::ChainSpec};

fn chain(description: &str) -> Chain {
    let spec: ChainSpec = toml::from_str(description).expect("fixture should parse");
    Chain::from_spec(spec).expect("fixture should normalize")
}

fn passthrough() -> Chain {
    chain(
        r#"
        name = "Passthrough"
        id = "5"

        [[operators]]
        name = "op1"
        id = "0x1000"
        sinks = [{ name = "sink0", terminal = 0 }]
        sources = [{ name = "source0", terminal = 0 }]

        [[inputs]]
        sink = "op1.sink0"
        role = "IN"

        [[outputs]]
        source = "op1.source0"
        role = "OUT"
        "#,
    )
}

// ---------------------------------------------------------------------------
// Passthrough end-to-end
// ---------------------------------------------------------------------------

#[test]
fn passthrough_header_matches_expected() {
    let header = ConfigurationEmitter::new(&passthrough())
        .render_header()
        .unwrap();

    let expected = "\
/*!
\\file passthrough.h
\\brief The passthrough chain. This file is generated by cadena.
*/

#ifndef _PASSTHROUGH_H_
#define _PASSTHROUGH_H_

#include <chain.h>

typedef enum
{
    op1
} passthrough_operators;

typedef enum
{
    IN,
    OUT
} passthrough_endpoints;

extern const chain_config_t passthrough_config;

#endif /* _PASSTHROUGH_H_ */
";
    assert_eq!(header, expected);
}

#[test]
fn passthrough_source_matches_expected() {
    let source = ConfigurationEmitter::new(&passthrough())
        .render_source()
        .unwrap();

    let expected = "\
/*!
\\file passthrough.c
\\brief The passthrough chain. This file is generated by cadena.
*/

#include <passthrough.h>
#include <cap_id_prim.h>
#include <opmsg_prim.h>
#include <hydra_macros.h>

static const operator_config_t operators[] =
{
    MAKE_OPERATOR_CONFIG(0x1000, op1)
};

static const operator_endpoint_t inputs[] =
{
    {op1, IN, 0}
};

static const operator_endpoint_t outputs[] =
{
    {op1, OUT, 0}
};

const chain_config_t passthrough_config = {5, 0, operators, 1, inputs, 1, outputs, 1, NULL, 0};
";
    assert_eq!(source, expected);
}

#[test]
fn passthrough_diagram_matches_expected() {
    let diagram = DiagramEmitter::new(&passthrough()).render().unwrap();

    let expected = "\
/*!
\\page passthrough passthrough
\\startuml
object \"op1\" as op1
op1 : id = 0x1000
circle IN
IN --> op1 : sink 0
circle OUT
op1 --> OUT : source 0
\\enduml
*/
";
    assert_eq!(diagram, expected);
}

// ---------------------------------------------------------------------------
// Ordering contracts
// ---------------------------------------------------------------------------

#[test]
fn endpoint_enum_is_sorted_by_role_not_declaration_order() {
    let chain = chain(
        r#"
        name = "C"
        id = "1"

        [[operators]]
        name = "a"
        id = "0x01"
        sinks = [{ name = "sink_a", terminal = 0 }, { name = "sink_b", terminal = 1 }]

        [[inputs]]
        sink = "a.sink_b"
        role = "zz"

        [[inputs]]
        sink = "a.sink_a"
        role = "aa"
        "#,
    );
    let header = ConfigurationEmitter::new(&chain).render_header().unwrap();
    assert!(
        header.contains("    aa,\n    zz\n} c_endpoints;"),
        "roles must be lexicographically sorted, got:\n{header}"
    );
}

#[test]
fn operator_enum_keeps_declaration_order() {
    let chain = chain(
        r#"
        name = "C"
        id = "1"

        [[operators]]
        name = "zulu"
        id = "0x01"

        [[operators]]
        name = "alpha"
        id = "0x02"
        "#,
    );
    let header = ConfigurationEmitter::new(&chain).render_header().unwrap();
    assert!(
        header.contains("    zulu,\n    alpha\n} c_operators;"),
        "operator enum follows declaration order, got:\n{header}"
    );
}

// ---------------------------------------------------------------------------
// Source-mode content
// ---------------------------------------------------------------------------

#[test]
fn empty_lists_emit_null_zero_in_aggregate_record() {
    let chain = chain(
        r#"
        name = "Empty"
        id = "1"
        "#,
    );
    let source = ConfigurationEmitter::new(&chain).render_source().unwrap();
    assert!(source.contains(
        "const chain_config_t empty_config = {1, 0, NULL, 0, NULL, 0, NULL, 0, NULL, 0};"
    ));
    assert!(!source.contains("operators[]"));
}

#[test]
fn connection_emits_quintuple_with_fixed_multiplicity() {
    let chain = chain(
        r#"
        name = "C"
        id = "1"

        [[operators]]
        name = "src_op"
        id = "0x01"
        sources = [{ name = "out", terminal = 2 }]

        [[operators]]
        name = "dst_op"
        id = "0x02"
        sinks = [{ name = "in", terminal = 0 }]

        [[connections]]
        source = "src_op.out"
        sink = "dst_op.in"
        "#,
    );
    let source = ConfigurationEmitter::new(&chain).render_source().unwrap();
    assert!(source.contains("static const operator_connection_t connections[] ="));
    assert!(source.contains("    {src_op, 2, dst_op, 0, 1}\n"));
    assert!(source.contains("connections, 1};"));
}

#[test]
fn opmsg_arrays_use_lowercased_symbols_and_verbatim_payload() {
    let chain = chain(
        r#"
        name = "Aec_Ref"
        id = "0x2001"
        ucid = "2"

        [[configurations]]
        name = "Handsfree"
        opmsgs = [{ op = "aec", id = "0x80C3", msg = "1, 0" }]
        "#,
    );
    let source = ConfigurationEmitter::new(&chain).render_source().unwrap();
    assert!(source.contains(
        "static const uint16 0x80c3_aec_handsfree[] =\n{\n    0x80C3,\n    1,\n    0\n};"
    ));
    assert!(source.contains(
        "const chain_operator_message_t aec_ref_opmsgs_config_handsfree[] =\n{\n    {aec, 0x80c3_aec_handsfree, ARRAY_DIM(0x80c3_aec_handsfree)}\n};"
    ));
    assert!(source.contains("const chain_config_t aec_ref_config = {0x2001, 2,"));

    let header = ConfigurationEmitter::new(&chain).render_header().unwrap();
    assert!(header.contains(
        "extern const chain_operator_message_t aec_ref_opmsgs_config_handsfree[1];"
    ));
}

#[test]
fn rate_exclusions_emit_array_and_extern() {
    let chain = chain(
        r#"
        name = "C"
        id = "1"

        [[operators]]
        name = "resampler"
        id = "0x01"
        set_sample_rate = false
        "#,
    );
    let source = ConfigurationEmitter::new(&chain).render_source().unwrap();
    assert!(source.contains(
        "const unsigned c_exclude_from_configure_sample_rate[] =\n{\n    resampler\n};"
    ));
    let header = ConfigurationEmitter::new(&chain).render_header().unwrap();
    assert!(header.contains("extern const unsigned c_exclude_from_configure_sample_rate[1];"));
}

#[test]
fn extra_includes_follow_platform_headers() {
    let chain = chain(
        r#"
        name = "C"
        id = "1"
        include_headers = ["extra_ops.h"]
        "#,
    );
    let source = ConfigurationEmitter::new(&chain).render_source().unwrap();
    assert!(source.contains("#include <hydra_macros.h>\n#include <extra_ops.h>\n"));
}

#[test]
fn enum_flags_suppress_enumerations() {
    let chain = chain(
        r#"
        name = "C"
        id = "1"
        generate_operator_roles_enum = false
        generate_endpoint_roles_enum = false

        [[operators]]
        name = "op1"
        id = "0x01"
        "#,
    );
    let header = ConfigurationEmitter::new(&chain).render_header().unwrap();
    assert!(!header.contains("typedef enum"));
    assert!(header.contains("extern const chain_config_t c_config;"));
}

// ---------------------------------------------------------------------------
// Failure propagation
// ---------------------------------------------------------------------------

#[test]
fn missing_terminal_fails_with_zero_matches() {
    let chain = chain(
        r#"
        name = "C"
        id = "1"

        [[operators]]
        name = "op1"
        id = "0x01"

        [[inputs]]
        sink = "op1.missing"
        "#,
    );
    for artifact in [Artifact::Header, Artifact::Source, Artifact::Diagram] {
        let err = artifact.render(&chain).unwrap_err();
        assert!(
            matches!(err, ModelError::Terminal { count: 0, .. }),
            "{artifact:?} should report zero matches, got {err}"
        );
    }
}

#[test]
fn duplicated_terminal_fails_with_match_count() {
    let chain = chain(
        r#"
        name = "C"
        id = "1"

        [[operators]]
        name = "op1"
        id = "0x01"
        sinks = [{ name = "in", terminal = 0 }, { name = "in", terminal = 1 }]

        [[inputs]]
        sink = "op1.in"
        "#,
    );
    let err = ConfigurationEmitter::new(&chain).render_source().unwrap_err();
    assert!(matches!(err, ModelError::Terminal { count: 2, .. }));
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn rendering_is_pure_and_deterministic() {
    let chain = passthrough();
    for artifact in [Artifact::Header, Artifact::Source, Artifact::Diagram] {
        let first = artifact.render(&chain).unwrap();
        let second = artifact.render(&chain).unwrap();
        assert_eq!(first, second, "{artifact:?} must render identical bytes");
    }

    // Interleaving artifact kinds does not disturb either output.
    let header_first = Artifact::Header.render(&chain).unwrap();
    let _ = Artifact::Source.render(&chain).unwrap();
    let header_again = Artifact::Header.render(&chain).unwrap();
    assert_eq!(header_first, header_again);
}

#[test]
fn artifact_file_extensions() {
    assert_eq!(Artifact::Header.file_extension(), "h");
    assert_eq!(Artifact::Source.file_extension(), "c");
    assert_eq!(Artifact::Diagram.file_extension(), "uml");
}
