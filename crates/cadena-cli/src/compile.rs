//! Per-input compilation pipeline: load, normalize, emit, route output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use cadena_codegen::Artifact;
use cadena_model::{Chain, spec::ChainSpec};

/// Compile one chain description into the selected artifacts.
///
/// With `to_file` unset, artifacts print to stdout in selection order.
/// Otherwise each artifact is written as `<chain_name>.<ext>` into the
/// resolved output folder.
pub fn compile_file(
    input: &Path,
    artifacts: &[Artifact],
    to_file: bool,
    output_folder: Option<&Path>,
) -> anyhow::Result<()> {
    let spec = load_spec(input)?;
    let chain = Chain::from_spec(spec)
        .with_context(|| format!("invalid chain description '{}'", input.display()))?;
    tracing::debug!(
        chain = %chain.name,
        operators = chain.operators.len(),
        "chain model built"
    );

    for &artifact in artifacts {
        let text = artifact
            .render(&chain)
            .with_context(|| format!("failed to render {artifact:?} for '{}'", chain.name))?;
        if to_file {
            let path = output_path(input, output_folder, &chain.filename(artifact.file_extension()))?;
            fs::write(&path, &text)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            tracing::info!(path = %path.display(), "generated");
        } else {
            print!("{text}");
        }
    }
    Ok(())
}

fn load_spec(path: &Path) -> anyhow::Result<ChainSpec> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => {
            toml::from_str(&content).with_context(|| format!("failed to parse '{}'", path.display()))
        }
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse '{}'", path.display())),
        _ => bail!(
            "unsupported chain description '{}' (expected .toml or .json)",
            path.display()
        ),
    }
}

/// Resolve the destination for one generated file. A relative output folder
/// is taken against the input file's directory, and the folder is created
/// if missing.
fn output_path(
    input: &Path,
    output_folder: Option<&Path>,
    filename: &str,
) -> anyhow::Result<PathBuf> {
    let parent = match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let folder = match output_folder {
        None => parent,
        Some(folder) if folder.is_absolute() => folder.to_path_buf(),
        Some(folder) => parent.join(folder),
    };
    fs::create_dir_all(&folder)
        .with_context(|| format!("failed to create output folder '{}'", folder.display()))?;
    Ok(folder.join(filename))
}
