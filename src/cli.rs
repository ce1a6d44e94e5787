//! Minimal CLI: descriptor → (schema | entity)
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, Args};
use rayon::prelude::*;
use serde_json::Value;
use tracing::info;

use shape_schema::{Options, TypeDescriptor};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile resolved type descriptors (JSON) into JSON Schema documents
#[derive(Parser, Debug)]
#[command(name = "shape-schema", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// compile and print the JSON schema
    Schema(SchemaOut),
    /// print the intermediate entity (flattened property values) for debugging
    Entity(EntityOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select the descriptor inside each document (e.g. /types/User)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every output is one descriptor
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// single-line JSON instead of pretty-printed
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output: OutputSettings,

    #[command(flatten)]
    options: Options,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct EntityOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output: OutputSettings,

    #[command(flatten)]
    options: Options,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

/// One descriptor and where it came from.
#[derive(Debug)]
struct Document {
    source: String,
    descriptor: TypeDescriptor,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Vec<Document>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let mut documents = Vec::new();
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file ({source_path_str})"))?;
            let json_value = serde_json::from_str::<Value>(&source)
                .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
            let json_value = match self.json_pointer.as_ref() {
                None => json_value,
                Some(pointer) => json_value
                    .pointer(pointer)
                    .cloned()
                    .with_context(|| format!("JSON pointer {pointer} matched nothing in ({source_path_str})"))?,
            };
            let json_values = match self.jq_expr.as_ref() {
                None => vec![json_value],
                Some(jq_expr) => crate::jq_exec::run_jaq(jq_expr, &json_value).with_context(|| {
                    format!("failed to apply jq expression to source file ({source_path_str})")
                })?,
            };
            let many = json_values.len() > 1;
            for (index, json_value) in json_values.into_iter().enumerate() {
                let source = if many { format!("{source_path_str}#{index}") } else { source_path_str.clone() };
                let descriptor = shape_schema::path_de::descriptor_from_value(json_value)
                    .with_context(|| format!("invalid type descriptor ({source})"))?;
                info!(%source, "loaded descriptor");
                documents.push(Document { source, descriptor });
            }
        }
        Ok(documents)
    }
}

impl OutputSettings {
    /// One result prints as-is; several print as an array in input order.
    fn emit(&self, mut results: Vec<Value>) -> Result<()> {
        if results.is_empty() {
            bail!("no descriptors were read from the inputs");
        }
        let value = if results.len() == 1 { results.remove(0) } else { Value::Array(results) };
        let text = if self.compact {
            serde_json::to_string(&value)?
        } else {
            serde_json::to_string_pretty(&value)?
        };
        match self.out.as_ref() {
            Some(out) => write_output(out, &text),
            None => {
                println!("{text}");
                Ok(())
            }
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let documents = target.input_settings.load()?;
                let schemas = documents
                    .par_iter()
                    .map(|doc| {
                        shape_schema::compile(&doc.descriptor, &target.options)
                            .map(|schema| schema.to_json())
                            .with_context(|| format!("failed to compile ({})", doc.source))
                    })
                    .collect::<Result<Vec<_>>>()?;
                target.output.emit(schemas)
            }
            Command::Entity(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let documents = target.input_settings.load()?;
                let entities = documents
                    .par_iter()
                    .map(|doc| -> Result<Value> {
                        let entity = shape_schema::compile_entity(&doc.descriptor, &target.options)
                            .with_context(|| format!("failed to build entity ({})", doc.source))?;
                        Ok(serde_json::to_value(&entity)?)
                    })
                    .collect::<Result<Vec<_>>>()?;
                target.output.emit(entities)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: &Path, text: &str) -> Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    std::fs::write(out, text).with_context(|| format!("failed to write {}", out.display()))?;
    info!(path = %out.display(), "wrote output");
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
