use clap::{Parser, Subcommand};
use prost::Message;
use prost_types::FileDescriptorSet;
use serde_json::json;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use unreal_proto_compiler::error::CompileError;
use unreal_proto_compiler::{generate_files, respond, write_files, GeneratorConfig};

const LOG_ENV: &str = "PROTOC_GEN_UNREAL_LOG";

#[derive(Parser)]
#[command(name = "protoc-gen-unreal", version)]
#[command(
    about = "Generate Unreal USTRUCTs, UENUMs and converters from protobuf schemas",
    long_about = "Without a subcommand this runs as a protoc plugin: a CodeGeneratorRequest \
                  on stdin, a CodeGeneratorResponse on stdout. Use it as \
                  `protoc --plugin=protoc-gen-unreal --unreal_out=<params>:<dir> file.proto`."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate from a descriptor set written by `protoc --descriptor_set_out --include_imports`
    Gen {
        /// Serialized `FileDescriptorSet`
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Proto file to generate, as named in the set (repeatable; defaults to all)
        #[arg(short, long = "file")]
        files: Vec<String>,

        /// Plugin parameter, e.g. `converter_class=GameConverter,api_macro=MYGAME_API`
        #[arg(short, long, default_value = "")]
        param: String,

        /// Print a JSON manifest of the written files to stdout
        #[arg(long)]
        manifest: bool,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        None => run_plugin(),
        Some(Commands::Gen {
            descriptor_set,
            out,
            files,
            param,
            manifest,
        }) => run_gen(descriptor_set, out, files, &param, manifest),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("protoc-gen-unreal: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries the plugin response.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_plugin() -> Result<(), CompileError> {
    let mut request = Vec::new();
    io::stdin().read_to_end(&mut request)?;

    let response = respond(&request)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&response)?;
    stdout.flush()?;
    Ok(())
}

fn run_gen(
    descriptor_set: PathBuf,
    out: PathBuf,
    files: Vec<String>,
    param: &str,
    manifest: bool,
) -> Result<(), CompileError> {
    let bytes = fs::read(&descriptor_set)?;
    let set = FileDescriptorSet::decode(bytes.as_slice())?;
    let config = GeneratorConfig::from_parameter(param)?;

    let to_generate = if files.is_empty() {
        set.file.iter().map(|f| f.name().to_string()).collect()
    } else {
        files
    };

    let generated = generate_files(&set.file, &to_generate, &config)?;
    write_files(&generated, &out)?;
    tracing::info!(
        files = generated.len(),
        out = %out.display(),
        "wrote generated sources"
    );

    if manifest {
        let entries: Vec<_> = generated
            .iter()
            .map(|file| json!({ "name": file.name, "bytes": file.content.len() }))
            .collect();
        let report = json!({
            "out_dir": out.display().to_string(),
            "config": config,
            "files": entries,
        });
        println!("{:#}", report);
    }

    Ok(())
}
