use std::fs;
use std::path::Path;

use prost::Message as _;
use prost_types::compiler::code_generator_response::{Feature, File as ResponseFile};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::FileDescriptorProto;
use tracing::{debug, info};
use unreal_proto_schema::SchemaIndex;

use crate::config::GeneratorConfig;
use crate::error::CompileError;
use crate::planner::{FilePlanner, GeneratedFile};

/// Generates the outputs of every file named in `to_generate`.
///
/// `files` must hold those files and everything they import; references
/// into imports resolve against it. Each requested file gets its own,
/// independent set of outputs.
pub fn generate_files(
    files: &[FileDescriptorProto],
    to_generate: &[String],
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedFile>, CompileError> {
    let index = SchemaIndex::new(files);
    let mut out = Vec::new();

    for name in to_generate {
        let proto = files
            .iter()
            .find(|file| file.name() == name.as_str())
            .ok_or_else(|| CompileError::MissingFile(name.clone()))?;
        let planner = FilePlanner::new(index.file(proto), config);
        out.extend(planner.plan());
    }

    debug!(requested = to_generate.len(), generated = out.len(), "generation finished");
    Ok(out)
}

/// Runs a plugin request. Failures land in the response's `error` field,
/// which is how protoc expects a plugin to report them.
pub fn generate(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    match try_generate(request) {
        Ok(files) => CodeGeneratorResponse {
            file: files
                .into_iter()
                .map(|file| ResponseFile {
                    name: Some(file.name),
                    content: Some(file.content),
                    ..Default::default()
                })
                .collect(),
            supported_features: Some(Feature::Proto3Optional as u64),
            ..Default::default()
        },
        Err(e) => CodeGeneratorResponse {
            error: Some(e.to_string()),
            supported_features: Some(Feature::Proto3Optional as u64),
            ..Default::default()
        },
    }
}

fn try_generate(request: &CodeGeneratorRequest) -> Result<Vec<GeneratedFile>, CompileError> {
    let config = GeneratorConfig::from_parameter(request.parameter())?;
    info!(
        files = request.file_to_generate.len(),
        converter_class = config.converter_class.as_str(),
        "generating Unreal sources"
    );
    generate_files(&request.proto_file, &request.file_to_generate, &config)
}

/// Decodes a serialized `CodeGeneratorRequest` and runs it.
pub fn generate_from_bytes(bytes: &[u8]) -> Result<CodeGeneratorResponse, CompileError> {
    let request = CodeGeneratorRequest::decode(bytes)?;
    Ok(generate(&request))
}

/// Serialized form of `generate_from_bytes`, ready for stdout.
pub fn respond(bytes: &[u8]) -> Result<Vec<u8>, CompileError> {
    let response = generate_from_bytes(bytes)?;
    let mut out = Vec::with_capacity(response.encoded_len());
    response.encode(&mut out)?;
    Ok(out)
}

/// Writes `files` below `out_dir`, creating directories as needed.
/// The first failure aborts the whole batch.
pub fn write_files(files: &[GeneratedFile], out_dir: &Path) -> Result<(), CompileError> {
    for file in files {
        let path = out_dir.join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.content)?;
        debug!(path = %path.display(), bytes = file.content.len(), "wrote file");
    }
    Ok(())
}
