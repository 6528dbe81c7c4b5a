mod common;

use common::*;
use prost::Message as _;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::field_descriptor_proto::Type;
use unreal_proto_compiler::{generate, respond, write_files, CompileError, GeneratorConfig};

fn request(parameter: Option<&str>) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: vec!["shapes.proto".to_owned()],
        parameter: parameter.map(str::to_owned),
        proto_file: vec![proto3_file(
            "shapes.proto",
            vec![message("Point", vec![scalar("x", 1, Type::Float)])],
            vec![],
        )],
        ..Default::default()
    }
}

#[test]
fn test_response_carries_files() {
    let response = generate(&request(None));
    assert_eq!(response.error, None);
    assert_eq!(response.supported_features, Some(1));

    let names: Vec<_> = response.file.iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        vec!["ShapesEnums.h", "FPoint.h", "ShapesConverter.h", "ShapesConverter.cpp"]
    );
    assert!(response.file.iter().all(|f| f.insertion_point.is_none()));
}

#[test]
fn test_bad_parameter_is_reported_in_response() {
    let response = generate(&request(Some("colour=red")));
    assert!(response.file.is_empty());
    let error = response.error.expect("error expected");
    assert!(error.contains("colour"), "{}", error);
}

#[test]
fn test_missing_file_is_reported_in_response() {
    let mut req = request(None);
    req.file_to_generate.push("other.proto".to_owned());
    let response = generate(&req);
    assert!(response.file.is_empty());
    assert!(response.error.expect("error expected").contains("other.proto"));
}

#[test]
fn test_wire_round_trip() {
    let bytes = request(Some("converter_class=GameConverter")).encode_to_vec();
    let out = respond(&bytes).expect("respond failed");
    let response = CodeGeneratorResponse::decode(out.as_slice()).expect("decode failed");

    assert_eq!(response.error, None);
    let header = response
        .file
        .iter()
        .find(|f| f.name() == "ShapesConverter.h")
        .expect("converter header");
    assert!(header.content().contains("class GameConverter {"));
}

#[test]
fn test_truncated_request_fails_to_decode() {
    // Field 1, length 5, one byte of payload.
    let err = respond(&[0x0a, 0x05, b'a']).expect_err("truncated input should fail");
    assert!(matches!(err, CompileError::Decode(_)));
}

#[test]
fn test_write_files_creates_directories() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let files = generate_first(
        &[proto3_file(
            "shapes.proto",
            vec![message("Point", vec![scalar("x", 1, Type::Float)])],
            vec![],
        )],
        &GeneratorConfig::default(),
    );
    let out_dir = dir.path().join("Source").join("Generated");

    write_files(&files, &out_dir).expect("write_files failed");

    for file in &files {
        let written = std::fs::read_to_string(out_dir.join(&file.name)).expect("read failed");
        assert_eq!(written, file.content);
    }
}

#[test]
fn test_write_files_reports_io_errors() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").expect("write failed");

    let files = generate_first(
        &[proto3_file("a.proto", vec![message("A", vec![])], vec![])],
        &GeneratorConfig::default(),
    );
    let err = write_files(&files, &blocker).expect_err("writing below a file should fail");
    assert!(matches!(err, CompileError::Io(_)));
}
