//! Runs the pipeline against real processes, with a shell script standing
//! in for the compiler

#![cfg(unix)]
#![allow(non_snake_case)]

use grpcweb_loader_core::{GenerationMode, GenerationRequest, LoaderError, LoaderOptions};
use grpcweb_loader_pipeline::{CollectingSink, Pipeline, PipelineConfig};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// Writes <out>/<stem>_pb.js or <out>/<stem>_pb_service.js for the last argument
const FAKE_PROTOC: &str = r#"#!/bin/sh
out=""
mode=""
for arg in "$@"; do
  case "$arg" in
    --js_out=import_style=commonjs,binary:*) out="${arg#--js_out=import_style=commonjs,binary:}"; mode=message ;;
    --js_service_out=*) out="${arg#--js_service_out=}"; mode=service ;;
  esac
  src="$arg"
done
stem=$(basename "$src" .proto)
if [ "$stem" = "broken" ]; then
  echo "broken.proto:1:1: Expected top-level statement." >&2
  exit 1
fi
if [ "$mode" = "message" ]; then
  printf 'exports.HelloRequest = {};\n' > "$out/${stem}_pb.js"
else
  printf 'var m = require("./%s_pb");\nexports.Greeter = {};\n' "$stem" > "$out/${stem}_pb_service.js"
  echo "warning: unused import" >&2
fi
"#;

fn write_executable(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

struct Fixture {
    _dir: tempfile::TempDir,
    schemas: PathBuf,
    temp_root: PathBuf,
    config: PipelineConfig,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("bin");
    let schemas = dir.path().join("schemas");
    let temp_root = dir.path().join("scratch");
    std::fs::create_dir_all(&bin).unwrap();
    std::fs::create_dir_all(&schemas).unwrap();
    std::fs::write(schemas.join("greeter.proto"), "syntax = \"proto3\";\n").unwrap();

    let compiler = write_executable(&bin, "protoc", FAKE_PROTOC);
    let plugin = write_executable(&bin, "protoc-gen-js_service", "#!/bin/sh\nexit 0\n");
    let config = PipelineConfig::new()
        .with_compiler(compiler)
        .with_plugin(plugin)
        .with_temp_root(&temp_root);

    Fixture {
        _dir: dir,
        schemas,
        temp_root,
        config,
    }
}

fn request(fixture: &Fixture, file: &str, mode: GenerationMode) -> GenerationRequest {
    GenerationRequest::new(
        fixture.schemas.join(file),
        LoaderOptions::new(&fixture.schemas).with_mode(mode),
    )
    .unwrap()
}

fn scratch_entries(fixture: &Fixture) -> usize {
    std::fs::read_dir(&fixture.temp_root)
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[tokio::test]
async fn SystemIo___message_run___returns_codec_and_removes_workspace() {
    let fixture = fixture();
    let pipeline = Pipeline::new(fixture.config.clone());

    let artifact = pipeline
        .run(&request(&fixture, "greeter.proto", GenerationMode::Message))
        .await
        .unwrap();

    assert_eq!(artifact, b"exports.HelloRequest = {};\n");
    assert_eq!(scratch_entries(&fixture), 0);
}

#[tokio::test]
async fn SystemIo___service_run___rewrites_import_and_reports_warning() {
    let fixture = fixture();
    let sink = Arc::new(CollectingSink::new());
    let pipeline = Pipeline::new(fixture.config.clone()).with_diagnostics(sink.clone());

    let artifact = pipeline
        .run(&request(&fixture, "greeter.proto", GenerationMode::Service))
        .await
        .unwrap();

    let text = String::from_utf8(artifact).unwrap();
    assert!(!text.contains("\"./greeter_pb\""));
    assert!(text.contains("\"mode\":\"Message\""));
    assert!(text.contains("Object.assign(module.exports"));
    assert_eq!(sink.warnings().len(), 1);
    assert_eq!(scratch_entries(&fixture), 0);
}

#[tokio::test]
async fn SystemIo___compiler_failure___returns_stderr_and_removes_workspace() {
    let fixture = fixture();
    std::fs::write(fixture.schemas.join("broken.proto"), "nonsense").unwrap();
    let pipeline = Pipeline::new(fixture.config.clone());

    let result = pipeline
        .run(&request(&fixture, "broken.proto", GenerationMode::Message))
        .await;

    match result {
        Err(LoaderError::Compile { status, stderr }) => {
            assert_eq!(status, Some(1));
            assert!(stderr.contains("Expected top-level statement"));
        }
        other => panic!("expected Compile error, got {other:?}"),
    }
    assert_eq!(scratch_entries(&fixture), 0);
}

#[tokio::test]
async fn SystemIo___missing_compiler___returns_tool_not_found() {
    let fixture = fixture();
    let config = fixture
        .config
        .clone()
        .with_compiler(fixture.schemas.join("no-such-protoc"));
    let pipeline = Pipeline::new(config);

    let result = pipeline
        .run(&request(&fixture, "greeter.proto", GenerationMode::Message))
        .await;

    assert!(matches!(result, Err(LoaderError::ToolNotFound { .. })));
    assert_eq!(scratch_entries(&fixture), 0);
}
