#![allow(clippy::unwrap_used, clippy::expect_used)]

use autoroute::config::{ReaderConfig, RoutingConfig};
use autoroute::introspect::{load_manifest, Introspector};
use autoroute::reader::ControllerMethodReader;
use autoroute::ReaderError;
use serde_json::json;
use std::io::Write;

const MANIFEST_YAML: &str = r#"
controllers:
  - class: App\Controllers\Blog
    methods:
      - name: getIndex
        params:
          - { name: page, has_default: true }
      - name: getShow
        params:
          - { name: slug }
      - name: postSave
        params:
          - { name: id }
          - { name: draft, has_default: true }
      - name: loadPost
        visibility: protected
  - class: App\Controllers\BaseController
    abstract: true
    methods:
      - name: getIndex
"#;

fn write_manifest(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_yaml_manifest_end_to_end() {
    let file = write_manifest(".yaml", MANIFEST_YAML);
    let introspector = load_manifest(file.path()).unwrap();
    assert_eq!(
        introspector.classes().collect::<Vec<_>>(),
        ["App\\Controllers\\Blog", "App\\Controllers\\BaseController"]
    );

    let config = ReaderConfig::new("App\\Controllers", ["get", "post"]).unwrap();
    let reader = ControllerMethodReader::new(introspector, config, RoutingConfig::default());

    let routes = reader.read("App\\Controllers\\Blog").unwrap();
    assert_eq!(
        serde_json::to_value(&routes).unwrap(),
        json!([
            {
                "method": "get",
                "route": "blog",
                "route_params": "[/..]",
                "handler": "\\App\\Controllers\\Blog::getIndex",
                "params": { "page": false },
            },
            {
                "method": "get",
                "route": "blog/show",
                "route_params": "/..",
                "handler": "\\App\\Controllers\\Blog::getShow",
                "params": { "slug": true },
            },
            {
                "method": "post",
                "route": "blog/save",
                "route_params": "/..[/..]",
                "handler": "\\App\\Controllers\\Blog::postSave",
                "params": { "id": true, "draft": false },
            },
        ])
    );

    assert!(reader.read("App\\Controllers\\BaseController").unwrap().is_empty());
}

#[test]
fn test_json_manifest() {
    let manifest = json!({
        "controllers": [{
            "class": "App\\Controllers\\Admin\\Users",
            "methods": [{ "name": "getEdit", "params": [{ "name": "id" }] }]
        }]
    });
    let file = write_manifest(".json", &manifest.to_string());
    let introspector = load_manifest(file.path()).unwrap();

    let signature = introspector.inspect("\\App\\Controllers\\Admin\\Users").unwrap();
    assert_eq!(signature.short_name(), "Users");
    assert_eq!(signature.methods[0].params.len(), 1);
}

#[test]
fn test_unknown_class_after_load() {
    let file = write_manifest(".yml", MANIFEST_YAML);
    let introspector = load_manifest(file.path()).unwrap();
    let config = ReaderConfig::new("App\\Controllers", ["get"]).unwrap();
    let reader = ControllerMethodReader::new(introspector, config, RoutingConfig::default());

    let err = reader.read("App\\Controllers\\Missing").unwrap_err();
    assert!(matches!(err, ReaderError::UninspectableClass { .. }));
}

#[test]
fn test_missing_manifest_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_manifest(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn test_malformed_manifest() {
    let file = write_manifest(".json", "{ \"controllers\": [ { \"methods\": [] } ] }");
    assert!(load_manifest(file.path()).is_err());
}
