#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case("/proj/schemas", "/proj/schemas")]
#[test_case("/proj/./schemas", "/proj/schemas")]
#[test_case("/proj/build/../schemas", "/proj/schemas")]
#[test_case("/proj/schemas/", "/proj/schemas")]
#[test_case("/../proj", "/proj")]
#[test_case("a/../../b", "../b")]
#[test_case("../../b", "../../b")]
fn normalize___folds_dot_components(input: &str, expected: &str) {
    let normalized = normalize(Path::new(input));

    assert_eq!(normalized, PathBuf::from(expected));
}

#[test]
fn absolutize___relative_path___is_joined_to_current_dir() {
    let cwd = std::env::current_dir().unwrap();

    let absolute = absolutize(Path::new("schemas/../protos")).unwrap();

    assert_eq!(absolute, cwd.join("protos"));
}

#[test]
fn absolutize___absolute_path___is_only_normalized() {
    let absolute = absolutize(Path::new("/proj/./schemas")).unwrap();

    assert_eq!(absolute, PathBuf::from("/proj/schemas"));
}

#[test]
fn absolutize___empty_path___is_an_error() {
    let result = absolutize(Path::new(""));

    assert!(result.is_err());
}

#[test_case("greeter", "greeter")]
#[test_case("pkg/v1/greeter", "pkg/v1/greeter")]
#[test_case("./pkg/greeter", "pkg/greeter")]
#[test_case("", "")]
fn to_slash___joins_normal_components(input: &str, expected: &str) {
    let slashed = to_slash(Path::new(input));

    assert_eq!(slashed, expected);
}

#[test]
fn to_slash___path_built_from_components___uses_forward_slashes() {
    let path: PathBuf = ["pkg", "v1", "greeter"].iter().collect();

    let slashed = to_slash(&path);

    assert_eq!(slashed, "pkg/v1/greeter");
}
