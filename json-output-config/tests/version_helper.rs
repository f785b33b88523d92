//! The dotted version parser is usable on its own.

use json_output_config::{parse_version, Error, Version};

#[test]
fn test_parse_version_accepts_two_to_four_fields() {
    assert_eq!(parse_version("1.2"), Ok(Version::new(1, 2, 0, 0)));
    assert_eq!(parse_version("1.2.3"), Ok(Version::new(1, 2, 3, 0)));
    assert_eq!(parse_version("1.2.3.4"), Ok(Version::new(1, 2, 3, 4)));
}

#[test]
fn test_parse_version_rejects() {
    for input in ["1", "1.2.3.4.5", "a.b", "1.2-rc1"] {
        assert!(
            matches!(parse_version(input), Err(Error::Format(_))),
            "'{input}' should fail"
        );
    }
}

#[test]
fn test_version_numeric_form() {
    let version: Result<Version, Error> = "2.1.0".parse();
    assert_eq!(version.map(|v| v.to_numeric()), Ok(0x0201_0000));
}
