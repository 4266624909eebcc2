use std::io;

use kiln::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only file system");
    let kiln_err: Error = io_err.into();

    match kiln_err {
        Error::IoError(err) => assert_eq!(err.kind(), io::ErrorKind::PermissionDenied),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config");

    let err = Error::TemplateNotFound {
        name: "site.conf.j2".to_string(),
    };
    assert_eq!(err.to_string(), "Template file not found: 'site.conf.j2'");
}
