use super::*;

#[test]
fn test_credentials_basic() {
    let creds = Credentials::basic("testuser", "testpass");
    assert_eq!(creds.username, "testuser");
    assert_eq!(creds.password, "testpass");
}

#[test]
fn test_header_value_is_basic_scheme() {
    let creds = Credentials::basic("testuser", "testpass");
    let header = creds.to_header_value();
    assert!(header.starts_with("Basic "));
}

#[test]
fn test_header_value_encoding() {
    // base64("admin:admin123")
    let creds = Credentials::basic("admin", "admin123");
    assert_eq!(creds.to_header_value(), "Basic YWRtaW46YWRtaW4xMjM=");
}

#[test]
fn test_header_value_with_colon_in_password() {
    // base64("user:pa:ss")
    let creds = Credentials::basic("user", "pa:ss");
    assert_eq!(creds.to_header_value(), "Basic dXNlcjpwYTpzcw==");
}

#[test]
fn test_debug_redacts_password() {
    let creds = Credentials::basic("user", "hunter2");
    let debug = format!("{:?}", creds);
    assert!(debug.contains("user"));
    assert!(!debug.contains("hunter2"));
}
