use super::*;
use apigw_client::signer::{make_signature, SIGNATURE_HEADER, TIMESTAMP_HEADER};

fn credentials() -> Credentials {
    Credentials::new("TESTACCESSKEY", "test-secret-key")
}

#[test]
fn test_request_url_keeps_base_path() {
    let url = request_url("https://gw.example.com/api/v1/", "/products?limit=5").unwrap();

    assert_eq!(url.path(), "/api/v1/products");
    assert_eq!(url.query(), Some("limit=5"));
}

#[test]
fn test_sign_request_prints_three_headers() {
    let args = SignArgs {
        method: "get".to_string(),
        path: "/products?limit=5".to_string(),
        timestamp: Some(1_700_000_000_000),
    };

    let output = sign_request(&args, "https://gw.example.com/api/v1", &credentials()).unwrap();

    let expected_signature = make_signature(
        "GET",
        "/api/v1/products?limit=5",
        "1700000000000",
        "TESTACCESSKEY",
        "test-secret-key",
    )
    .unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], format!("{}: 1700000000000", TIMESTAMP_HEADER));
    assert_eq!(lines[1], "x-ncp-iam-access-key: TESTACCESSKEY");
    assert_eq!(
        lines[2],
        format!("{}: {}", SIGNATURE_HEADER, expected_signature)
    );
}

#[test]
fn test_sign_request_rejects_bad_base_url() {
    let args = SignArgs {
        method: "GET".to_string(),
        path: "/products".to_string(),
        timestamp: Some(1),
    };

    let result = sign_request(&args, "not a url", &credentials());

    assert!(matches!(result, Err(Error::InvalidArguments(_))));
}
