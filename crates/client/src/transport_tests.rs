// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::*;

#[yare::parameterized(
    get    = { "get", Method::Get },
    post   = { "POST", Method::Post },
    put    = { "Put", Method::Put },
    patch  = { "patch", Method::Patch },
    delete = { "DELETE", Method::Delete },
)]
fn method_parses_case_insensitively(input: &str, expected: Method) {
    let parsed = input.parse::<Method>().ok();
    assert_eq!(parsed, Some(expected));
    assert_eq!(expected.as_str(), input.to_uppercase());
}

#[test]
fn unknown_method_is_rejected() {
    assert!("TRACE".parse::<Method>().is_err());
}

#[test]
fn new_context_is_unauthenticated_and_unretried() {
    let ctx = RequestContext::new(Method::Get, "/users");
    assert_eq!(ctx.bearer, None);
    assert!(!ctx.retried);
    assert!(!ctx.skip_refresh);
    assert_eq!(ctx.body, RequestBody::Empty);
}

#[test]
fn builder_sets_body_query_and_flags() {
    let ctx = RequestContext::new(Method::Post, "/auth/login")
        .json(json!({ "email": "admin@amanat.org" }))
        .query(vec![("page".into(), "2".into())])
        .skip_refresh();
    assert!(ctx.skip_refresh);
    assert_eq!(ctx.query, vec![("page".to_owned(), "2".to_owned())]);
    assert_eq!(ctx.body, RequestBody::Json(json!({ "email": "admin@amanat.org" })));
}

#[yare::parameterized(
    ok         = { 200, true },
    created    = { 201, true },
    no_content = { 204, true },
    redirect   = { 302, false },
    unauth     = { 401, false },
    server     = { 500, false },
)]
fn success_range(status: u16, expected: bool) {
    assert_eq!(RawResponse::new(status, "").is_success(), expected);
}

#[test]
fn multipart_form_builds_for_valid_parts() {
    let parts = vec![FilePart::new("image", "site.jpg", "image/jpeg", b"jpeg-bytes".to_vec())];
    assert!(build_form(&parts).is_ok());
}

#[test]
fn multipart_form_rejects_bad_mime() {
    let parts = vec![FilePart::new("image", "site.jpg", "not a mime type", b"x".to_vec())];
    assert!(matches!(build_form(&parts), Err(ApiError::Transport { .. })));
}

#[tokio::test]
async fn connection_refused_maps_to_network_error() -> anyhow::Result<()> {
    // Bind then drop to get a port with nothing listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };
    let config = ClientConfig::with_api_url(format!("http://127.0.0.1:{port}/api"));
    let transport = ReqwestTransport::new(&config)?;

    let ctx = RequestContext::new(Method::Get, "/settings");
    let err = match transport.execute(&ctx).await {
        Ok(resp) => anyhow::bail!("expected failure, got status {}", resp.status),
        Err(e) => e,
    };
    assert_eq!(err, ApiError::transport(NETWORK_ERROR));
    Ok(())
}
