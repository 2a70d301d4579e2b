// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bearer attachment before a request, status triage after it.

use bytes::Bytes;

use crate::error::ApiError;
use crate::token::TokenStore;
use crate::transport::{RawResponse, RequestContext};

/// What the pipeline should do with a response.
#[derive(Debug, PartialEq)]
pub enum Verdict {
    /// 2xx: hand the body to the caller.
    Success(Bytes),
    /// 401 on a request that may still be refreshed and replayed.
    Unauthorized(ApiError),
    /// Anything else: surface to the caller as-is.
    Failed(ApiError),
}

/// Attach the stored access token, or strip any stale one when none is stored.
pub fn authorize(tokens: &dyn TokenStore, req: &mut RequestContext) {
    req.bearer = tokens.access_token();
}

/// Classify a response for `req`.
pub fn inspect(req: &RequestContext, resp: RawResponse) -> Verdict {
    if resp.is_success() {
        return Verdict::Success(resp.body);
    }

    let err = ApiError::from_response(resp.status, &resp.body);
    if resp.status == 401 && !req.retried && !req.skip_refresh {
        return Verdict::Unauthorized(err);
    }

    tracing::warn!(
        method = req.method.as_str(),
        path = %req.path,
        status = resp.status,
        message = %err.message(),
        "api error"
    );
    Verdict::Failed(err)
}

#[cfg(test)]
#[path = "interceptor_tests.rs"]
mod tests;
