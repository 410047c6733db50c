use std::future::Future;

use serde_json::Value;

use crate::error::ApiError;
use crate::request::ApiRequest;

/// Anything that can execute an [`ApiRequest`] against an endpoint path and
/// yield the decoded JSON body.
///
/// [`crate::ApiClient`] is the production implementation. Implementations
/// must not retry; retry policy belongs to the caller.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        endpoint: &str,
        request: ApiRequest,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(
        &self,
        endpoint: &str,
        request: ApiRequest,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send {
        (**self).send(endpoint, request)
    }
}
