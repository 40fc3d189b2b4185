//! REST Port
//!
//! Abstract interface for issuing requests against the platform's REST API.

use async_trait::async_trait;

use crate::domain::errors::RestError;
use crate::domain::value_objects::HttpMethod;

/// REST request-issuing collaborator
///
/// Implementations own transport, authentication, rate limiting and retries.
/// Entities only build the verb, path and body and hand them over.
///
/// # Example
///
/// ```rust,ignore
/// use cordial::ports::RestClient;
///
/// struct HttpRestClient { /* reqwest client */ }
///
/// #[async_trait]
/// impl RestClient for HttpRestClient {
///     async fn request(&self, method: HttpMethod, path: &str, body: Option<serde_json::Value>)
///         -> Result<serde_json::Value, RestError>
///     {
///         // Send the request, decode the JSON body
///     }
/// }
/// ```
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Issue a request
    ///
    /// `path` is relative to the API base URL and starts with `/`.
    /// Responses without a body resolve to `serde_json::Value::Null`.
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, RestError>;
}
