//! Shared failure boundary for data handlers.
//!
//! Every handler awaits its port call through [`guarded`], which converts a
//! [`DataAccessError`] into an [`ApiError`] with the handler's fallback
//! status. Handlers therefore never hand an unformatted error to Actix.

use std::future::Future;

use actix_web::http::StatusCode;
use tracing::debug;

use crate::domain::ports::DataAccessError;
use crate::inbound::http::error::{ApiError, ApiResult};

/// Await `operation`, mapping failures with `fallback` as the default status.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use data_api::domain::ports::DataAccessError;
/// use data_api::inbound::http::guard::guarded;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let result = guarded(StatusCode::FORBIDDEN, async {
///     Err::<(), _>(DataAccessError::store("offline"))
/// })
/// .await;
/// assert_eq!(result.expect_err("mapped").status(), StatusCode::FORBIDDEN);
/// # });
/// ```
pub async fn guarded<T, Fut>(fallback: StatusCode, operation: Fut) -> ApiResult<T>
where
    Fut: Future<Output = Result<T, DataAccessError>>,
{
    operation.await.map_err(|error| {
        debug!(%error, fallback = fallback.as_u16(), "data access failed");
        ApiError::from_port(&error, fallback)
    })
}
