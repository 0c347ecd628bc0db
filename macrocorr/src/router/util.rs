use chrono::{Days, Utc};
use macrocorr_core::{DateRange, MacroCorrError};

const LOOKBACK_DAYS: u64 = 5 * 365;

/// Range used when a run does not specify one: 5 x 365 days ending today (UTC).
pub(crate) fn default_range() -> Result<DateRange, MacroCorrError> {
    let end = Utc::now().date_naive();
    let start = end
        .checked_sub_days(Days::new(LOOKBACK_DAYS))
        .ok_or_else(|| MacroCorrError::InvalidArg(format!("cannot look back from {end}")))?;
    DateRange::try_new(start, end)
}

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// This wraps `futures::future::join_all(tasks)`. On timeout it returns
/// `MacroCorrError::RequestTimeout` labelled with `capability`.
///
/// # Errors
/// Returns `RequestTimeout` when the deadline elapses before every task finishes.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
    capability: &str,
) -> Result<Vec<T>, MacroCorrError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, capability, futures::future::join_all(tasks))
        .await
}

/// Collapse a set of provider errors into a uniform `MacroCorrError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If all errors are `ProviderTimeout` → `AllProvidersTimedOut(capability)`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllProvidersFailed(errors)`.
#[must_use]
pub fn collapse_errors(
    capability: &str,
    attempted_any: bool,
    errors: Vec<MacroCorrError>,
    not_found_what: Option<String>,
) -> MacroCorrError {
    if !attempted_any {
        return MacroCorrError::unsupported(capability);
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, MacroCorrError::ProviderTimeout { .. }))
    {
        return MacroCorrError::AllProvidersTimedOut {
            capability: capability.to_string(),
        };
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, MacroCorrError::NotFound { .. }))
    {
        return MacroCorrError::not_found(what);
    }
    MacroCorrError::AllProvidersFailed(errors)
}
