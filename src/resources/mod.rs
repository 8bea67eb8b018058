//! Resource endpoints layered on the API client.
//!
//! Each resource borrows an [`ApiClient`] and maps its operations to one
//! endpoint path and body shape. Failure handling is entirely the client's.

pub mod cron;
pub mod d1;
pub mod dns;
pub mod kv;
pub mod pages;
pub mod r2;
pub mod secrets;
pub mod workers;
pub mod zones;

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::http::{ApiClient, ApiError, ApiRequest, ResultInfo, encode_path_segment};
use crate::runtime::Runtime;

pub use cron::{Cron, Schedule};
pub use d1::{D1, Database, QueryResult};
pub use dns::{Dns, DnsRecord, NewDnsRecord};
pub use kv::{Kv, KvKeyInfo, KeyPage, Namespace};
pub use pages::{Deployment, Pages, Project};
pub use r2::{Bucket, R2};
pub use secrets::{Secret, Secrets};
pub use workers::{WorkerScript, Workers};
pub use zones::{PurgeTarget, Zone, ZoneSetting, Zones};

/// Items per page requested from paginated list endpoints.
const PER_PAGE: u32 = 50;

/// Upper bound on pages fetched by one list call.
const MAX_PAGES: u32 = 20;

/// Path under the configured account: `/accounts/{id}/{suffix}`.
pub(crate) fn account_path<R: Runtime>(
    client: &ApiClient<R>,
    suffix: &str,
) -> Result<String, ApiError> {
    Ok(format!(
        "/accounts/{}/{}",
        encode_path_segment(client.account_id()?),
        suffix
    ))
}

/// Fetch every page of a page-numbered list endpoint.
///
/// Stops after [`MAX_PAGES`] pages; a listing cut short there is logged as a
/// warning.
pub(crate) async fn fetch_all<R: Runtime, T: DeserializeOwned>(
    client: &ApiClient<R>,
    request: ApiRequest,
) -> Result<Vec<T>, ApiError> {
    let mut items = Vec::new();

    for page in 1..=MAX_PAGES {
        let envelope = client
            .call(
                request
                    .clone()
                    .query("page", page.to_string())
                    .query("per_page", PER_PAGE.to_string()),
            )
            .await?;
        let info = envelope.result_info.clone();
        let parsed: Vec<T> = envelope.decode()?;
        debug!("{}: page {} returned {} item(s)", request.path, page, parsed.len());

        let received = parsed.len();
        items.extend(parsed);

        if is_last_page(page, received, info.as_ref()) {
            return Ok(items);
        }
    }

    warn!(
        "{}: listing truncated after {} pages ({} items); more results exist",
        request.path,
        MAX_PAGES,
        items.len()
    );
    Ok(items)
}

/// Whether `page` ends the listing, given how many items it held.
fn is_last_page(page: u32, received: usize, info: Option<&ResultInfo>) -> bool {
    if received == 0 {
        return true;
    }
    match info.and_then(|i| i.total_pages) {
        Some(total) => u64::from(page) >= total,
        None => received < PER_PAGE as usize,
    }
}

/// Tally of a batch where every item is attempted regardless of earlier
/// failures.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    pub succeeded: usize,
    pub failed: Vec<(String, ApiError)>,
}

impl BulkOutcome {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}
