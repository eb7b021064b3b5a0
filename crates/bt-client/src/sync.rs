//! Terminal sync orchestration.
//!
//! BioTime exposes several candidate endpoints for pushing data to a
//! terminal, and which one actually works is an empirical, per-deployment
//! matter. The probe walks a fixed priority order and stops at the first
//! clean response. Failures along the way are data, not errors: a missing
//! or unsupported endpoint is an expected condition, so each candidate
//! yields an `Option` and the loop advances on `None`.

use bt_common::{SyncOutcome, Terminal};
use reqwest::Method;
use tracing::{debug, info};

use crate::client::BioTimeClient;
use crate::error::Result;

/// Candidate endpoints in probe order. `{}` takes the terminal's numeric
/// id first, then its serial number when the formatted URL differs.
const SYNC_ENDPOINT_TEMPLATES: [&str; 4] = [
    "iclock/api/terminals/{}/sync/",
    "iclock/api/terminals/{}/sync_user/",
    "iclock/api/terminals/{}/sync_transaction/",
    "personnel/api/terminal/{}/sync/",
];

const SYNC_ALL_PAGE_SIZE: u32 = 50;
const SYNC_BY_SN_PAGE_SIZE: u32 = 100;

impl BioTimeClient {
    /// Sync every terminal, strictly sequentially in encounter order
    /// (page order, then terminal order within the page).
    ///
    /// Total latency is the sum of the individual probe latencies; fine
    /// for the small terminal counts BioTime deployments run, and sync is
    /// not latency-sensitive.
    pub async fn sync_all_terminals(&self) -> Result<Vec<SyncOutcome>> {
        let mut results = Vec::new();
        let mut page = 1;

        loop {
            let terminals = self.list_terminals(page, SYNC_ALL_PAGE_SIZE).await?;

            for terminal in &terminals.data {
                results.push(self.sync_terminal(terminal).await);
            }

            page += 1;
            if terminals.next.is_none() {
                break;
            }
        }

        info!("Terminal sync finished, {} terminals processed", results.len());
        Ok(results)
    }

    /// Sync a single terminal located by serial number.
    ///
    /// Only the first page of 100 terminals is scanned; a serial beyond
    /// that yields a not-found outcome without contacting any sync
    /// endpoint. Kept deliberately non-exhaustive.
    pub async fn sync_terminal_by_sn(&self, sn: &str) -> Result<SyncOutcome> {
        let terminals = self.list_terminals(1, SYNC_BY_SN_PAGE_SIZE).await?;

        let Some(terminal) = terminals.data.iter().find(|t| t.sn == sn) else {
            return Ok(SyncOutcome::failure(
                sn,
                format!("terminal with SN={sn} not found"),
            ));
        };

        Ok(self.sync_terminal(terminal).await)
    }

    /// Probe the candidate endpoints for one terminal; first clean
    /// response short-circuits the rest.
    async fn sync_terminal(&self, terminal: &Terminal) -> SyncOutcome {
        for template in SYNC_ENDPOINT_TEMPLATES {
            let url_by_id = template.replace("{}", &terminal.id.to_string());
            if let Some(outcome) = self.try_sync_endpoint(&url_by_id, &terminal.sn).await {
                return outcome;
            }

            let url_by_sn = template.replace("{}", &terminal.sn);
            if url_by_sn != url_by_id {
                if let Some(outcome) = self.try_sync_endpoint(&url_by_sn, &terminal.sn).await {
                    return outcome;
                }
            }
        }

        SyncOutcome::failure(&terminal.sn, "no sync endpoint responded correctly")
    }

    /// Try one candidate URL: authenticated POST with no body, outside
    /// the retry wrapper's error-raising path.
    ///
    /// Success requires an HTTP success code and a body that, after
    /// trimming leading whitespace, does not start with `<`. That rules
    /// out HTML error or login pages masquerading as 200 responses.
    /// Transport failures map to `None` so the caller advances to the
    /// next candidate.
    async fn try_sync_endpoint(&self, url: &str, terminal_sn: &str) -> Option<SyncOutcome> {
        let token = match self.token().await {
            Ok(token) => token,
            Err(e) => {
                debug!("Could not authenticate for sync probe: {}", e);
                return None;
            }
        };

        let response = match self.send_request::<()>(Method::POST, url, None, &token).await {
            Ok(response) => response,
            Err(e) => {
                debug!("Sync candidate {} unreachable: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let is_html = body.trim_start().starts_with('<');

        if status.is_success() && !is_html {
            return Some(SyncOutcome::success(
                terminal_sn,
                format!("synchronized via {url}"),
            ));
        }

        debug!("Sync candidate {} rejected with status {}", url, status);
        None
    }
}
