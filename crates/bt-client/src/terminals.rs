//! Terminal reads against `iclock/api/terminals/`.
//!
//! Terminals are managed upstream; the gateway only lists and fetches
//! them. These endpoints skip the content-type guard.

use bt_common::{Paginated, Terminal};

use crate::client::BioTimeClient;
use crate::error::Result;

impl BioTimeClient {
    pub async fn list_terminals(&self, page: u32, page_size: u32) -> Result<Paginated<Terminal>> {
        self.get_json(
            &format!("iclock/api/terminals/?page={page}&page_size={page_size}"),
            false,
        )
        .await
    }

    pub async fn get_terminal(&self, id: i64) -> Result<Terminal> {
        self.get_json(&format!("iclock/api/terminals/{id}/"), false).await
    }
}
