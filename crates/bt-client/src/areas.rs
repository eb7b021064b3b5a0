//! Area CRUD against `personnel/api/areas/`.
//!
//! These endpoints carry the content-type guard: BioTime has been seen
//! serving an HTML login page with a 200 here.

use bt_common::{Area, AreaInput, Paginated};
use reqwest::Method;

use crate::client::BioTimeClient;
use crate::error::Result;

impl BioTimeClient {
    pub async fn list_areas(&self, page: u32, page_size: u32) -> Result<Paginated<Area>> {
        self.get_json(
            &format!("personnel/api/areas/?page={page}&page_size={page_size}"),
            true,
        )
        .await
    }

    pub async fn get_area(&self, id: i64) -> Result<Area> {
        self.get_json(&format!("personnel/api/areas/{id}/"), true).await
    }

    pub async fn create_area(&self, area: &AreaInput) -> Result<Area> {
        let response = self
            .send_with_retry(Method::POST, "personnel/api/areas/", Some(area), true)
            .await?;
        Self::read_json(response).await
    }

    pub async fn update_area(&self, id: i64, area: &AreaInput) -> Result<Area> {
        let response = self
            .send_with_retry(
                Method::PUT,
                &format!("personnel/api/areas/{id}/"),
                Some(area),
                true,
            )
            .await?;
        Self::read_json(response).await
    }

    pub async fn delete_area(&self, id: i64) -> Result<()> {
        self.send_with_retry::<()>(
            Method::DELETE,
            &format!("personnel/api/areas/{id}/"),
            None,
            true,
        )
        .await?;
        Ok(())
    }
}
