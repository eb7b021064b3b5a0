//! Employee CRUD against `personnel/api/employees/`.

use bt_common::{Employee, EmployeeInput, Paginated};
use reqwest::Method;

use crate::client::BioTimeClient;
use crate::error::Result;

impl BioTimeClient {
    pub async fn list_employees(&self, page: u32, page_size: u32) -> Result<Paginated<Employee>> {
        self.get_json(
            &format!("personnel/api/employees/?page={page}&page_size={page_size}"),
            true,
        )
        .await
    }

    pub async fn get_employee(&self, id: i64) -> Result<Employee> {
        self.get_json(&format!("personnel/api/employees/{id}/"), true).await
    }

    pub async fn create_employee(&self, employee: &EmployeeInput) -> Result<Employee> {
        let response = self
            .send_with_retry(Method::POST, "personnel/api/employees/", Some(employee), true)
            .await?;
        Self::read_json(response).await
    }

    pub async fn update_employee(&self, id: i64, employee: &EmployeeInput) -> Result<Employee> {
        let response = self
            .send_with_retry(
                Method::PUT,
                &format!("personnel/api/employees/{id}/"),
                Some(employee),
                true,
            )
            .await?;
        Self::read_json(response).await
    }

    pub async fn delete_employee(&self, id: i64) -> Result<()> {
        self.send_with_retry::<()>(
            Method::DELETE,
            &format!("personnel/api/employees/{id}/"),
            None,
            true,
        )
        .await?;
        Ok(())
    }
}
