//! Record service HTTP client.

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::{Employee, EmployeeDraft, EmployeeId, State};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Client for the `Employee` and `State` REST resources.
///
/// One `reqwest::Client` is built up front and cloned cheaply into async tasks.
/// There is no retry, auth, or paging; every call is a single request/response.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `config` - Base URL, timeout and TLS settings
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn employees_url(&self) -> String {
        format!("{base}/Employee", base = self.base_url)
    }

    fn employee_url(&self, id: EmployeeId) -> String {
        format!("{base}/Employee/{id}", base = self.base_url)
    }

    fn states_url(&self) -> String {
        format!("{base}/State", base = self.base_url)
    }

    /// Fetch all employees in server order.
    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        let response = self.client.get(self.employees_url()).send().await?;
        let employees: Vec<Employee> = decode(check_status(response).await?).await?;
        debug!("Fetched {} employees", employees.len());
        Ok(employees)
    }

    /// Create an employee; the service assigns the id.
    pub async fn create_employee(&self, draft: &EmployeeDraft) -> Result<Employee> {
        let response = self.client.post(self.employees_url()).json(draft).send().await?;
        let created: Employee = decode(check_status(response).await?).await?;
        info!("Created employee {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Replace the editable fields of an existing employee.
    ///
    /// Returns `None` when the service answers without a body (`204 No Content`).
    pub async fn update_employee(&self, id: EmployeeId, draft: &EmployeeDraft) -> Result<Option<Employee>> {
        let response = self.client.put(self.employee_url(id)).json(draft).send().await?;
        let response = check_status(response).await?;
        info!("Updated employee {id}");

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| AppError::parse(format!("Invalid employee payload: {e}")))
    }

    /// Delete an employee. A record that is already gone counts as deleted.
    pub async fn delete_employee(&self, id: EmployeeId) -> Result<()> {
        let response = self.client.delete(self.employee_url(id)).send().await?;
        match check_status(response).await {
            Ok(_) => {
                info!("Deleted employee {id}");
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                debug!("Employee {id} already deleted");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch the state reference list.
    pub async fn list_states(&self) -> Result<Vec<State>> {
        let response = self.client.get(self.states_url()).send().await?;
        decode(check_status(response).await?).await
    }

    /// Test connection to the service.
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self.client.get(self.employees_url()).send().await?;
        Ok(response.status().is_success())
    }
}

/// Map a non-2xx response to `AppError::Status`, keeping a short body excerpt.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match body.trim() {
        "" => status.canonical_reason().unwrap_or("request failed").to_string(),
        text => text.chars().take(200).collect(),
    };
    Err(AppError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Read the body and parse it into a typed record shape.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| AppError::parse(format!("Unexpected response shape: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPLOYEE_JSON: &str = r#"{"id":1,"name":"Asha","designation":"Engineer","dateOfJoin":"2021-04-01","dateOfBirth":"1994-11-23","salary":55000,"gender":"Female","stateId":3,"stateName":"Kerala"}"#;

    fn client_for(url: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: format!("{url}/api/"),
            ..ApiConfig::default()
        };
        ApiClient::new(&config).unwrap()
    }

    fn sample_draft() -> EmployeeDraft {
        EmployeeDraft {
            name: "Asha".to_string(),
            designation: "Engineer".to_string(),
            date_of_join: "2021-04-01".to_string(),
            date_of_birth: "1994-11-23".to_string(),
            salary: "55000".to_string(),
            gender: "Female".to_string(),
            state_id: "3".to_string(),
        }
    }

    #[test]
    fn test_urls_trim_trailing_slash() {
        let client = client_for("http://localhost:7019");
        assert_eq!(client.base_url(), "http://localhost:7019/api");
        assert_eq!(client.employees_url(), "http://localhost:7019/api/Employee");
        assert_eq!(client.employee_url(42), "http://localhost:7019/api/Employee/42");
        assert_eq!(client.states_url(), "http://localhost:7019/api/State");
    }

    #[tokio::test]
    async fn test_list_employees_keeps_server_order() {
        let mut server = mockito::Server::new_async().await;
        let second = EMPLOYEE_JSON.replace(r#""id":1,"name":"Asha""#, r#""id":2,"name":"Bala""#);
        let _m = server
            .mock("GET", "/api/Employee")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{second},{EMPLOYEE_JSON}]"))
            .create_async()
            .await;

        let employees = client_for(&server.url()).list_employees().await.unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].name, "Bala");
        assert_eq!(employees[1].name, "Asha");
    }

    #[tokio::test]
    async fn test_list_employees_rejects_bad_shape() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/Employee")
            .with_status(200)
            .with_body(r#"[{"id":1}]"#)
            .create_async()
            .await;

        let result = client_for(&server.url()).list_employees().await;
        assert!(matches!(result, Err(AppError::Parse(_))));
    }

    #[tokio::test]
    async fn test_list_employees_status_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/Employee")
            .with_status(500)
            .with_body("database offline")
            .create_async()
            .await;

        match client_for(&server.url()).list_employees().await {
            Err(AppError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "database offline");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_sends_draft_as_is() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/api/Employee")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "name": "Asha",
                "salary": "55000",
                "stateId": "3"
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(EMPLOYEE_JSON)
            .expect(1)
            .create_async()
            .await;

        let created = client_for(&server.url()).create_employee(&sample_draft()).await.unwrap();
        assert_eq!(created.id, 1);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_puts_to_id_path() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("PUT", "/api/Employee/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(EMPLOYEE_JSON)
            .expect(1)
            .create_async()
            .await;

        let updated = client_for(&server.url()).update_employee(1, &sample_draft()).await.unwrap();
        assert_eq!(updated.map(|e| e.id), Some(1));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_no_content() {
        let mut server = mockito::Server::new_async().await;
        let _m = server.mock("PUT", "/api/Employee/9").with_status(204).create_async().await;

        let updated = client_for(&server.url()).update_employee(9, &sample_draft()).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete_not_found_is_success() {
        let mut server = mockito::Server::new_async().await;
        let _m = server.mock("DELETE", "/api/Employee/5").with_status(404).create_async().await;

        assert!(client_for(&server.url()).delete_employee(5).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_server_error_surfaces() {
        let mut server = mockito::Server::new_async().await;
        let _m = server.mock("DELETE", "/api/Employee/5").with_status(409).create_async().await;

        let result = client_for(&server.url()).delete_employee(5).await;
        assert!(matches!(result, Err(AppError::Status { status: 409, .. })));
    }

    #[tokio::test]
    async fn test_list_states() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/State")
            .with_status(200)
            .with_body(r#"[{"id":1,"name":"Kerala"}]"#)
            .create_async()
            .await;

        let states = client_for(&server.url()).list_states().await.unwrap();
        assert_eq!(states, vec![State { id: 1, name: "Kerala".to_string() }]);
    }
}
