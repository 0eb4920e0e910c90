use crate::{
    client::HsdsClient,
    error::HsdsResult,
    models::{Domain, DomainCreateRequest},
};
use reqwest::Method;
use log::{debug, info};

/// Domain API operations
pub struct DomainApi<'a> {
    client: &'a HsdsClient,
}

impl<'a> DomainApi<'a> {
    pub fn new(client: &'a HsdsClient) -> Self {
        Self { client }
    }

    /// Create a new Domain or Folder
    ///
    /// The service refuses with 409 Conflict when the path already exists,
    /// so this is always an exclusive create.
    ///
    /// # Arguments
    /// * `domain` - Domain path (e.g., "/home/user/myfile.h5")
    /// * `request` - Domain creation parameters
    pub async fn create_domain(
        &self,
        domain: &str,
        request: Option<DomainCreateRequest>,
    ) -> HsdsResult<Domain> {
        info!("Creating domain: {}", domain);
        let mut req = self.client.request(Method::PUT, "/").await?;
        req = HsdsClient::with_domain(req, domain);

        if let Some(body) = request {
            debug!("Request body: {:?}", body);
            req = req.json(&body);
        }

        self.client.execute(req).await
    }

    /// Get information about a domain or folder
    ///
    /// # Arguments
    /// * `domain` - Domain path; folders may be given with a trailing slash
    pub async fn get_domain(&self, domain: &str) -> HsdsResult<Domain> {
        info!("Getting domain: {}", domain);
        let mut req = self.client.request(Method::GET, "/").await?;
        req = HsdsClient::with_domain(req, domain);

        self.client.execute(req).await
    }

    /// Get information about a folder; the path is looked up with a
    /// trailing slash
    pub async fn get_folder(&self, folder: &str) -> HsdsResult<Domain> {
        if folder.ends_with('/') {
            self.get_domain(folder).await
        } else {
            self.get_domain(&format!("{}/", folder)).await
        }
    }

    /// Delete a domain
    ///
    /// # Arguments
    /// * `domain` - Domain path
    pub async fn delete_domain(&self, domain: &str) -> HsdsResult<serde_json::Value> {
        info!("Deleting domain: {}", domain);
        let mut req = self.client.request(Method::DELETE, "/").await?;
        req = HsdsClient::with_domain(req, domain);

        self.client.execute(req).await
    }

    /// Create a folder (convenience method)
    ///
    /// # Arguments
    /// * `domain` - Domain path
    pub async fn create_folder(&self, domain: &str) -> HsdsResult<Domain> {
        info!("Creating folder: {}", domain);
        let request = DomainCreateRequest { folder: Some(1) };
        self.create_domain(domain, Some(request)).await
    }
}
