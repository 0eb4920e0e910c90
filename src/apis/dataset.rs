use crate::{
    client::HsdsClient,
    error::{HsdsError, HsdsResult},
    models::{Dataset, DatasetCreateRequest, DatasetValueRequest},
};
use reqwest::Method;
use log::info;

/// Dataset API operations
pub struct DatasetApi<'a> {
    client: &'a HsdsClient,
}

impl<'a> DatasetApi<'a> {
    pub fn new(client: &'a HsdsClient) -> Self {
        Self { client }
    }

    /// Create a new Dataset
    ///
    /// # Arguments
    /// * `domain` - Domain path
    /// * `request` - Dataset creation parameters
    pub async fn create_dataset(
        &self,
        domain: &str,
        request: DatasetCreateRequest,
    ) -> HsdsResult<Dataset> {
        info!("Creating dataset in domain: {}", domain);
        let mut req = self.client.request(Method::POST, "/datasets").await?;
        req = HsdsClient::with_domain(req, domain);
        req = req.json(&request);

        self.client.execute(req).await
    }

    /// Get information about a Dataset
    ///
    /// # Arguments
    /// * `domain` - Domain path
    /// * `dataset_id` - UUID of the dataset
    pub async fn get_dataset(
        &self,
        domain: &str,
        dataset_id: &str,
    ) -> HsdsResult<Dataset> {
        let path = format!("/datasets/{}", dataset_id);
        let mut req = self.client.request(Method::GET, &path).await?;
        req = HsdsClient::with_domain(req, domain);

        self.client.execute(req).await
    }

    /// Delete a Dataset
    pub async fn delete_dataset(
        &self,
        domain: &str,
        dataset_id: &str,
    ) -> HsdsResult<serde_json::Value> {
        let path = format!("/datasets/{}", dataset_id);
        let mut req = self.client.request(Method::DELETE, &path).await?;
        req = HsdsClient::with_domain(req, domain);

        self.client.execute(req).await
    }

    /// Write JSON values to a Dataset
    ///
    /// # Arguments
    /// * `domain` - Domain path
    /// * `dataset_id` - UUID of the dataset
    /// * `request` - Data to write and optional hyperslab bounds
    pub async fn write_dataset_values(
        &self,
        domain: &str,
        dataset_id: &str,
        request: DatasetValueRequest,
    ) -> HsdsResult<serde_json::Value> {
        let path = format!("/datasets/{}/value", dataset_id);
        let mut req = self.client.request(Method::PUT, &path).await?;
        req = HsdsClient::with_domain(req, domain);
        req = req.json(&request);

        self.client.execute(req).await
    }

    /// Read values from a Dataset as JSON
    ///
    /// # Arguments
    /// * `domain` - Domain path
    /// * `dataset_id` - UUID of the dataset
    /// * `select` - Optional selection string (e.g., "[0:1]")
    pub async fn read_dataset_values_json(
        &self,
        domain: &str,
        dataset_id: &str,
        select: Option<&str>,
    ) -> HsdsResult<serde_json::Value> {
        let path = format!("/datasets/{}/value", dataset_id);
        let mut req = self.client.request(Method::GET, &path).await?;
        req = HsdsClient::with_domain(req, domain);

        if let Some(selection) = select {
            req = req.query(&[("select", selection)]);
        }

        req = req.header("Accept", "application/json");

        let mut body: serde_json::Value = self.client.execute(req).await?;
        body.get_mut("value")
            .map(serde_json::Value::take)
            .ok_or_else(|| HsdsError::InvalidResponse("value response has no `value` member".to_string()))
    }
}
