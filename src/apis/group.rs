use crate::{
    client::HsdsClient,
    error::HsdsResult,
    models::{Group, GroupCreateRequest, LinkRequest},
};
use reqwest::Method;
use log::{debug, info};

/// Group API operations
pub struct GroupApi<'a> {
    client: &'a HsdsClient,
}

impl<'a> GroupApi<'a> {
    pub fn new(client: &'a HsdsClient) -> Self {
        Self { client }
    }

    /// Create a new Group
    ///
    /// # Arguments
    /// * `domain` - Domain path
    /// * `request` - Group creation parameters (optional)
    pub async fn create_group(
        &self,
        domain: &str,
        request: Option<GroupCreateRequest>,
    ) -> HsdsResult<Group> {
        info!("Creating group in domain: {}", domain);
        let mut req = self.client.request(Method::POST, "/groups").await?;
        req = HsdsClient::with_domain(req, domain);

        if let Some(body) = request {
            debug!("Request body: {:?}", body);
            req = req.json(&body);
        }

        self.client.execute(req).await
    }

    /// Create a Group linked under `parent_id` as `name`
    pub async fn create_child_group(
        &self,
        domain: &str,
        parent_id: &str,
        name: &str,
    ) -> HsdsResult<Group> {
        let request = GroupCreateRequest {
            link: Some(LinkRequest {
                id: parent_id.to_string(),
                name: name.to_string(),
            }),
        };
        self.create_group(domain, Some(request)).await
    }

    /// Get information about a specific Group
    ///
    /// # Arguments
    /// * `domain` - Domain path
    /// * `group_id` - UUID of the group
    pub async fn get_group(&self, domain: &str, group_id: &str) -> HsdsResult<Group> {
        info!("Getting group {} in domain: {}", group_id, domain);
        let path = format!("/groups/{}", group_id);
        let mut req = self.client.request(Method::GET, &path).await?;
        req = HsdsClient::with_domain(req, domain);

        self.client.execute(req).await
    }

    /// Delete a Group
    ///
    /// # Arguments
    /// * `domain` - Domain path
    /// * `group_id` - UUID of the group
    pub async fn delete_group(
        &self,
        domain: &str,
        group_id: &str,
    ) -> HsdsResult<serde_json::Value> {
        info!("Deleting group {} in domain: {}", group_id, domain);
        let path = format!("/groups/{}", group_id);
        let mut req = self.client.request(Method::DELETE, &path).await?;
        req = HsdsClient::with_domain(req, domain);

        self.client.execute(req).await
    }
}
