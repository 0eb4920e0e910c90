use crate::{
    client::HsdsClient,
    error::{HsdsError, HsdsResult},
    models::{Attribute, AttributeCreateRequest},
};
use reqwest::Method;
use log::{debug, info};
use serde_json::{json, Value};

/// Attribute API operations
pub struct AttributeApi<'a> {
    client: &'a HsdsClient,
}

impl<'a> AttributeApi<'a> {
    pub fn new(client: &'a HsdsClient) -> Self {
        Self { client }
    }

    fn attribute_path(collection: &str, obj_uuid: &str, attr_name: &str) -> String {
        format!("/{}/{}/attributes/{}", collection, obj_uuid,
                urlencoding::encode(attr_name))
    }

    /// List all Attributes attached to an object
    ///
    /// # Arguments
    /// * `domain` - Domain path
    /// * `collection` - Object collection type ("groups", "datasets", "datatypes")
    /// * `obj_uuid` - UUID of the object
    pub async fn list_attributes(
        &self,
        domain: &str,
        collection: &str,
        obj_uuid: &str,
    ) -> HsdsResult<Vec<Attribute>> {
        let path = format!("/{}/{}/attributes", collection, obj_uuid);
        let mut req = self.client.request(Method::GET, &path).await?;
        req = HsdsClient::with_domain(req, domain);

        let mut body: Value = self.client.execute(req).await?;
        let attrs = body.get_mut("attributes").map(Value::take).unwrap_or_else(|| json!([]));
        Ok(serde_json::from_value(attrs)?)
    }

    /// Create an Attribute with an explicit type and shape
    ///
    /// Without `replace` the service answers 409 when the attribute exists.
    ///
    /// # Arguments
    /// * `domain` - Domain path
    /// * `collection` - Object collection type
    /// * `obj_uuid` - UUID of the object
    /// * `attr_name` - Name of the attribute
    /// * `request` - Type, shape and value of the attribute
    /// * `replace` - Overwrite an existing attribute of the same name
    pub async fn put_attribute(
        &self,
        domain: &str,
        collection: &str,
        obj_uuid: &str,
        attr_name: &str,
        request: &AttributeCreateRequest,
        replace: bool,
    ) -> HsdsResult<Value> {
        info!("Writing attribute {} on {} in domain: {}", attr_name, obj_uuid, domain);
        let path = Self::attribute_path(collection, obj_uuid, attr_name);
        let mut req = self.client.request(Method::PUT, &path).await?;
        req = HsdsClient::with_domain(req, domain);
        if replace {
            req = req.query(&[("replace", "1")]);
        }
        debug!("Request body: {:?}", request);
        req = req.json(request);

        self.client.execute(req).await
    }

    /// Get an Attribute
    ///
    /// # Arguments
    /// * `domain` - Domain path
    /// * `collection` - Object collection type
    /// * `obj_uuid` - UUID of the object
    /// * `attr_name` - Name of the attribute
    pub async fn get_attribute(
        &self,
        domain: &str,
        collection: &str,
        obj_uuid: &str,
        attr_name: &str,
    ) -> HsdsResult<Attribute> {
        let path = Self::attribute_path(collection, obj_uuid, attr_name);
        let mut req = self.client.request(Method::GET, &path).await?;
        req = HsdsClient::with_domain(req, domain);

        self.client.execute(req).await
    }

    /// Delete an Attribute
    pub async fn delete_attribute(
        &self,
        domain: &str,
        collection: &str,
        obj_uuid: &str,
        attr_name: &str,
    ) -> HsdsResult<Value> {
        let path = Self::attribute_path(collection, obj_uuid, attr_name);
        let mut req = self.client.request(Method::DELETE, &path).await?;
        req = HsdsClient::with_domain(req, domain);

        self.client.execute(req).await
    }

    /// Helper function to infer HDF5 type from a JSON value
    fn infer_type_from_value(value: &Value) -> Value {
        match value {
            Value::Number(n) => {
                if n.is_i64() {
                    json!("H5T_STD_I64LE")
                } else if n.is_u64() {
                    json!("H5T_STD_U64LE")
                } else {
                    json!("H5T_IEEE_F64LE")
                }
            },
            Value::Bool(_) => json!("H5T_STD_U8LE"),
            Value::Array(arr) if !arr.is_empty() => Self::infer_type_from_value(&arr[0]),
            _ => json!({
                "class": "H5T_STRING",
                "charSet": "H5T_CSET_UTF8",
                "length": "H5T_VARIABLE"
            })
        }
    }

    /// Helper function to infer shape from a JSON array value
    fn infer_shape_from_value(value: &Value) -> Option<Vec<u64>> {
        match value {
            Value::Array(arr) => {
                let mut shape = vec![arr.len() as u64];
                if let Some(Value::Array(inner)) = arr.first() {
                    shape.push(inner.len() as u64);
                }
                Some(shape)
            },
            _ => None
        }
    }

    /// Set an attribute on any object, overwriting any previous value
    ///
    /// The type is inferred from the value and the collection from the
    /// object ID prefix:
    /// - g-* → group
    /// - d-* → dataset
    /// - t-* → datatype
    pub async fn set_attribute<T>(
        &self,
        domain: &str,
        object_id: &str,
        attr_name: &str,
        value: T,
    ) -> HsdsResult<Value>
    where
        T: serde::Serialize,
    {
        let collection = collection_for_id(object_id)?;
        let json_value = serde_json::to_value(value).map_err(|e| {
            HsdsError::InvalidParameter(format!("Failed to serialize value: {}", e))
        })?;

        let mut attr_data = json!({
            "type": Self::infer_type_from_value(&json_value),
            "value": json_value
        });
        if let Some(shape) = Self::infer_shape_from_value(&attr_data["value"]) {
            attr_data["shape"] = json!(shape);
        }
        let request: AttributeCreateRequest = serde_json::from_value(attr_data)?;

        self.put_attribute(domain, collection, object_id, attr_name, &request, true).await
    }
}

/// Collection an object id lives in, from its prefix
pub fn collection_for_id(object_id: &str) -> HsdsResult<&'static str> {
    match object_id.get(0..2) {
        Some("g-") => Ok("groups"),
        Some("d-") => Ok("datasets"),
        Some("t-") => Ok("datatypes"),
        _ => Err(HsdsError::InvalidParameter(
            format!("Unknown object ID format: '{}'. Expected ID to start with 'g-', 'd-', or 't-'", object_id)
        )),
    }
}
