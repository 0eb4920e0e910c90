//! Variable-length type round trips against a live HSDS service.
//!
//! Runs only when `HSDS_ENDPOINT` is set; `HSDS_USERNAME` and `HSDS_PASSWORD`
//! default to `admin`. Each test works in its own domain under `/home/<user>/`.

use hstouch::models::{
    parse_object_ref, AttributeCreateRequest, CharSet, CompoundField, DataTypeSpec,
    DatasetCreateRequest, DatasetValueRequest, LinkRequest, ShapeSpec,
};
use hstouch::{BasicAuth, HsdsClient};
use serde_json::{json, Value};
use std::env;

const WORDS: [&str; 10] = ["one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten"];

const UNICODE_WORDS: [&str; 10] = [
    "one: \u{4e00}", "two: \u{4e8c}", "three: \u{4e09}", "four: \u{56db}", "five: \u{4e94}",
    "six: \u{516d}", "seven: \u{4e03}", "eight: \u{516b}", "nine: \u{4e5d}", "ten: \u{5341}",
];

struct Live {
    client: HsdsClient,
    domain: String,
    root: String,
}

/// Create a fresh domain on the configured service, or `None` to skip
async fn live_domain(name: &str) -> Option<Live> {
    let _ = env_logger::try_init();
    let Ok(endpoint) = env::var("HSDS_ENDPOINT") else {
        println!("HSDS_ENDPOINT not set, skipping {}", name);
        return None;
    };
    let username = env::var("HSDS_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = env::var("HSDS_PASSWORD").unwrap_or_else(|_| "admin".to_string());

    let client = HsdsClient::new(&endpoint, BasicAuth::new(&username, &password))
        .expect("Failed to create client");
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    let domain = format!("/home/{}/{}_{}.h5", username, name, uuid);
    println!("domain: {}", domain);

    let created = client.domains().create_domain(&domain, None).await
        .expect("Failed to create test domain");
    let root = created.root.expect("Domain should have a root group");
    Some(Live { client, domain, root })
}

impl Live {
    /// Create `g1` with children `g1_1..g1_3`, each tagged with its name
    async fn create_groups(&self) -> (String, Vec<String>) {
        let groups = self.client.groups();
        let g1 = groups.create_child_group(&self.domain, &self.root, "g1").await
            .expect("Failed to create g1").id;
        let mut children = Vec::new();
        for name in ["g1_1", "g1_2", "g1_3"] {
            let child = groups.create_child_group(&self.domain, &g1, name).await
                .expect("Failed to create child group").id;
            self.client.attributes().set_attribute(&self.domain, &child, "name", name).await
                .expect("Failed to set name attribute");
            children.push(child);
        }
        (g1, children)
    }

    async fn put_attribute(&self, obj: &str, name: &str, data_type: DataTypeSpec, dims: u64, value: Value) {
        let request = AttributeCreateRequest {
            data_type,
            shape: Some(ShapeSpec::Dimensions(vec![dims])),
            value,
        };
        self.client.attributes()
            .put_attribute(&self.domain, "groups", obj, name, &request, false)
            .await
            .expect("Failed to create attribute");
    }

    async fn attribute_value(&self, obj: &str, name: &str) -> Value {
        self.client.attributes().get_attribute(&self.domain, "groups", obj, name).await
            .expect("Failed to read attribute")
            .value
            .expect("Attribute should have a value")
    }

    /// Follow an object reference to the referenced group's `name` attribute
    async fn referenced_name(&self, reference: &Value) -> Value {
        let reference = reference.as_str().expect("reference should be a string");
        let (collection, id) = parse_object_ref(reference).expect("malformed reference");
        assert_eq!(collection, "groups");
        self.attribute_value(id, "name").await
    }

    async fn create_dataset(&self, name: &str, data_type: DataTypeSpec, dims: u64) -> String {
        let request = DatasetCreateRequest {
            data_type,
            shape: Some(ShapeSpec::Dimensions(vec![dims])),
            maxdims: None,
            creation_properties: None,
            link: Some(LinkRequest {
                id: self.root.clone(),
                name: name.to_string(),
            }),
        };
        self.client.datasets().create_dataset(&self.domain, request).await
            .expect("Failed to create dataset")
            .id
    }

    async fn cleanup(self) {
        self.client.domains().delete_domain(&self.domain).await.ok();
    }
}

fn vlen_int32() -> DataTypeSpec {
    DataTypeSpec::vlen(DataTypeSpec::predefined("H5T_STD_I32LE"))
}

/// Name of a predefined type, looking through `{"class", "base"}` wrappers
fn predefined_name(spec: &DataTypeSpec) -> Option<&str> {
    match spec {
        DataTypeSpec::Predefined(name) => Some(name.as_str()),
        DataTypeSpec::Custom(_) => spec.base().and_then(predefined_name),
    }
}

fn as_array(value: &Value) -> &Vec<Value> {
    value.as_array().expect("expected a JSON array")
}

#[tokio::test]
async fn test_vlen_int_attribute() {
    let Some(live) = live_domain("create_vlen_attribute").await else { return };
    let (g1, _) = live.create_groups().await;

    live.put_attribute(&g1, "a1", vlen_int32(), 2, json!([[0, 1, 2], [0, 1, 2, 3]])).await;

    let attr = live.client.attributes().get_attribute(&live.domain, "groups", &g1, "a1").await
        .expect("Failed to read a1");
    let data_type = attr.data_type.expect("a1 should have a type");
    assert!(data_type.is_variable_length());
    assert_eq!(data_type.base().and_then(predefined_name), Some("H5T_STD_I32LE"));

    let value = attr.value.expect("a1 should have a value");
    let elements = as_array(&value);
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0], json!([0, 1, 2]));
    assert_eq!(elements[1], json!([0, 1, 2, 3]));

    live.cleanup().await;
}

#[tokio::test]
async fn test_vlen_objref_attribute() {
    let Some(live) = live_domain("create_vlen_objref_attribute").await else { return };
    let (g1, children) = live.create_groups().await;
    let refs: Vec<String> = children.iter().map(|id| format!("groups/{}", id)).collect();

    let data = json!([&refs[..1], &refs[..2], &refs[..3]]);
    live.put_attribute(&g1, "b1", DataTypeSpec::vlen(DataTypeSpec::object_reference()), 3, data).await;

    let value = live.attribute_value(&g1, "b1").await;
    let elements = as_array(&value);
    assert_eq!(elements.len(), 3);
    for (i, element) in elements.iter().enumerate() {
        let element = as_array(element);
        assert_eq!(element.len(), i + 1);
        // First element is always a ref to g1_1
        assert_eq!(live.referenced_name(&element[0]).await, json!("g1_1"));
    }

    live.cleanup().await;
}

#[tokio::test]
async fn test_compound_vlen_attribute() {
    let Some(live) = live_domain("create_compound_vlen_attribute").await else { return };
    let (g1, children) = live.create_groups().await;
    let refs: Vec<String> = children.iter().map(|id| format!("groups/{}", id)).collect();

    let compound = DataTypeSpec::compound(vec![
        CompoundField::new("refs", DataTypeSpec::vlen(DataTypeSpec::object_reference())),
        CompoundField::new("number", DataTypeSpec::predefined("H5T_STD_I32LE")),
    ]);
    let data = json!([[&refs[..2], 1], [&refs[..3], 2]]);
    live.put_attribute(&g1, "c1", compound, 2, data).await;

    let attr = live.client.attributes().get_attribute(&live.domain, "groups", &g1, "c1").await
        .expect("Failed to read c1");
    assert_eq!(attr.data_type.expect("c1 should have a type").fields().len(), 2);

    let value = attr.value.expect("c1 should have a value");
    let items = as_array(&value);
    assert_eq!(items.len(), 2);
    for (i, item) in items.iter().enumerate() {
        let item = as_array(item);
        assert_eq!(item.len(), 2);
        let refs = as_array(&item[0]);
        assert_eq!(refs.len(), i + 2);
        assert_eq!(live.referenced_name(&refs[0]).await, json!("g1_1"));
        assert_eq!(item[1], json!(i + 1));
    }

    live.cleanup().await;
}

#[tokio::test]
async fn test_vlen_int_dataset() {
    let Some(live) = live_domain("create_vlen_dset").await else { return };
    live.create_groups().await;

    let dset = live.create_dataset("dset1", vlen_int32(), 2).await;
    let data = json!([[0, 1, 2], [0, 1, 2, 3]]);
    live.client.datasets()
        .write_dataset_values(&live.domain, &dset, DatasetValueRequest { value: data.clone(), ..Default::default() })
        .await
        .expect("Failed to write dset1");

    let value = live.client.datasets().read_dataset_values_json(&live.domain, &dset, None).await
        .expect("Failed to read dset1");
    assert_eq!(value, data);

    live.cleanup().await;
}

#[tokio::test]
async fn test_vlen_str_attribute() {
    let Some(live) = live_domain("variable_len_str_attr").await else { return };

    let root = live.root.clone();
    live.put_attribute(&root, "a1", DataTypeSpec::vlen_string(CharSet::Ascii), 10, json!(WORDS)).await;

    let attr = live.client.attributes().get_attribute(&live.domain, "groups", &root, "a1").await
        .expect("Failed to read a1");
    assert!(attr.data_type.expect("a1 should have a type").is_variable_length());
    assert_eq!(attr.value, Some(json!(WORDS)));

    live.cleanup().await;
}

/// Shared body of the vlen string dataset cases
async fn check_vlen_str_dataset(live: &Live, name: &str, char_set: CharSet, words: &[&str]) {
    let dset = live.create_dataset(name, DataTypeSpec::vlen_string(char_set), 10).await;

    let info = live.client.datasets().get_dataset(&live.domain, &dset).await
        .expect("Failed to get dataset");
    let shape = info.shape.as_ref().expect("dataset should have a shape");
    assert_eq!(shape.dims.as_deref(), Some(&[10u64][..]));
    assert_eq!(shape.max_extent(), Some(&[10u64][..]));
    assert!(info.data_type.as_ref().expect("dataset should have a type").is_variable_length());
    // No user fill value; HSDS reports 0 or leaves it out
    if let Some(fill) = info.fill_value() {
        assert_eq!(fill, &json!(0), "unexpected fill value");
    }

    let root = live.client.groups().get_group(&live.domain, &live.root).await
        .expect("Failed to get root group");
    assert_eq!(root.link_count, Some(1), "/{} should be linked from the root", name);

    // Unwritten elements: HSDS reports its fill value, local HDF5 an empty string
    let first = live.client.datasets().read_dataset_values_json(&live.domain, &dset, Some("[0:1]")).await
        .expect("Failed to read element 0");
    let first = as_array(&first)[0].as_str().expect("element should be a string").to_string();
    assert!(first.is_empty() || first == "0", "unexpected null string {:?}", first);

    live.client.datasets()
        .write_dataset_values(&live.domain, &dset, DatasetValueRequest { value: json!(words), ..Default::default() })
        .await
        .expect("Failed to write words");
    let value = live.client.datasets().read_dataset_values_json(&live.domain, &dset, None).await
        .expect("Failed to read words");
    assert_eq!(value, json!(words));
}

#[tokio::test]
async fn test_vlen_str_dataset() {
    let Some(live) = live_domain("variable_len_str_dset").await else { return };
    check_vlen_str_dataset(&live, "variable_len_str_dset", CharSet::Ascii, &WORDS).await;
    live.cleanup().await;
}

#[tokio::test]
async fn test_vlen_unicode_dataset() {
    let Some(live) = live_domain("variable_len_unicode_dset").await else { return };
    check_vlen_str_dataset(&live, "variable_len_unicode_dset", CharSet::Utf8, &UNICODE_WORDS).await;
    live.cleanup().await;
}
