use serde::{Deserialize, Serialize};

/// Domain information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub root: Option<String>,
    pub owner: Option<String>,
    pub class: Option<DomainClass>,
    pub created: Option<f64>,
    #[serde(rename = "lastModified")]
    pub last_modified: Option<f64>,
    pub hrefs: Option<Vec<Href>>,
}

impl Domain {
    /// Folders carry no root group
    pub fn is_folder(&self) -> bool {
        matches!(self.class, Some(DomainClass::Folder)) || self.root.is_none()
    }
}

/// Domain class enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainClass {
    Domain,
    Folder,
}

/// Reference link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Href {
    pub href: String,
    pub rel: String,
}

/// Group information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub root: Option<String>,
    pub domain: Option<String>,
    pub created: Option<f64>,
    #[serde(rename = "lastModified")]
    pub last_modified: Option<f64>,
    #[serde(rename = "attributeCount")]
    pub attribute_count: Option<u32>,
    #[serde(rename = "linkCount")]
    pub link_count: Option<u32>,
}

/// Dataset information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub root: Option<String>,
    pub domain: Option<String>,
    pub created: Option<f64>,
    #[serde(rename = "lastModified")]
    pub last_modified: Option<f64>,
    #[serde(rename = "attributeCount")]
    pub attribute_count: Option<u32>,
    #[serde(rename = "type")]
    pub data_type: Option<DataTypeSpec>,
    pub shape: Option<Shape>,
    pub layout: Option<serde_json::Value>,
    #[serde(rename = "creationProperties")]
    pub creation_properties: Option<serde_json::Value>,
}

impl Dataset {
    /// Fill value recorded in the creation properties, if any
    pub fn fill_value(&self) -> Option<&serde_json::Value> {
        self.creation_properties.as_ref()?.get("fillValue")
    }
}

/// Attribute information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub data_type: Option<DataTypeSpec>,
    pub shape: Option<Shape>,
    pub value: Option<serde_json::Value>,
    pub created: Option<f64>,
    #[serde(rename = "lastModified")]
    pub last_modified: Option<f64>,
}

/// Character set of an HDF5 string type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharSet {
    Ascii,
    Utf8,
}

impl CharSet {
    pub fn as_str(self) -> &'static str {
        match self {
            CharSet::Ascii => "H5T_CSET_ASCII",
            CharSet::Utf8 => "H5T_CSET_UTF8",
        }
    }
}

/// Structured HDF5 type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataType {
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<Box<DataTypeSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<CompoundField>>,
    #[serde(rename = "charSet", skip_serializing_if = "Option::is_none")]
    pub char_set: Option<String>,
    #[serde(rename = "strPad", skip_serializing_if = "Option::is_none")]
    pub str_pad: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<serde_json::Value>,
}

impl DataType {
    fn of_class(class: &str) -> Self {
        Self {
            class: class.to_string(),
            base: None,
            fields: None,
            char_set: None,
            str_pad: None,
            length: None,
        }
    }
}

/// Member of a compound type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundField {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataTypeSpec,
}

impl CompoundField {
    pub fn new(name: impl Into<String>, data_type: DataTypeSpec) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Data type specification (can be string or object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataTypeSpec {
    Predefined(String),
    Custom(DataType),
}

impl DataTypeSpec {
    pub fn predefined(name: impl Into<String>) -> Self {
        Self::Predefined(name.into())
    }

    /// Variable-length sequence of `base`
    pub fn vlen(base: DataTypeSpec) -> Self {
        let mut t = DataType::of_class("H5T_VLEN");
        t.base = Some(Box::new(base));
        Self::Custom(t)
    }

    /// Variable-length, null-terminated string
    pub fn vlen_string(char_set: CharSet) -> Self {
        let mut t = DataType::of_class("H5T_STRING");
        t.char_set = Some(char_set.as_str().to_string());
        t.str_pad = Some("H5T_STR_NULLTERM".to_string());
        t.length = Some(serde_json::Value::from("H5T_VARIABLE"));
        Self::Custom(t)
    }

    /// Object reference
    pub fn object_reference() -> Self {
        let mut t = DataType::of_class("H5T_REFERENCE");
        t.base = Some(Box::new(Self::predefined("H5T_STD_REF_OBJ")));
        Self::Custom(t)
    }

    pub fn compound(fields: Vec<CompoundField>) -> Self {
        let mut t = DataType::of_class("H5T_COMPOUND");
        t.fields = Some(fields);
        Self::Custom(t)
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            Self::Predefined(_) => None,
            Self::Custom(t) => Some(&t.class),
        }
    }

    /// True for vlen sequences and variable-length strings
    pub fn is_variable_length(&self) -> bool {
        match self {
            Self::Predefined(_) => false,
            Self::Custom(t) => {
                t.class == "H5T_VLEN"
                    || (t.class == "H5T_STRING"
                        && t.length.as_ref().and_then(|l| l.as_str()) == Some("H5T_VARIABLE"))
            }
        }
    }

    /// Base type of a vlen or reference type
    pub fn base(&self) -> Option<&DataTypeSpec> {
        match self {
            Self::Custom(t) => t.base.as_deref(),
            Self::Predefined(_) => None,
        }
    }

    /// Compound members, empty for any other class
    pub fn fields(&self) -> &[CompoundField] {
        match self {
            Self::Custom(DataType { fields: Some(f), .. }) => f.as_slice(),
            _ => &[],
        }
    }
}

/// Shape information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub class: String,
    pub dims: Option<Vec<u64>>,
    pub maxdims: Option<Vec<u64>>,
}

impl Shape {
    /// Maximum extent; fixed-size shapes report their dims
    pub fn max_extent(&self) -> Option<&[u64]> {
        self.maxdims.as_deref().or(self.dims.as_deref())
    }
}

/// Dataset value request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetValueRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<u64>>,
    pub value: serde_json::Value,
}

/// Domain creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainCreateRequest {
    pub folder: Option<u8>, // 0 or 1
}

/// Group creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCreateRequest {
    pub link: Option<LinkRequest>,
}

/// Dataset creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetCreateRequest {
    #[serde(rename = "type")]
    pub data_type: DataTypeSpec,
    pub shape: Option<ShapeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxdims: Option<Vec<u64>>,
    #[serde(rename = "creationProperties", skip_serializing_if = "Option::is_none")]
    pub creation_properties: Option<serde_json::Value>,
    pub link: Option<LinkRequest>,
}

/// Attribute creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeCreateRequest {
    #[serde(rename = "type")]
    pub data_type: DataTypeSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeSpec>,
    pub value: serde_json::Value,
}

/// Shape specification (can be array or null)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeSpec {
    Dimensions(Vec<u64>),
    Null(String), // "H5S_NULL"
}

/// Link creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRequest {
    pub id: String,
    pub name: String,
}

/// Error response from API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
    pub code: Option<u16>,
}

/// Parse an object reference value such as `groups/g-1234` into
/// its collection and id
pub fn parse_object_ref(reference: &str) -> Option<(&str, &str)> {
    let (collection, id) = reference.split_once('/')?;
    match collection {
        "groups" | "datasets" | "datatypes" if !id.is_empty() => Some((collection, id)),
        _ => None,
    }
}
