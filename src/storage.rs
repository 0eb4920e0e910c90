//! Remote storage seam used by the domain toucher.
//!
//! [`RemoteStorage`] is the small set of calls `hstouch` needs from the
//! service. Lookups report a missing path as [`Lookup::NotFound`] rather
//! than an error, so callers can branch on it with a plain `match`.

use crate::{
    client::HsdsClient,
    error::{HsdsError, HsdsResult},
    models::{AttributeCreateRequest, DataTypeSpec},
};
use log::debug;

/// Result of opening a path that may not exist
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    /// Turn 404/410 into `NotFound`, pass every other error through
    pub fn from_result(result: HsdsResult<T>) -> HsdsResult<Self> {
        match result {
            Ok(value) => Ok(Lookup::Found(value)),
            Err(e) if e.is_not_found() => Ok(Lookup::NotFound),
            Err(e) => Err(e),
        }
    }
}

/// Open folder
#[derive(Debug, Clone)]
pub struct FolderHandle {
    pub path: String,
    pub owner: Option<String>,
}

/// Open domain (file), identified by its root group
#[derive(Debug)]
pub struct FileHandle {
    pub path: String,
    pub root_id: String,
}

/// Storage operations needed to create or touch a domain
#[async_trait::async_trait]
pub trait RemoteStorage: Send + Sync {
    /// Open `path` as a folder
    async fn open_folder(&self, path: &str) -> HsdsResult<Lookup<FolderHandle>>;

    /// Open an existing domain for reading
    async fn open_file(&self, path: &str) -> HsdsResult<Lookup<FileHandle>>;

    /// Create an empty domain, failing if it already exists
    async fn create_file(&self, path: &str) -> HsdsResult<FileHandle>;

    /// Create or overwrite an integer attribute on the root group
    async fn set_root_attribute(&self, file: &FileHandle, name: &str, value: i64) -> HsdsResult<()>;

    /// Release a handle
    async fn close(&self, file: FileHandle) -> HsdsResult<()>;
}

/// [`RemoteStorage`] backed by the HSDS REST API
#[derive(Clone)]
pub struct HsdsStorage {
    client: HsdsClient,
}

impl HsdsStorage {
    pub fn new(client: HsdsClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &HsdsClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl RemoteStorage for HsdsStorage {
    async fn open_folder(&self, path: &str) -> HsdsResult<Lookup<FolderHandle>> {
        let lookup = Lookup::from_result(self.client.domains().get_folder(path).await)?;
        Ok(match lookup {
            Lookup::Found(domain) => {
                if !domain.is_folder() {
                    debug!("{} is a domain, not a folder", path);
                }
                Lookup::Found(FolderHandle {
                    path: path.to_string(),
                    owner: domain.owner,
                })
            }
            Lookup::NotFound => Lookup::NotFound,
        })
    }

    async fn open_file(&self, path: &str) -> HsdsResult<Lookup<FileHandle>> {
        let lookup = Lookup::from_result(self.client.domains().get_domain(path).await)?;
        match lookup {
            Lookup::Found(domain) => match domain.root {
                Some(root_id) => Ok(Lookup::Found(FileHandle {
                    path: path.to_string(),
                    root_id,
                })),
                None => Err(HsdsError::invalid_param(format!("{} is a folder", path))),
            },
            Lookup::NotFound => Ok(Lookup::NotFound),
        }
    }

    async fn create_file(&self, path: &str) -> HsdsResult<FileHandle> {
        let domain = self.client.domains().create_domain(path, None).await?;
        let root_id = domain.root.ok_or_else(|| {
            HsdsError::InvalidResponse(format!("created domain {} has no root group", path))
        })?;
        Ok(FileHandle {
            path: path.to_string(),
            root_id,
        })
    }

    async fn set_root_attribute(&self, file: &FileHandle, name: &str, value: i64) -> HsdsResult<()> {
        let request = AttributeCreateRequest {
            data_type: DataTypeSpec::predefined("H5T_STD_I64LE"),
            shape: None,
            value: value.into(),
        };
        self.client
            .attributes()
            .put_attribute(&file.path, "groups", &file.root_id, name, &request, true)
            .await?;
        Ok(())
    }

    async fn close(&self, file: FileHandle) -> HsdsResult<()> {
        // Writes are applied per request; nothing is buffered client side.
        debug!("Closing {}", file.path);
        Ok(())
    }
}
