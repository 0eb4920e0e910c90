/*
 * hstouch - create HSDS domains or refresh their modification time
 */

// Internal modules
mod client;
pub mod models;  // Make models public
mod apis;
mod error;
mod auth;
pub mod config;
pub mod path;
pub mod storage;
pub mod touch;

// Re-export public types and interfaces
pub use client::HsdsClient;
pub use apis::*;
pub use error::{ConfigError, HsdsError, HsdsResult, TouchError};
pub use auth::{Authentication, BasicAuth, NoAuth};
pub use config::Config;
pub use path::DomainPath;
pub use storage::{FileHandle, FolderHandle, HsdsStorage, Lookup, RemoteStorage};
pub use touch::{BatchPolicy, DomainToucher, TouchOutcome, TouchReport, TOUCH_ATTRIBUTE};

// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        HsdsClient,
        BasicAuth, NoAuth,
        HsdsError, HsdsResult, TouchError,
        Config, DomainToucher, HsdsStorage, TouchOutcome, BatchPolicy,
        // Common model types
        models::{Domain, Group, Dataset, Attribute, DataTypeSpec, CharSet, CompoundField, ShapeSpec},
    };
}
