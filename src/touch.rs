use crate::{
    error::TouchError,
    path::DomainPath,
    storage::{Lookup, RemoteStorage},
};
use log::{debug, info};

/// Name of the root-group attribute written to bump `lastModified`
pub const TOUCH_ATTRIBUTE: &str = "hstouch";

/// What `touch` did to a domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    /// The domain did not exist and was created empty
    Created,
    /// The domain existed and its timestamp was refreshed
    Updated,
}

/// How a batch reacts to a failing domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Stop at the first failure
    #[default]
    FailFast,
    /// Report every failure and carry on with the remaining domains
    KeepGoing,
}

/// Per-domain results of a batch, in input order
#[derive(Debug, Default)]
pub struct TouchReport {
    pub results: Vec<(String, Result<TouchOutcome, TouchError>)>,
}

impl TouchReport {
    pub fn failures(&self) -> impl Iterator<Item = (&str, &TouchError)> {
        self.results
            .iter()
            .filter_map(|(d, r)| r.as_ref().err().map(|e| (d.as_str(), e)))
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Creates domains or refreshes their modification time
pub struct DomainToucher<S> {
    storage: S,
}

impl<S: RemoteStorage> DomainToucher<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Create `domain` if missing, otherwise rewrite its touch attribute.
    ///
    /// The parent folder must already exist. Nothing is retried.
    pub async fn touch(&self, domain: &str) -> Result<TouchOutcome, TouchError> {
        let domain = DomainPath::parse(domain)?;
        let parent = domain.parent()?;
        info!("Touching domain: {}", domain);

        match self.storage.open_folder(&parent).await {
            Ok(Lookup::Found(_folder)) => {}
            Ok(Lookup::NotFound) => return Err(TouchError::ParentNotFound { parent }),
            Err(e) => {
                return Err(match e.status() {
                    Some(401) => TouchError::Authorization {
                        domain: domain.to_string(),
                    },
                    Some(403) => TouchError::Permission {
                        domain: domain.to_string(),
                    },
                    _ => TouchError::unexpected(domain.as_str(), &e),
                })
            }
        }

        let existing = self
            .storage
            .open_file(domain.as_str())
            .await
            .map_err(|e| TouchError::unexpected(domain.as_str(), &e))?;

        match existing {
            Lookup::Found(file) => {
                let written = self.storage.set_root_attribute(&file, TOUCH_ATTRIBUTE, 1).await;
                let closed = self.storage.close(file).await;
                written
                    .and(closed)
                    .map_err(|e| TouchError::unexpected(domain.as_str(), &e))?;
                info!("Updated timestamp of {}", domain);
                Ok(TouchOutcome::Updated)
            }
            Lookup::NotFound => {
                let file = self
                    .storage
                    .create_file(domain.as_str())
                    .await
                    .map_err(|e| TouchError::unexpected(domain.as_str(), &e))?;
                self.storage
                    .close(file)
                    .await
                    .map_err(|e| TouchError::unexpected(domain.as_str(), &e))?;
                info!("Created {}", domain);
                Ok(TouchOutcome::Created)
            }
        }
    }

    /// Touch each domain in order
    pub async fn touch_all<I>(&self, domains: I, policy: BatchPolicy) -> TouchReport
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut report = TouchReport::default();
        for domain in domains {
            let domain = domain.as_ref();
            let result = self.touch(domain).await;
            let failed = result.is_err();
            if let Err(e) = &result {
                debug!("Touch of {} failed: {}", domain, e);
            }
            report.results.push((domain.to_string(), result));
            if failed && policy == BatchPolicy::FailFast {
                break;
            }
        }
        report
    }
}
