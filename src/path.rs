use crate::error::TouchError;
use std::fmt;

/// Validated domain path such as `/home/user/file.h5`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPath(String);

impl DomainPath {
    /// Check the leading/trailing slash rules without touching the network
    pub fn parse(domain: &str) -> Result<Self, TouchError> {
        if !domain.starts_with('/') {
            return Err(TouchError::InvalidDomain {
                domain: domain.to_string(),
                reason: "must start with a slash",
            });
        }
        if domain.ends_with('/') {
            return Err(TouchError::InvalidDomain {
                domain: domain.to_string(),
                reason: "can not end with slash",
            });
        }
        Ok(Self(domain.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parent folder, always ending in `/`
    ///
    /// Fails for domains directly under the root, which can't be created.
    pub fn parent(&self) -> Result<String, TouchError> {
        let parent = dirname(&self.0);
        if parent.len() < 2 {
            return Err(TouchError::TopLevelDomain {
                domain: self.0.clone(),
            });
        }
        let mut parent = parent.to_string();
        if !parent.ends_with('/') {
            parent.push('/');
        }
        Ok(parent)
    }
}

impl fmt::Display for DomainPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// POSIX dirname: repeated separators before the last component collapse,
// a head made only of slashes is kept as is.
fn dirname(path: &str) -> &str {
    let split = path.rfind('/').map_or(0, |i| i + 1);
    let head = &path[..split];
    if head.is_empty() || head.bytes().all(|b| b == b'/') {
        head
    } else {
        head.trim_end_matches('/')
    }
}
