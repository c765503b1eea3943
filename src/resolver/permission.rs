//! PermissionProbe trait — optional permission queries before clipboard
//! access.

use std::fmt;

use async_trait::async_trait;

use super::ResolverError;

/// Clipboard permissions that can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionName {
    ClipboardRead,
    ClipboardWrite,
}

impl PermissionName {
    /// Permissions API name.
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionName::ClipboardRead => "clipboard-read",
            PermissionName::ClipboardWrite => "clipboard-write",
        }
    }
}

impl fmt::Display for PermissionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permission query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionDescriptor {
    pub name: PermissionName,
    /// Whether the operation is asked for outside of a user gesture.
    pub allow_without_gesture: bool,
}

impl PermissionDescriptor {
    /// Descriptor for `name` that does not ask for gesture-free access.
    pub fn new(name: PermissionName) -> Self {
        Self {
            name,
            allow_without_gesture: false,
        }
    }
}

/// Answer to a permission query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
    /// The host would ask the user.
    Prompt,
    /// No answer could be obtained (probe missing or failed).
    Unknown,
}

impl PermissionState {
    /// Only an explicit denial blocks an operation.
    pub fn allows(self) -> bool {
        self != PermissionState::Denied
    }
}

/// Answers permission queries for clipboard operations.
#[async_trait]
pub trait PermissionProbe: Send + Sync {
    async fn query(
        &self,
        descriptor: PermissionDescriptor,
    ) -> Result<PermissionState, ResolverError>;
}

/// Probe with a fixed answer per permission.
#[derive(Debug, Clone, Copy)]
pub struct StaticPermissions {
    pub read: PermissionState,
    pub write: PermissionState,
}

impl StaticPermissions {
    /// Grant both read and write.
    pub fn granted() -> Self {
        Self {
            read: PermissionState::Granted,
            write: PermissionState::Granted,
        }
    }

    pub fn deny_read(mut self) -> Self {
        self.read = PermissionState::Denied;
        self
    }

    pub fn deny_write(mut self) -> Self {
        self.write = PermissionState::Denied;
        self
    }
}

#[async_trait]
impl PermissionProbe for StaticPermissions {
    async fn query(
        &self,
        descriptor: PermissionDescriptor,
    ) -> Result<PermissionState, ResolverError> {
        Ok(match descriptor.name {
            PermissionName::ClipboardRead => self.read,
            PermissionName::ClipboardWrite => self.write,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_denied_blocks() {
        assert!(PermissionState::Granted.allows());
        assert!(PermissionState::Prompt.allows());
        assert!(PermissionState::Unknown.allows());
        assert!(!PermissionState::Denied.allows());
    }

    #[test]
    fn descriptor_defaults_to_gesture_bound() {
        let d = PermissionDescriptor::new(PermissionName::ClipboardWrite);
        assert!(!d.allow_without_gesture);
        assert_eq!(d.name.as_str(), "clipboard-write");
    }

    #[tokio::test]
    async fn static_permissions_answer_per_name() {
        let probe = StaticPermissions::granted().deny_write();
        let read = probe
            .query(PermissionDescriptor::new(PermissionName::ClipboardRead))
            .await
            .unwrap();
        let write = probe
            .query(PermissionDescriptor::new(PermissionName::ClipboardWrite))
            .await
            .unwrap();
        assert_eq!(read, PermissionState::Granted);
        assert_eq!(write, PermissionState::Denied);
    }
}
