//! Removal of artifacts left behind by a process that never closed its listener.

use tracing::debug;

use crate::{EndpointConfig, LocalnetError, Transport, naming};

/// Removes the artifact `T` would publish for `name`.
///
/// Safe to call speculatively: a missing artifact is success. Does not check
/// whether a live listener still owns the name. For sockets, a non-socket
/// file at the path is reported as occupied and left in place.
pub fn cleanup_on<T: Transport>(name: &str, cfg: &EndpointConfig) -> Result<(), LocalnetError> {
    let name = naming::validate_name(name)?;
    let path = T::artifact_path(name, cfg)?;
    if T::remove(&path)? {
        debug!(name, path = %path.display(), "removed stale artifact");
    }
    Ok(())
}
