use crate::errors::{EditResult, GeometryEditError};
use crate::geometry::Geometry;
use crate::index::GeometryIndexService;
use crate::session::EditSession;
use crate::session_config::EditSessionConfig;

/// Builder for [`EditSession`].
///
/// Setter failures are held back and reported by [`open`](Self::open).
///
/// ```rust
/// use geometry_edit::{EditSession, Geometry, GeometryType};
///
/// let session = EditSession::builder()
///     .max_history(20)
///     .validate_after_edit(true)
///     .open(Geometry::empty(GeometryType::Polygon))
///     .unwrap();
/// assert_eq!(session.config().max_history(), 20);
/// ```
#[derive(Default)]
pub struct EditSessionBuilder {
    error: Option<GeometryEditError>,
    config: EditSessionConfig,
    service: GeometryIndexService,
}

impl EditSessionBuilder {
    pub fn new() -> Self {
        EditSessionBuilder {
            error: None,
            config: EditSessionConfig::new(),
            service: GeometryIndexService::default(),
        }
    }

    pub fn max_history(mut self, max_history: usize) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_max_history(max_history) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn validate_after_edit(mut self, validate: bool) -> Self {
        self.config.set_validate_after_edit(validate);
        self
    }

    /// Replaces the default index service.
    pub fn service(mut self, service: GeometryIndexService) -> Self {
        self.service = service;
        self
    }

    /// Opens a session editing `geometry`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a setter.
    pub fn open(self, geometry: Geometry) -> EditResult<EditSession> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(EditSession::open(self.config, self.service, geometry))
    }
}
