//! Device location seam.

use async_trait::async_trait;

use tracker_core::GeoPoint;

/// Permission-gated device location provider.
///
/// Returns `None` when permission is denied or no fix is available; the
/// tracker simply records events without a location snapshot then.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current(&self) -> Option<GeoPoint>;
}

/// Fixed location, for demos and tests.
pub struct FixedLocation(pub GeoPoint);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current(&self) -> Option<GeoPoint> {
        Some(self.0)
    }
}

/// Always-denied provider, modeling a user who declined the permission.
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn current(&self) -> Option<GeoPoint> {
        None
    }
}
