//! Bounds and eviction-policy parameters for the usage tracker.
//!
//! The tracker runs on end-user devices with no external pressure valve, so
//! every unbounded collection carries a cap. Each constant documents the
//! eviction policy it parameterizes; tune here, not at the call sites.
//!
//! The `#[validate]` derive macro requires literal values in attributes, so
//! string-field limits are duplicated there. Keep both in sync.

// === Event log ===

/// Maximum events kept in the persisted view of the event log.
///
/// The in-memory pending list is only drained by collector acknowledgment;
/// the persisted snapshot is truncated to the most recent 100 on every save
/// (FIFO: oldest fall off first). A restart therefore recovers at most this
/// many unacknowledged events.
pub const MAX_PERSISTED_EVENTS: usize = 100;

/// Pending-event count that triggers an opportunistic sync.
pub const SYNC_BATCH_THRESHOLD: usize = 10;

// === Usage aggregate ===

/// Maximum distinct recent search queries retained.
///
/// FIFO eviction: when a new distinct query arrives at capacity, the oldest
/// entry is dropped. Re-tracking an existing query is a no-op.
pub const MAX_RECENT_QUERIES: usize = 20;

/// Maximum visited-area clusters retained.
///
/// Least-visited eviction: when a new cluster would exceed this bound, the
/// cluster with the fewest visits is dropped to make room.
pub const MAX_VISITED_AREAS: usize = 10;

/// Cluster join tolerance in degrees.
///
/// A location joins an existing cluster when both latitude and longitude
/// differ from the cluster reference by strictly less than this value
/// (roughly a 1 km box at mid latitudes).
pub const AREA_TOLERANCE_DEG: f64 = 0.01;

// === String field limits (chars) ===

/// User ID max length. UUIDs=36, emails=~50, custom IDs up to 128.
pub const MAX_USER_ID_LEN: usize = 128;

/// Search query max length.
pub const MAX_QUERY_LEN: usize = 256;

/// Listing category max length.
pub const MAX_CATEGORY_LEN: usize = 100;

/// Marketplace item/listing ID max length.
pub const MAX_ITEM_ID_LEN: usize = 64;

/// Share channel name max length ("whatsapp", "copy_link", ...).
pub const MAX_SHARE_CHANNEL_LEN: usize = 32;
