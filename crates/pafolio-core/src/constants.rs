//! Shared constants for intake limits, settle timing, and defaults.

/// Hard ceiling on the encoded payload length, in characters.
///
/// The persistence collaborator stores the payload in a single spreadsheet
/// cell with a 50,000-character limit. Base64 expands input by ~4/3, so a
/// ceiling of 45,000 encoded characters (~33 KB of raw bytes) leaves headroom
/// for the rest of the row. Strictly greater than the ceiling is rejected.
pub const MAX_ENCODED_PAYLOAD_CHARS: usize = 45_000;

/// Settle delay after a create before an authoritative refresh is reliable.
/// The collaborator's read path lags its write path by up to a few seconds.
pub const DEFAULT_SETTLE_CREATE_MS: u64 = 2_000;

/// Settle delay after a delete. Deletes lag longer than creates in practice.
pub const DEFAULT_SETTLE_DELETE_MS: u64 = 3_500;

/// Caption stored when the user submits without one.
pub const DEFAULT_CAPTION: &str = "No description provided";

/// File name stem for the local fallback store.
pub const LOCAL_STORE_FILE: &str = "pafolio-store.json";
