//! Panic messages used across the workspace.
//!
//! Contracts abort by panicking; the host turns the panic into a failed
//! transaction and discards every write made before it. Gateways, the ledger
//! and the tests all match on these strings.

// ── Validation ──────────────────────────────────────────────────────
pub const LENGTH_MISMATCH: &str = "length mismatch";
pub const INVALID_SIGNATURE: &str = "invalid signature";
pub const NEGATIVE_AMOUNT: &str = "amount must be non-negative";

// ── Expiry ──────────────────────────────────────────────────────────
pub const SIGNATURE_EXPIRED: &str = "signature expired";

// ── Authorization ───────────────────────────────────────────────────
pub const UNAUTHORIZED: &str = "unauthorized";
pub const MISSING_ROLE: &str = "caller lacks required role";

// ── State ───────────────────────────────────────────────────────────
pub const ALREADY_INITIALIZED: &str = "already initialized";
pub const NOT_INITIALIZED: &str = "not initialized";
pub const INVALID_ID: &str = "invalid id";
pub const NOT_ASSIGNED: &str = "not assigned";
pub const ALREADY_ISSUED: &str = "already issued";
pub const ALREADY_ASSIGNED: &str = "already assigned";
pub const NOT_OWNED: &str = "not owned";
pub const ATTRIBUTE_NOT_SUPPORTED: &str = "attribute not supported";
pub const ATTRIBUTE_ALREADY_ADDED: &str = "attribute already added";
pub const ATTRIBUTE_NOT_ADDED: &str = "attribute not added";

// ── Payment ─────────────────────────────────────────────────────────
pub const INVALID_PAYMENT: &str = "invalid payment";
