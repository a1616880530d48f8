/*!
 * Authentication context extractors
 *
 * Responsibility:
 * - Hand the `AuthContext` stored by the access middleware to handlers
 * - Keep axum wiring in core; the context type itself lives in `crate::user`
 *
 * Public API:
 * - AuthCtx       (required; 401 when absent)
 * - MaybeAuthCtx  (optional)
 */

mod core;

pub use self::core::{AuthCtx, MaybeAuthCtx};
