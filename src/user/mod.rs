/*!
 * Claims-derived user model
 *
 * Responsibility:
 * - Turn the flat claim bag of a verified access token into an `AuthContext`
 * - Answer role / permission questions per organization
 *
 * Public API:
 * - ClaimSet, ClaimsError
 * - AuthContext
 * - OrgMembership
 * - LoginMethod
 */

mod claims;
mod context;
mod login_method;
mod org;

pub use claims::{ClaimSet, ClaimsError, EMAIL_ALIAS_CLAIM};
pub use context::AuthContext;
pub use login_method::LoginMethod;
pub use org::{MULTI_ROLE, OrgMembership, SINGLE_ROLE_IN_HIERARCHY};
