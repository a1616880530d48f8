/*
 * Responsibility
 * - GET /orgs/{org_id}       : the caller's membership in that org (404 when not a member)
 * - GET /orgs/{org_id}/admin : only for callers that are at least Admin there (403 otherwise)
 */
use axum::{Json, extract::Path};

use crate::api::v1::dto::orgs::OrgAdminResponse;
use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::user::OrgMembership;

pub const ADMIN_ROLE: &str = "Admin";

pub async fn get_org(
    AuthCtx(user): AuthCtx,
    Path(org_id): Path<String>,
) -> Result<Json<OrgMembership>, AppError> {
    user.get_org(&org_id)
        .cloned()
        .map(Json)
        .ok_or(AppError::not_found("org"))
}

pub async fn org_admin(
    AuthCtx(user): AuthCtx,
    Path(org_id): Path<String>,
) -> Result<Json<OrgAdminResponse>, AppError> {
    if !user.is_at_least_role_in_org(&org_id, ADMIN_ROLE) {
        tracing::warn!(
            user_id = %user.user_id,
            org_id = %org_id,
            "access denied: {ADMIN_ROLE} role required"
        );
        return Err(AppError::Forbidden);
    }

    let org = user.get_org(&org_id).ok_or(AppError::Forbidden)?;

    Ok(Json(OrgAdminResponse {
        org_id: org.org_id.clone(),
        org_name: org.org_name.clone(),
        user_role: org.user_role.clone(),
        permissions: org
            .permissions
            .as_ref()
            .map(|perms| perms.iter().cloned().collect()),
    }))
}
