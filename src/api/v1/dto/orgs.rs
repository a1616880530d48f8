use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OrgAdminResponse {
    pub org_id: String,
    pub org_name: String,
    pub user_role: String,
    // None when the token carried no permission data for this org
    pub permissions: Option<Vec<String>>,
}
