pub mod orgs;
pub mod users;
