/// 认证与授权
/// Authentication and authorization

pub mod extractor;
pub mod password;
pub mod permission;
pub mod session;
pub mod token;

pub use extractor::{ApiUser, SessionUser};
pub use permission::{Permission, PermissionSet};
pub use token::{TokenError, TokenService};
