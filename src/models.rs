use serde::{Deserialize, Serialize};

/// Claims carried by the bearer tokens our identity provider issues. This
/// service only verifies them; it never checks credentials itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: u8, // role id
    pub exp: usize,
    pub jti: String,

    /// Present only for student sessions
    pub student_id: Option<String>,
}
