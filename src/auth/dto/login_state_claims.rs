use serde::{Deserialize, Serialize};

///
/// Claims kept in a cookie between redirect to identity provider
/// and the callback.
///
#[derive(Serialize, Deserialize)]
pub struct LoginStateClaims {
    /// Random value that must match `state` query parameter of the callback
    pub state: String,
    pub return_to: String,
    pub aud: String,
    pub exp: i64,
}
