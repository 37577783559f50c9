use std::{ops::Deref, sync::Arc};

///
/// Struct with user information.
///
/// To make sure cloning does not take too long
/// all fields are stored in InnerUser behind an Arc.
///
/// InnerUser fields are accessible thanks to Deref trait.
///
#[derive(Clone)]
pub struct User {
    inner: Arc<InnerUser>,
}

///
/// User information retrieved from session cookie.
///
pub struct InnerUser {
    pub id: String,
    pub name: Option<String>,
}

impl User {
    pub fn new(id: String, name: Option<String>) -> Self {
        Self {
            inner: Arc::new(InnerUser { id, name }),
        }
    }
}

impl InnerUser {
    ///
    /// Name shown to the user, falls back to id
    /// when identity provider didn't share user's name
    ///
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl Deref for User {
    type Target = InnerUser;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
