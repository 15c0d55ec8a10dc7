use serde::Deserialize;

/// A user record as served by the remote collection.
///
/// # Decoding
/// Decoding is strict: a record missing any field, or carrying a field of
/// the wrong type, fails the whole load instead of substituting a default.
/// See [`RestCollection`](crate::fetch::RestCollection) for where decoding
/// happens.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Arguments
    /// * `id` - Server-assigned identifier
    /// * `name` - User's display name
    /// * `email` - User's email address
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}
