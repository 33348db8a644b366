use serde::Serialize;

/// All database primary keys are SQLite INTEGER rowids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Who wrote a version.
///
/// There is no identity system yet, so every edit made through the web
/// surface is attributed to [`Author::Anonymous`]. It is persisted as
/// `user_id = 0`; seed data uses real-looking ids to simulate a history with
/// several contributors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Author {
    Anonymous,
    User(DbId),
}

impl Author {
    /// Stored `user_id` value for the anonymous author.
    pub const ANONYMOUS_ID: DbId = 0;

    /// Value written to the `versions.user_id` column.
    pub fn user_id(self) -> DbId {
        match self {
            Author::Anonymous => Self::ANONYMOUS_ID,
            Author::User(id) => id,
        }
    }

    /// Interpret a stored `versions.user_id` value.
    pub fn from_user_id(user_id: DbId) -> Self {
        if user_id == Self::ANONYMOUS_ID {
            Author::Anonymous
        } else {
            Author::User(user_id)
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Author::Anonymous => f.write_str("anonymous"),
            Author::User(id) => write!(f, "user #{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_maps_to_zero() {
        assert_eq!(Author::Anonymous.user_id(), 0);
        assert_eq!(Author::from_user_id(0), Author::Anonymous);
    }

    #[test]
    fn user_ids_survive_storage() {
        assert_eq!(Author::from_user_id(Author::User(3).user_id()), Author::User(3));
    }

    #[test]
    fn display_names() {
        assert_eq!(Author::Anonymous.to_string(), "anonymous");
        assert_eq!(Author::User(2).to_string(), "user #2");
    }
}
