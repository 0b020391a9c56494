//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional task description.
        #[max_length = 500]
        description -> Nullable<Varchar>,
        /// Lifecycle status, stored as the enum name.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp (server-local).
        created_at -> Timestamp,
        /// Last mutation timestamp (server-local).
        updated_at -> Timestamp,
    }
}
