//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-form task description.
        description -> Text,
        /// Task progress status.
        #[max_length = 50]
        status -> Varchar,
    }
}
