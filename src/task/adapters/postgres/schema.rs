//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    task (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Trimmed task title, 1 to 255 characters.
        title -> Text,
        /// Trimmed, non-empty task description.
        description -> Text,
        /// One-way completion flag.
        is_completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
