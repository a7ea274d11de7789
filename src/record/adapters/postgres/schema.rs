//! Diesel schema for record persistence.

diesel::table! {
    /// Record rows.
    records (id) {
        /// Store-assigned record identifier.
        id -> Int8,
        /// Record title.
        #[max_length = 75]
        title -> Varchar,
        /// Optional free-form details.
        #[max_length = 500]
        details -> Nullable<Varchar>,
        /// Completion flag.
        is_done -> Bool,
        /// Optional due date.
        record_date -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Modification timestamp, null until the first update.
        updated_at -> Nullable<Timestamptz>,
    }
}
