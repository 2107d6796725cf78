//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records owned by the lifecycle engine.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// User who opened the task.
        creator_id -> Int8,
        /// User responsible for the task.
        assigned_user_id -> Nullable<Int8>,
        /// Task lifecycle status.
        #[max_length = 20]
        task_status -> Varchar,
        /// Server-assigned creation date.
        create_date -> Date,
        /// Completion deadline.
        deadline_date -> Nullable<Date>,
        /// Priority classification.
        #[max_length = 20]
        priority -> Varchar,
        /// Completion timestamp, set only while the task is done.
        done_at -> Nullable<Timestamptz>,
    }
}
