//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` and `username` carry unique constraints
    /// (`users_email_key`, `users_username_key`).
    users (id) {
        id -> Uuid,
        email -> Varchar,
        username -> Varchar,
        password_hash -> Varchar,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Calculation history. `operation` holds the canonical tag and is
    /// restricted by a check constraint.
    calculations (id) {
        id -> Int8,
        a -> Float8,
        b -> Float8,
        operation -> Varchar,
        result -> Float8,
        user_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(calculations -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(calculations, users);
