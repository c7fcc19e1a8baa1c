//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique, case-sensitive login name.
        username -> Varchar,
        /// bcrypt hash of the password.
        password_hash -> Text,
        email -> Nullable<Text>,
        phone -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Cars offered for rent. Managed outside this service.
    cars (id) {
        id -> Uuid,
        owner_id -> Uuid,
        make -> Varchar,
        model -> Varchar,
        /// Non-negative daily price in whole currency units.
        price_per_day -> Int4,
        /// False while a rental references the car.
        availability -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Active bookings; at most one per car (`rentals_car_id_key`).
    rentals (id) {
        id -> Uuid,
        renter_id -> Uuid,
        car_id -> Uuid,
        start_date -> Date,
        end_date -> Date,
        total_cost -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(cars -> users (owner_id));
diesel::joinable!(rentals -> cars (car_id));
diesel::joinable!(rentals -> users (renter_id));

diesel::allow_tables_to_appear_in_same_query!(users, cars, rentals);
