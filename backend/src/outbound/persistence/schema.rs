//! Diesel table definitions. Keep in sync with `backend/migrations`.

diesel::table! {
    courses (id) {
        id -> Uuid,
        title -> Text,
        description -> Text,
        category -> Text,
        level -> Nullable<Text>,
        language -> Nullable<Text>,
        price -> Float8,
        teacher_id -> Uuid,
        teacher_name -> Text,
        teacher_email -> Text,
        #[max_length = 32]
        status -> Varchar,
        rejection_feedback -> Nullable<Text>,
        verifier_id -> Nullable<Uuid>,
        verified_at -> Nullable<Timestamptz>,
        revision -> Int4,
        submitted_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    accounts (id) {
        id -> Uuid,
        #[max_length = 64]
        username -> Varchar,
        display_name -> Text,
        email -> Text,
        #[max_length = 16]
        role -> Varchar,
    }
}
