diesel::table! {
    contributions (id) {
        id -> Int4,
        group_id -> Int4,
        user_id -> Int4,
        amount_cents -> Int8,
        date_contributed -> Timestamp,
        #[max_length = 50]
        payment_method -> Varchar,
        proof_of_payment_url -> Nullable<Text>,
        is_verified -> Bool,
    }
}

diesel::table! {
    group_members (id) {
        id -> Int4,
        user_id -> Int4,
        stokvel_group_id -> Int4,
        role -> Text,
        is_active -> Bool,
        joined_at -> Timestamp,
    }
}

diesel::table! {
    meeting_documents (id) {
        id -> Int4,
        meeting_id -> Int4,
        file_name -> Text,
        file_url -> Text,
        uploaded_at -> Timestamp,
    }
}

diesel::table! {
    meeting_users (meeting_id, user_id) {
        meeting_id -> Int4,
        user_id -> Int4,
        invite_status -> Text,
        attended -> Bool,
        response_status -> Nullable<Text>,
    }
}

diesel::table! {
    meetings (id) {
        id -> Int4,
        title -> Text,
        agenda -> Nullable<Text>,
        organizer_id -> Int4,
        start_datetime -> Timestamp,
        end_datetime -> Timestamp,
        created_at -> Timestamp,
        status -> Text,
        recurrence -> Text,
        recurrence_end_date -> Nullable<Timestamp>,
        #[max_length = 100]
        recurrence_group_id -> Nullable<Varchar>,
        location -> Nullable<Text>,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    notifications (id) {
        id -> Int4,
        user_id -> Int4,
        title -> Text,
        message -> Text,
        is_read -> Bool,
        created_at -> Timestamp,
    }
}

diesel::table! {
    payouts (id) {
        id -> Int4,
        group_id -> Int4,
        receiver_id -> Int4,
        amount_cents -> Int8,
        payout_date -> Timestamp,
        is_completed -> Bool,
    }
}

diesel::table! {
    stokvel_groups (id) {
        id -> Int4,
        #[max_length = 100]
        group_name -> Varchar,
        description -> Text,
        stokvel_type -> Text,
        monthly_contribution_cents -> Int8,
        created_by_user_id -> Int4,
        created_at -> Timestamp,
    }
}

diesel::table! {
    transactions (id) {
        id -> Int4,
        user_id -> Int4,
        transaction_type -> Text,
        amount_cents -> Int8,
        transaction_date -> Timestamp,
        reference -> Nullable<Text>,
    }
}

diesel::table! {
    users (id) {
        id -> Int4,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 100]
        surname -> Varchar,
        email -> Text,
        #[max_length = 15]
        phone_number -> Varchar,
        profile_image_url -> Nullable<Text>,
        language_preference -> Text,
        created_at -> Timestamp,
    }
}

diesel::joinable!(contributions -> stokvel_groups (group_id));
diesel::joinable!(contributions -> users (user_id));
diesel::joinable!(group_members -> stokvel_groups (stokvel_group_id));
diesel::joinable!(group_members -> users (user_id));
diesel::joinable!(meeting_documents -> meetings (meeting_id));
diesel::joinable!(meeting_users -> meetings (meeting_id));
diesel::joinable!(meeting_users -> users (user_id));
diesel::joinable!(meetings -> users (organizer_id));
diesel::joinable!(notifications -> users (user_id));
diesel::joinable!(payouts -> stokvel_groups (group_id));
diesel::joinable!(payouts -> users (receiver_id));
diesel::joinable!(stokvel_groups -> users (created_by_user_id));
diesel::joinable!(transactions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    contributions,
    group_members,
    meeting_documents,
    meeting_users,
    meetings,
    notifications,
    payouts,
    stokvel_groups,
    transactions,
    users,
);
