table! {
    analyses (id) {
        id -> Int4,
        video_id -> Int4,
        frames -> Array<Text>,
        ocr_text -> Array<Text>,
        features -> Array<Text>,
        user_flow -> Array<Text>,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        email -> Varchar,
        password -> Varchar,
        is_verified -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    verifications (id) {
        id -> Int4,
        user_id -> Int4,
        code -> Varchar,
        expires_at -> Timestamp,
        created_at -> Timestamp,
    }
}

table! {
    videos (id) {
        id -> Int4,
        user_id -> Int4,
        filename -> Text,
        status -> Varchar,
        prd_document -> Nullable<Text>,
        business_plan -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

joinable!(analyses -> videos (video_id));
joinable!(verifications -> users (user_id));
joinable!(videos -> users (user_id));

allow_tables_to_appear_in_same_query!(
    analyses,
    users,
    verifications,
    videos,
);
