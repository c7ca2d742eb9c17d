use serde::{Deserialize, Serialize};

pub mod get_calendar_feed {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct QueryParams {
        pub token: String,
    }
}

pub mod get_calendar_token {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub token: String,
        pub feed_url: String,
    }
}

pub mod regenerate_calendar_token {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub token: String,
        pub feed_url: String,
    }
}
