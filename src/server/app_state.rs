use crate::api::Api;

pub struct AppState {
    pub api: Api,
}

impl AppState {
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}
