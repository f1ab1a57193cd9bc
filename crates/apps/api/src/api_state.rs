use app_state::AppSettings;
use axum::extract::FromRef;
use common_services::api::analysis::service::AnalysisService;

#[derive(Clone)]
pub struct ApiContext {
    pub service: AnalysisService,
    pub settings: AppSettings,
}

impl FromRef<ApiContext> for AnalysisService {
    fn from_ref(state: &ApiContext) -> Self {
        state.service.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}
