//! 애플리케이션 공유 상태
//!
//! 시작 시 한 번 만들어 `web::Data<AppState>` 로 모든 워커에 공유합니다.
//! 사용자 간에 공유되는 가변 상태는 쿨다운 저장소뿐입니다.

use std::sync::Arc;
use crate::config::{AuthSettings, SupabaseSettings};
use crate::errors::AppResult;
use crate::services::auth::{AuthClientFactory, SessionCookies, TokenInspector};
use crate::services::login::{CooldownStore, LoginService};

pub struct AppState {
    pub auth: AuthClientFactory,
    pub login: LoginService,
    pub cookies: SessionCookies,
    pub inspector: TokenInspector,
}

impl AppState {
    /// GoTrue 프로바이더와 주어진 쿨다운 저장소로 상태를 구성합니다.
    pub fn new(
        supabase: &SupabaseSettings,
        settings: AuthSettings,
        cooldown: Arc<dyn CooldownStore>,
    ) -> AppResult<Self> {
        let auth = AuthClientFactory::gotrue(supabase)?;
        let inspector = TokenInspector::new(supabase.jwt_secret.clone());
        Ok(Self::from_parts(auth, settings, cooldown, inspector))
    }

    pub fn from_parts(
        auth: AuthClientFactory,
        settings: AuthSettings,
        cooldown: Arc<dyn CooldownStore>,
        inspector: TokenInspector,
    ) -> Self {
        let cookies = SessionCookies::new(settings.secure_cookies);
        Self {
            auth,
            login: LoginService::new(settings, cooldown),
            cookies,
            inspector,
        }
    }
}
