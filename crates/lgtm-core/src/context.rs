use lgtm_cache_interface::CacheService;
use lgtm_config::Config;
use lgtm_database_interface::DbService;
use lgtm_ghapi_interface::ApiService;

use crate::{approvals::ApprovalRegistry, CoreModule};

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub approval_registry: &'a ApprovalRegistry,
    pub api_service: &'a (dyn ApiService + 'a),
    pub db_service: &'a (dyn DbService + 'a),
    pub cache_service: &'a (dyn CacheService + 'a),
}

#[cfg(any(test, feature = "testkit"))]
pub(crate) mod tests {
    use lgtm_cache_interface::MockCacheService;
    use lgtm_config::Config;
    use lgtm_database_interface::DbService;
    use lgtm_database_memory::MemoryDb;
    use lgtm_ghapi_interface::MockApiService;
    use lgtm_models::{Repository, User};

    use crate::{approvals::ApprovalRegistry, CoreContext, CoreModule};

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub approval_registry: ApprovalRegistry,
        pub api_service: MockApiService,
        pub db_service: MemoryDb,
        pub cache_service: MockCacheService,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            Self {
                config: Config::from_env_no_version(),
                core_module: CoreModule::builder().build(),
                approval_registry: ApprovalRegistry::with_default_algorithms(),
                api_service: MockApiService::new(),
                db_service: MemoryDb::new(),
                cache_service: MockCacheService::new(),
            }
        }

        /// Register the `owner/name` repository, owned by `owner` with token `token`.
        #[allow(dead_code)]
        pub async fn with_repository(self) -> Self {
            let user = self
                .db_service
                .users_create(User {
                    login: "owner".into(),
                    token: "token".into(),
                    ..Default::default()
                })
                .await
                .unwrap();

            self.db_service
                .repositories_create(Repository {
                    user_id: user.id,
                    owner: "owner".into(),
                    name: "name".into(),
                    ..Default::default()
                })
                .await
                .unwrap();

            self
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                approval_registry: &self.approval_registry,
                api_service: &self.api_service,
                db_service: &self.db_service,
                cache_service: &self.cache_service,
            }
        }
    }
}
