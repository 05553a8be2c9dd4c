pub mod factory;
pub mod interceptor;
pub mod resolution;
pub mod resolver;
pub mod store;
pub mod token;

pub use factory::build_realm_store;
pub use interceptor::RequestInterceptor;
pub use resolution::{RealmError, ResolutionMode, resolve_realm};
pub use resolver::{IssuerBasedConfigResolver, ResolvedRealm};
pub use store::{AuthConfig, RealmConfigStore, StoreError};
