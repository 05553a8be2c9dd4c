pub mod realm_ctx;

pub use realm_ctx::{RealmCtx, RealmCtxExtractor};
