/*!
 * Resolved realm context extractor
 *
 * Responsibility:
 * - Hand the realm resolved by the middleware (RealmCtx) to handlers
 * - axum-specific code lives in core, the type itself in types
 *
 * Public API:
 * - RealmCtx
 * - RealmCtxExtractor
 */

mod core;
mod types;

pub use self::core::RealmCtxExtractor;
pub use self::types::RealmCtx;
