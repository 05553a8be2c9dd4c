/*
 * Responsibility
 * - Public interface of the middleware layer
 * - http::apply (cross-cutting), realm::apply (inbound realm resolution)
 */
pub mod http;
pub mod realm;
