/*
 * Responsibility
 * - Public middleware surface (re-exports)
 * - auth: bearer verification, http: tracing / request id / limits / CORS
 */
pub mod auth;
pub mod http;
