// Profile and preferences endpoints. Identity is an opaque user_key;
// sign-in itself happens outside this service.

pub mod handlers;
