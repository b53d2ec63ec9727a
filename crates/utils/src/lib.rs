use rand::{distributions::Alphanumeric, Rng};

/// Alphanumeric secret of `secret_len` characters, used for generated api keys
/// and token signing secrets.
pub fn create_random_secret(secret_len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

/// Same as `create_random_secret` but with a recognizable prefix, e.g. `ak_`
pub fn create_prefixed_secret(prefix: &str, secret_len: usize) -> String {
    format!("{}_{}", prefix, create_random_secret(secret_len))
}
