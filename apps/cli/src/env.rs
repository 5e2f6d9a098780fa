use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
pub struct Env {
    #[serde(default, deserialize_with = "filter_empty")]
    pub insights_api_url: Option<String>,
    #[serde(default, deserialize_with = "filter_empty")]
    pub insights_function_key: Option<String>,
    #[serde(default, deserialize_with = "filter_empty")]
    pub insights_access_token: Option<String>,
}

fn filter_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

static ENV: OnceLock<Env> = OnceLock::new();

pub fn env() -> &'static Env {
    ENV.get_or_init(|| {
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let _ = dotenvy::dotenv();
        let _ = dotenvy::from_path(manifest_dir.join(".env"));
        envy::from_env().expect("Failed to load environment")
    })
}
