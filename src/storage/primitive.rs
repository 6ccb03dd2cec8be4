// src/storage/primitive.rs
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

use super::{errors::Result, handler::SaveHandler};

/// Typed access to single-value settings stored as text.
///
/// Loads never fail. A missing key, an unparsable value and a read fault all
/// produce the type's zero value, so callers cannot tell "never saved" from
/// "saved as zero".
#[derive(Clone)]
pub struct PrimitiveCodec {
    handler: Arc<dyn SaveHandler>,
}

impl PrimitiveCodec {
    pub fn new(handler: Arc<dyn SaveHandler>) -> Self {
        Self { handler }
    }

    pub fn load_int(&self, key: &str) -> i32 {
        parse_number(&self.load_or_empty(key))
    }

    pub fn load_float(&self, key: &str) -> f32 {
        parse_number(&self.load_or_empty(key))
    }

    pub fn load_bool(&self, key: &str) -> bool {
        parse_bool(&self.load_or_empty(key))
    }

    pub fn load_string(&self, key: &str) -> Result<String> {
        self.handler.get(key)
    }

    pub fn save(&self, key: &str, data: &str) -> Result<()> {
        self.handler.put(key, data)
    }

    pub fn save_int(&self, key: &str, value: i32) -> Result<()> {
        self.save(key, &value.to_string())
    }

    pub fn save_float(&self, key: &str, value: f32) -> Result<()> {
        self.save(key, &value.to_string())
    }

    pub fn save_bool(&self, key: &str, value: bool) -> Result<()> {
        self.save(key, &value.to_string())
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.handler.exists(key)
    }

    pub async fn load_int_async(&self, key: &str) -> i32 {
        parse_number(&self.load_or_empty_async(key).await)
    }

    pub async fn load_float_async(&self, key: &str) -> f32 {
        parse_number(&self.load_or_empty_async(key).await)
    }

    pub async fn load_bool_async(&self, key: &str) -> bool {
        parse_bool(&self.load_or_empty_async(key).await)
    }

    pub async fn load_string_async(&self, key: &str) -> Result<String> {
        self.handler.get_async(key).await
    }

    pub async fn save_async(&self, key: &str, data: &str) -> Result<()> {
        self.handler.put_async(key, data).await
    }

    pub async fn save_int_async(&self, key: &str, value: i32) -> Result<()> {
        self.save_async(key, &value.to_string()).await
    }

    pub async fn save_float_async(&self, key: &str, value: f32) -> Result<()> {
        self.save_async(key, &value.to_string()).await
    }

    pub async fn save_bool_async(&self, key: &str, value: bool) -> Result<()> {
        self.save_async(key, &value.to_string()).await
    }

    pub async fn has_key_async(&self, key: &str) -> bool {
        self.handler.exists_async(key).await
    }

    fn load_or_empty(&self, key: &str) -> String {
        self.handler.get(key).unwrap_or_else(|e| {
            warn!(key, error = %e, "Falling back to default value");
            String::new()
        })
    }

    async fn load_or_empty_async(&self, key: &str) -> String {
        self.handler.get_async(key).await.unwrap_or_else(|e| {
            warn!(key, error = %e, "Falling back to default value");
            String::new()
        })
    }
}

// Surrounding whitespace and a leading sign are accepted; anything else that
// `FromStr` rejects becomes the zero value.
fn parse_number<N: FromStr + Default>(data: &str) -> N {
    data.trim().parse().unwrap_or_default()
}

fn parse_bool(data: &str) -> bool {
    data.trim().eq_ignore_ascii_case("true")
}
