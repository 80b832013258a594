//! Stream configuration.

use serde::{Deserialize, Serialize};

use crate::engine::Engine;

/// Options for building a [`RandomStream`](crate::RandomStream).
///
/// The default is an unbounded stream using the engine picked by
/// [`Engine::detect`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Total stream length in bytes. `None` means unbounded.
    pub size: Option<u64>,
    /// Forces an engine instead of probing the target.
    pub engine: Option<Engine>,
}

impl StreamConfig {
    /// Unbounded stream, probed engine.
    pub const fn unbounded() -> Self {
        Self { size: None, engine: None }
    }

    /// Stream that ends after `size` bytes.
    pub const fn bounded(size: u64) -> Self {
        Self { size: Some(size), engine: None }
    }

    /// Replaces the size bound.
    #[must_use]
    pub const fn with_size(mut self, size: Option<u64>) -> Self {
        self.size = size;
        self
    }

    /// Forces `engine`.
    #[must_use]
    pub const fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// The engine a stream built from this config will use.
    pub fn resolved_engine(&self) -> Engine {
        self.engine.unwrap_or_else(Engine::detect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded() {
        assert_eq!(StreamConfig::default(), StreamConfig::unbounded());
        assert_eq!(StreamConfig::default().resolved_engine(), Engine::detect());
    }

    #[test]
    fn builders_compose() {
        let config = StreamConfig::bounded(10).with_engine(Engine::Portable).with_size(None);
        assert_eq!(config.size, None);
        assert_eq!(config.resolved_engine(), Engine::Portable);
    }

    #[test]
    fn decodes_from_cbor_with_missing_fields() {
        #[derive(Serialize)]
        struct Partial {
            size: u64,
        }

        let mut encoded = Vec::new();
        ciborium::into_writer(&Partial { size: 4096 }, &mut encoded).expect("encode");
        let config: StreamConfig = ciborium::from_reader(encoded.as_slice()).expect("decode");

        assert_eq!(config, StreamConfig::bounded(4096));
    }

    #[test]
    fn engine_names_are_lowercase() {
        #[derive(Serialize)]
        struct Partial {
            engine: &'static str,
        }

        let mut encoded = Vec::new();
        ciborium::into_writer(&Partial { engine: "portable" }, &mut encoded).expect("encode");
        let config: StreamConfig = ciborium::from_reader(encoded.as_slice()).expect("decode");

        assert_eq!(config.engine, Some(Engine::Portable));
    }
}
