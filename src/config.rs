use crate::alphabet::Alphabet;
use crate::codec::{Codec, Mode};
use serde::{Deserialize, Serialize};

/// Serializable codec settings, e.g. `{"alphabet": "base64", "mode": "chunked"}`.
///
/// Missing fields take their defaults, so `{}` selects the lexicographic
/// alphabet in chunked mode. Persist this next to stored text: both fields
/// change the format.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    pub alphabet: Alphabet,
    pub mode: Mode,
}

impl CodecConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn codec(&self) -> Codec {
        Codec::new(self.alphabet, self.mode)
    }
}

impl From<CodecConfig> for Codec {
    fn from(config: CodecConfig) -> Self {
        config.codec()
    }
}

impl From<Codec> for CodecConfig {
    fn from(codec: Codec) -> Self {
        Self {
            alphabet: codec.alphabet(),
            mode: codec.mode(),
        }
    }
}
