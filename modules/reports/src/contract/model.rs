use serde::{Deserialize, Serialize};

/// One output record of the execution engine.
///
/// Identity is `(input_index, output_index)`; it is not enforced, so
/// duplicates may coexist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub input_index: u64,
    pub output_index: u64,
    /// Serialized as lowercase hex without `0x`.
    #[serde(with = "payload_hex")]
    pub payload: Vec<u8>,
}

impl Report {
    pub fn new(input_index: u64, output_index: u64, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            input_index,
            output_index,
            payload: payload.into(),
        }
    }
}

mod payload_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let raw = String::deserialize(d)?;
        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .unwrap_or(&raw);
        hex::decode(digits).map_err(serde::de::Error::custom)
    }
}
