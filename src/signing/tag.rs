//! Signature tags and their byte encoding

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::SigningError;

/// Largest output index a tag can name
pub const MAX_TAGGED_OUTPUT_INDEX: usize = 503;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputTag {
    All,
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputTag {
    All,
    /// Explicit output set; duplicates and order are ignored
    Indices(Vec<usize>),
}

/// Which inputs and outputs a signature commits to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureTag {
    pub input: InputTag,
    pub output: OutputTag,
}

impl SignatureTag {
    pub fn new(input: InputTag, output: OutputTag) -> Self {
        Self { input, output }
    }

    /// Commit to everything
    pub fn all() -> Self {
        Self::new(InputTag::All, OutputTag::All)
    }

    pub fn is_all(&self) -> bool {
        self.input == InputTag::All && self.output == OutputTag::All
    }

    /// Compact encoding carried in unlock scripts.
    ///
    /// Output `All` is a single byte `0b0000_00i1`. An index set is a bitmap,
    /// highest byte first, followed by `(bitmap_len << 2) | (i << 1)` where
    /// `i` is set for input `All`.
    pub fn encode(&self) -> Result<Vec<u8>, SigningError> {
        let input_bit = match self.input {
            InputTag::All => 0b01u8,
            InputTag::Single => 0b00u8,
        };
        match &self.output {
            OutputTag::All => Ok(vec![(input_bit << 1) | 0b01]),
            OutputTag::Indices(indices) => {
                // indices up to 503 keep the bitmap under 64 bytes
                let mut bitmap = encode_output_bitmap(&normalize_indices(indices))?;
                let len = bitmap.len() as u8;
                bitmap.push((len << 2) | (input_bit << 1));
                Ok(bitmap)
            }
        }
    }
}

/// Deduplicated, ascending copy of an index set
pub fn normalize_indices(indices: &[usize]) -> Vec<usize> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

fn encode_output_bitmap(sorted: &[usize]) -> Result<Vec<u8>, SigningError> {
    let mut bytes = Vec::new();
    let mut offset = 0usize;
    let mut byte = 0u8;
    for &index in sorted {
        if index > MAX_TAGGED_OUTPUT_INDEX {
            return Err(SigningError::OutputIndexTooLarge(index));
        }
        while offset + 8 <= index {
            bytes.push(byte);
            offset += 8;
            byte = 0;
        }
        byte |= 1 << (index - offset);
    }
    if !sorted.is_empty() {
        bytes.push(byte);
    }
    bytes.reverse();
    Ok(bytes)
}

impl Serialize for OutputTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            OutputTag::All => serializer.serialize_str("all"),
            OutputTag::Indices(indices) => indices.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for OutputTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Word(String),
            Indices(Vec<usize>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Word(word) if word == "all" => Ok(OutputTag::All),
            Raw::Word(word) => Err(de::Error::custom(format!("unknown output tag {:?}", word))),
            Raw::Indices(indices) => Ok(OutputTag::Indices(indices)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(input: InputTag, output: OutputTag) -> Vec<u8> {
        SignatureTag::new(input, output).encode().unwrap()
    }

    #[test]
    fn test_output_all() {
        assert_eq!(tag(InputTag::All, OutputTag::All), vec![0b11]);
        assert_eq!(tag(InputTag::Single, OutputTag::All), vec![0b01]);
    }

    #[test]
    fn test_empty_indices() {
        assert_eq!(tag(InputTag::All, OutputTag::Indices(vec![])), vec![0b10]);
        assert_eq!(tag(InputTag::Single, OutputTag::Indices(vec![])), vec![0b00]);
    }

    #[test]
    fn test_first_byte_bitmap() {
        assert_eq!(
            tag(InputTag::All, OutputTag::Indices(vec![0, 1, 2])),
            vec![0b0000_0111, (1 << 2) | 0b10]
        );
    }

    #[test]
    fn test_highest_byte_leads() {
        // index 9 lives in the second bitmap byte, which is emitted first
        assert_eq!(
            tag(InputTag::Single, OutputTag::Indices(vec![9, 0])),
            vec![0b0000_0010, 0b0000_0001, 2 << 2]
        );
        assert_eq!(
            tag(InputTag::Single, OutputTag::Indices(vec![16])),
            vec![0b0000_0001, 0, 0, 3 << 2]
        );
    }

    #[test]
    fn test_duplicates_and_order_ignored() {
        assert_eq!(
            tag(InputTag::All, OutputTag::Indices(vec![2, 0, 2, 1])),
            tag(InputTag::All, OutputTag::Indices(vec![0, 1, 2]))
        );
    }

    #[test]
    fn test_all_differs_from_explicit_set() {
        assert_ne!(
            tag(InputTag::All, OutputTag::All),
            tag(InputTag::All, OutputTag::Indices(vec![0, 1, 2]))
        );
    }

    #[test]
    fn test_index_limit() {
        let max = tag(InputTag::All, OutputTag::Indices(vec![503]));
        assert_eq!(max.len(), 64);
        assert_eq!(max[63], (63 << 2) | 0b10);
        assert_eq!(
            SignatureTag::new(InputTag::All, OutputTag::Indices(vec![504])).encode(),
            Err(SigningError::OutputIndexTooLarge(504))
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(SignatureTag::new(InputTag::Single, OutputTag::Indices(vec![1]))).unwrap();
        assert_eq!(json, serde_json::json!({"input": "single", "output": [1]}));
        let back: SignatureTag = serde_json::from_value(serde_json::json!({"input": "all", "output": "all"})).unwrap();
        assert!(back.is_all());
    }
}
