use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};

pub const DEFAULT_HASHING_DIMENSION: usize = 256;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Local feature-hashing embedder: lowercased alphanumeric tokens are hashed
/// into signed buckets and the result is L2-normalised.
///
/// Needs no network or model files, and is stable across processes, which
/// makes it the default for offline use and tests. Texts sharing words score
/// higher under cosine similarity; nothing more semantic than that.
pub struct HashingProvider {
    dimension: usize,
}

impl HashingProvider {
    pub fn new(dimension: usize) -> Self {
        Self { dimension: dimension.max(1) }
    }

    fn fnv1a(token: &str) -> u64 {
        token.bytes().fold(FNV_OFFSET, |hash, b| (hash ^ b as u64).wrapping_mul(FNV_PRIME))
    }

    pub fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];
        let lowered = text.to_lowercase();
        for token in lowered.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
            let hash = Self::fnv1a(token);
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }
        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }
}

impl Default for HashingProvider {
    fn default() -> Self {
        Self::new(DEFAULT_HASHING_DIMENSION)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HashingProvider {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::similarity::cosine_similarity;

    #[test]
    fn test_fixed_dimension() {
        let p = HashingProvider::new(64);
        assert_eq!(p.embed_one("anything at all").len(), 64);
        assert_eq!(p.embed_one("").len(), 64);
    }

    #[test]
    fn test_deterministic() {
        let p = HashingProvider::default();
        assert_eq!(p.embed_one("Rust ownership"), p.embed_one("Rust ownership"));
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let p = HashingProvider::default();
        assert_eq!(p.embed_one("Hello, World!"), p.embed_one("hello world"));
    }

    #[test]
    fn test_shared_words_score_higher() {
        let p = HashingProvider::default();
        let q = p.embed_one("vector store query");
        let near = p.embed_one("the vector store answers a query");
        let far = p.embed_one("bananas ripen in autumn");
        assert!(cosine_similarity(&q, &near) > cosine_similarity(&q, &far));
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let p = HashingProvider::new(8);
        assert!(p.embed_one("  ").iter().all(|x| *x == 0.0));
    }
}
