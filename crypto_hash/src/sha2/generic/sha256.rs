use crate::sha2::{
    engine::{sha2_expand, sha2_round, Compressor},
    SHA256,
};

/// SHA-224/SHA-256的压缩: 8个32位工作变量, 64轮
pub struct Sha256Rounds;

impl Compressor<8, 64> for Sha256Rounds {
    type Word = u32;

    #[inline]
    fn expand(words: &mut [u32; 64]) {
        sha2_expand(words);
    }

    #[inline]
    fn round(vars: &mut [u32; 8], t: usize, w: u32) {
        sha2_round(vars, SHA256::K[t], w);
    }
}
