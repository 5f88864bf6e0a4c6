use crate::sha2::{
    engine::{sha2_expand, sha2_round, Compressor},
    SHA512,
};

/// SHA-384/SHA-512/SHA-512/t的压缩: 8个64位工作变量, 80轮
pub struct Sha512Rounds;

impl Compressor<8, 80> for Sha512Rounds {
    type Word = u64;

    #[inline]
    fn expand(words: &mut [u64; 80]) {
        sha2_expand(words);
    }

    #[inline]
    fn round(vars: &mut [u64; 8], t: usize, w: u64) {
        sha2_round(vars, SHA512::K[t], w);
    }
}
