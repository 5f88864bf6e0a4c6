use crate::sha2::{engine::Compressor, f_sha1, rotl, schedule::BLOCK_WORDS, SHA1};

/// SHA-1的压缩: 5个32位工作变量, 80轮
pub struct Sha1Rounds;

impl Compressor<5, 80> for Sha1Rounds {
    type Word = u32;

    #[inline]
    fn expand(words: &mut [u32; 80]) {
        (BLOCK_WORDS..words.len()).for_each(|j| {
            words[j] = rotl(
                words[j - 3] ^ words[j - 8] ^ words[j - 14] ^ words[j - 16],
                1,
            );
        });
    }

    #[inline]
    fn round(vars: &mut [u32; 5], t: usize, w: u32) {
        let [a, b, c, d, e] = *vars;

        let tmp = rotl(a, 5)
            .wrapping_add(f_sha1(b, c, d, t))
            .wrapping_add(e)
            .wrapping_add(SHA1::K[t / 20])
            .wrapping_add(w);

        // e = d, d = c, c = ROTL30(b), b = a, a = tmp
        vars.rotate_right(1);
        vars[0] = tmp;
        vars[2] = rotl(vars[2], 30);
    }
}
