//! 压缩过程, 参考FIPS 180-4 6.1.2/6.2.2/6.4.2
//!
//! `S`为状态向量的单词个数, `R`为每个块的轮数(同时也是消息调度表的长度).

use crate::sha2::{
    big_sigma0, big_sigma1, f_ch, f_maj,
    schedule::{Block, BLOCK_WORDS},
    small_sigma0, small_sigma1, Word,
};

/// 单个块的消息扩展和轮函数.
pub trait Compressor<const S: usize, const R: usize> {
    type Word: Word;

    /// `schedule[..16]`已从块中复制, 按递推式计算`schedule[16..]`
    fn expand(schedule: &mut [Self::Word; R]);

    /// 第`t`轮, 消耗调度表中的单词`w`更新工作变量`vars`
    fn round(vars: &mut [Self::Word; S], t: usize, w: Self::Word);
}

/// 依次压缩每个块, 返回最终的状态向量. `init`不会被修改.
pub fn compress<C, const S: usize, const R: usize>(
    blocks: &[Block<C::Word>],
    init: &[C::Word; S],
) -> [C::Word; S]
where
    C: Compressor<S, R>,
{
    let mut state = *init;
    let mut schedule = [<C::Word as Word>::ZERO; R];

    for block in blocks {
        schedule[..BLOCK_WORDS].copy_from_slice(block);
        C::expand(&mut schedule);

        let mut vars = state;
        schedule
            .iter()
            .enumerate()
            .for_each(|(t, &w)| C::round(&mut vars, t, w));

        state
            .iter_mut()
            .zip(vars.iter())
            .for_each(|(h, &v)| *h = h.wrapping_add(v));

        #[cfg(feature = "sec-zeroize")]
        <C::Word as Word>::zeroize_slice(&mut vars);
    }

    #[cfg(feature = "sec-zeroize")]
    <C::Word as Word>::zeroize_slice(&mut schedule);

    state
}

/// 状态向量按大端序输出
pub fn serialize<W: Word>(state: &[W]) -> Vec<u8> {
    let mut out = Vec::with_capacity(state.len() * W::BYTES);
    state.iter().for_each(|w| w.extend_be(&mut out));
    out
}

/// SHA-2的消息扩展: `W[t] = σ1(W[t-2]) + W[t-7] + σ0(W[t-15]) + W[t-16]`
#[inline]
pub(in crate::sha2) fn sha2_expand<W: Word, const R: usize>(words: &mut [W; R]) {
    (BLOCK_WORDS..R).for_each(|j| {
        words[j] = small_sigma1(words[j - 2])
            .wrapping_add(words[j - 7])
            .wrapping_add(small_sigma0(words[j - 15]))
            .wrapping_add(words[j - 16]);
    });
}

/// SHA-2的轮函数, `k`为本轮常量
#[inline]
pub(in crate::sha2) fn sha2_round<W: Word>(vars: &mut [W; 8], k: W, w: W) {
    let [a, b, c, _, e, f, g, h] = *vars;

    let t1 = h
        .wrapping_add(big_sigma1(e))
        .wrapping_add(f_ch(e, f, g))
        .wrapping_add(k)
        .wrapping_add(w);
    let t2 = big_sigma0(a).wrapping_add(f_maj(a, b, c));

    // h = g, g = f, f = e, e = d + t1, d = c, c = b, b = a, a = t1 + t2
    vars.rotate_right(1);
    vars[0] = t1.wrapping_add(t2);
    vars[4] = vars[4].wrapping_add(t1);
}
