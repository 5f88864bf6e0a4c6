/// 实现标准: [FIPS 180-4](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf)<br>
///
/// 消息先经过`schedule`填充并解析为块序列, 再由`engine`对块序列逐块压缩得到摘要.
/// 32位单词的SHA-1/SHA-224/SHA-256和64位单词的SHA-384/SHA-512共用同一个压缩流程,
/// 区别只在单词位宽、轮数、移位常量和常量表.
use crate::HashError;

pub mod engine;
pub mod schedule;
pub mod word;

pub use word::Word;

/// 逻辑右移, `n`需小于单词位长度
#[inline]
pub fn shr<W: Word>(x: W, n: u32) -> W {
    debug_assert!(n < W::BITS);
    x >> n
}

/// 循环右移, `n`需在`[1, W::BITS)`之间
#[inline]
pub fn rotr<W: Word>(x: W, n: u32) -> W {
    debug_assert!(n > 0 && n < W::BITS);
    x.rotate_right(n)
}

/// 循环左移, `n`需在`[1, W::BITS)`之间
#[inline]
pub fn rotl<W: Word>(x: W, n: u32) -> W {
    debug_assert!(n > 0 && n < W::BITS);
    x.rotate_left(n)
}

#[inline]
pub fn f_ch<W: Word>(x: W, y: W, z: W) -> W {
    (x & y) ^ ((!x) & z)
}

#[inline]
pub fn f_parity<W: Word>(x: W, y: W, z: W) -> W {
    (x ^ y) ^ z
}

#[inline]
pub fn f_maj<W: Word>(x: W, y: W, z: W) -> W {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline]
pub fn big_sigma0<W: Word>(x: W) -> W {
    let [a, b, c] = W::BIG_SIGMA0;
    rotr(x, a) ^ rotr(x, b) ^ rotr(x, c)
}

#[inline]
pub fn big_sigma1<W: Word>(x: W) -> W {
    let [a, b, c] = W::BIG_SIGMA1;
    rotr(x, a) ^ rotr(x, b) ^ rotr(x, c)
}

#[inline]
pub fn small_sigma0<W: Word>(x: W) -> W {
    let [a, b, c] = W::SMALL_SIGMA0;
    rotr(x, a) ^ rotr(x, b) ^ shr(x, c)
}

#[inline]
pub fn small_sigma1<W: Word>(x: W) -> W {
    let [a, b, c] = W::SMALL_SIGMA1;
    rotr(x, a) ^ rotr(x, b) ^ shr(x, c)
}

/// SHA-1每轮使用的逻辑函数
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundFn {
    Ch,
    Parity,
    Maj,
}

impl RoundFn {
    /// 第`t`轮(`0 <= t < 80`)使用的函数: `[0,20)`为`Ch`, `[40,60)`为`Maj`, 其余为`Parity`.
    pub const fn select(t: usize) -> Self {
        match t {
            0..=19 => RoundFn::Ch,
            40..=59 => RoundFn::Maj,
            _ => RoundFn::Parity,
        }
    }

    #[inline]
    pub fn apply<W: Word>(self, x: W, y: W, z: W) -> W {
        match self {
            RoundFn::Ch => f_ch(x, y, z),
            RoundFn::Parity => f_parity(x, y, z),
            RoundFn::Maj => f_maj(x, y, z),
        }
    }
}

/// SHA-1的`f_t(x, y, z)`
#[inline]
pub fn f_sha1(x: u32, y: u32, z: u32, t: usize) -> u32 {
    RoundFn::select(t).apply(x, y, z)
}

/// 填充、解析并压缩消息, 返回最终的状态向量
pub(in crate::sha2) fn hash<C, const S: usize, const R: usize>(
    msg: &[u8],
    init: &[C::Word; S],
) -> Result<[C::Word; S], HashError>
where
    C: engine::Compressor<S, R>,
{
    #[allow(unused_mut)]
    let mut padded = schedule::pad_message::<C::Word>(msg)?;
    #[allow(unused_mut)]
    let mut blocks = schedule::parse::<C::Word>(&padded)?;
    let state = engine::compress::<C, S, R>(&blocks, init);

    #[cfg(feature = "sec-zeroize")]
    {
        zeroize::Zeroize::zeroize(&mut padded);
        blocks
            .iter_mut()
            .for_each(|b| <C::Word as Word>::zeroize_slice(b));
    }

    Ok(state)
}

/// 每个摘要算法是一个零大小的类型, 只携带初始状态常量. <br>
/// <br>
/// $NAME: 结构体的名字<br>
/// $COMPRESSOR: 压缩函数<br>
/// $WORD_TYPE: 存储一个单词使用的类型<br>
/// $STATE_SIZE: 状态向量的单词个数<br>
/// $ROUNDS: 每个块的轮数<br>
/// $DIGEST_BITS: 摘要位长度<br>
/// $INIT_CONST: 摘要初始化常量值, 参考FIPS 180-4<br>
/// $PARENT: 截断输出时借用其压缩过程的算法
macro_rules! sha_common {
    (
        $NAME: ident,
        $COMPRESSOR: ty,
        $WORD_TYPE: ty,
        $STATE_SIZE: literal,
        $ROUNDS: literal,
        $DIGEST_BITS: literal,
        $INIT_CONST: expr
    ) => {
        /// 实现标准: [FIPS 180-4](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf)
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $NAME;

        impl $NAME {
            pub(in crate::sha2) const INIT: [$WORD_TYPE; $STATE_SIZE] = $INIT_CONST;

            pub const fn new() -> Self {
                Self
            }

            /// 以`init`为初始状态计算完整(未截断)的摘要
            pub(in crate::sha2) fn digest_with_init(
                msg: &[u8],
                init: &[$WORD_TYPE; $STATE_SIZE],
            ) -> Result<Vec<u8>, crate::HashError> {
                let state =
                    crate::sha2::hash::<$COMPRESSOR, $STATE_SIZE, $ROUNDS>(msg, init)?;
                Ok(crate::sha2::engine::serialize(&state))
            }
        }

        impl crate::Digest for $NAME {
            const BLOCK_BITS: usize = <$WORD_TYPE as crate::sha2::Word>::BITS as usize * 16;
            const WORD_BITS: usize = <$WORD_TYPE as crate::sha2::Word>::BITS as usize;
            const DIGEST_BITS: usize = $DIGEST_BITS;

            fn digest(msg: &[u8]) -> Result<crate::Output<Self>, crate::HashError> {
                let mut v = Self::digest_with_init(msg, &Self::INIT)?;
                v.truncate($DIGEST_BITS / 8);
                Ok(crate::Output::from_vec(v))
            }
        }
    };
    (
        $NAME: ident,
        $PARENT: ty,
        $WORD_TYPE: ty,
        $DIGEST_BITS: literal,
        $INIT_CONST: expr
    ) => {
        /// 实现标准: [FIPS 180-4](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf)
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $NAME;

        impl $NAME {
            pub(in crate::sha2) const INIT: [$WORD_TYPE; 8] = $INIT_CONST;

            pub const fn new() -> Self {
                Self
            }
        }

        impl crate::Digest for $NAME {
            const BLOCK_BITS: usize = <$PARENT as crate::Digest>::BLOCK_BITS;
            const WORD_BITS: usize = <$PARENT as crate::Digest>::WORD_BITS;
            const DIGEST_BITS: usize = $DIGEST_BITS;

            fn digest(msg: &[u8]) -> Result<crate::Output<Self>, crate::HashError> {
                let mut v = <$PARENT>::digest_with_init(msg, &Self::INIT)?;
                v.truncate($DIGEST_BITS / 8);
                Ok(crate::Output::from_vec(v))
            }
        }
    };
}

mod generic;

mod sha1;
pub use sha1::SHA1;
mod sha256;
pub use sha256::{SHA224, SHA256};
mod sha512;
pub use sha512::{sha512t_init, SHA512t, SHA384, SHA512, SHA512T224, SHA512T256};

pub use generic::{Sha1Rounds, Sha256Rounds, Sha512Rounds};
