use std::fmt::Debug;
use std::ops::{BitAnd, BitXor, Not, Shr};

/// 哈希计算使用的单词, SHA-1/SHA-224/SHA-256使用32位单词, SHA-384/SHA-512使用64位单词.<br>
/// 单词上的加法都是模`2^BITS`的加法.
///
/// `BIG_SIGMA*`是`Σ`函数的3个循环右移量, `SMALL_SIGMA*`是`σ`函数的2个循环右移量和1个逻辑右移量,
/// 参考FIPS 180-4 4.1.2/4.1.3.
pub trait Word:
    Copy
    + Default
    + Eq
    + Debug
    + Send
    + Sync
    + BitAnd<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shr<u32, Output = Self>
    + 'static
{
    const BITS: u32;
    const BYTES: usize;
    const ZERO: Self;

    const BIG_SIGMA0: [u32; 3];
    const BIG_SIGMA1: [u32; 3];
    const SMALL_SIGMA0: [u32; 3];
    const SMALL_SIGMA1: [u32; 3];

    fn wrapping_add(self, rhs: Self) -> Self;

    fn rotate_right(self, n: u32) -> Self;

    fn rotate_left(self, n: u32) -> Self;

    /// `bytes.len()`需等于`Self::BYTES`
    fn from_be_slice(bytes: &[u8]) -> Self;

    fn extend_be(self, out: &mut Vec<u8>);

    #[cfg(feature = "sec-zeroize")]
    fn zeroize_slice(words: &mut [Self]);
}

macro_rules! impl_word {
    ($TYPE: ty, $S0: expr, $S1: expr, $D0: expr, $D1: expr) => {
        impl Word for $TYPE {
            const BITS: u32 = <$TYPE>::BITS;
            const BYTES: usize = std::mem::size_of::<$TYPE>();
            const ZERO: Self = 0;

            const BIG_SIGMA0: [u32; 3] = $S0;
            const BIG_SIGMA1: [u32; 3] = $S1;
            const SMALL_SIGMA0: [u32; 3] = $D0;
            const SMALL_SIGMA1: [u32; 3] = $D1;

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$TYPE>::wrapping_add(self, rhs)
            }

            #[inline]
            fn rotate_right(self, n: u32) -> Self {
                <$TYPE>::rotate_right(self, n)
            }

            #[inline]
            fn rotate_left(self, n: u32) -> Self {
                <$TYPE>::rotate_left(self, n)
            }

            #[inline]
            fn from_be_slice(bytes: &[u8]) -> Self {
                let mut arr = [0u8; std::mem::size_of::<$TYPE>()];
                arr.copy_from_slice(bytes);
                <$TYPE>::from_be_bytes(arr)
            }

            #[inline]
            fn extend_be(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_be_bytes());
            }

            #[cfg(feature = "sec-zeroize")]
            fn zeroize_slice(words: &mut [Self]) {
                zeroize::Zeroize::zeroize(words);
            }
        }
    };
}

impl_word!(u32, [2, 13, 22], [6, 11, 25], [7, 18, 3], [17, 19, 10]);
impl_word!(u64, [28, 34, 39], [14, 18, 41], [1, 8, 7], [19, 61, 6]);
