mod output;
pub use output::Output;

mod error;
pub use error::HashError;

pub mod sha2;

/// 哈希算法实现该trait, 调用`Digest::digest(msg)`一次性生成消息的摘要. 每次调用相互独立,
/// 不保留任何状态, 可在多个线程中同时使用.
///
/// 可用于如下安全应用中:
/// - 数据一致性验证;
/// - 参与数字签名的生成和验证;
/// - 密钥派生;
/// - 伪随机数生成;
pub trait Digest: Sized {
    /// 哈希算法每次按块处理消息的块的位长度
    const BLOCK_BITS: usize;
    /// 哈希算法将每个块按该位长度划分为若干个单词
    const WORD_BITS: usize;
    /// 哈希算法生成的摘要的位长度
    const DIGEST_BITS: usize;

    /// 生成消息摘要, 仅在消息位长度超出长度字段的表示范围时返回错误
    fn digest(msg: &[u8]) -> Result<Output<Self>, HashError>;
}

/// `Digest`的对象安全版本, 用于运行时选择算法
pub trait DigestX: Send + Sync {
    fn block_bits_x(&self) -> usize;
    fn word_bits_x(&self) -> usize;
    fn digest_bits_x(&self) -> usize;
    fn digest_x(&self, msg: &[u8]) -> Result<Output<dyn DigestX>, HashError>;
}

impl<T> DigestX for T
where
    T: Digest + Send + Sync,
{
    fn block_bits_x(&self) -> usize {
        <T as Digest>::BLOCK_BITS
    }

    fn word_bits_x(&self) -> usize {
        <T as Digest>::WORD_BITS
    }

    fn digest_bits_x(&self) -> usize {
        <T as Digest>::DIGEST_BITS
    }

    fn digest_x(&self, msg: &[u8]) -> Result<Output<dyn DigestX>, HashError> {
        T::digest(msg).map(|d| Output::from(d.to_vec()))
    }
}

macro_rules! impl_digest_fn {
    ($([$FN: ident, $HASH: ty, $BYTES: literal]),+) => {
        $(
            #[doc = concat!("计算`msg`的", stringify!($HASH), "摘要")]
            pub fn $FN(msg: &[u8]) -> Result<[u8; $BYTES], HashError> {
                <$HASH as Digest>::digest(msg)?.try_into()
            }
        )+
    };
}

impl_digest_fn!(
    [sha1, sha2::SHA1, 20],
    [sha224, sha2::SHA224, 28],
    [sha256, sha2::SHA256, 32],
    [sha384, sha2::SHA384, 48],
    [sha512, sha2::SHA512, 64]
);
