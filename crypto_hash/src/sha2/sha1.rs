use crate::sha2::Sha1Rounds;

sha_common!(
    SHA1,
    Sha1Rounds,
    u32,
    5,
    80,
    160,
    [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0]
);

impl SHA1 {
    /// 按轮次分为4段, 每20轮使用一个常量
    pub(in crate::sha2) const K: [u32; 4] = [0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xCA62C1D6];
}
