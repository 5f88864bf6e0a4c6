//! 消息填充与解析, 参考FIPS 180-4 5.1/5.2
//!
//! 填充总是在消息的副本上进行, 不会修改调用方的数据.

use crate::{sha2::Word, HashError};

/// 每个块包含的单词个数
pub const BLOCK_WORDS: usize = 16;

/// 16个单词组成的块, 32位单词为512位, 64位单词为1024位
pub type Block<W> = [W; BLOCK_WORDS];

/// 在消息`msg`后依次填充`1`位、最少的`K`个`0`位以及`len_bits`位大端序的消息位长度`L`,
/// 使得填充后的位长度是`block_bits`的整数倍. `K`是满足`L + 1 + K ≡ block_bits - len_bits (mod block_bits)`
/// 的最小非负整数.
///
/// - `block_bits`和`len_bits`需是8的非零整数倍, `len_bits <= 128`且`len_bits < block_bits`;
/// - `L`无法用`len_bits`位表示时返回`HashError::MessageTooLong`;
pub fn pad(msg: &[u8], block_bits: usize, len_bits: usize) -> Result<Vec<u8>, HashError> {
    if block_bits == 0
        || len_bits == 0
        || block_bits & 7 != 0
        || len_bits & 7 != 0
        || len_bits > u128::BITS as usize
        || len_bits >= block_bits
    {
        return Err(HashError::InvalidPadding {
            block_bits,
            len_bits,
        });
    }

    let bits = (msg.len() as u128) << 3;
    if len_bits < u128::BITS as usize && (bits >> len_bits) != 0 {
        return Err(HashError::MessageTooLong {
            bits,
            limit_bits: len_bits,
        });
    }

    let (block, field) = (block_bits as u128, len_bits as u128);
    let k = (block - field + block - (bits + 1) % block) % block;

    // `L`和`block - field`都是8的倍数, 故`k % 8 == 7`, 0x80已包含其中7个0位
    let zero_bytes = ((k - 7) >> 3) as usize;
    let len_bytes = len_bits >> 3;

    let mut padded = Vec::with_capacity(msg.len() + 1 + zero_bytes + len_bytes);
    padded.extend_from_slice(msg);
    padded.push(0x80);
    padded.resize(padded.len() + zero_bytes, 0);
    padded.extend_from_slice(&bits.to_be_bytes()[(16 - len_bytes)..]);

    Ok(padded)
}

/// 按单词类型`W`填充: 块长度为`16 * W::BITS`, 长度字段为`2 * W::BITS`(32位单词64位, 64位单词128位)
pub fn pad_message<W: Word>(msg: &[u8]) -> Result<Vec<u8>, HashError> {
    let word_bits = W::BITS as usize;
    pad(msg, word_bits * BLOCK_WORDS, word_bits << 1)
}

/// 将填充后的消息按序切分为块, 每个单词按大端序读取.
pub fn parse<W: Word>(padded: &[u8]) -> Result<Vec<Block<W>>, HashError> {
    let block = W::BYTES * BLOCK_WORDS;
    if padded.len() % block != 0 {
        return Err(HashError::UnalignedMessage {
            len: padded.len(),
            block,
        });
    }

    Ok(padded
        .chunks_exact(block)
        .map(|chunk| {
            let mut words = [W::ZERO; BLOCK_WORDS];
            for (word, bytes) in words.iter_mut().zip(chunk.chunks_exact(W::BYTES)) {
                *word = W::from_be_slice(bytes);
            }
            words
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn blocks_to_bytes<W: Word>(blocks: &[Block<W>]) -> Vec<u8> {
        let mut v = Vec::new();
        blocks
            .iter()
            .flat_map(|b| b.iter())
            .for_each(|w| w.extend_be(&mut v));
        v
    }

    #[test]
    fn pad_abc_32() {
        let msg = b"abc";
        let mut expected = msg.to_vec();
        expected.resize(64, 0);
        expected[3] = 0x80;
        expected[63] = 24;

        let padded = pad_message::<u32>(msg).unwrap();
        assert_eq!(padded, expected);
        assert_eq!(msg, b"abc");
    }

    #[test]
    fn pad_abc_64() {
        let msg = b"abc";
        let mut expected = msg.to_vec();
        expected.resize(128, 0);
        expected[3] = 0x80;
        expected[127] = 24;

        assert_eq!(pad_message::<u64>(msg).unwrap(), expected);
    }

    #[test]
    fn pad_boundaries() {
        // 长度字段放不下时需要额外的块
        let cases_32 = [(0, 64), (55, 64), (56, 128), (63, 128), (64, 128), (119, 128), (120, 192)];
        for (len, padded_len) in cases_32 {
            let padded = pad_message::<u32>(&vec![0x61u8; len]).unwrap();
            assert_eq!(padded.len(), padded_len, "len => {len}");
            assert_eq!(padded[len], 0x80, "len => {len}");
        }

        let cases_64 = [(0, 128), (111, 128), (112, 256), (127, 256), (128, 256), (239, 256), (240, 384)];
        for (len, padded_len) in cases_64 {
            let padded = pad_message::<u64>(&vec![0x61u8; len]).unwrap();
            assert_eq!(padded.len(), padded_len, "len => {len}");
            assert_eq!(padded[len], 0x80, "len => {len}");
        }
    }

    #[test]
    fn pad_empty() {
        let padded = pad_message::<u32>(&[]).unwrap();
        assert_eq!(padded.len(), 64);
        assert_eq!(padded[0], 0x80);
        assert!(padded[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn pad_invalid_params() {
        for (block_bits, len_bits) in [(0, 0), (512, 0), (512, 512), (512, 60), (500, 64), (2048, 136)] {
            assert_eq!(
                pad(b"abc", block_bits, len_bits),
                Err(HashError::InvalidPadding {
                    block_bits,
                    len_bits
                })
            );
        }
    }

    #[test]
    fn pad_too_long() {
        // 8位长度字段最多表示255位, 即31字节
        assert!(pad(&[0u8; 31], 64, 8).is_ok());
        assert_eq!(
            pad(&[0u8; 32], 64, 8),
            Err(HashError::MessageTooLong {
                bits: 256,
                limit_bits: 8
            })
        );
    }

    #[test]
    fn parse_words() {
        let input = (0..=255u8).collect::<Vec<_>>();

        let blocks = parse::<u32>(&input).unwrap();
        assert_eq!(blocks.len(), 4);
        let mut v = 0u32;
        for block in blocks.iter() {
            for &word in block.iter() {
                assert_eq!(word, (v << 24) | ((v + 1) << 16) | ((v + 2) << 8) | (v + 3));
                v += 4;
            }
        }

        let blocks = parse::<u64>(&input).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0][0], 0x0001020304050607);
        assert_eq!(blocks[0][1], 0x08090a0b0c0d0e0f);
        assert_eq!(blocks[1][15], 0xf8f9fafbfcfdfeff);
    }

    #[test]
    fn parse_unaligned() {
        assert_eq!(
            parse::<u32>(&[0u8; 65]),
            Err(HashError::UnalignedMessage { len: 65, block: 64 })
        );
        assert_eq!(
            parse::<u64>(&[0u8; 64]),
            Err(HashError::UnalignedMessage {
                len: 64,
                block: 128
            })
        );
        assert!(parse::<u32>(&[]).unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn pad_32_invariants(msg in proptest::collection::vec(any::<u8>(), 0..300)) {
            let padded = pad_message::<u32>(&msg).unwrap();
            prop_assert_eq!(padded.len() % 64, 0);
            prop_assert_eq!(&padded[..msg.len()], msg.as_slice());
            prop_assert_eq!(padded[msg.len()], 0x80);
            // 最少填充: 去掉一个块后放不下`0x80`和长度字段
            prop_assert!(padded.len() - msg.len() <= 64 + 8);

            let mut field = [0u8; 8];
            field.copy_from_slice(&padded[padded.len() - 8..]);
            prop_assert_eq!(u64::from_be_bytes(field), (msg.len() as u64) << 3);

            let blocks = parse::<u32>(&padded).unwrap();
            prop_assert_eq!(blocks_to_bytes(&blocks), padded);
        }

        #[test]
        fn pad_64_invariants(msg in proptest::collection::vec(any::<u8>(), 0..600)) {
            let padded = pad_message::<u64>(&msg).unwrap();
            prop_assert_eq!(padded.len() % 128, 0);
            prop_assert_eq!(&padded[..msg.len()], msg.as_slice());
            prop_assert_eq!(padded[msg.len()], 0x80);
            prop_assert!(padded.len() - msg.len() <= 128 + 16);

            let mut field = [0u8; 16];
            field.copy_from_slice(&padded[padded.len() - 16..]);
            prop_assert_eq!(u128::from_be_bytes(field), (msg.len() as u128) << 3);
            prop_assert!(field[..8].iter().all(|&b| b == 0));

            let blocks = parse::<u64>(&padded).unwrap();
            prop_assert_eq!(blocks_to_bytes(&blocks), padded);
        }
    }
}
