mod sha1;
pub use sha1::Sha1Rounds;

mod sha256;
pub use sha256::Sha256Rounds;

mod sha512;
pub use sha512::Sha512Rounds;
