//! Audio decoding and chunk encoding.

pub mod encode;
pub mod wav;

pub use encode::encode_wav;
pub use wav::DecodedAudio;
