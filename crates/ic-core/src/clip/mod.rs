//! Clip domain: codes, input routing and the stored blob.

mod blob;
pub mod code;
mod input;

pub use blob::{iso_timestamp, Clip, ClipBlob};
pub use code::{
    clip_seed, derive_code, derive_code_with_length, ClipCode, CodeError, ANONYMOUS_OWNER,
    CODE_LENGTH, MAX_CODE_LENGTH,
};
pub use input::{classify_input, classify_input_with_length, ClipInput};
