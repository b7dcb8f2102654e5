mod block;
mod galois;

pub(crate) use block::*;
pub(crate) use galois::*;

pub static MAX_BLOCK_SIZE: usize = 256;

pub static MAX_EC_SIZE: usize = 64;
