//! Circular-array deque: [`RingBuffer`].

mod cursor;
mod ring_buffer;

pub use cursor::RingBufferCursor;
pub use ring_buffer::{double_up, Iter as RingBufferIter, RingBuffer, MIN_CAPACITY};
