//! Heap pages: fixed-size blocks of fixed-size tuple slots.
//!
//! A heap page is the unit of I/O and caching. Its on-disk image is:
//!
//! ```text
//! +------------------+--------------------------------+-----------+
//! | occupancy bitmap | slot 0 | slot 1 | ... | slot N | zero pad  |
//! +------------------+--------------------------------+-----------+
//!   ceil(N / 8) bytes      N * tuple_size bytes         remainder
//! ```
//!
//! Bit `j` of the bitmap (byte `j / 8`, least significant bit first)
//! marks slot `j` occupied. Each slot costs `tuple_size` bytes plus one
//! header bit, so a page of `page_size` bytes holds
//!
//! ```text
//! N = floor(page_size * 8 / (tuple_size * 8 + 1))
//! ```
//!
//! slots. At the default 4 KB page size a 4-byte tuple layout yields
//! 992 slots behind a 124-byte bitmap, with 4 bytes of padding.

mod error;
mod heap;

pub use error::{PageError, PageResult};
pub use heap::HeapPage;
