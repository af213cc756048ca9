//! chain-collections: a growable vector, a doubly linked list and a
//! separate-chaining hash table, plus thin adapters built on them.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build the hash table out of the two sequence containers so each
//!   layer has a small contract that can be checked on its own.
//! - Layers:
//!   - Vector<T>: contiguous storage with an explicit capacity policy
//!     (double on growth, empty grows to one, never shrinks implicitly).
//!   - List<T>: doubly linked list whose nodes live in a per-list arena;
//!     links are generational keys, so a removed node can never be reached
//!     through a stale position.
//!   - HashTable<K, V, S>: a `Vector` of `List` buckets. Keys are unique,
//!     the load factor is capped at `MAX_LOAD_FACTOR` and growth rehashes.
//!   - Map, Multiset, Stack, Queue, Array: facades that forward to one of
//!     the above.
//!
//! Positions
//! - `list::Position` and `hash_table::Position` are small `Copy` values,
//!   not borrows. Every use is checked against the container that receives
//!   it: a position from another container reports `ForeignPosition`, one
//!   whose element was removed (or whose table was rehashed or cleared)
//!   reports `Expired`, and dereferencing an end sentinel reports
//!   `PositionOutOfRange`.
//!
//! Hasher and rehashing invariants
//! - Each table entry stores its `u64` hash, and rehashing redistributes by
//!   the stored hash; `K: Hash` is never invoked after insertion.
//! - Growth is one-directional. Erasing entries never shrinks the bucket
//!   array.
//!
//! Errors
//! - Fallible operations return [`Result`] with a [`ContainerError`]; the
//!   only panicking entry points are the `Index`/`IndexMut` impls and the
//!   `FromIterator` impls of the hashed containers (allocation failure).
//!
//! Notes and non-goals
//! - Single-threaded containers; nothing here is synchronized.
//! - Multiset does not track multiplicity; `count` is 0 or 1.
//! - Array is a fixed-length view over a `Vector`, sized once at
//!   construction.

pub mod array;
pub mod error;
pub mod hash_table;
mod hash_table_proptest;
pub mod list;
pub mod map;
pub mod multiset;
pub mod queue;
pub mod stack;
pub mod vector;

// Public surface
pub use array::Array;
pub use error::{ContainerError, Result};
pub use hash_table::{HashTable, DEFAULT_BUCKETS, MAX_LOAD_FACTOR};
pub use list::List;
pub use map::Map;
pub use multiset::Multiset;
pub use queue::Queue;
pub use stack::Stack;
pub use vector::{Vector, GROWTH_FACTOR};
