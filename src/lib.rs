//! Rank-augmented splay tree map for Rust.
//!
//! This crate provides [`SplayRankMap`], an ordered map in which every entry
//! also has an absolute **rank** — its zero-based position in sorted order —
//! queryable in both directions:
//!
//! - [`rank_of`](SplayRankMap::rank_of) - Get the sorted position of a key
//! - [`get_by_rank`](SplayRankMap::get_by_rank) - Get the entry at a given sorted position
//!
//! The tree rebalances itself by **splaying**: every access rotates the target
//! (or its nearest neighbor) to the root, so frequently used keys become cheap
//! to reach. There is no explicit balance metadata; rank is recovered from
//! parent-relative offsets, not subtree-size counters. A consequence worth
//! internalizing up front: *lookups mutate the tree*, so every query method
//! takes `&mut self`.
//!
//! # Example
//!
//! ```
//! use splay_rank::SplayRankMap;
//!
//! let mut scores: SplayRankMap<&str, u32> = SplayRankMap::new();
//! scores.insert("Alice", 100).unwrap();
//! scores.insert("Bob", 85).unwrap();
//! scores.insert("Carol", 92).unwrap();
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic queries, amortized O(log n)
//! let (name, score) = scores.get_by_rank(1).unwrap();
//! assert_eq!((*name, *score), ("Bob", 85));
//! assert_eq!(scores.rank_of(&"Carol"), Some(2));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Amortized O(log n)** - All operations, driven purely by access pattern
//! - **Rank without counters** - Signed rank offsets instead of subtree sizes
//! - **Custom comparators** - Any [`Comparator`], defaulting to [`Ord`] via [`NaturalOrder`]
//! - **Allocation policies** - Growing, discard-on-free, or fixed-capacity node pools
//!
//! # Implementation
//!
//! Nodes live in an index arena with a free-slot stack (the node pool). Each
//! node stores its rank relative to its parent; summing offsets from the root
//! recovers absolute rank. A single top-down splay routine, parameterized by
//! an ordering closure, serves key search, positional search, and
//! extreme-finding alike.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order;
mod policy;
mod raw;

pub mod splay_rank_map;

pub use error::Error;
pub use order::{Comparator, NaturalOrder};
pub use policy::AllocationPolicy;
pub use splay_rank_map::{FastCursor, Iter, RobustCursor, SplayRankMap};
