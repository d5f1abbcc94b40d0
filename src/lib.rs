//! Scapegoat-balanced binary search trees for Rust.
//!
//! This crate provides an ordered binary search tree, [`Tree`], whose comparator and
//! rebalancing strategy are chosen at construction, together with two collections built on it:
//!
//! - [`OrderedMap`] - a key/value map iterated in key order
//! - [`PriorityQueue`] - a min-queue that pops equal priorities first-in, first-out
//!
//! # Example
//!
//! ```
//! use sgtree::{Natural, OrderedMap, PriorityQueue, Scapegoat, Tree};
//!
//! // Sorted inserts would degrade a plain tree to a list; the scapegoat balancer keeps it
//! // logarithmic.
//! let mut tree = Tree::with_balancer(Natural, Scapegoat::new(0.5));
//! tree.extend(1..=1000);
//! assert!(tree.height() < 20);
//!
//! let mut scores = OrderedMap::new();
//! scores.put("Carol", 92);
//! scores.put("Alice", 100);
//! assert_eq!(scores.first_key_value(), Some((&"Alice", &100)));
//!
//! let mut queue = PriorityQueue::new();
//! queue.extend([3, 1, 2]);
//! assert_eq!(queue.pop(), Some(1));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Pluggable ordering** - Any [`Comparator`], including plain closures
//! - **Pluggable balancing** - Any [`Balancer`]; [`Scapegoat`] by default, [`Unbalanced`] for
//!   a plain binary search tree
//! - **Stable node identity** - A [`NodeId`] names the same value across every rotation and
//!   rebuild until that value is deleted
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index, so parent back-links never own
//! anything. Each node tracks the size of its subtree, which lets a rebuild find the median of
//! any subtree in logarithmic time and rotate it into place. Node depth is derived from parent
//! links on demand, keeping rotations O(1).

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
mod raw;

pub mod balance;
pub mod compare;
pub mod ordered_map;
pub mod priority_queue;
pub mod tree;

pub use balance::{Balancer, Restructure, Scapegoat, Unbalanced};
pub use compare::{Comparator, Natural, Reversed};
pub use error::TreeError;
pub use ordered_map::OrderedMap;
pub use priority_queue::PriorityQueue;
pub use tree::{NodeId, NodeRef, Tree};
