pub use crate::baseline::{SortedLinkedList, SortedVec};
pub use crate::check::{run_correctness, CheckError, CheckReport, Checker};
pub use crate::cmp::{Comparator, NaturalOrder};
pub use crate::coin::{Coin, RngCoin, ScriptedCoin};
pub use crate::config::SkipListConfig;
pub use crate::errors::SkipListError;
pub use crate::skip_list::{Iter, SkipList};
pub use crate::sorted::SortedCollection;

mod baseline;
mod check;
pub mod client;
mod cmp;
mod coin;
mod config;
mod errors;
mod node;
mod skip_list;
mod sorted;
