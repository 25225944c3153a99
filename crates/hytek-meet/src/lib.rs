//! Swim meet assembly, heat seeding and running order.
//!
//! A [`Meet`] is built from an HYV event table and filled with the entries
//! of an HY3 file. The HY3 document stays the owner of every entry; meet
//! events only hold [`hytek_hy3::EntryRef`] positions into it.
//!
//! Typical flow:
//!
//! 1. [`Meet::from_hyv`] and [`Meet::populate_entries`]
//! 2. [`Meet::merge_age_groups`] to race age groups together
//! 3. [`seeding::assign_heats`] to write heat and lane stubs into the HY3 tree
//! 4. [`Order::sort`] and [`Order::split_by_session`] for the running order
//! 5. [`results::meet_to_results`] / [`results::apply_results`] around the
//!    race itself

mod error;
mod meet;
pub mod order;
pub mod results;
pub mod seeding;

pub use error::{MeetError, Result};
pub use meet::{Entry, Event, Meet, compare_entries, sort_entries};
pub use order::{Order, OrderDirective};
pub use results::{ResultRecord, apply_results, meet_to_results};
pub use seeding::{SeedingOptions, assign_all_heats, assign_heats, sort_by_heat_and_lane};
