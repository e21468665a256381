//! Headless state for the referral dashboard: each component owns its local state and
//! exposes the actions a user can take; rendering is plain text.

pub mod candidate_card;
pub mod candidate_list;
pub mod dashboard;
pub mod flash;
pub mod referral_form;
pub mod search_bar;
