//! Core business logic - framework-agnostic CMS operations.
//!
//! Each entity module follows the same pattern: a filtered, paginated
//! listing, validated create/update with file-backed field handling, and a
//! delete that cleans up stored files best-effort. `slug` and `pager` hold
//! the shared machinery; `gallery` is the one transactional multi-row path.

pub mod achievement;
pub mod article;
pub mod banner;
pub mod category;
pub mod employee;
pub mod extracurricular;
pub mod facility;
pub mod gallery;
pub mod major;
pub mod pager;
pub mod school_profile;
pub mod settings;
pub mod slug;
pub mod user;
