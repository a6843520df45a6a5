//! Data models for Academia 360 backend records.
//!
//! The backend is loosely typed: any field may be missing and records
//! carry fields the front end never reads. Every model names the fields
//! it displays, keeps the rest in a flattened `extra` map, and provides
//! display helpers with the fallbacks shown when a field is absent.
//!
//! - `Course`, `CourseDetail`, `Category`, `Pathway`: catalog records
//! - `Announcement`: platform news
//! - `User`, `Admin`, `AdminRole`: people and permissions
//! - `Page`, `RecordId`: shared response shapes

pub mod announcement;
pub mod catalog;
pub mod people;
pub mod record;

pub use announcement::Announcement;
pub use catalog::{Category, Course, CourseDetail, Pathway};
pub use people::{Admin, AdminRole, User};
pub use record::{Page, RecordId};
