//! Storage layer (in-memory).

pub mod memory;
pub mod seed;

pub use memory::MemoryDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "User";
    pub const SKILLS: &str = "Skill";
    pub const REQUESTS: &str = "Request";
}
