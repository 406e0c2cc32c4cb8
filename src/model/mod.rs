pub mod board;
pub mod member;
pub mod task;
pub mod timeline;

pub use board::{Board, Intent};
pub use member::{MemberId, TeamMember};
pub use task::{Task, TaskId, TaskPriority};
pub use timeline::{TimeUnit, TimelineConfig};
