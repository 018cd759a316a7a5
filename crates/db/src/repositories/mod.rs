//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every per-user query takes
//! the owner's id and filters on it, so another user's row reads as absent.

pub mod goal_repo;
pub mod habit_log_repo;
pub mod habit_repo;
pub mod profile_repo;
pub mod session_repo;
pub mod task_repo;
pub mod user_repo;

pub use goal_repo::GoalRepo;
pub use habit_log_repo::HabitLogRepo;
pub use habit_repo::HabitRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
