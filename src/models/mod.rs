pub mod task;
pub mod user;

pub use task::{NewTask, Priority, Task, TaskInput};
pub use user::UserRecord;
