pub mod account;
pub mod task;

pub use account::{Account, NewAccount, StoredAccount};
pub use task::{Task, TaskInput, TaskPatch, TaskStatus};
