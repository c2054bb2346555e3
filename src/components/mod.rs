//! UI Components
//!
//! Reusable Leptos components.

mod command_panel;
mod delete_confirmation;
mod expired_tasks_table;
mod form_field;
mod layout;
mod list_state;
mod login_form;
mod notice_toast;
mod pager;
mod task_edit_form;
mod task_forms;
mod task_table;
mod user_forms;
mod user_table;

pub use command_panel::{ReportCommandPanel, TaskCommandPanel, UserCommandPanel};
pub use delete_confirmation::{DeleteConfirmation, DeleteTarget};
pub use expired_tasks_table::ExpiredTasksTable;
pub use layout::Layout;
pub use login_form::LoginForm;
pub use notice_toast::NoticeToasts;
pub use task_edit_form::TaskEditForm;
pub use task_forms::TaskAddForm;
pub use task_table::TaskTable;
pub use user_forms::{UserAddForm, UserEditForm};
pub use user_table::UserTable;
