pub mod event;
pub mod meeting;
pub mod task;
pub mod user;

pub use event::{Event, EventDraft, EventStatus, NewEventRequest};
pub use meeting::{AgendaItem, Meeting, MeetingStatus, NewMeetingRequest};
pub use task::{NewTaskRequest, Task, TaskDraft, TaskPriority, TaskStatus, TaskUpdate};
pub use user::{User, UserRole};
