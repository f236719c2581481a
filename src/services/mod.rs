pub mod event_service;
pub mod meeting_service;

pub use event_service::EventService;
pub use meeting_service::MeetingService;
