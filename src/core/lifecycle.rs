use thiserror::Error;

use crate::core::extractor::extract_action_items;
use crate::models::{Meeting, MeetingStatus, TaskDraft, User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("only the president can edit or finalize official meeting notes")]
    NotPermitted,
    #[error("meeting is no longer in PLANNED state")]
    NotPlanned,
}

/// What a successful finalization must persist: the frozen notes text and
/// the task drafts extracted from it, in match order.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizeOutcome {
    pub notes: String,
    pub drafts: Vec<TaskDraft>,
}

/// Official notes may only be edited by the president while the meeting is
/// still PLANNED. A guard in the core, not a disabled form control: callers
/// must check this before writing.
pub fn authorize_notes_edit(meeting: &Meeting, actor: &User) -> Result<(), LifecycleError> {
    if actor.role != UserRole::President {
        return Err(LifecycleError::NotPermitted);
    }
    if meeting.status != MeetingStatus::Planned {
        return Err(LifecycleError::NotPlanned);
    }
    Ok(())
}

/// The one-way PLANNED -> COMPLETED transition. Validates the actor and the
/// meeting state, then runs a single extraction pass over the submitted
/// notes. Zero extracted drafts is a valid outcome, not an error. On any
/// error nothing may be applied; the returned outcome is the complete set of
/// changes for the caller to persist.
pub fn finalize_meeting(
    meeting: &Meeting,
    actor: &User,
    notes: &str,
    users: &[User],
) -> Result<FinalizeOutcome, LifecycleError> {
    authorize_notes_edit(meeting, actor)?;
    Ok(FinalizeOutcome {
        notes: notes.to_string(),
        drafts: extract_action_items(notes, users),
    })
}
