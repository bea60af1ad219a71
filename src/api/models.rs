use serde::Serialize;
use uuid::Uuid;

use crate::display::DisplayCommand;
use crate::session::SessionSnapshot;

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub state: SessionSnapshot,
    pub commands: Vec<DisplayCommand>,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub state: SessionSnapshot,
    pub commands: Vec<DisplayCommand>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
