pub mod bearer;
pub mod json;
pub mod public_id;

pub use bearer::BearerToken;
pub use json::AppJson;
pub use public_id::PublicBoardId;
