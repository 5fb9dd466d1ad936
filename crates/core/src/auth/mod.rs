mod error;
mod functions;
mod traits;
mod types;

pub use error::AuthError;
pub use functions::{
    check_basic_credentials, constant_time_eq, decode_basic_header, generate_session_id,
    lookup_token, parse_pairs,
};
pub use traits::{Result, SessionRepository};
pub use types::{BasicCredentials, SessionData, SessionId};
