//! Domain primitives, ports, and services.
//!
//! Purpose: own the user record model and the orchestration rules that keep
//! local state authoritative while delegating processing downstream. Nothing
//! here knows about HTTP frameworks or concrete clients; adapters reach the
//! domain through [`ports`].
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic error envelope.
//! - `User`, `NewUser`, `UserId`, `UserName`: the local record model.
//! - `ProcessedUser`, `ProcessedData`, `DelegationStatus`: enriched views.
//! - `DelegationClient`: bounded, non-fatal downstream calls.
//! - `UserDirectoryService`: implementation of the `UserDirectory` port.
//! - `TraceId`: request correlation identifier.

pub mod delegation;
pub mod error;
pub mod ports;
pub mod processed_user;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;

pub use self::delegation::{DelegationClient, NotifyOutcome, ProcessingResult};
pub use self::error::{Error, ErrorCode};
pub use self::processed_user::{DelegationStatus, ProcessedData, ProcessedUser};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserId, UserName, UserValidationError};
pub use self::user_directory_service::UserDirectoryService;
