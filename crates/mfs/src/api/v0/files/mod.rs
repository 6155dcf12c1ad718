//! MFS endpoints (`/api/v0/files/*`).

pub mod chmod;
pub mod cp;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod read;
pub mod rm;
pub mod stat;

pub use chmod::ChmodRequest;
pub use cp::CpRequest;
pub use ls::{EntryKind, LsEntry, LsRequest, LsResponse};
pub use mkdir::MkdirRequest;
pub use mv::MvRequest;
pub use read::ReadRequest;
pub use rm::RmRequest;
pub use stat::{Mode, StatRequest, StatResponse};
