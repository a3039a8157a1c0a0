pub mod catalog;
pub mod leave_request;

use crate::service::leave::LeaveRequestService;
use crate::store::mysql::MySqlRequestStore;

/// The concrete service the HTTP handlers run against.
pub type AppService = LeaveRequestService<MySqlRequestStore>;
