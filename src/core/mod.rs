pub mod payload;
pub mod runner;
pub mod stats;
pub mod task;
pub mod user;

pub use crate::domain::model::{
    Classification, LineItem, OrderPayload, RequestEvent, RequestOutcome, TransportResponse,
};
pub use crate::domain::ports::{EventSink, Transport};
pub use crate::utils::error::Result;
