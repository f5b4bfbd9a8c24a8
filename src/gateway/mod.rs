//! Network access to the catalog API.
//!
//! [`FetchGateway`] is the only code that talks to the server. It goes through the
//! [`Transport`] trait so tests can script responses with [`mock::MockTransport`].

pub mod fetch;
pub mod mock;
pub mod outcome;
pub mod transport;

pub use fetch::FetchGateway;
pub use outcome::{GatewayFailure, Outcome};
pub use transport::{HttpTransport, Method, Transport, TransportError, TransportResponse};
