pub mod finished;
pub mod initial;
pub mod offer_received;
pub mod request_sent;
