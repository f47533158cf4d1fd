pub mod account;
pub mod email;
pub mod response;
pub mod subscriber;
