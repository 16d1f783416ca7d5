#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed request execution for courier
//!
//! A [`ResponseDecoder`] sends a prepared request through a
//! [`Transport`](courier_core::Transport), decodes the JSON body into the
//! caller's type, and hands exactly one outcome to a designated
//! [`DeliveryContext`].
//!
//! ```ignore
//! let queue = SerialQueue::new("app-main")?;
//! let decoder = ResponseDecoder::new(ReqwestTransport::new(), queue);
//!
//! let request = reqwest::Client::new().get("https://api.example.com/users/7").build()?;
//! let subscription = decoder.run::<Option<User>>(request).subscribe(|outcome| match outcome {
//!     Ok(envelope) => println!("{:?}", envelope.value()),
//!     Err(ApiError::Http(payload)) => eprintln!("{}", payload.message),
//!     Err(ApiError::Unknown { .. }) => eprintln!("something went wrong"),
//! });
//! ```

mod call;
mod decoder;
mod delivery;
#[cfg(feature = "reqwest")]
mod reqwest_transport;

pub use call::{Call, Subscription};
pub use courier_core::*;
pub use decoder::ResponseDecoder;
pub use delivery::{DeliveryContext, Job, RuntimeContext, SerialQueue};
#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;
