pub mod release_publisher;

pub use release_publisher::{ReleasePublisher, ReleaseRequest};
