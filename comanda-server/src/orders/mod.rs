//! Order domain services

pub mod feed;

pub use feed::FeedService;
