mod channel;
mod config;
mod errors;
mod resolver;

pub use channel::{LinkChannel, RawChannel};
pub use config::ResolverConfig;
pub use errors::ResolveError;
pub use resolver::Resolver;
