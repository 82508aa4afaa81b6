mod api;
pub mod backend;
mod context;
mod error;
pub mod lookup;
mod model;
mod server;
pub mod util;

#[cfg(test)]
mod test_util;

use axum::Router;

use crate::{
    context::Context,
    lookup::Gateway,
};
pub use crate::{
    error::{
        Error,
        LookupError,
    },
    model::{
        Lookup,
        NullableStar,
    },
    server::Server,
};

#[derive(Clone, Debug, Default)]
pub struct Builder {
    gateway: Option<Gateway>,
}

impl Builder {
    pub fn with_gateway(mut self, gateway: Gateway) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Builds the HTTP routes.
    ///
    /// # Panics
    ///
    /// Panics if no gateway was provided.
    pub fn build(self) -> Router<()> {
        let context = Context {
            gateway: self.gateway.expect("no lookup gateway provided"),
        };

        crate::api::router().with_state(context)
    }
}
