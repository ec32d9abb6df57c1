// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use crate::configuration::BrokerOptions;
use crate::routes;
use crate::sts::{Sts, StsApi};
use axum::Router;
use axum::routing::{get, post};
use axum::serve::Serve;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub options: BrokerOptions,
    pub sts: Arc<dyn StsApi>,
}

pub struct Application {
    port: u16,
    server: Serve<TcpListener, Router, Router>,
}

impl Application {
    pub async fn build(options: BrokerOptions) -> Result<Self, std::io::Error> {
        let sts = Arc::new(Sts::new(&options.region).await);

        let address = format!("{}:{}", options.host, options.port);
        let listener = TcpListener::bind(address).await?;
        let port = listener.local_addr()?.port();

        tracing::info!("[broker] listening at http://{}:{}", options.host, port);

        let server = axum::serve(listener, create_router(options, sts));

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Builds the router with the shared state and middleware stack.
///
/// Split out from [`Application::build`] so tests can drive the full
/// pipeline with an injected [`StsApi`] double.
pub fn create_router(options: BrokerOptions, sts: Arc<dyn StsApi>) -> Router {
    let state = Arc::new(AppState { options, sts });

    Router::new()
        .route("/health", get(routes::health))
        .route("/assume-role", post(routes::assume_role))
        .layer(TraceLayer::new_for_http())
        // browser-based callers are expected; bring CORS up permissive
        .layer(CorsLayer::permissive())
        .with_state(state)
}
